//! Generic best-path search over caller-defined graphs.
//!
//! [`GraphSearcher`] is implemented by any domain type that can enumerate
//! neighbors, weigh edges, and recognize terminal nodes. The three query
//! methods (one optimal path, all tied-optimal paths, full cost table) are
//! instantiations of a single relaxation loop that runs Dijkstra's algorithm,
//! or A* when [`GraphSearcher::heuristic`] is overridden.
//!
//! Edge weights must be non-negative and heuristics must never overestimate
//! the true remaining cost; neither is validated at runtime, and violating
//! either silently invalidates the optimality guarantees.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::error::{Error, Result};

/// A path discovered by a search, together with its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath<N> {
    /// Nodes from the start to the terminal, both inclusive.
    pub nodes: Vec<N>,
    /// Accumulated edge cost along `nodes`.
    pub cost: f64,
}

/// Capability contract a domain type implements to become searchable.
pub trait GraphSearcher {
    /// Caller-supplied node identity. No ordering is required; queue
    /// tie-breaking uses insertion order instead.
    type Node: Clone + Eq + Hash;

    /// Candidate successor nodes of `node`. Re-queried on every visit; the
    /// engine never caches or re-iterates a returned sequence.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Cost of the edge from `from` to adjacent `to`. Must be >= 0.
    fn edge_weight(&self, from: &Self::Node, to: &Self::Node) -> f64;

    /// Whether `node` satisfies the search goal.
    fn is_terminal(&self, node: &Self::Node) -> bool;

    /// Lower-bound estimate of the remaining cost from `node` to any
    /// terminal. Override with an admissible estimate to search with A*;
    /// the default of zero degrades to plain Dijkstra.
    fn heuristic(&self, _node: &Self::Node) -> f64 {
        0.0
    }

    /// Find one optimal path from `start` to the nearest terminal node.
    ///
    /// Ties are broken deterministically by insertion order, so repeated
    /// calls return the same path. Errors with [`Error::NoPathFound`] when no
    /// terminal is reachable.
    fn best_path(&self, start: Self::Node) -> Result<FoundPath<Self::Node>> {
        let outcome = run_search(self, start, Prune::StrictlyWorse, true, true);
        match outcome.paths.into_iter().next() {
            Some((nodes, cost)) => Ok(FoundPath { nodes, cost }),
            None => Err(Error::NoPathFound),
        }
    }

    /// Enumerate every optimal path from `start`, as distinct node sequences
    /// of minimal terminal cost.
    ///
    /// Returns the paths and their shared cost. An unreachable terminal set
    /// is not an error here: the result is an empty vector and
    /// `f64::INFINITY`.
    fn all_best_paths(&self, start: Self::Node) -> (Vec<Vec<Self::Node>>, f64) {
        let outcome = run_search(self, start, Prune::StrictlyWorse, false, true);
        let best = outcome.best_cost;
        // Tied paths sum the same weights, so their costs compare exactly.
        let paths = outcome
            .paths
            .into_iter()
            .filter(|(_, cost)| *cost == best)
            .map(|(nodes, _)| nodes)
            .collect();
        (paths, best)
    }

    /// Compute the cost of the cheapest route from `start` to every
    /// reachable node. Terminal checks are disabled; the search runs until
    /// the frontier drains. Nodes absent from the map are unreachable.
    fn all_reachable_costs(&self, start: Self::Node) -> HashMap<Self::Node, f64> {
        run_search(self, start, Prune::WorseOrEqual, false, false).costs
    }
}

/// When a relaxation is rejected against the best known cost of the target.
///
/// Path queries use [`Prune::StrictlyWorse`] so equal-cost rediscoveries stay
/// live (an equal-cost route may reach a different terminal). The cost-table
/// query uses [`Prune::WorseOrEqual`]: only the minimum per node matters, and
/// re-expanding ties is wasted work.
#[derive(Debug, Clone, Copy)]
enum Prune {
    StrictlyWorse,
    WorseOrEqual,
}

impl Prune {
    fn rejects(self, tentative: f64, known: f64) -> bool {
        match self {
            Prune::StrictlyWorse => tentative > known,
            Prune::WorseOrEqual => tentative >= known,
        }
    }
}

/// One frontier candidate. Entries are append-only and never mutated, so the
/// `parent` index forms a stable chain back to the start entry for path
/// reconstruction.
#[derive(Debug, Clone)]
struct Entry<N> {
    node: N,
    cost: f64,
    parent: Option<usize>,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Heap handle for an arena entry. Ordering considers only the priority and
/// the insertion sequence (the arena index), never the node or its cost, so
/// node types need no `Ord` and equal-priority entries pop in FIFO order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueHandle {
    priority: FloatOrd,
    seq: usize,
}

impl Ord for QueueHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap on (priority, seq).
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct SearchOutcome<N> {
    /// Every terminal path popped from the frontier, with its cost. May
    /// include entries above the best cost; callers filter.
    paths: Vec<(Vec<N>, f64)>,
    best_cost: f64,
    costs: HashMap<N, f64>,
}

/// The generalized relaxation loop shared by all three public queries.
///
/// All state (arena, frontier, cost table) is scoped to one call. The
/// frontier uses lazy invalidation rather than decrease-key: superseded
/// entries stay queued and relax harmlessly when popped, since relaxations
/// are always checked against the cost table and weights are non-negative.
fn run_search<G>(
    searcher: &G,
    start: G::Node,
    prune: Prune,
    early_exit: bool,
    use_terminals: bool,
) -> SearchOutcome<G::Node>
where
    G: GraphSearcher + ?Sized,
{
    let mut arena: Vec<Entry<G::Node>> = Vec::new();
    let mut frontier: BinaryHeap<QueueHandle> = BinaryHeap::new();
    let mut known: HashMap<G::Node, f64> = HashMap::new();

    known.insert(start.clone(), 0.0);
    push_entry(searcher, &mut arena, &mut frontier, start, 0.0, None);

    let mut best_cost = f64::INFINITY;
    let mut paths: Vec<(Vec<G::Node>, f64)> = Vec::new();
    let mut expanded = 0usize;

    while let Some(handle) = frontier.pop() {
        let idx = handle.seq;
        expanded += 1;

        if use_terminals && searcher.is_terminal(&arena[idx].node) {
            let cost = arena[idx].cost;
            best_cost = best_cost.min(cost);
            paths.push((reconstruct(&arena, idx), cost));
            if early_exit {
                break;
            }
        }

        let current = arena[idx].node.clone();
        let current_cost = arena[idx].cost;

        for neighbor in searcher.neighbors(&current) {
            let tentative = current_cost + searcher.edge_weight(&current, &neighbor);
            let known_cost = known.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            // Once a terminal is known, nothing costlier can improve on it.
            if prune.rejects(tentative, known_cost) || tentative > best_cost {
                continue;
            }
            known.insert(neighbor.clone(), tentative);
            push_entry(searcher, &mut arena, &mut frontier, neighbor, tentative, Some(idx));
        }
    }

    tracing::debug!(
        expanded,
        terminal_paths = paths.len(),
        best_cost,
        "search completed"
    );

    SearchOutcome {
        paths,
        best_cost,
        costs: known,
    }
}

fn push_entry<G>(
    searcher: &G,
    arena: &mut Vec<Entry<G::Node>>,
    frontier: &mut BinaryHeap<QueueHandle>,
    node: G::Node,
    cost: f64,
    parent: Option<usize>,
) where
    G: GraphSearcher + ?Sized,
{
    let priority = FloatOrd(cost + searcher.heuristic(&node));
    let seq = arena.len();
    arena.push(Entry { node, cost, parent });
    frontier.push(QueueHandle { priority, seq });
}

fn reconstruct<N: Clone>(arena: &[Entry<N>], idx: usize) -> Vec<N> {
    let mut path = Vec::new();
    let mut current = Some(idx);
    while let Some(i) = current {
        path.push(arena[i].node.clone());
        current = arena[i].parent;
    }
    path.reverse();
    path
}
