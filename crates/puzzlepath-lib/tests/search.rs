use std::collections::{HashMap, HashSet};

use puzzlepath_lib::{Error, GraphSearcher};

/// Directed graph fixture. Edges are kept in insertion order so neighbor
/// enumeration is deterministic across runs.
struct TestGraph {
    edges: Vec<(&'static str, &'static str, f64)>,
    terminals: Vec<&'static str>,
    heuristic: HashMap<&'static str, f64>,
}

impl TestGraph {
    fn new(edges: &[(&'static str, &'static str, f64)], terminals: &[&'static str]) -> Self {
        Self {
            edges: edges.to_vec(),
            terminals: terminals.to_vec(),
            heuristic: HashMap::new(),
        }
    }

    fn with_heuristic(mut self, estimates: &[(&'static str, f64)]) -> Self {
        self.heuristic = estimates.iter().copied().collect();
        self
    }
}

impl GraphSearcher for TestGraph {
    type Node = &'static str;

    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node> {
        self.edges
            .iter()
            .filter(|(from, _, _)| from == node)
            .map(|(_, to, _)| *to)
            .collect()
    }

    fn edge_weight(&self, from: &Self::Node, to: &Self::Node) -> f64 {
        self.edges
            .iter()
            .find(|(f, t, _)| f == from && t == to)
            .map(|(_, _, weight)| *weight)
            .unwrap_or(f64::INFINITY)
    }

    fn is_terminal(&self, node: &Self::Node) -> bool {
        self.terminals.contains(node)
    }

    fn heuristic(&self, node: &Self::Node) -> f64 {
        self.heuristic.get(node).copied().unwrap_or(0.0)
    }
}

/// A -> B -> D beats A -> C -> D (cost 2 vs 5); D is the only terminal.
fn diamond() -> TestGraph {
    TestGraph::new(
        &[
            ("A", "B", 1.0),
            ("A", "C", 4.0),
            ("B", "D", 1.0),
            ("C", "D", 1.0),
        ],
        &["D"],
    )
}

/// Both branches of the diamond cost 2.
fn tied_diamond() -> TestGraph {
    TestGraph::new(
        &[
            ("A", "B", 1.0),
            ("A", "C", 1.0),
            ("B", "D", 1.0),
            ("C", "D", 1.0),
        ],
        &["D"],
    )
}

fn path_set(paths: &[Vec<&'static str>]) -> HashSet<Vec<&'static str>> {
    paths.iter().cloned().collect()
}

#[test]
fn diamond_best_path_is_optimal() {
    let found = diamond().best_path("A").expect("path exists");
    assert_eq!(found.nodes, vec!["A", "B", "D"]);
    assert_eq!(found.cost, 2.0);
}

#[test]
fn diamond_all_best_paths_excludes_worse_route() {
    let (paths, cost) = diamond().all_best_paths("A");
    assert_eq!(paths, vec![vec!["A", "B", "D"]]);
    assert_eq!(cost, 2.0);
}

#[test]
fn diamond_cost_table_is_complete() {
    let costs = diamond().all_reachable_costs("A");
    let expected: HashMap<&str, f64> =
        [("A", 0.0), ("B", 1.0), ("C", 4.0), ("D", 2.0)].into_iter().collect();
    assert_eq!(costs, expected);
}

#[test]
fn tied_routes_are_all_enumerated() {
    let (paths, cost) = tied_diamond().all_best_paths("A");
    assert_eq!(cost, 2.0);
    assert_eq!(
        path_set(&paths),
        path_set(&[vec!["A", "B", "D"], vec!["A", "C", "D"]])
    );
}

#[test]
fn three_way_tie_is_fully_enumerated() {
    let graph = TestGraph::new(
        &[
            ("A", "B", 1.0),
            ("A", "C", 1.0),
            ("A", "D", 1.0),
            ("B", "T", 1.0),
            ("C", "T", 1.0),
            ("D", "T", 1.0),
        ],
        &["T"],
    );

    let (paths, cost) = graph.all_best_paths("A");
    assert_eq!(cost, 2.0);
    assert_eq!(
        path_set(&paths),
        path_set(&[
            vec!["A", "B", "T"],
            vec!["A", "C", "T"],
            vec!["A", "D", "T"],
        ])
    );
}

#[test]
fn large_cost_ties_are_matched_exactly() {
    // Tied routes at a magnitude far above f64::EPSILON, with a near-miss
    // route one unit costlier. Only exact-cost ties count.
    let graph = TestGraph::new(
        &[
            ("A", "B", 1.0e12),
            ("A", "C", 1.0e12),
            ("A", "X", 1.0e12 + 1.0),
            ("B", "D", 1.0e12),
            ("C", "D", 1.0e12),
            ("X", "D", 1.0e12),
        ],
        &["D"],
    );

    let (paths, cost) = graph.all_best_paths("A");
    assert_eq!(cost, 2.0e12);
    assert_eq!(
        path_set(&paths),
        path_set(&[vec!["A", "B", "D"], vec!["A", "C", "D"]])
    );
}

#[test]
fn tie_break_follows_insertion_order() {
    // Both routes cost 2; B is enqueued before C, so the B route wins.
    let graph = tied_diamond();
    let found = graph.best_path("A").expect("path exists");
    assert_eq!(found.nodes, vec!["A", "B", "D"]);
}

#[test]
fn repeated_queries_are_deterministic() {
    let graph = tied_diamond();
    let first = graph.all_best_paths("A");
    for _ in 0..5 {
        assert_eq!(graph.all_best_paths("A"), first);
        assert_eq!(
            graph.best_path("A").expect("path exists").nodes,
            vec!["A", "B", "D"]
        );
    }
}

#[test]
fn unreachable_terminal_is_an_error_for_best_path() {
    let graph = TestGraph::new(&[("A", "B", 1.0)], &["Z"]);
    let err = graph.best_path("A").unwrap_err();
    assert!(matches!(err, Error::NoPathFound));
}

#[test]
fn unreachable_terminal_is_an_empty_answer_for_all_paths() {
    let graph = TestGraph::new(&[("A", "B", 1.0)], &["Z"]);
    let (paths, cost) = graph.all_best_paths("A");
    assert!(paths.is_empty());
    assert_eq!(cost, f64::INFINITY);
}

#[test]
fn cost_table_runs_past_terminal_nodes() {
    // D is terminal, but the cost table query disables terminal checks and
    // keeps relaxing through it.
    let graph = TestGraph::new(
        &[
            ("A", "B", 1.0),
            ("B", "D", 1.0),
            ("D", "E", 1.0),
        ],
        &["D"],
    );

    let costs = graph.all_reachable_costs("A");
    assert_eq!(costs.get("E"), Some(&3.0));
    assert_eq!(costs.len(), 4);
}

#[test]
fn admissible_heuristic_matches_dijkstra() {
    let plain = diamond().best_path("A").expect("path exists");
    let guided = diamond()
        .with_heuristic(&[("A", 2.0), ("B", 1.0), ("C", 1.0), ("D", 0.0)])
        .best_path("A")
        .expect("path exists");

    assert_eq!(guided.nodes, plain.nodes);
    assert_eq!(guided.cost, plain.cost);
}

#[test]
fn costlier_terminal_is_not_reported_as_best() {
    // Both C and D are terminals, but the route ending at C costs 4.
    let graph = TestGraph::new(
        &[
            ("A", "B", 1.0),
            ("A", "C", 4.0),
            ("B", "D", 1.0),
        ],
        &["C", "D"],
    );

    let (paths, cost) = graph.all_best_paths("A");
    assert_eq!(cost, 2.0);
    assert_eq!(paths, vec![vec!["A", "B", "D"]]);
}

#[test]
fn terminal_start_is_a_trivial_path() {
    let graph = TestGraph::new(&[("A", "B", 1.0)], &["A"]);
    let found = graph.best_path("A").expect("path exists");
    assert_eq!(found.nodes, vec!["A"]);
    assert_eq!(found.cost, 0.0);
}
