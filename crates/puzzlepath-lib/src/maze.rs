//! Grid maze domain adapter for the search engine.
//!
//! A maze is a dense character grid with a unique start cell, a unique end
//! cell, and walls. Cells are nodes, adjacency is the four cardinal
//! directions, and every step costs one. The Manhattan distance to the end
//! cell is admissible under those rules, so maze queries run as A*.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::grid::{Direction, Grid, Position};
use crate::search::{FoundPath, GraphSearcher};

/// One cell of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MazeCell {
    Open,
    Wall,
    Start,
    End,
}

impl MazeCell {
    /// Map a maze character to its cell, or `None` for anything else.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(MazeCell::Open),
            '#' => Some(MazeCell::Wall),
            'S' => Some(MazeCell::Start),
            'E' => Some(MazeCell::End),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            MazeCell::Open => '.',
            MazeCell::Wall => '#',
            MazeCell::Start => 'S',
            MazeCell::End => 'E',
        }
    }

    /// Whether the search may stand on this cell.
    pub fn is_walkable(self) -> bool {
        !matches!(self, MazeCell::Wall)
    }
}

/// A parsed maze with its unique start and end positions.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid<MazeCell>,
    start: Position,
    end: Position,
}

impl Maze {
    /// Parse a maze from text. Requires exactly one `S` and exactly one `E`.
    pub fn parse(input: &str) -> Result<Self> {
        let grid = Grid::parse(input, MazeCell::from_char)?;
        let start = unique_cell(&grid, MazeCell::Start)?;
        let end = unique_cell(&grid, MazeCell::End)?;
        Ok(Self { grid, start, end })
    }

    pub fn grid(&self) -> &Grid<MazeCell> {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Find one optimal route from the start cell to the end cell.
    pub fn solve(&self) -> Result<FoundPath<Position>> {
        self.best_path(self.start)
    }

    /// Render the maze with `O` overlaid on the open cells of `path`.
    pub fn render_path(&self, path: &[Position]) -> String {
        let on_path: HashSet<Position> = path.iter().copied().collect();
        self.grid.render_with(|pos, cell| {
            if *cell == MazeCell::Open && on_path.contains(&pos) {
                'O'
            } else {
                cell.to_char()
            }
        })
    }
}

impl GraphSearcher for Maze {
    type Node = Position;

    fn neighbors(&self, node: &Position) -> Vec<Position> {
        self.grid
            .neighbors(*node, &Direction::CARDINAL)
            .filter(|p| self.grid.get(*p).is_some_and(|cell| cell.is_walkable()))
            .collect()
    }

    fn edge_weight(&self, _from: &Position, _to: &Position) -> f64 {
        1.0
    }

    fn is_terminal(&self, node: &Position) -> bool {
        *node == self.end
    }

    fn heuristic(&self, node: &Position) -> f64 {
        f64::from(node.manhattan_distance(self.end))
    }
}

fn unique_cell(grid: &Grid<MazeCell>, cell: MazeCell) -> Result<Position> {
    let positions: Vec<Position> = grid
        .iter()
        .filter(|(_, value)| **value == cell)
        .map(|(pos, _)| pos)
        .collect();
    match positions.as_slice() {
        [] => Err(Error::MissingCell {
            cell: cell.to_char(),
        }),
        [only] => Ok(*only),
        _ => Err(Error::AmbiguousCell {
            cell: cell.to_char(),
            count: positions.len(),
        }),
    }
}
