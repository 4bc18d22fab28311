//! Dense 2D grid container and position arithmetic.
//!
//! Positions are signed so neighbor offsets can step off the edge of a grid
//! and be rejected by bounds checks instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A (row, column) coordinate on a grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position one step away in `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Taxicab distance to `other`. An admissible A* heuristic for
    /// unit-cost cardinal movement.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Compass direction of one grid step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The four cardinal directions, clockwise from north.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Row/column delta of one step, with rows growing downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Rotate clockwise by `turns` quarter turns. Negative turns rotate
    /// counter-clockwise.
    pub fn rotate_90(self, turns: i32) -> Direction {
        let idx = Self::ALL
            .iter()
            .position(|d| *d == self)
            .map_or(0, |i| i as i32);
        Self::ALL[(idx + 2 * turns).rem_euclid(8) as usize]
    }
}

/// Row-major dense grid of `T` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Build a grid from rows. Errors with [`Error::RaggedGrid`] if any row
    /// differs in width from the first.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(height * width);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedGrid { line: idx + 1 });
            }
            cells.extend(row);
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a `height` x `width` grid with every cell set to `value`.
    pub fn filled(height: usize, width: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: vec![value; height * width],
            width,
            height,
        }
    }

    /// Parse a grid from text, one row per non-blank line. `cell` maps each
    /// character to a value, or `None` for an unrecognized character.
    pub fn parse(input: &str, cell: impl Fn(char) -> Option<T>) -> Result<Self> {
        let mut rows: Vec<Vec<T>> = Vec::new();
        let mut first_width = None;
        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(trimmed.len());
            for ch in trimmed.chars() {
                row.push(cell(ch).ok_or(Error::UnknownCell { ch, line })?);
            }
            if *first_width.get_or_insert(row.len()) != row.len() {
                return Err(Error::RaggedGrid { line });
            }
            rows.push(row);
        }
        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `pos` falls inside the grid bounds.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    /// The cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// Replace the cell at `pos`. Errors with [`Error::InvalidPoint`] when
    /// out of bounds.
    pub fn set(&mut self, pos: Position, value: T) -> Result<()> {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = value;
                Ok(())
            }
            None => Err(Error::InvalidPoint {
                row: pos.row,
                col: pos.col,
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| Position::new(row as i32, col as i32))
        })
    }

    /// Every position and its value in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// In-bounds neighbors of `pos`, in the order `directions` lists them.
    /// The fixed order keeps searches over the grid deterministic.
    pub fn neighbors<'a>(
        &'a self,
        pos: Position,
        directions: &'a [Direction],
    ) -> impl Iterator<Item = Position> + 'a {
        directions
            .iter()
            .map(move |d| pos.offset(*d))
            .filter(move |p| self.contains(*p))
    }

    /// First position whose value satisfies `predicate`, in row-major order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<Position> {
        self.iter()
            .find(|(_, value)| predicate(value))
            .map(|(pos, _)| pos)
    }

    /// Render the grid as text, one character per cell.
    pub fn render(&self, fmt: impl Fn(&T) -> char) -> String {
        self.render_with(|_, value| fmt(value))
    }

    /// Render with access to each cell's position, for overlays.
    pub fn render_with(&self, fmt: impl Fn(Position, &T) -> char) -> String {
        let mut out = String::with_capacity(self.height * (self.width + 1));
        for row in 0..self.height {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.width {
                let pos = Position::new(row as i32, col as i32);
                out.push(fmt(pos, &self.cells[row * self.width + col]));
            }
        }
        out
    }
}
