//! puzzlepath library entry points.
//!
//! This crate exposes a generic best-path search engine, the grid container
//! it is most often run over, and a maze adapter wiring the two together.
//! Higher-level consumers (the CLI, puzzle solutions) should only depend on
//! the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod grid;
pub mod maze;
pub mod search;

pub use error::{Error, Result};
pub use grid::{Direction, Grid, Position};
pub use maze::{Maze, MazeCell};
pub use search::{FoundPath, GraphSearcher};
