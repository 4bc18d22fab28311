use thiserror::Error;

/// Convenient result alias for the puzzlepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised by `best_path` when no terminal node is reachable from the start.
    #[error("no path found from the start node to any terminal node")]
    NoPathFound,

    /// Raised when a grid access falls outside the grid bounds.
    #[error("invalid point ({row}, {col}); grid is {width}x{height}")]
    InvalidPoint {
        row: i32,
        col: i32,
        width: usize,
        height: usize,
    },

    /// Raised when parsed grid rows have unequal widths.
    #[error("ragged grid: line {line} differs in width from the first row")]
    RaggedGrid { line: usize },

    /// Raised when a maze character has no cell mapping.
    #[error("unknown cell character '{ch}' on line {line}")]
    UnknownCell { ch: char, line: usize },

    /// Raised when a maze lacks a required unique cell (start or end).
    #[error("maze has no '{cell}' cell")]
    MissingCell { cell: char },

    /// Raised when a maze contains more than one of a cell that must be unique.
    #[error("maze has {count} '{cell}' cells; expected exactly one")]
    AmbiguousCell { cell: char, count: usize },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
