//! Error types for board mutation, search and solving

use crate::board::Hex;
use crate::game::Color;

/// Errors raised while building or mutating a board
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("No token at {0} to spread")]
    MissingToken(Hex),

    #[error("Token power {0} outside 1..=6")]
    InvalidPower(u8),

    #[error("Cell ({r}, {q}) is off the board")]
    OutOfRange { r: i32, q: i32 },

    #[error("Cell {0} listed more than once")]
    DuplicateCell(Hex),

    #[error("({dr}, {dq}) is not a hex direction")]
    InvalidDirection { dr: i32, dq: i32 },

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the pathfinder
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("No {0} tokens left to pair")]
    EmptyColorClass(Color),

    #[error("Path step {from} -> {to} is not between adjacent cells")]
    NotAdjacent { from: Hex, to: Hex },
}

/// Errors that abort a solve
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
