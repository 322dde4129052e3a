//! Infexion Core - Single-player solver
//!
//! This crate provides the core logic for single-player Infexion:
//! - Board geometry (7x7 toroidal hex grid with axial coordinates)
//! - Tokens, board state and the spread rule
//! - Closest-pair selection and A* pathfinding
//! - Greedy move loop with a move cap
//! - Board files (CSV/JSON), random boards and ASCII rendering

pub mod board;
pub mod error;
pub mod game;
pub mod render;
pub mod search;
pub mod setup;
pub mod solver;

// Re-exports for convenient access
pub use board::{Direction, Hex, DIRECTIONS, GRID_SIZE};
pub use error::{BoardError, SearchError, SolveError};
pub use game::{Action, Board, Color, Token, MAX_POWER};
pub use render::{apply_ansi, render_board};
pub use search::{closest_pair, next_action, shortest_path};
pub use setup::CellRecord;
pub use solver::{solve, Solution, SolveOutcome, Solver, SolverConfig, DEFAULT_MAX_MOVES};
