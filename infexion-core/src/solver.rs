//! Greedy move loop
//!
//! Each iteration pairs the closest Red and Blue tokens, walks the first
//! step of the shortest path between them, spreads, and re-plans from the
//! mutated board. The strategy is greedy and carries no termination proof,
//! so every solve runs under a move cap.

use serde::Serialize;

use crate::error::SolveError;
use crate::game::{Action, Board, Color};
use crate::search::next_action;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default move cap per solve
pub const DEFAULT_MAX_MOVES: usize = 256;

/// Solver configuration
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Moves allowed before giving up
    pub max_moves: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

impl SolverConfig {
    /// Set the move cap
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// How a solve ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveOutcome {
    /// No Blue tokens remain
    Solved,
    /// The move cap was hit with Blue still on the board
    MoveLimitReached,
    /// Every Red token is gone while Blue remains
    Stranded,
}

/// Result of a solve: outcome plus every action taken
#[derive(Clone, Debug, Serialize)]
pub struct Solution {
    pub outcome: SolveOutcome,
    pub actions: Vec<Action>,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.outcome == SolveOutcome::Solved
    }
}

// ============================================================================
// SOLVER
// ============================================================================

/// Greedy closest-pair solver
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve in place, leaving `board` in its final state
    pub fn solve(&self, board: &mut Board) -> Result<Solution, SolveError> {
        self.solve_with(board, |_, _| {})
    }

    /// Solve in place, calling `observe` after every applied action
    pub fn solve_with<F>(&self, board: &mut Board, mut observe: F) -> Result<Solution, SolveError>
    where
        F: FnMut(&Action, &Board),
    {
        let mut actions = Vec::new();

        let outcome = loop {
            if board.is_won() {
                break SolveOutcome::Solved;
            }
            if board.count(Color::Red) == 0 {
                tracing::debug!("No red tokens left with {} blue remaining", board.count(Color::Blue));
                break SolveOutcome::Stranded;
            }
            if actions.len() >= self.config.max_moves {
                tracing::debug!("Move cap of {} reached", self.config.max_moves);
                break SolveOutcome::MoveLimitReached;
            }

            let action = next_action(board)?;
            board.apply(action)?;

            tracing::debug!(
                "Move {}: {} (red={}, blue={})",
                actions.len() + 1,
                action,
                board.count(Color::Red),
                board.count(Color::Blue)
            );

            observe(&action, board);
            actions.push(action);
        };

        Ok(Solution { outcome, actions })
    }
}

/// Solve with the default configuration
pub fn solve(board: &mut Board) -> Result<Solution, SolveError> {
    Solver::default().solve(board)
}

// ============================================================================
// TESTS
// ============================================================================
