//! Solve command - run the greedy solver on one board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_board(), solve_board(), report_solution()
//! - Level 3: rendering hooks
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use infexion_core::{
    render_board, Board, Color, Solution, SolveOutcome, Solver, SolverConfig, DEFAULT_MAX_MOVES,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Board file (.json, otherwise r,q,color,power CSV); defaults to the sample board
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Solve a random board with up to this many tokens
    #[arg(long, value_name = "TOKENS", conflicts_with = "input")]
    pub random: Option<usize>,

    /// Moves allowed before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    pub max_moves: usize,

    /// Render the board before the first move and after every move
    #[arg(long)]
    pub render: bool,

    /// Color-code rendered boards
    #[arg(long, requires = "render")]
    pub ansi: bool,

    /// Output the solution as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// 1. Load or generate the board
/// 2. Solve it in place
/// 3. Report the actions; fail if Blue survived
pub fn run(args: SolveArgs, seed: Option<u64>) -> Result<()> {
    let mut board = load_board(&args, seed)?;

    tracing::info!(
        "Solving board: {} red, {} blue (max {} moves)",
        board.count(Color::Red),
        board.count(Color::Blue),
        args.max_moves
    );

    let solution = solve_board(&mut board, &args)?;

    report_solution(&solution, &args)?;

    match solution.outcome {
        SolveOutcome::Solved => {
            tracing::info!("Solved in {} moves", solution.actions.len());
            Ok(())
        }
        SolveOutcome::MoveLimitReached => {
            bail!("No solution within {} moves", args.max_moves)
        }
        SolveOutcome::Stranded => {
            bail!(
                "Red eliminated after {} moves with {} blue remaining",
                solution.actions.len(),
                board.count(Color::Blue)
            )
        }
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the board named by the arguments
fn load_board(args: &SolveArgs, seed: Option<u64>) -> Result<Board> {
    if let Some(path) = &args.input {
        return Board::load(path)
            .with_context(|| format!("Failed to load board: {}", path.display()));
    }

    if let Some(max_tokens) = args.random {
        let mut rng = create_rng(seed);
        return Board::random(&mut rng, max_tokens).context("Failed to generate board");
    }

    Board::sample().context("Failed to build sample board")
}

/// Solve the board, rendering along the way if asked
fn solve_board(board: &mut Board, args: &SolveArgs) -> Result<Solution> {
    let solver = Solver::new(SolverConfig::default().with_max_moves(args.max_moves));

    if !args.render {
        return solver.solve(board).context("Solver failed");
    }

    if args.ansi {
        // --ansi colors even when stdout is not a terminal
        colored::control::set_override(true);
    }

    println!("{}", render_board(board, args.ansi));
    solver
        .solve_with(board, |action, after| {
            println!("{}", action);
            println!("{}", render_board(after, args.ansi));
        })
        .context("Solver failed")
}

/// Print the action list
fn report_solution(solution: &Solution, args: &SolveArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(solution).context("Failed to encode solution")?;
        println!("{}", json);
    } else {
        print!("{}", format_actions(solution));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// One `SPREAD(r, q, dr, dq)` line per action
fn format_actions(solution: &Solution) -> String {
    solution
        .actions
        .iter()
        .map(|action| format!("{}\n", action))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SolveArgs {
        SolveArgs {
            input: None,
            random: None,
            max_moves: DEFAULT_MAX_MOVES,
            render: false,
            ansi: false,
            json: false,
        }
    }

    #[test]
    fn test_load_board_defaults_to_sample() {
        let board = load_board(&args(), None).unwrap();
        assert_eq!(board, Board::sample().unwrap());
    }

    #[test]
    fn test_load_board_random_is_seeded() {
        let args = SolveArgs {
            random: Some(8),
            ..args()
        };
        let a = load_board(&args, Some(5)).unwrap();
        let b = load_board(&args, Some(5)).unwrap();
        assert_eq!(a, b);
        assert!(a.len() <= 8);
    }

    #[test]
    fn test_load_board_missing_file() {
        let args = SolveArgs {
            input: Some(PathBuf::from("/nonexistent/board.csv")),
            ..args()
        };
        let err = load_board(&args, None).unwrap_err();
        assert!(err.to_string().contains("Failed to load board"));
    }

    #[test]
    fn test_solve_sample() {
        let mut board = Board::sample().unwrap();
        let solution = solve_board(&mut board, &args()).unwrap();
        assert_eq!(solution.outcome, SolveOutcome::Solved);

        let text = format_actions(&solution);
        assert_eq!(text.lines().next(), Some("SPREAD(5, 6, -1, 1)"));
        assert_eq!(text.lines().count(), solution.actions.len());
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
