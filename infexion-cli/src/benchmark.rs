//! Benchmark command - solve random boards and measure outcomes
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_boards(), solve_boards(), report_results()
//! - Level 3: solve_single_board(), compute_statistics()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use infexion_core::{
    Board, BoardError, SolveError, SolveOutcome, Solver, SolverConfig, DEFAULT_MAX_MOVES,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Number of random boards to solve
    #[arg(long, default_value = "1000")]
    pub boards: usize,

    /// Maximum tokens per generated board
    #[arg(long, default_value = "10")]
    pub max_tokens: usize,

    /// Moves allowed per board before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    pub max_moves: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of solving one board
#[derive(Clone, Debug)]
struct BoardRecord {
    tokens: usize,
    outcome: SolveOutcome,
    moves: usize,
}

/// Aggregated benchmark results
#[derive(Clone, Debug)]
struct BenchmarkSummary {
    boards: usize,
    solved: usize,
    move_limit: usize,
    stranded: usize,
    avg_moves: f64,
    max_moves: usize,
    avg_tokens: f64,
    total_time: Duration,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Generate seeded random boards
/// 2. Solve them in parallel
/// 3. Report outcome counts and timing
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting benchmark: {} boards, up to {} tokens, {} move cap",
        args.boards,
        args.max_tokens,
        args.max_moves
    );

    let boards = generate_boards(args.boards, args.max_tokens, seed)
        .context("Failed to generate boards")?;

    let start = Instant::now();
    let records = solve_boards(&boards, args.max_moves).context("Benchmark solve failed")?;
    let summary = compute_statistics(&records, start.elapsed());

    if summary.move_limit > 0 {
        tracing::warn!("{} boards hit the move cap", summary.move_limit);
    }

    report_results(&summary, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Generate boards from one seeded stream
fn generate_boards(
    count: usize,
    max_tokens: usize,
    seed: Option<u64>,
) -> Result<Vec<Board>, BoardError> {
    let mut rng = create_rng(seed);
    (0..count)
        .map(|_| Board::random(&mut rng, max_tokens))
        .collect()
}

/// Solve every board in parallel; each task owns its own copy
fn solve_boards(boards: &[Board], max_moves: usize) -> Result<Vec<BoardRecord>, SolveError> {
    let solver = Solver::new(SolverConfig::default().with_max_moves(max_moves));

    boards
        .par_iter()
        .map(|board| solve_single_board(&solver, board))
        .collect()
}

/// Report benchmark results
fn report_results(summary: &BenchmarkSummary, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(summary);
    } else {
        print_text_results(summary);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn solve_single_board(solver: &Solver, board: &Board) -> Result<BoardRecord, SolveError> {
    let mut board = board.clone();
    let tokens = board.len();
    let solution = solver.solve(&mut board)?;

    Ok(BoardRecord {
        tokens,
        outcome: solution.outcome,
        moves: solution.actions.len(),
    })
}

/// Compute aggregate statistics from board records
fn compute_statistics(records: &[BoardRecord], total_time: Duration) -> BenchmarkSummary {
    let count = |outcome: SolveOutcome| records.iter().filter(|r| r.outcome == outcome).count();

    let solved: Vec<&BoardRecord> = records
        .iter()
        .filter(|r| r.outcome == SolveOutcome::Solved)
        .collect();

    let avg_moves = if solved.is_empty() {
        0.0
    } else {
        solved.iter().map(|r| r.moves).sum::<usize>() as f64 / solved.len() as f64
    };

    let avg_tokens = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.tokens).sum::<usize>() as f64 / records.len() as f64
    };

    BenchmarkSummary {
        boards: records.len(),
        solved: solved.len(),
        move_limit: count(SolveOutcome::MoveLimitReached),
        stranded: count(SolveOutcome::Stranded),
        avg_moves,
        max_moves: solved.iter().map(|r| r.moves).max().unwrap_or(0),
        avg_tokens,
        total_time,
    }
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

fn percent(part: usize, total: usize) -> f64 {
    if total > 0 {
        part as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m {:.1}s", d.as_secs() / 60, (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0)
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(summary: &BenchmarkSummary) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        boards: usize,
        solved: usize,
        move_limit: usize,
        stranded: usize,
        solve_rate: f64,
        avg_moves: f64,
        max_moves: usize,
        avg_tokens: f64,
        total_time_ms: u64,
        boards_per_second: f64,
    }

    let output = JsonOutput {
        boards: summary.boards,
        solved: summary.solved,
        move_limit: summary.move_limit,
        stranded: summary.stranded,
        solve_rate: percent(summary.solved, summary.boards) / 100.0,
        avg_moves: summary.avg_moves,
        max_moves: summary.max_moves,
        avg_tokens: summary.avg_tokens,
        total_time_ms: summary.total_time.as_millis() as u64,
        boards_per_second: boards_per_second(summary),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(summary: &BenchmarkSummary) {
    let total = summary.boards;

    println!("\n=== Infexion Benchmark Results ===");
    println!("Boards:      {} (avg {:.1} tokens)", total, summary.avg_tokens);
    println!("Solved:      {} ({:.1}%)", summary.solved, percent(summary.solved, total));
    println!("Move cap:    {} ({:.1}%)", summary.move_limit, percent(summary.move_limit, total));
    println!("Stranded:    {} ({:.1}%)", summary.stranded, percent(summary.stranded, total));
    println!("Avg moves:   {:.2} (max {})", summary.avg_moves, summary.max_moves);
    println!(
        "Time:        {} ({:.0} boards/s)",
        format_duration(summary.total_time),
        boards_per_second(summary)
    );
}

fn boards_per_second(summary: &BenchmarkSummary) -> f64 {
    let secs = summary.total_time.as_secs_f64();
    if secs > 0.0 {
        summary.boards as f64 / secs
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
