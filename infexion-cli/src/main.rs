//! Infexion CLI - Command-line interface
//!
//! Commands:
//! - solve: Solve one board and print the spread actions
//! - benchmark: Solve many random boards and report outcomes

mod benchmark;
mod solve_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "infexion")]
#[command(about = "Single-player Infexion solver")]
struct Cli {
    /// Random seed for generated boards
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board file, a random board, or the sample board
    Solve(solve_cmd::SolveArgs),
    /// Solve random boards in parallel and report outcomes
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => solve_cmd::run(args, cli.seed),
        Commands::Benchmark(args) => benchmark::run(args, cli.seed),
    }
}
