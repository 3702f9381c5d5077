//! tactictoe CLI - solver and table tools for three-mark tic-tac-toe
//!
//! - Solving the full game and exporting compiled tables
//! - Querying positions against a table or live search
//! - Inspecting table files
//! - Watching self-play

use anyhow::Result;
use clap::{Parser, Subcommand};
use tactictoe::cli::{commands, config::CommonArgs};

#[derive(Parser)]
#[command(name = "tactictoe")]
#[command(version, about = "Exact solver for three-mark tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the game and export a table
    Solve(commands::solve::SolveArgs),

    /// Score a position from a table, falling back to search
    Query(commands::query::QueryArgs),

    /// Search a position with the online engine
    Search(commands::search::SearchArgs),

    /// Summarize a compiled table file
    Inspect(commands::inspect::InspectArgs),

    /// Self-play from a position
    Play(commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.common.log_level())
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Solve(args) => commands::solve::execute(args, &cli.common),
        Commands::Query(args) => commands::query::execute(args),
        Commands::Search(args) => commands::search::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Play(args) => commands::play::execute(args),
    }
}
