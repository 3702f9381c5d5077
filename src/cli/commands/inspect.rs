//! Inspect command - summarize a compiled table file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::BinaryExporter,
    cli::output::{format_number, print_section, print_stats_table, print_subsection},
    table::{CompiledTable, RECORD_SIZE},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Summarize a compiled binary table")]
pub struct InspectArgs {
    /// Path to a binary table written by `solve --format binary`
    pub path: PathBuf,

    /// Also print the first N records
    #[arg(long, default_value_t = 0)]
    pub records: usize,
}

/// Counts over a compiled table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSummary {
    pub records: usize,
    pub both_turns: usize,
    pub x_only: usize,
    pub o_only: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub max_magnitude: i8,
}

impl TableSummary {
    pub fn from_table(table: &CompiledTable) -> Self {
        let mut summary = Self {
            records: table.len(),
            ..Self::default()
        };

        for record in table.records() {
            match (record.has(Player::X), record.has(Player::O)) {
                (true, true) => summary.both_turns += 1,
                (true, false) => summary.x_only += 1,
                _ => summary.o_only += 1,
            }
            for score in [Player::X, Player::O].into_iter().filter_map(|p| record.score(p)) {
                match score.signum() {
                    1 => summary.x_wins += 1,
                    -1 => summary.o_wins += 1,
                    _ => summary.draws += 1,
                }
                summary.max_magnitude = summary.max_magnitude.max(score.abs());
            }
        }
        summary
    }
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let table = BinaryExporter::new()
        .load(&args.path)
        .with_context(|| format!("loading {}", args.path.display()))?;
    let summary = TableSummary::from_table(&table);

    print_section(&format!("Table: {}", args.path.display()));
    print_stats_table(&[
        ("Records", format_number(summary.records)),
        ("Bytes", format_number(summary.records * RECORD_SIZE)),
        ("Both turns", format_number(summary.both_turns)),
        ("X to move only", format_number(summary.x_only)),
        ("O to move only", format_number(summary.o_only)),
    ]);

    print_subsection("Scores");
    print_stats_table(&[
        ("X wins", format_number(summary.x_wins)),
        ("O wins", format_number(summary.o_wins)),
        ("Draws", format_number(summary.draws)),
        ("Largest magnitude", summary.max_magnitude.to_string()),
    ]);

    if args.records > 0 {
        print_subsection("Records");
        for record in table.records().iter().take(args.records) {
            println!("  {record}");
        }
    }
    Ok(())
}
