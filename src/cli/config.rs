//! Shared arguments for CLI commands

use std::path::Path;

use clap::Args;
use log::LevelFilter;

use crate::{Result, app::PipelineConfig, solver::SearchConfig, tictactoe::BoardState};

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Hide progress spinners
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn progress(&self) -> bool {
        !self.quiet
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

/// Parse a board argument, accepting `-` for the empty board.
pub fn parse_board(label: &str) -> Result<BoardState> {
    if label == "-" {
        Ok(BoardState::new())
    } else {
        BoardState::from_label(label)
    }
}

/// Search settings from an optional pipeline config file, with `depth` taking
/// precedence.
pub fn search_config(config: Option<&Path>, depth: Option<u32>) -> Result<SearchConfig> {
    let mut pipeline = match config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(depth) = depth {
        pipeline = pipeline.with_search_depth(depth);
        pipeline.validate()?;
    }
    Ok(pipeline.search)
}
