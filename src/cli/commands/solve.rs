//! Solve command - enumerate, solve, compress and export

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{ExportFormat, PipelineConfig},
    cli::{
        config::CommonArgs,
        output::{format_number, format_outcome, print_kv, print_section, print_subsection},
    },
    pipeline::{Pipeline, ProgressObserver, Solution},
};

#[derive(Parser, Debug)]
#[command(about = "Solve the game and export the result")]
pub struct SolveArgs {
    /// Output file path; the format's extension is added when missing
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format (defaults to the config file's, then binary)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<ExportFormat>,

    /// Drop decided states at most this many plies from their outcome
    #[arg(long)]
    pub prune_distance: Option<u32>,

    /// Give up after this many value-iteration passes
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// JSON pipeline configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SolveArgs {
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        if let Some(distance) = self.prune_distance {
            config = config.with_prune_distance(distance);
        }
        if let Some(passes) = self.max_passes {
            config = config.with_max_passes(passes);
        }
        let mut output = self.output.clone();
        if output.extension().is_none() {
            output.set_extension(config.format.extension());
        }
        config = config.with_output(output);
        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: SolveArgs, common: &CommonArgs) -> Result<()> {
    let config = args.pipeline_config()?;
    let format = config.format;
    let output = config.output.clone().unwrap_or_else(|| args.output.clone());

    let mut pipeline = Pipeline::new(config);
    if common.progress() {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let solution = pipeline.run().context("solve failed")?;

    print_summary(&solution);
    print_subsection("Export");
    print_kv("Format", &format!("{format:?}").to_lowercase());
    print_kv("Written to", &output.display().to_string());
    Ok(())
}

fn print_summary(solution: &Solution) {
    print_section("Solve summary");

    let stats = &solution.stats;
    print_subsection("State space");
    print_kv("Canonical states", &format_number(stats.states));
    print_kv("Terminal", &format_number(stats.terminal));
    print_kv("X to move", &format_number(stats.x_to_move));
    print_kv("O to move", &format_number(stats.o_to_move));
    print_kv("Max depth", &stats.max_depth.to_string());

    let report = &solution.report;
    print_subsection("Values");
    print_kv("Passes", &report.passes.to_string());
    print_kv("Win magnitude", &report.win_score.to_string());
    print_kv("X wins", &format_number(report.x_wins));
    print_kv("O wins", &format_number(report.o_wins));
    print_kv("Draws", &format_number(report.draws));
    let root = solution.solved.score(&solution.solved.root()).unwrap_or_default();
    print_kv("Initial position", &format_outcome(root as i32));

    let compression = &solution.compression.stats;
    print_subsection("Compiled table");
    print_kv("Terminal dropped", &format_number(compression.terminal_dropped));
    print_kv("Pruned", &format_number(compression.pruned));
    print_kv("Retained", &format_number(compression.retained));
    print_kv("Merged pairs", &format_number(compression.merged_pairs));
    print_kv("Records", &format_number(compression.records));
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SolveArgs,
    }

    #[test]
    fn test_flags_override_defaults() {
        let harness = Harness::parse_from([
            "solve",
            "--output",
            "table.json",
            "--format",
            "json",
            "--prune-distance",
            "2",
        ]);
        let config = harness.args.pipeline_config().unwrap();
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.compressor.prune_distance, 2);
        assert_eq!(config.solver.max_passes, 512);
        assert_eq!(config.output, Some(PathBuf::from("table.json")));
    }

    #[test]
    fn test_zero_passes_rejected() {
        let harness = Harness::parse_from(["solve", "-o", "t.bin", "--max-passes", "0"]);
        assert!(harness.args.pipeline_config().is_err());
    }

    #[test]
    fn test_missing_extension_follows_format() {
        let harness = Harness::parse_from(["solve", "-o", "table", "-f", "msgpack"]);
        let config = harness.args.pipeline_config().unwrap();
        assert_eq!(config.output, Some(PathBuf::from("table.msgpack")));
    }
}
