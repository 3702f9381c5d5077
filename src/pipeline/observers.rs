//! Observer implementations for the solve pipeline

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::SolveObserver,
    solver::SolveReport,
    table::CompressionStats,
    tictactoe::StateSpaceStats,
};

/// Spinner observer - shows solve progress on the terminal
#[derive(Default)]
pub struct ProgressObserver {
    spinner: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(&mut self) -> Result<&ProgressBar> {
        let pb = match self.spinner.take() {
            Some(pb) => pb,
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} [{elapsed_precise}] {msg}")
                        .map_err(|e| crate::Error::ProgressBarTemplate {
                            message: e.to_string(),
                        })?,
                );
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
        };
        Ok(self.spinner.insert(pb))
    }
}

impl SolveObserver for ProgressObserver {
    fn on_enumerated(&mut self, stats: &StateSpaceStats) -> Result<()> {
        let states = stats.states;
        self.spinner()?
            .set_message(format!("solving {states} canonical states"));
        Ok(())
    }

    fn on_pass(&mut self, pass: usize, changes: usize) -> Result<()> {
        self.spinner()?
            .set_message(format!("pass {pass}: {changes} values changed"));
        Ok(())
    }

    fn on_solved(&mut self, report: &SolveReport) -> Result<()> {
        self.spinner()?.set_message(format!(
            "converged after {} passes, compressing",
            report.passes
        ));
        Ok(())
    }

    fn on_compressed(&mut self, stats: &CompressionStats) -> Result<()> {
        if let Some(pb) = self.spinner.take() {
            pb.finish_with_message(format!("{} records", stats.records));
        }
        Ok(())
    }
}

/// Log observer - keeps every event for later inspection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveLog {
    pub states: Option<usize>,
    pub changes_per_pass: Vec<usize>,
    pub solved_passes: Option<usize>,
    pub records: Option<usize>,
}

impl SolveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once every stage has reported
    pub fn is_complete(&self) -> bool {
        self.states.is_some() && self.solved_passes.is_some() && self.records.is_some()
    }
}

impl SolveObserver for SolveLog {
    fn on_enumerated(&mut self, stats: &StateSpaceStats) -> Result<()> {
        self.states = Some(stats.states);
        Ok(())
    }

    fn on_pass(&mut self, _pass: usize, changes: usize) -> Result<()> {
        self.changes_per_pass.push(changes);
        Ok(())
    }

    fn on_solved(&mut self, report: &SolveReport) -> Result<()> {
        self.solved_passes = Some(report.passes);
        Ok(())
    }

    fn on_compressed(&mut self, stats: &CompressionStats) -> Result<()> {
        self.records = Some(stats.records);
        Ok(())
    }
}
