//! Solve pipeline: enumerate → solve → compress → export
//!
//! Each stage reports to the attached [`SolveObserver`]s. The pipeline itself
//! never prints; progress display is an observer concern.

pub mod observers;

use std::path::Path;

use log::info;

pub use observers::{ProgressObserver, SolveLog};

use crate::{
    Result,
    app::{App, ExportFormat, PipelineConfig},
    ports::SolveObserver,
    solver::{RetrogradeSolver, SolveReport, SolvedTable},
    table::{Compression, Compressor},
    tictactoe::{StateSpace, StateSpaceStats},
};

/// Everything a solve produces
#[derive(Debug, Clone)]
pub struct Solution {
    pub stats: StateSpaceStats,
    pub report: SolveReport,
    pub solved: SolvedTable,
    pub compression: Compression,
}

pub struct Pipeline {
    config: PipelineConfig,
    observers: Vec<Box<dyn SolveObserver>>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SolveObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Solve the full game and export to the configured output, if any.
    pub fn run(&mut self) -> Result<Solution> {
        self.config.validate()?;
        let space = StateSpace::enumerate()?;
        let solution = self.solve_space(&space)?;

        if let Some(output) = &self.config.output {
            export(&solution, self.config.format, output)?;
        }
        Ok(solution)
    }

    /// Solve and compress an already enumerated space.
    pub fn solve_space(&mut self, space: &StateSpace) -> Result<Solution> {
        let stats = space.stats();
        self.observers.on_enumerated(&stats)?;

        let (solved, report) =
            RetrogradeSolver::new(space, self.config.solver).solve(&mut self.observers)?;

        let compression = Compressor::new(self.config.compressor).compress(space, &solved)?;
        self.observers.on_compressed(&compression.stats)?;

        Ok(Solution {
            stats,
            report,
            solved,
            compression,
        })
    }
}

/// Write `solution` to `path` in `format`.
pub fn export(solution: &Solution, format: ExportFormat, path: &Path) -> Result<()> {
    let exporter = App::new().exporter(format);
    exporter.export(solution, path)?;
    info!("wrote {} export to {}", exporter.format_name(), path.display());
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{fixtures::*, *};
    use crate::{solver::SolverConfig, table::CompressionStats};

    #[derive(Default)]
    struct Events(Rc<RefCell<Vec<String>>>);

    impl SolveObserver for Events {
        fn on_enumerated(&mut self, stats: &StateSpaceStats) -> Result<()> {
            self.0.borrow_mut().push(format!("enumerated {}", stats.states));
            Ok(())
        }

        fn on_pass(&mut self, pass: usize, changes: usize) -> Result<()> {
            self.0.borrow_mut().push(format!("pass {pass} {changes}"));
            Ok(())
        }

        fn on_solved(&mut self, report: &SolveReport) -> Result<()> {
            self.0.borrow_mut().push(format!("solved {}", report.passes));
            Ok(())
        }

        fn on_compressed(&mut self, stats: &CompressionStats) -> Result<()> {
            self.0.borrow_mut().push(format!("compressed {}", stats.records));
            Ok(())
        }
    }

    #[test]
    fn test_observer_sees_stages_in_order() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = Pipeline::new(PipelineConfig::default().with_prune_distance(0))
            .with_observer(Box::new(Events(Rc::clone(&events))));
        pipeline.solve_space(&sample_space()).unwrap();

        // pass 1 sets A, pass 2 sets B, pass 3 is quiet
        assert_eq!(
            *events.borrow(),
            vec![
                "enumerated 3",
                "pass 1 1",
                "pass 2 1",
                "pass 3 0",
                "solved 3",
                "compressed 2",
            ]
        );
    }

    #[test]
    fn test_sample_solution() {
        let solution = sample_solution();
        assert_eq!(solution.stats.states, 3);
        assert_eq!(solution.report.win_score, 3);
        assert_eq!(solution.report.x_wins, 3);
        assert_eq!(solution.compression.stats.terminal_dropped, 1);
        assert_eq!(solution.compression.retained.len(), 2);
    }

    #[test]
    fn test_invalid_config_fails_before_enumerating() {
        let config = PipelineConfig {
            solver: SolverConfig::default().with_max_passes(0),
            ..PipelineConfig::default()
        };
        assert!(Pipeline::new(config).run().is_err());
    }
}
