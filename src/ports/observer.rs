//! Observer port - progress reporting for the solving pipeline
//!
//! The pipeline stays free of terminal output; hosts plug in an observer to
//! drive progress bars or collect diagnostics.

use crate::{
    Result, solver::SolveReport, table::CompressionStats, tictactoe::StateSpaceStats,
};

/// Observer trait for monitoring a pipeline run
///
/// The methods are called in this order:
/// 1. `on_enumerated(stats)` - once the reachable state space is built
/// 2. `on_pass(pass, changes)` - after each value-iteration pass
/// 3. `on_solved(report)` - once the fixed point is reached and normalized
/// 4. `on_compressed(stats)` - once the compiled table is built
///
/// # Examples
///
/// ```
/// use tactictoe::ports::SolveObserver;
///
/// struct PassCounter(usize);
///
/// impl SolveObserver for PassCounter {
///     fn on_pass(&mut self, _pass: usize, _changes: usize) -> tactictoe::Result<()> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait SolveObserver {
    fn on_enumerated(&mut self, _stats: &StateSpaceStats) -> Result<()> {
        Ok(())
    }

    /// Called after value-iteration pass `pass` (1-based) changed `changes` states.
    fn on_pass(&mut self, _pass: usize, _changes: usize) -> Result<()> {
        Ok(())
    }

    fn on_solved(&mut self, _report: &SolveReport) -> Result<()> {
        Ok(())
    }

    fn on_compressed(&mut self, _stats: &CompressionStats) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SolveObserver for NullObserver {}

/// Fan events out to every observer in order, stopping at the first error.
impl SolveObserver for Vec<Box<dyn SolveObserver>> {
    fn on_enumerated(&mut self, stats: &StateSpaceStats) -> Result<()> {
        self.iter_mut().try_for_each(|o| o.on_enumerated(stats))
    }

    fn on_pass(&mut self, pass: usize, changes: usize) -> Result<()> {
        self.iter_mut().try_for_each(|o| o.on_pass(pass, changes))
    }

    fn on_solved(&mut self, report: &SolveReport) -> Result<()> {
        self.iter_mut().try_for_each(|o| o.on_solved(report))
    }

    fn on_compressed(&mut self, stats: &CompressionStats) -> Result<()> {
        self.iter_mut().try_for_each(|o| o.on_compressed(stats))
    }
}
