//! Exporter port for writing solve results.

use std::path::Path;

use crate::{Result, pipeline::Solution};

/// Port for persisting the artifacts of a solve.
///
/// Each format decides which part of the [`Solution`] it writes: the compiled
/// record table, a human-readable map, or the full solved table.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tactictoe::{pipeline::Solution, ports::TableExporter};
///
/// fn save_all<E: TableExporter>(
///     exporter: &E,
///     solution: &Solution,
///     path: &Path,
/// ) -> tactictoe::Result<()> {
///     exporter.export(solution, path)
/// }
/// ```
pub trait TableExporter {
    /// Write `solution` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or serialization fails.
    fn export(&self, solution: &Solution, path: &Path) -> Result<()>;

    /// Short format name for logs and CLI output
    fn format_name(&self) -> &'static str;
}
