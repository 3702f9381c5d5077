//! MessagePack dump of the full solved table.
//!
//! Unlike the compiled records, this keeps every canonical state with its score,
//! full best-move set and children, so it can be reloaded for analysis.

use std::{fs::File, path::Path};

use crate::{
    Result, error::Error, pipeline::Solution, ports::TableExporter, solver::SolvedTable,
};

/// MessagePack-based solved-table exporter.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tactictoe::adapters::MsgPackExporter;
///
/// let solved = MsgPackExporter.load(Path::new("solved.msgpack"))?;
/// println!("{} states", solved.len());
/// # Ok::<(), tactictoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackExporter;

impl MsgPackExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn save(&self, solved: &SolvedTable, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, solved).map_err(|e| Error::SerializationContext {
            operation: "serialize solved table to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    pub fn load(&self, path: &Path) -> Result<SolvedTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let solved =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize solved table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        Ok(solved)
    }
}

impl TableExporter for MsgPackExporter {
    fn export(&self, solution: &Solution, path: &Path) -> Result<()> {
        self.save(&solution.solved, path)
    }

    fn format_name(&self) -> &'static str {
        "msgpack"
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::pipeline::fixtures::sample_solution;

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("solved.msgpack");

        let solution = sample_solution();
        let exporter = MsgPackExporter::new();
        exporter.export(&solution, &file_path).expect("Failed to save");
        let loaded = exporter.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, solution.solved);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let result = MsgPackExporter.load(Path::new("/tmp/nonexistent_tactictoe.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"\xc1\xc1\xc1").expect("Failed to write");

        let result = MsgPackExporter.load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }
}
