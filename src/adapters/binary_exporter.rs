//! Raw record file: the compiled table's sorted 6-byte records, no header.

use std::{fs, path::Path};

use crate::{
    Result, error::Error, pipeline::Solution, ports::TableExporter, table::CompiledTable,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryExporter;

impl BinaryExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn save(&self, table: &CompiledTable, path: &Path) -> Result<()> {
        fs::write(path, table.to_bytes()).map_err(|source| Error::Io {
            operation: format!("write table {path:?}"),
            source,
        })
    }

    /// Read and validate a record file.
    pub fn load(&self, path: &Path) -> Result<CompiledTable> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            operation: format!("read table {path:?}"),
            source,
        })?;
        CompiledTable::from_bytes(&bytes)
    }
}

impl TableExporter for BinaryExporter {
    fn export(&self, solution: &Solution, path: &Path) -> Result<()> {
        self.save(&solution.compression.table, path)
    }

    fn format_name(&self) -> &'static str {
        "binary"
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{pipeline::fixtures::sample_solution, table::RECORD_SIZE};

    #[test]
    fn test_binary_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("table.bin");

        let solution = sample_solution();
        BinaryExporter.export(&solution, &file_path).expect("Failed to save");

        let size = fs::metadata(&file_path).expect("Failed to stat").len() as usize;
        assert_eq!(size, solution.compression.table.len() * RECORD_SIZE);

        let loaded = BinaryExporter.load(&file_path).expect("Failed to load");
        assert_eq!(loaded, solution.compression.table);
    }

    #[test]
    fn test_truncated_file_is_corrupt() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("table.bin");
        fs::write(&file_path, [0u8; 5]).expect("Failed to write");

        assert!(matches!(
            BinaryExporter.load(&file_path),
            Err(Error::CorruptTable { .. })
        ));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let result = BinaryExporter.save(
            &CompiledTable::default(),
            Path::new("/invalid_dir_tactictoe/table.bin"),
        );
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
