//! Human-inspectable JSON export.
//!
//! One object keyed by the big-endian `u32` value of each retained canonical
//! key, holding its score and full best-move set.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result, error::Error, pipeline::Solution, ports::TableExporter, types::Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEntry {
    /// Positive when X wins
    pub score: i8,
    /// Canonical coordinates
    pub moves: Vec<Position>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    /// The exported map, in key order.
    pub fn entries(&self, solution: &Solution) -> Result<BTreeMap<u32, JsonEntry>> {
        solution
            .compression
            .retained
            .iter()
            .map(|key| {
                let entry = solution.solved.get(key).ok_or_else(|| {
                    Error::consistency(format!("retained state {key} has no solved entry"))
                })?;
                Ok((
                    key.as_u32(),
                    JsonEntry {
                        score: entry.score,
                        moves: entry.best_moves.clone(),
                    },
                ))
            })
            .collect()
    }
}

impl TableExporter for JsonExporter {
    fn export(&self, solution: &Solution, path: &Path) -> Result<()> {
        let entries = self.entries(solution)?;
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &entries)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {path:?}"),
            source,
        })?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        "json"
    }
}
