//! Pipeline configuration.

use std::{fs, path::Path, path::PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    solver::{MAX_SEARCH_DEPTH, SearchConfig, SolverConfig},
    table::CompressorConfig,
};

/// On-disk format for a solve's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Sorted 6-byte compiled records
    #[default]
    Binary,
    /// Retained states keyed by canonical key
    Json,
    /// Full solved table as MessagePack
    #[value(name = "msgpack")]
    #[serde(rename = "msgpack")]
    MsgPack,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Binary => "bin",
            ExportFormat::Json => "json",
            ExportFormat::MsgPack => "msgpack",
        }
    }
}

/// Settings for a full solve.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
///
/// # Examples
///
/// ```
/// use tactictoe::app::{ExportFormat, PipelineConfig};
///
/// let config = PipelineConfig::default()
///     .with_max_passes(256)
///     .with_prune_distance(2)
///     .with_format(ExportFormat::Json);
/// assert_eq!(config.compressor.prune_distance, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub solver: SolverConfig,
    pub compressor: CompressorConfig,
    pub search: SearchConfig,
    pub format: ExportFormat,
    /// Where to write the export; `None` keeps results in memory
    pub output: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.solver.max_passes = max_passes;
        self
    }

    pub fn with_prune_distance(mut self, prune_distance: u32) -> Self {
        self.compressor.prune_distance = prune_distance;
        self
    }

    pub fn with_search_depth(mut self, max_depth: u32) -> Self {
        self.search.max_depth = max_depth;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Load a configuration file, filling missing fields with defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_passes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "solver.max_passes must be at least 1".to_string(),
            });
        }
        if self.search.max_depth == 0 {
            return Err(Error::InvalidConfiguration {
                message: "search.max_depth must be at least 1".to_string(),
            });
        }
        if self.search.max_depth > MAX_SEARCH_DEPTH {
            return Err(Error::InvalidConfiguration {
                message: format!("search.max_depth must be at most {MAX_SEARCH_DEPTH}"),
            });
        }
        Ok(())
    }
}
