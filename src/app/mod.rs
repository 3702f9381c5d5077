//! Application layer: configuration and adapter wiring.
//!
//! ```text
//! PipelineConfig ──► Pipeline ──► Solution ──► App::exporter(format)
//!                                                   │
//!                          TableExporter port ◄─────┘
//!
//! App::query_oracle(table) ──► FallbackOracle(TableOracle, SearchOracle)
//! ```

pub mod config;
pub mod container;

pub use config::{ExportFormat, PipelineConfig};
pub use container::App;
