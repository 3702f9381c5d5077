//! Adapters implementing domain ports.
//!
//! Exporters write solve results to disk; oracles answer position queries from
//! a table or a live search.

pub mod binary_exporter;
pub mod json_exporter;
pub mod msgpack_exporter;
pub mod oracles;

pub use binary_exporter::BinaryExporter;
pub use json_exporter::JsonExporter;
pub use msgpack_exporter::MsgPackExporter;
pub use oracles::{FallbackOracle, SearchOracle, SolvedOracle, TableOracle};
