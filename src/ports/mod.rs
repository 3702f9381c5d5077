//! Ports (trait boundaries) for external dependencies.
//!
//! The solving core owns these traits; adapters and the CLI implement them.

pub mod exporter;
pub mod observer;
pub mod oracle;

pub use exporter::TableExporter;
pub use observer::{NullObserver, SolveObserver};
pub use oracle::MoveOracle;
