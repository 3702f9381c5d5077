//! Wiring of ports to adapters.

use std::path::Path;

use crate::{
    Result,
    adapters::{
        BinaryExporter, FallbackOracle, JsonExporter, MsgPackExporter, SearchOracle, TableOracle,
    },
    app::ExportFormat,
    ports::{MoveOracle, TableExporter},
    solver::{NegamaxEngine, SearchConfig},
};

/// Factory for the adapters a host needs.
///
/// # Examples
///
/// ```
/// use tactictoe::app::{App, ExportFormat};
///
/// let app = App::new();
/// assert_eq!(app.exporter(ExportFormat::Json).format_name(), "json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    search: SearchConfig,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn exporter(&self, format: ExportFormat) -> Box<dyn TableExporter> {
        match format {
            ExportFormat::Binary => Box::new(BinaryExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
            ExportFormat::MsgPack => Box::new(MsgPackExporter::new()),
        }
    }

    pub fn search_oracle(&self) -> SearchOracle {
        SearchOracle::new(NegamaxEngine::new(self.search))
    }

    /// Compiled table at `table` with live search behind it, or search alone.
    pub fn query_oracle(&self, table: Option<&Path>) -> Result<Box<dyn MoveOracle>> {
        match table {
            Some(path) => {
                let table = BinaryExporter::new().load(path)?;
                Ok(Box::new(FallbackOracle::new(
                    TableOracle::new(table),
                    self.search_oracle(),
                )))
            }
            None => Ok(Box::new(self.search_oracle())),
        }
    }
}
