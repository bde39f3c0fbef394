//! opreport-core
//!
//! Core library that rebuilds an oprofile `opreport` XML report into an
//! in-memory tree: binaries/modules own the symbols sampled inside them, each
//! symbol links to its source metadata, and that metadata carries per-line
//! sample counts.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends. Rendering (percentages, sorting, thresholds) belongs to
//! the caller.

pub mod config;
pub mod model;
pub mod parser;

pub use config::{DetailOrder, ParseOptions};
pub use model::{BinModule, DetailData, Symbol, SymbolData, SymbolDetails};
pub use parser::{parse_file, parse_reader, parse_str, OpreportParser, ReportError, ReportResult};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
