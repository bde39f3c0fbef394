//! Report model: binaries/modules, the symbols sampled in them, and the
//! per-line breakdown of each symbol.
//!
//! Every type here is built once by [`crate::parser::OpreportParser`] and is
//! read-only afterwards. Re-parsing builds a fresh tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Sample count for one source line of a symbol.
///
/// Within one [`SymbolDetails`] the line number is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailData {
    /// Line number as written in the report; `"0"` when unknown.
    pub line: String,
    pub count: u64,
}

impl DetailData {
    pub fn new(line: impl Into<String>, count: u64) -> Self {
        Self { line: line.into(), count }
    }
}

/// Per-line breakdown for one `symboldata` id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolDetails {
    pub id: String,
    pub details: Vec<DetailData>,
}

impl SymbolDetails {
    pub fn new(id: impl Into<String>, details: Vec<DetailData>) -> Self {
        Self { id: id.into(), details }
    }

    /// Sum of all line counts, saturating at `u64::MAX`.
    pub fn total_count(&self) -> u64 {
        self.details.iter().fold(0u64, |acc, d| acc.saturating_add(d.count))
    }

    /// Look up the record for a given line.
    pub fn line(&self, line: &str) -> Option<&DetailData> {
        self.details.iter().find(|d| d.line == line)
    }
}

/// Static metadata for a symbol: name, source file, declaration line.
///
/// Shared (via `Arc`) by every [`Symbol`] that references the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolData {
    pub id: String,
    pub name: String,
    /// Source file; `"??"` when the report omits it.
    pub file: String,
    /// Declaration line; `"0"` when the report omits it.
    pub line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Arc<SymbolDetails>>,
}

/// One sampled occurrence of a symbol inside a binary or module.
///
/// Equality is by value over `(idref, count, data)`; two instances parsed from
/// different places in the report compare equal when they describe the same
/// sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub idref: String,
    pub count: u64,
    /// Resolved metadata. `None` when no `symboldata` carries `idref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Arc<SymbolData>>,
}

impl Symbol {
    /// Display name: the resolved symbol name, or the raw idref when unresolved.
    pub fn name(&self) -> &str {
        self.data.as_deref().map(|d| d.name.as_str()).unwrap_or(&self.idref)
    }

    pub fn details(&self) -> Option<&SymbolDetails> {
        self.data.as_deref().and_then(|d| d.details.as_deref())
    }
}

/// A binary executable, or a module/library it loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinModule {
    pub name: String,
    /// Samples attributed to the binary/module itself; `0` when absent.
    pub count: u64,
    pub symbols: Vec<Symbol>,
}

impl BinModule {
    pub fn new(name: impl Into<String>, count: u64, symbols: Vec<Symbol>) -> Self {
        Self { name: name.into(), count, symbols }
    }

    /// Sum of the counts of the symbols attributed to this node.
    pub fn symbol_samples(&self) -> u64 {
        self.symbols.iter().fold(0u64, |acc, s| acc.saturating_add(s.count))
    }

    /// First symbol whose display name matches.
    pub fn find_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name() == name)
    }
}

/// Samples attributed to symbols across a parsed report.
///
/// A `binary` count already includes the `module` counts nested under it, so
/// summing node counts would double count; every symbol has exactly one owner.
pub fn attributed_samples(modules: &[BinModule]) -> u64 {
    modules.iter().fold(0u64, |acc, m| acc.saturating_add(m.symbol_samples()))
}

/// First module with the given name, in document order.
pub fn find_module<'a>(modules: &'a [BinModule], name: &str) -> Option<&'a BinModule> {
    modules.iter().find(|m| m.name == name)
}
