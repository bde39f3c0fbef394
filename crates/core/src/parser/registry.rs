use std::collections::HashSet;

use crate::model::{BinModule, Symbol};

/// Append-only record of the symbols already attributed to a finished
/// binary/module.
///
/// A `binary` element in the report nests the `module` elements it loaded, so
/// a deep scan of the binary sees every module symbol a second time. The first
/// node that emits a symbol owns it; later nodes skip it.
///
/// Only finished nodes are recorded. Two equal symbols under the same node are
/// both kept.
#[derive(Debug, Default)]
pub struct EmittedSymbols {
    seen: HashSet<Symbol>,
}

impl EmittedSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an equal symbol already belongs to a finished node.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.seen.contains(symbol)
    }

    /// Record every symbol of a finished node.
    pub fn record(&mut self, module: &BinModule) {
        self.seen.extend(module.symbols.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
