//! Report Model Builder.
//!
//! The opreport XML lists four element kinds flatly and links them by id:
//! `symboldetails` (per-line counts), `symboldata` (name/file/line),
//! `module` and `binary` (which hold `symbol` references by `idref`). The
//! builder resolves them in dependency order:
//!
//! 1. detail sets, keyed by id, with duplicate lines summed;
//! 2. symbol data, keyed by id, each linked to its detail set;
//! 3. `module` nodes, then `binary` nodes, each owning the symbols found
//!    anywhere beneath it, minus those a previous node already owns.
//!
//! Ids that do not resolve become `None` links, never errors.

pub mod registry;
pub mod xml;

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{DetailOrder, ParseOptions};
use crate::model::{BinModule, DetailData, Symbol, SymbolData, SymbolDetails};
use registry::EmittedSymbols;

/// Error type for opreport parsing.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input is not well-formed XML.
    #[error("Malformed opreport XML: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// A structurally required attribute is absent.
    #[error("Missing required attribute '{attribute}' on {}", describe(.element, .id))]
    MissingAttribute { element: String, attribute: &'static str, id: Option<String> },

    /// A mandatory `<count>` child is absent.
    #[error("Missing required <count> on {}", describe(.element, .id))]
    MissingCount { element: String, id: Option<String> },

    /// A `<count>` child is present but is not a non-negative integer.
    #[error("Invalid count '{value}' on {}", describe(.element, .id))]
    InvalidCount { element: String, value: String, id: Option<String> },

    /// Summing repeated lines of one symbol exceeds the count range.
    #[error("Sample count overflow merging line {line} on {}", describe(.element, .id))]
    CountOverflow { element: String, line: String, id: Option<String> },

    /// The report file could not be read.
    #[error("Failed to read opreport XML at {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report stream could not be read.
    #[error("Failed to read opreport XML: {0}")]
    Io(#[from] std::io::Error),

    /// A parse-options file could not be read or decoded.
    #[error("Invalid parse options at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

fn describe(element: &str, id: &Option<String>) -> String {
    match id {
        Some(id) => format!("<{element}> (id={id})"),
        None => format!("<{element}>"),
    }
}

/// Convenience result type for parsing.
pub type ReportResult<T> = Result<T, ReportError>;

/// Builds the [`BinModule`] tree from one opreport XML document.
///
/// Holds no state between calls; every parse builds fresh lookup tables.
#[derive(Debug, Clone, Default)]
pub struct OpreportParser {
    options: ParseOptions,
}

impl OpreportParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse an in-memory document.
    pub fn parse_str(&self, xml: &str) -> ReportResult<Vec<BinModule>> {
        let parsing = roxmltree::ParsingOptions { allow_dtd: true, ..Default::default() };
        let doc = Document::parse_with_options(xml, parsing)?;

        let details = build_symbol_details(&doc, self.options.detail_order)?;
        let data = build_symbol_data(&doc, &details)?;

        let mut emitted = EmittedSymbols::new();
        let mut modules = Vec::new();
        build_bin_modules(&doc, "module", &data, &mut emitted, &mut modules)?;
        build_bin_modules(&doc, "binary", &data, &mut emitted, &mut modules)?;

        debug!(
            detail_sets = details.len(),
            symbol_data = data.len(),
            modules = modules.len(),
            symbols = emitted.len(),
            "parsed opreport document"
        );
        Ok(modules)
    }

    /// Read the whole stream, then parse it.
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> ReportResult<Vec<BinModule>> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        self.parse_str(&xml)
    }

    /// Open, read and parse a report file. The file is closed before parsing.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> ReportResult<Vec<BinModule>> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)
            .map_err(|source| ReportError::ReadFile { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), bytes = xml.len(), "read opreport file");
        self.parse_str(&xml)
    }
}

/// Parse a document with default options.
pub fn parse_str(xml: &str) -> ReportResult<Vec<BinModule>> {
    OpreportParser::new().parse_str(xml)
}

/// Parse a stream with default options.
pub fn parse_reader<R: Read>(reader: R) -> ReportResult<Vec<BinModule>> {
    OpreportParser::new().parse_reader(reader)
}

/// Parse a file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> ReportResult<Vec<BinModule>> {
    OpreportParser::new().parse_file(path)
}

fn elements<'a, 'i: 'a>(
    root: Node<'a, 'i>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    root.descendants().filter(move |n| n.is_element() && n.has_tag_name(tag))
}

/// Step 1: per-line detail sets keyed by id.
fn build_symbol_details(
    doc: &Document<'_>,
    order: DetailOrder,
) -> ReportResult<HashMap<String, Arc<SymbolDetails>>> {
    let mut table = HashMap::new();

    for node in elements(doc.root(), "symboldetails") {
        let id = xml::required_attr(node, "id", None)?;
        let mut lines: Vec<DetailData> = Vec::new();

        for entry in elements(node, "detaildata") {
            let line = xml::attr_or(entry, "line", xml::DEFAULT_LINE);
            let count = xml::required_count(entry, Some(id))?;
            merge_line(&mut lines, DetailData::new(line, count), order, id)?;
        }

        // An empty set never links to its symbol data.
        if lines.is_empty() {
            continue;
        }
        table.entry(id.to_string()).or_insert_with(|| Arc::new(SymbolDetails::new(id, lines)));
    }

    Ok(table)
}

fn merge_line(
    lines: &mut Vec<DetailData>,
    entry: DetailData,
    order: DetailOrder,
    id: &str,
) -> ReportResult<()> {
    let Some(pos) = lines.iter().position(|d| d.line == entry.line) else {
        lines.push(entry);
        return Ok(());
    };
    trace!(line = %entry.line, count = entry.count, "merging duplicate detail line");
    let merged = lines[pos].count.checked_add(entry.count).ok_or_else(|| {
        ReportError::CountOverflow {
            element: "detaildata".to_string(),
            line: entry.line.clone(),
            id: Some(id.to_string()),
        }
    })?;
    match order {
        DetailOrder::FirstSeen => lines[pos].count = merged,
        DetailOrder::LastSeen => {
            lines.remove(pos);
            lines.push(DetailData::new(entry.line, merged));
        }
    }
    Ok(())
}

/// Step 2: symbol metadata keyed by id, linked to its detail set.
fn build_symbol_data(
    doc: &Document<'_>,
    details: &HashMap<String, Arc<SymbolDetails>>,
) -> ReportResult<HashMap<String, Arc<SymbolData>>> {
    let mut table = HashMap::new();

    for node in elements(doc.root(), "symboldata") {
        let id = xml::required_attr(node, "id", None)?;
        let name = xml::required_attr(node, "name", Some(id))?;
        let data = SymbolData {
            id: id.to_string(),
            name: name.to_string(),
            file: xml::attr_or(node, "file", xml::DEFAULT_FILE),
            line: xml::attr_or(node, "line", xml::DEFAULT_LINE),
            details: details.get(id).cloned(),
        };
        table.entry(id.to_string()).or_insert_with(|| Arc::new(data));
    }

    Ok(table)
}

/// Step 3: every `tag` element becomes a [`BinModule`], appended to `out`.
fn build_bin_modules(
    doc: &Document<'_>,
    tag: &'static str,
    data: &HashMap<String, Arc<SymbolData>>,
    emitted: &mut EmittedSymbols,
    out: &mut Vec<BinModule>,
) -> ReportResult<()> {
    for node in elements(doc.root(), tag) {
        let name = xml::required_attr(node, "name", None)?;
        let count = xml::count_or_default(node, None)?;

        let mut symbols = Vec::new();
        for entry in elements(node, "symbol") {
            let idref = xml::required_attr(entry, "idref", None)?;
            let symbol = Symbol {
                idref: idref.to_string(),
                count: xml::required_count(entry, Some(idref))?,
                data: data.get(idref).cloned(),
            };
            if emitted.contains(&symbol) {
                trace!(module = name, idref, count = symbol.count, "symbol already attributed");
                continue;
            }
            symbols.push(symbol);
        }

        let module = BinModule::new(name, count, symbols);
        debug!(kind = tag, name, symbols = module.symbols.len(), "built module");
        emitted.record(&module);
        out.push(module);
    }

    Ok(())
}
