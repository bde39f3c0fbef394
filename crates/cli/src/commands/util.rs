use std::path::PathBuf;

use anyhow::{Context, Result};
use opreport_core::{BinModule, OpreportParser, ParseOptions};
use tracing::debug;

use crate::resolve_report_path;

/// A parsed report together with where it came from.
#[derive(Debug)]
pub struct LoadedReport {
    pub path: PathBuf,
    pub modules: Vec<BinModule>,
}

/// Load parse options from `--config`, or defaults when none is given.
pub fn load_parse_options(config: Option<&str>) -> Result<ParseOptions> {
    match config {
        Some(path) => {
            let options = ParseOptions::load(path)
                .with_context(|| format!("Failed to load parse options from {path}"))?;
            debug!(path, ?options, "loaded parse options");
            Ok(options)
        }
        None => Ok(ParseOptions::default()),
    }
}

/// Resolve, read and parse a report file.
pub fn load_report(report: &str, config: Option<&str>) -> Result<LoadedReport> {
    let path = resolve_report_path(report)?;
    let options = load_parse_options(config)?;
    let modules = OpreportParser::with_options(options)
        .parse_file(&path)
        .with_context(|| format!("Failed to parse opreport XML at {}", path.display()))?;
    Ok(LoadedReport { path, modules })
}

/// `part` as a percentage of `total`; zero when there is nothing to divide.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}
