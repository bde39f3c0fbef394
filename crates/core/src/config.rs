use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::{ReportError, ReportResult};

/// Where a merged detail line sits after duplicate lines for the same symbol
/// have been summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailOrder {
    /// Keep the line at the position of its first occurrence.
    #[default]
    FirstSeen,
    /// Move the merged line to the position of its latest occurrence, the
    /// ordering opreport consumers historically saw.
    LastSeen,
}

/// Options for a single parse of an opreport document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub detail_order: DetailOrder,
}

impl ParseOptions {
    pub fn with_detail_order(mut self, detail_order: DetailOrder) -> Self {
        self.detail_order = detail_order;
        self
    }

    /// Load options from disk. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| ReportError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let decoded = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_slice(&bytes).map_err(|err| err.to_string())
        } else {
            serde_yaml::from_slice(&bytes).map_err(|err| err.to_string())
        };
        decoded.map_err(|message| ReportError::Config { path: path.to_path_buf(), message })
    }
}
