use std::fs;

use anyhow::{Context, Result};
use chrono::Utc;
use opreport_core::model::attributed_samples;
use opreport_core::BinModule;
use serde::Serialize;

use crate::commands::load_report;
use crate::sha256_file;

/// JSON snapshot of a parsed report.
#[derive(Debug, Serialize)]
pub struct ReportSnapshot {
    pub tool_version: String,
    pub source: String,
    pub report_sha256: String,
    pub generated_at: String,
    pub attributed_samples: u64,
    pub modules: Vec<BinModule>,
}

/// Parse a report and build its snapshot.
pub fn build_snapshot(report: &str, config: Option<&str>) -> Result<ReportSnapshot> {
    let loaded = load_report(report, config)?;
    let report_sha256 = sha256_file(&loaded.path)?;
    Ok(ReportSnapshot {
        tool_version: opreport_core::version().to_string(),
        source: loaded.path.display().to_string(),
        report_sha256,
        generated_at: Utc::now().to_rfc3339(),
        attributed_samples: attributed_samples(&loaded.modules),
        modules: loaded.modules,
    })
}

/// Write the snapshot to `out`, or stdout when absent.
pub fn dump_command(report: &str, config: Option<&str>, out: Option<&str>) -> Result<()> {
    let snapshot = build_snapshot(report, config)?;
    let json = serde_json::to_string_pretty(&snapshot)
        .context("Failed to serialize report snapshot")?;

    match out {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report snapshot to {path}"))?;
            println!("Wrote snapshot of {} to {}", snapshot.source, path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
