use anyhow::{Context, Result};
use opreport_core::model::attributed_samples;
use opreport_core::BinModule;
use serde::Serialize;

use crate::commands::{load_report, percent};

/// One row of the `modules` listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRow {
    pub name: String,
    /// Count reported on the binary/module node itself.
    pub count: u64,
    /// Samples of the symbols attributed to this node.
    pub samples: u64,
    pub percent: f64,
    pub symbols: usize,
}

/// Build listing rows in document order.
pub fn module_rows(modules: &[BinModule]) -> Vec<ModuleRow> {
    let total = attributed_samples(modules);
    modules
        .iter()
        .map(|m| {
            let samples = m.symbol_samples();
            ModuleRow {
                name: m.name.clone(),
                count: m.count,
                samples,
                percent: percent(samples, total),
                symbols: m.symbols.len(),
            }
        })
        .collect()
}

/// List every binary/module of a report.
pub fn list_modules_command(report: &str, config: Option<&str>, json: bool) -> Result<()> {
    let loaded = load_report(report, config)?;
    let rows = module_rows(&loaded.modules);

    if json {
        let serialized =
            serde_json::to_string_pretty(&rows).context("Failed to serialize modules to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("Modules in {} ({}):", loaded.path.display(), rows.len());
    if rows.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    for row in rows {
        println!(
            "  - {} samples={} ({:.2}%) count={} symbols={}",
            row.name, row.samples, row.percent, row.count, row.symbols
        );
    }

    Ok(())
}
