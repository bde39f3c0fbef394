use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use opreport_core::model::{attributed_samples, find_module};
use opreport_core::{BinModule, Symbol};
use serde::Serialize;

use crate::commands::{load_report, percent};

/// Rendering options for the drilldown view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrilldownOptions {
    /// Only show this binary/module.
    pub module: Option<String>,
    /// Hide symbols whose share of their module is below this percentage.
    pub threshold: Option<f64>,
    /// Include per-line breakdowns.
    pub lines: bool,
}

impl DrilldownOptions {
    pub fn validate(&self) -> Result<()> {
        if let Some(t) = self.threshold {
            if !(0.0..=100.0).contains(&t) {
                return Err(anyhow!("Threshold must be between 0 and 100, got {t}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleView {
    pub name: String,
    pub samples: u64,
    /// Share of all attributed samples in the report.
    pub percent: f64,
    pub symbols: Vec<SymbolView>,
    /// Symbols dropped by the threshold.
    pub hidden: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolView {
    pub name: String,
    pub file: String,
    pub line: String,
    pub samples: u64,
    /// Share of the owning module's samples.
    pub percent: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<LineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub line: String,
    pub samples: u64,
    /// Share of the symbol's line-level samples.
    pub percent: f64,
}

/// Build the sorted, filtered drilldown tree.
///
/// Modules and symbols are ordered hottest first; ties keep report order.
pub fn build_drilldown(
    modules: &[BinModule],
    options: &DrilldownOptions,
) -> Result<Vec<ModuleView>> {
    options.validate()?;
    let total = attributed_samples(modules);

    let selected: Vec<&BinModule> = match &options.module {
        Some(name) => {
            let module = find_module(modules, name)
                .ok_or_else(|| anyhow!("Module '{}' not found in report", name))?;
            vec![module]
        }
        None => modules.iter().collect(),
    };

    let mut views: Vec<ModuleView> =
        selected.into_iter().map(|m| module_view(m, total, options)).collect();
    views.sort_by(|a, b| b.samples.cmp(&a.samples));
    Ok(views)
}

fn module_view(module: &BinModule, total: u64, options: &DrilldownOptions) -> ModuleView {
    let samples = module.symbol_samples();
    let threshold = options.threshold.unwrap_or(0.0);

    let mut symbols: Vec<SymbolView> = module
        .symbols
        .iter()
        .map(|s| symbol_view(s, samples, options.lines))
        .collect();
    let before = symbols.len();
    symbols.retain(|s| s.percent >= threshold);
    symbols.sort_by(|a, b| b.samples.cmp(&a.samples));

    ModuleView {
        name: module.name.clone(),
        samples,
        percent: percent(samples, total),
        hidden: before - symbols.len(),
        symbols,
    }
}

fn symbol_view(symbol: &Symbol, module_samples: u64, with_lines: bool) -> SymbolView {
    let (file, line) = match symbol.data.as_deref() {
        Some(data) => (data.file.clone(), data.line.clone()),
        None => ("??".to_string(), "0".to_string()),
    };

    let lines = match symbol.details() {
        Some(details) if with_lines => {
            let line_total = details.total_count();
            details
                .details
                .iter()
                .map(|d| LineView {
                    line: d.line.clone(),
                    samples: d.count,
                    percent: percent(d.count, line_total),
                })
                .collect()
        }
        _ => Vec::new(),
    };

    SymbolView {
        name: symbol.name().to_string(),
        file,
        line,
        samples: symbol.count,
        percent: percent(symbol.count, module_samples),
        lines,
    }
}

/// Render the tree as indented text.
pub fn render_drilldown(views: &[ModuleView]) -> String {
    let mut out = String::new();
    for module in views {
        let _ = writeln!(
            out,
            "{} {} samples ({:.2}%)",
            module.name, module.samples, module.percent
        );
        for symbol in &module.symbols {
            let _ = writeln!(
                out,
                "  {} {} ({:.2}%) {}:{}",
                symbol.name, symbol.samples, symbol.percent, symbol.file, symbol.line
            );
            for line in &symbol.lines {
                let _ = writeln!(
                    out,
                    "    line {} {} ({:.2}%)",
                    line.line, line.samples, line.percent
                );
            }
        }
        if module.hidden > 0 {
            let _ = writeln!(out, "  ... {} symbol(s) below threshold", module.hidden);
        }
    }
    out
}

/// Print the drilldown tree for a report.
pub fn drilldown_command(
    report: &str,
    config: Option<&str>,
    options: &DrilldownOptions,
    json: bool,
) -> Result<()> {
    let loaded = load_report(report, config)?;
    let views = build_drilldown(&loaded.modules, options)?;

    if json {
        let serialized = serde_json::to_string_pretty(&views)
            .context("Failed to serialize drilldown to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    if views.is_empty() {
        println!("No binaries or modules in {}", loaded.path.display());
        return Ok(());
    }
    print!("{}", render_drilldown(&views));

    Ok(())
}
