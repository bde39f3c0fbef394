mod common;

use opreport_core::{parse_str, DetailOrder};
use opreport_drilldown::commands::{
    build_drilldown, build_snapshot, load_parse_options, load_report, module_rows, percent,
    render_drilldown, DrilldownOptions,
};
use tempfile::tempdir;

#[test]
fn percent_of_zero_total_is_zero() {
    assert_eq!(percent(5, 0), 0.0);
    assert_eq!(percent(1, 4), 25.0);
}

#[test]
fn module_rows_report_shares_without_double_counting() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let rows = module_rows(&modules);
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["/usr/lib64/libc.so.6", "/usr/bin/solver", "/usr/bin/idle-helper"]);

    assert_eq!(rows[0].samples, 30);
    assert_eq!(rows[0].percent, 25.0);
    assert_eq!(rows[1].count, 120);
    assert_eq!(rows[1].samples, 90);
    assert_eq!(rows[1].percent, 75.0);
    assert_eq!(rows[1].symbols, 2);
    assert_eq!(rows[2].percent, 0.0);
}

#[test]
fn drilldown_sorts_hottest_first() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let views = build_drilldown(&modules, &DrilldownOptions::default()).expect("drilldown");
    let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["/usr/bin/solver", "/usr/lib64/libc.so.6", "/usr/bin/idle-helper"]);

    let solver = &views[0];
    let symbols: Vec<&str> = solver.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(symbols, vec!["main", "compute"]);
    assert!(solver.symbols[0].lines.is_empty(), "lines only appear with --lines");
}

#[test]
fn drilldown_threshold_hides_cold_symbols() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let options = DrilldownOptions { threshold: Some(50.0), ..Default::default() };
    let views = build_drilldown(&modules, &options).expect("drilldown");
    let solver = views.iter().find(|v| v.name == "/usr/bin/solver").unwrap();
    assert_eq!(solver.symbols.len(), 1);
    assert_eq!(solver.symbols[0].name, "main");
    assert_eq!(solver.hidden, 1);

    let text = render_drilldown(&views);
    assert!(text.contains("1 symbol(s) below threshold"), "unexpected output:\n{text}");
}

#[test]
fn drilldown_rejects_out_of_range_threshold() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let options = DrilldownOptions { threshold: Some(150.0), ..Default::default() };
    let err = build_drilldown(&modules, &options).unwrap_err();
    assert!(err.to_string().contains("Threshold must be between 0 and 100"));
}

#[test]
fn drilldown_module_filter_and_lines() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let options = DrilldownOptions {
        module: Some("/usr/bin/solver".into()),
        lines: true,
        ..Default::default()
    };
    let views = build_drilldown(&modules, &options).expect("drilldown");
    assert_eq!(views.len(), 1);

    let main = &views[0].symbols[0];
    assert_eq!(main.file, "/src/solver/main.c");
    assert_eq!(main.line, "10");
    let lines: Vec<(&str, u64)> = main.lines.iter().map(|l| (l.line.as_str(), l.samples)).collect();
    assert_eq!(lines, vec![("12", 45), ("13", 25)]);

    let text = render_drilldown(&views);
    assert!(text.contains("main 70 (77.78%) /src/solver/main.c:10"), "unexpected output:\n{text}");
    assert!(text.contains("line 12 45 (64.29%)"), "unexpected output:\n{text}");
}

#[test]
fn drilldown_unknown_module_is_an_error() {
    let modules = parse_str(common::SAMPLE_REPORT).expect("parse");
    let options = DrilldownOptions { module: Some("libnope.so".into()), ..Default::default() };
    let err = build_drilldown(&modules, &options).unwrap_err();
    assert!(err.to_string().contains("Module 'libnope.so' not found"));
}

#[test]
fn parse_options_default_without_config() {
    let options = load_parse_options(None).expect("defaults");
    assert_eq!(options.detail_order, DetailOrder::FirstSeen);
}

#[test]
fn config_file_changes_detail_order() {
    let tmp = tempdir().unwrap();
    let report = common::sample_report(tmp.path());
    let config = common::write_file(tmp.path(), "drilldown.yaml", "detail_order: last_seen\n");

    let loaded =
        load_report(&report.to_string_lossy(), Some(&config.to_string_lossy())).expect("load");
    let solver = loaded.modules.iter().find(|m| m.name == "/usr/bin/solver").unwrap();
    let lines: Vec<&str> = solver.symbols[0]
        .details()
        .unwrap()
        .details
        .iter()
        .map(|d| d.line.as_str())
        .collect();
    assert_eq!(lines, vec!["13", "12"]);
}

#[test]
fn load_report_names_the_file_on_parse_failure() {
    let tmp = tempdir().unwrap();
    let report = common::write_file(tmp.path(), "broken.xml", "<profile><binary></profile>");
    let err = load_report(&report.to_string_lossy(), None).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to parse opreport XML"), "unexpected error: {message}");
    assert!(message.contains("broken.xml"), "unexpected error: {message}");
}

#[test]
fn snapshot_carries_hash_and_totals() {
    let tmp = tempdir().unwrap();
    let report = common::sample_report(tmp.path());
    let snapshot = build_snapshot(&report.to_string_lossy(), None).expect("snapshot");
    assert_eq!(snapshot.attributed_samples, 120);
    assert_eq!(snapshot.modules.len(), 3);
    assert_eq!(snapshot.report_sha256.len(), 64);
    assert!(snapshot.source.ends_with("opreport.xml"));
    assert!(!snapshot.generated_at.is_empty());
}
