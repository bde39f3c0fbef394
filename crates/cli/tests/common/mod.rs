#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const SAMPLE_REPORT: &str = include_str!("../../../core/tests/fixtures/sample_report.xml");

/// Write `contents` as `name` under `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// Write the sample report under `dir`.
pub fn sample_report(dir: &Path) -> PathBuf {
    write_file(dir, "opreport.xml", SAMPLE_REPORT)
}
