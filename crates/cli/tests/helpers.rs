use std::path::Path;

use opreport_drilldown::{resolve_report_path, sha256_file};
use tempfile::tempdir;

#[test]
fn resolve_report_path_canonicalizes_existing_file() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("report.xml");
    std::fs::write(&file, "<profile/>").expect("write");

    let resolved = resolve_report_path(&file.to_string_lossy()).expect("resolve");
    assert_eq!(resolved, file.canonicalize().expect("canon"));
}

#[test]
fn resolve_report_path_keeps_missing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("nope.xml");
    let resolved = resolve_report_path(&missing.to_string_lossy()).expect("resolve");
    assert_eq!(resolved, missing);
}

#[test]
fn resolve_report_path_joins_missing_relative_path_onto_cwd() {
    let resolved = resolve_report_path("does/not/exist.xml").expect("resolve");
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with(Path::new("does/not/exist.xml")));
}

#[test]
fn sha256_file_hashes_contents() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("abc.txt");
    std::fs::write(&file, "abc").expect("write");
    assert_eq!(
        sha256_file(&file).expect("hash"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let err = sha256_file(&tmp.path().join("missing")).unwrap_err();
    assert!(err.to_string().contains("Failed to open report for hashing"));
}
