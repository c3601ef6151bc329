//! Integration tests for discovery and batch loading.

use std::path::Path;

use fusion_ingest::{IngestError, TextEncoding, discover_files, load_files};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &[u8]) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_discovery_returns_only_qualifying_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "1.csv", b"a\n1\n");
    write(dir.path(), "2.CSV", b"a\n2\n");
    write(dir.path(), "3.txt", b"a\n3\n");
    write(dir.path(), "4.xlsx", b"");
    write(dir.path(), "5.Xls", b"");
    write(dir.path(), "6.tsv", b"a\n6\n");

    let files = discover_files(dir.path()).unwrap();
    let names: Vec<&str> = files.iter().map(|file| file.name()).collect();

    assert_eq!(names, vec!["1.csv", "2.CSV", "4.xlsx", "5.Xls"]);
}

#[test]
fn test_discovery_not_found_cases() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "only.txt", b"x");

    let empty = discover_files(dir.path()).unwrap_err();
    let not_dir = discover_files(&dir.path().join("only.txt")).unwrap_err();

    assert!(empty.is_not_found());
    assert!(not_dir.is_not_found());
    assert!(matches!(empty, IngestError::NoCandidateFiles { .. }));
    assert!(matches!(not_dir, IngestError::NotADirectory { .. }));
}

#[test]
fn test_latin1_fallback_records_no_error() {
    let dir = TempDir::new().unwrap();
    // 0x81 is undefined in Windows-1252 and not valid UTF-8 on its own.
    write(dir.path(), "legacy.csv", b"name,qty\nd\x81r,3\nok,4\n");

    let files = discover_files(dir.path()).unwrap();
    let report = load_files(&files, |_, _| {});

    assert!(report.errors.is_empty());
    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.tables[0].encoding, Some(TextEncoding::Latin1));
    assert_eq!(report.tables[0].table.height(), 2);
}

#[test]
fn test_corrupt_files_are_isolated() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "file1.csv", b"id,v\n1,a\n");
    write(dir.path(), "file2.csv", b"");
    write(dir.path(), "file3.csv", b"id,v\n3,c\n");
    write(dir.path(), "file4.csv", b"   \n");
    write(dir.path(), "file5.csv", b"id,v\n5,e\n");

    let files = discover_files(dir.path()).unwrap();
    let report = load_files(&files, |_, _| {});

    assert_eq!(report.tables.len(), 3);
    assert_eq!(report.errors.len(), 2);
    let failed: Vec<&str> = report.errors.iter().map(|e| e.file.name()).collect();
    assert_eq!(failed, vec!["file2.csv", "file4.csv"]);
    let loaded: Vec<&str> = report.tables.iter().map(|t| t.file.name()).collect();
    assert_eq!(loaded, vec!["file1.csv", "file3.csv", "file5.csv"]);
}

#[cfg(feature = "excel")]
#[test]
fn test_corrupt_workbook_is_isolated() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.csv", b"id\n1\n");
    write(dir.path(), "b.xlsx", b"definitely not a zip archive");

    let files = discover_files(dir.path()).unwrap();
    let report = load_files(&files, |_, _| {});

    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file.name(), "b.xlsx");
}
