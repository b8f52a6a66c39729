//! Tests for table persistence

use potd_pipeline::table::{Table, TableError};
use serde_json::Value;
use tempfile::TempDir;

fn sample() -> Table {
    let mut table = Table::new(["Extracted_Date", "Comment_Author", "Comment_Text", "Pick"]);
    table
        .push_row(["03/04/2024", "alice", "Lakers -5.5, \"lock\"\nsecond line", "Lakers -5.5"])
        .unwrap();
    table
        .push_row(["03/04/2024", "", "Cashed \u{2705}", "N/A"])
        .unwrap();
    table
}

#[test]
fn test_csv_preserves_quotes_newlines_and_empty_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/dir/table.csv");

    sample().save_csv(&path).unwrap();
    let loaded = Table::load_csv(&path).unwrap();

    assert_eq!(loaded, sample());
    assert_eq!(loaded.get(1, "Comment_Author"), Some(""));
}

#[test]
fn test_json_array_keeps_column_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.json");

    sample().save_json(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&content).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    let keys: Vec<&str> = records[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["Extracted_Date", "Comment_Author", "Comment_Text", "Pick"]);
    assert_eq!(records[1]["Comment_Text"], "Cashed \u{2705}");
}

#[test]
fn test_jsonl_one_record_per_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.jsonl");

    sample().save_jsonl(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 2);
    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["Pick"], "Lakers -5.5");
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Table::load_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, TableError::Csv { .. }));
    assert!(!err.is_missing_structure());
}

#[test]
fn test_load_ragged_csv_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ragged.csv");
    std::fs::write(&path, "a,b\n1,2\n3\n").unwrap();

    assert!(Table::load_csv(&path).is_err());
}

#[test]
fn test_slice_columns() {
    let mut table = sample();
    table.slice_columns("Comment_Author", "Comment_Text").unwrap();
    assert_eq!(table.headers(), &["Comment_Author", "Comment_Text"]);

    let mut table = sample();
    let err = table.slice_columns("Pick", "Comment_Author").unwrap_err();
    assert!(matches!(err, TableError::ColumnOrder { .. }));

    let mut table = sample();
    let err = table.slice_columns("Extracted_Date", "Unit").unwrap_err();
    assert!(matches!(err, TableError::MissingColumn(ref c) if c == "Unit"));
}
