//! Pipeline integration tests
//!
//! Runs the stages end to end against a stub extractor:
//! 1. Orchestrator ordering and concurrency bound
//! 2. Stage chaining through files on disk
//! 3. Missing-structure failures

mod common;

use common::{long_comment, quiet_run, raw_scrape, StubExtractor};
use potd_pipeline::outcome::OutcomeClassifier;
use potd_pipeline::pipeline::{
    clean_stage, extract_stage, outcome_stage, validate_stage, ExtractionPipeline,
};
use potd_pipeline::table::Table;
use potd_pipeline::text::GlyphTable;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

// ============================================================================
// Orchestrator Tests
// ============================================================================

#[tokio::test]
async fn test_out_of_order_completion_keeps_input_order() {
    let extractor = StubExtractor::new();
    let comments = [
        "sleep:80 first",
        "sleep:5 second",
        "sleep:40 third",
        "sleep:1 fourth",
    ];

    let records = ExtractionPipeline::new(&extractor, quiet_run(4, None))
        .extract_all(&comments)
        .await;

    let picks: Vec<&str> = records.iter().map(|r| r.pick.as_str()).collect();
    assert_eq!(picks, comments);
}

#[tokio::test]
async fn test_concurrency_is_bounded_by_workers() {
    let extractor = StubExtractor::new();
    let comments: Vec<String> = (0..24).map(|i| format!("sleep:20 pick {i}")).collect();

    let records = ExtractionPipeline::new(&extractor, quiet_run(3, None))
        .extract_all(&comments)
        .await;

    assert_eq!(records.len(), 24);
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 24);
    let peak = extractor.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak concurrency {peak} exceeded worker count");
    assert!(peak >= 2, "extractions never overlapped");
}

#[tokio::test]
async fn test_failures_do_not_cancel_siblings() {
    let extractor = StubExtractor::new();
    let comments = ["ok one", "fail two", "ok three", "fail four"];

    let records = ExtractionPipeline::new(&extractor, quiet_run(8, None))
        .extract_all(&comments)
        .await;

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].pick, "ok one");
    assert!(records[1].is_fallback());
    assert_eq!(records[2].pick, "ok three");
    assert!(records[3].is_fallback());
}

#[tokio::test]
async fn test_empty_input() {
    let extractor = StubExtractor::new();
    let comments: Vec<String> = Vec::new();

    let records = ExtractionPipeline::new(&extractor, quiet_run(8, None))
        .extract_all(&comments)
        .await;

    assert!(records.is_empty());
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Stage Chain Tests
// ============================================================================

#[tokio::test]
async fn test_full_stage_chain_through_disk() {
    let dir = TempDir::new().unwrap();
    let raw_path = dir.path().join("raw.csv");

    raw_scrape(&[
        ("POTD 3/4/24", "alice", &long_comment("**Lakers -5.5** today")),
        ("POTD 3/4/24", "bob", "[deleted]"),
        ("POTD 3/4/24", "carol", "short"),
        ("POTD 3/5/24", "alice", &long_comment("fail to parse this one")),
        ("POTD 3/5/24", "alice", &long_comment("previous pick hit \u{2705}")),
    ])
    .save_csv(&raw_path)
    .unwrap();

    let raw = Table::load_csv(&raw_path).unwrap();
    let (cleaned, stats) = clean_stage(raw, 250, GlyphTable::standard()).unwrap();
    assert_eq!(stats.rows_in, 5);
    assert_eq!(cleaned.len(), 3);
    assert_eq!(cleaned.headers()[0], "Extracted_Date");

    let cleaned_path = dir.path().join("out/cleaned.csv");
    cleaned.save_csv(&cleaned_path).unwrap();
    let cleaned = Table::load_csv(&cleaned_path).unwrap();

    let extractor = StubExtractor::new();
    let (identified, stats) = extract_stage(cleaned, &extractor, quiet_run(2, None))
        .await
        .unwrap();
    assert_eq!(identified.len(), 3);
    assert_eq!(stats.fallbacks, 1);
    assert_eq!(identified.get(1, "Pick"), Some("N/A"));

    let (validated, stats) = validate_stage(identified).unwrap();
    assert_eq!(stats.rows_out, 2);
    assert_eq!(validated.get(0, "Odds"), Some("1.91"));
    assert_eq!(validated.get(0, "Unit"), Some("2"));
    assert_eq!(validated.get(0, "Extracted_Date"), Some("03/04/2024"));

    let (results, _) = outcome_stage(validated, &OutcomeClassifier::default(), None).unwrap();
    assert_eq!(results.get(1, "Result"), Some("Win"));
    assert_eq!(results.get(1, "Previous_Pick_Result"), Some("Win"));
    assert_eq!(results.get(0, "Previous_Pick_Result"), Some(""));
}

#[tokio::test]
async fn test_extract_stage_limit_truncates_table() {
    let mut table = Table::new(["Comment_Author", "Comment_Text"]);
    for i in 0..6 {
        table.push_row(["a".to_string(), format!("pick {i}")]).unwrap();
    }

    let extractor = StubExtractor::new();
    let (table, stats) = extract_stage(table, &extractor, quiet_run(8, Some(4)))
        .await
        .unwrap();

    assert_eq!(stats.rows_in, 6);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(3, "Pick"), Some("pick 3"));
}

// ============================================================================
// Missing Structure Tests
// ============================================================================

#[tokio::test]
async fn test_extract_stage_requires_comment_text() {
    let table = Table::new(["Comment_Author"]);
    let extractor = StubExtractor::new();

    let err = extract_stage(table, &extractor, quiet_run(8, None))
        .await
        .unwrap_err();
    assert!(err.is_fatal_input());
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_validate_stage_without_odds_uses_default() {
    let mut table = Table::new(["Extracted_Date", "Comment_Text", "Pick", "Sport", "Unit"]);
    table
        .push_row(["03/04/2024", "t", "Lakers -5.5", "NBA", "9"])
        .unwrap();

    let (table, _) = validate_stage(table).unwrap();
    assert_eq!(table.get(0, "Odds"), Some("1.86"));
    assert_eq!(table.get(0, "Unit"), Some("1"));
}
