//! Table-to-table stage functions
//!
//! Each stage takes ownership of the previous stage's table and returns a
//! new one together with [`StageStats`]. Missing required columns surface as
//! an [`Error`] for which [`Error::is_fatal_input`] holds; everything else
//! is recovered in place.

use crate::error::{Error, PipelineErrorTrait, Result};
use crate::llm::PickExtractor;
use crate::models::StageStats;
use crate::outcome::{annotate, OutcomeClassifier};
use crate::table::{columns, Table};
use crate::text::clean::{extract_post_date, is_long_enough, is_removed};
use crate::text::{normalize_comment_with, GlyphTable};
use crate::validate::{format_odds, is_usable_pick, validate_odds, validate_unit, DEFAULT_ODDS};

use super::orchestrator::{ExtractionPipeline, RunConfig};

/// Clean a raw scrape table
///
/// Derives `Extracted_Date` from `Post_Title` as the first column, drops the
/// post columns, removes deleted comments, normalizes text and drops
/// comments shorter than `min_len` characters.
pub fn clean_stage(
    mut table: Table,
    min_len: usize,
    glyphs: &GlyphTable,
) -> Result<(Table, StageStats)> {
    let rows_in = table.len();
    table.require_column(columns::COMMENT_TEXT)?;

    if !table.has_column(columns::EXTRACTED_DATE) {
        let dates: Vec<String> = match table.column_index(columns::POST_TITLE) {
            Some(_) => table
                .column(columns::POST_TITLE)?
                .into_iter()
                .map(|title| extract_post_date(title).unwrap_or_default())
                .collect(),
            None => {
                tracing::warn!("No Post_Title column, Extracted_Date will be empty");
                vec![String::new(); table.len()]
            }
        };
        table.insert_column(0, columns::EXTRACTED_DATE, dates)?;
    }
    table.drop_column(columns::POST_TITLE);
    table.drop_column(columns::POST_DATE);

    let text_col = table.require_column(columns::COMMENT_TEXT)?;
    table.retain_rows(|row| !is_removed(&row[text_col]));

    for text in table.column_mut(columns::COMMENT_TEXT)? {
        *text = normalize_comment_with(text, glyphs);
    }
    table.retain_rows(|row| is_long_enough(&row[text_col], min_len));

    let stats = StageStats {
        rows_in,
        rows_out: table.len(),
        fallbacks: 0,
    };
    tracing::info!(
        rows_in,
        rows_out = stats.rows_out,
        dropped = stats.dropped(),
        "Cleaning stage complete"
    );
    Ok((table, stats))
}

/// Run the extractor over `Comment_Text` and append the extracted columns
///
/// With a row limit, rows past the limit are dropped so the table stays
/// aligned with the extracted records.
pub async fn extract_stage<E: PickExtractor + ?Sized>(
    mut table: Table,
    extractor: &E,
    run: RunConfig,
) -> Result<(Table, StageStats)> {
    let rows_in = table.len();

    let comments: Vec<String> = table
        .column(columns::COMMENT_TEXT)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let records = ExtractionPipeline::new(extractor, run)
        .extract_all(&comments)
        .await;

    table.truncate(records.len());
    let fallbacks = records.iter().filter(|r| r.is_fallback()).count();

    let mut values: [Vec<String>; 4] = Default::default();
    for record in records {
        for (column, value) in values.iter_mut().zip(record.into_values()) {
            column.push(value);
        }
    }
    for (name, column) in columns::EXTRACTION.iter().zip(values) {
        table.set_column(name, column)?;
    }

    let stats = StageStats {
        rows_in,
        rows_out: table.len(),
        fallbacks,
    };
    Ok((table, stats))
}

/// Restrict to the output columns, drop unusable picks and normalize
/// `Odds` and `Unit`
pub fn validate_stage(mut table: Table) -> Result<(Table, StageStats)> {
    let rows_in = table.len();

    table.slice_columns(columns::EXTRACTED_DATE, columns::UNIT)?;
    let pick_col = table.require_column(columns::PICK)?;

    table.retain_rows(|row| is_usable_pick(Some(row[pick_col].as_str())));

    if table.has_column(columns::ODDS) {
        for odds in table.column_mut(columns::ODDS)? {
            *odds = format_odds(validate_odds(Some(odds.as_str())));
        }
    } else {
        tracing::warn!("No Odds column, assigning default odds");
        let defaults = vec![format_odds(DEFAULT_ODDS); table.len()];
        table.set_column(columns::ODDS, defaults)?;
    }

    for unit in table.column_mut(columns::UNIT)? {
        *unit = validate_unit(Some(unit.as_str())).to_string();
    }

    let stats = StageStats {
        rows_in,
        rows_out: table.len(),
        fallbacks: 0,
    };
    tracing::info!(
        rows_in,
        rows_out = stats.rows_out,
        dropped = stats.dropped(),
        "Validation stage complete"
    );
    Ok((table, stats))
}

/// Classify each row's outcome and link previous-pick results
///
/// Rows must already be in chronological order.
pub fn outcome_stage(
    mut table: Table,
    classifier: &OutcomeClassifier,
    limit: Option<usize>,
) -> Result<(Table, StageStats)> {
    let rows_in = table.len();
    table.require_column(columns::COMMENT_TEXT)?;
    table.require_column(columns::COMMENT_AUTHOR)?;

    if let Some(n) = limit {
        table.truncate(n);
    }

    let records = table.comment_records()?;
    let annotations = annotate(classifier, &records);

    let (results, previous): (Vec<String>, Vec<String>) = annotations
        .iter()
        .map(|a| {
            (
                a.result.as_str().to_string(),
                a.previous_pick_result.as_str().to_string(),
            )
        })
        .unzip();

    table.set_column(columns::RESULT, results)?;
    table.set_column(columns::PREVIOUS_PICK_RESULT, previous)?;

    let linked = annotations
        .iter()
        .filter(|a| a.previous_pick_result.is_known())
        .count();
    tracing::info!(rows = table.len(), linked, "Outcome stage complete");

    let stats = StageStats {
        rows_in,
        rows_out: table.len(),
        fallbacks: 0,
    };
    Ok((table, stats))
}

/// Log a run-ending error at error level and pass it through
pub fn report_fatal(stage: &str, err: Error) -> Error {
    let category = err.category().as_str();
    if err.is_fatal_input() {
        tracing::error!(stage, category, error = %err, "Input is missing required structure, aborting");
    } else {
        tracing::error!(
            stage,
            category,
            recoverable = err.is_recoverable(),
            error = %err,
            "Stage failed"
        );
    }
    err
}
