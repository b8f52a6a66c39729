//! Numeric validation of extracted picks
//!
//! Odds are normalized to decimal form within [`MIN_ODDS`]..=[`MAX_ODDS`],
//! units to an integer within [`MIN_UNIT`]..=[`MAX_UNIT`]. Anything that
//! cannot be parsed, or that parses outside the range, collapses to the
//! default instead of rejecting the row. Only rows without a usable pick
//! are discarded, by [`filter_valid`].

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{ExtractionResult, ValidatedRecord, NOT_AVAILABLE};

pub const MIN_ODDS: f64 = 1.5;
pub const MAX_ODDS: f64 = 3.0;
pub const DEFAULT_ODDS: f64 = 1.86;

pub const MIN_UNIT: u8 = 1;
pub const MAX_UNIT: u8 = 5;
pub const DEFAULT_UNIT: u8 = 1;

// ASCII only, so every match parses
static AMERICAN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static DIGITS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Normalize an odds field to decimal odds in `[1.5, 3.0]`
///
/// Integer strings are American odds and are converted; anything else is
/// parsed as decimal odds. Out-of-range or
/// unparseable values, and a missing field, yield [`DEFAULT_ODDS`].
///
/// # Examples
///
/// ```
/// use potd_pipeline::validate::validate_odds;
///
/// assert_eq!(validate_odds(Some("-150")), 1.67);
/// assert_eq!(validate_odds(Some("+150")), 2.5);
/// assert_eq!(validate_odds(Some("-99")), 2.01);
/// assert_eq!(validate_odds(Some("2.0")), 2.0);
/// assert_eq!(validate_odds(Some("abc")), 1.86);
/// assert_eq!(validate_odds(None), 1.86);
/// ```
pub fn validate_odds(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return DEFAULT_ODDS;
    };
    let raw = raw.trim();

    let decimal = if AMERICAN_REGEX.is_match(raw) {
        raw.parse::<i64>().ok().and_then(american_to_decimal)
    } else {
        raw.parse::<f64>().ok()
    };

    match decimal {
        Some(d) if (MIN_ODDS..=MAX_ODDS).contains(&d) => d,
        _ => DEFAULT_ODDS,
    }
}

/// Convert American odds to decimal odds rounded to two places
///
/// Zero has no decimal equivalent and returns `None`.
pub fn american_to_decimal(american: i64) -> Option<f64> {
    let decimal = match american {
        0 => return None,
        o if o > 0 => o as f64 / 100.0 + 1.0,
        o => 100.0 / o.unsigned_abs() as f64 + 1.0,
    };
    Some(round2(decimal))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize a unit field to an integer stake in `[1, 5]`
///
/// Takes the first run of digits anywhere in the text. Values outside the
/// range fall back to [`DEFAULT_UNIT`]; they are not clamped.
///
/// # Examples
///
/// ```
/// use potd_pipeline::validate::validate_unit;
///
/// assert_eq!(validate_unit(Some("3 units")), 3);
/// assert_eq!(validate_unit(Some("risking 7u")), 1);
/// assert_eq!(validate_unit(Some("no number")), 1);
/// ```
pub fn validate_unit(raw: Option<&str>) -> u8 {
    raw.and_then(|r| DIGITS_REGEX.find(r))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .filter(|u| (u64::from(MIN_UNIT)..=u64::from(MAX_UNIT)).contains(u))
        .and_then(|u| u8::try_from(u).ok())
        .unwrap_or(DEFAULT_UNIT)
}

/// Whether a pick cell holds an actual bet
///
/// Missing, blank and `N/A` (any case, surrounding whitespace ignored)
/// picks are unusable.
pub fn is_usable_pick(pick: Option<&str>) -> bool {
    match pick.map(str::trim) {
        None | Some("") => false,
        Some(p) => !p.eq_ignore_ascii_case(NOT_AVAILABLE),
    }
}

/// Drop every record whose pick is unusable
pub fn filter_valid(records: Vec<ExtractionResult>) -> Vec<ExtractionResult> {
    records
        .into_iter()
        .filter(|r| is_usable_pick(Some(r.pick.as_str())))
        .collect()
}

/// Validate odds and unit of a single record
pub fn validate_record(record: ExtractionResult) -> ValidatedRecord {
    ValidatedRecord {
        odds: validate_odds(Some(record.odds.as_str())),
        unit: validate_unit(Some(record.unit.as_str())),
        pick: record.pick,
        sport: record.sport,
    }
}

/// Filter out unusable picks, then validate the survivors
pub fn validate_all(records: Vec<ExtractionResult>) -> Vec<ValidatedRecord> {
    filter_valid(records)
        .into_iter()
        .map(validate_record)
        .collect()
}

/// Render validated odds the way they are written to the output table
///
/// Always keeps a decimal point so the value is never re-read as American
/// odds.
pub fn format_odds(odds: f64) -> String {
    format!("{odds:?}")
}
