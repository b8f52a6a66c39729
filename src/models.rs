// Core data structures for the pick pipeline

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder the extractor uses for a field it could not find.
pub const NOT_AVAILABLE: &str = "N/A";

/// Timestamp format written by the forum scraper
pub const COMMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single scraped forum comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommentRecord {
    pub author: Option<String>,
    pub text: String,
    pub timestamp: Option<NaiveDateTime>,
    pub score: i64, // Comment karma
}

impl CommentRecord {
    /// Create a record with only author and text set
    pub fn new(author: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            author: author.map(str::to_string),
            text: text.into(),
            ..Default::default()
        }
    }

    /// True when both records carry the same, present author.
    ///
    /// An absent author never matches, not even another absent author.
    pub fn same_author(&self, other: &CommentRecord) -> bool {
        match (&self.author, &other.author) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Structured fields pulled out of one comment by the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "Pick")]
    pub pick: String,
    #[serde(rename = "Odds")]
    pub odds: String,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Unit")]
    pub unit: String,
}

impl ExtractionResult {
    /// Canonical record substituted whenever extraction fails
    pub fn fallback() -> Self {
        Self {
            pick: NOT_AVAILABLE.to_string(),
            odds: NOT_AVAILABLE.to_string(),
            sport: NOT_AVAILABLE.to_string(),
            unit: "1".to_string(),
        }
    }

    /// Whether this is exactly the fallback record
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Field values in output column order
    pub fn into_values(self) -> [String; 4] {
        [self.pick, self.odds, self.sport, self.unit]
    }
}

/// Extraction result after odds/unit normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    #[serde(rename = "Pick")]
    pub pick: String,
    #[serde(rename = "Odds")]
    pub odds: f64, // Decimal, 1.5..=3.0
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Unit")]
    pub unit: u8, // 1..=5
}

/// Reported result of a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
    #[default]
    Unknown,
}

impl Outcome {
    /// Column value; `Unknown` is written as an empty cell
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Push => "Push",
            Self::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-row annotations produced by the outcome stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeAnnotation {
    pub result: Outcome,
    pub previous_pick_result: Outcome,
}

/// Counters reported at the end of each stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub rows_in: usize,
    pub rows_out: usize,
    pub fallbacks: usize,
}

impl StageStats {
    pub fn dropped(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}
