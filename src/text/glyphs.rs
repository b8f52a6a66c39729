//! Outcome glyphs and repairs for mis-encoded sequences
//!
//! The source platform sometimes delivers UTF-8 emoji that were decoded as
//! Windows-1252 somewhere upstream. [`GlyphTable`] maps those garbled
//! sequences back to the intended glyph and lists which glyphs mark a win
//! or a loss.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Check mark
pub const CHECK_MARK: &str = "\u{2705}";

/// Cross mark
pub const CROSS_MARK: &str = "\u{274C}";

/// Heavy ballot X, the second cross-mark variant seen in comments
pub const BALLOT_X: &str = "\u{2718}";

static DEFAULT_TABLE: LazyLock<GlyphTable> = LazyLock::new(GlyphTable::default);

/// A single garbled sequence and its replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphRepair {
    pub garbled: String,
    pub glyph: String,
}

impl GlyphRepair {
    pub fn new(garbled: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            garbled: garbled.into(),
            glyph: glyph.into(),
        }
    }
}

/// Normalization table for outcome glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphTable {
    /// Applied in order during normalization
    pub repairs: Vec<GlyphRepair>,

    /// Glyphs that report a win
    pub win: Vec<String>,

    /// Glyphs that report a loss
    pub loss: Vec<String>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self {
            repairs: vec![
                // U+2705 read as cp1252
                GlyphRepair::new("\u{E2}\u{153}\u{2026}", CHECK_MARK),
                // U+2715 read as cp1252
                GlyphRepair::new("\u{E2}\u{153}\u{2022}", CROSS_MARK),
                GlyphRepair::new(BALLOT_X, CROSS_MARK),
            ],
            win: vec![CHECK_MARK.to_string()],
            loss: vec![CROSS_MARK.to_string(), BALLOT_X.to_string()],
        }
    }
}

impl GlyphTable {
    /// Shared instance with the observed defaults
    pub fn standard() -> &'static GlyphTable {
        &DEFAULT_TABLE
    }

    /// Replace every garbled sequence with its intended glyph
    pub fn repair(&self, text: &str) -> String {
        self.repairs
            .iter()
            .filter(|r| !r.garbled.is_empty())
            .fold(text.to_string(), |acc, r| acc.replace(&r.garbled, &r.glyph))
    }

    pub fn has_win_glyph(&self, line: &str) -> bool {
        contains_any(line, &self.win)
    }

    pub fn has_loss_glyph(&self, line: &str) -> bool {
        contains_any(line, &self.loss)
    }
}

// Empty entries would match every line
fn contains_any(line: &str, glyphs: &[String]) -> bool {
    glyphs
        .iter()
        .any(|g| !g.is_empty() && line.contains(g.as_str()))
}
