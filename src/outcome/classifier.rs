//! Line-oriented win/loss/push detection

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::models::Outcome;
use crate::text::{normalize_comment_with, GlyphTable};

static WIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bwin\b").unwrap());

static LOSS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bloss\b").unwrap());

/// Marks a recap of an older pick; the recap sentence is ignored
pub const LAST_POTD_MARKER: &str = "last potd";

/// Characters that end a recap sentence when followed by whitespace
const SENTENCE_END: [char; 4] = ['.', '!', '?', ';'];

const PUSH_MARKER: &str = "push";

/// Classifies the outcome a comment reports
#[derive(Debug, Clone, Default)]
pub struct OutcomeClassifier {
    glyphs: GlyphTable,
}

impl OutcomeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(glyphs: GlyphTable) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Scan the comment line by line and return the first outcome found
    ///
    /// A [`LAST_POTD_MARKER`] recap is skipped up to the end of its sentence,
    /// so a line holding only a recap is skipped entirely. Within a line a
    /// win is checked before a loss, and a loss before a push.
    pub fn classify(&self, text: &str) -> Outcome {
        let normalized = normalize_comment_with(text, &self.glyphs).to_lowercase();

        normalized
            .lines()
            .map(|line| self.classify_line(&without_recaps(line)))
            .find(Outcome::is_known)
            .unwrap_or_default()
    }

    fn classify_line(&self, line: &str) -> Outcome {
        if WIN_REGEX.is_match(line) || self.glyphs.has_win_glyph(line) {
            Outcome::Win
        } else if LOSS_REGEX.is_match(line) || self.glyphs.has_loss_glyph(line) {
            Outcome::Loss
        } else if line.contains(PUSH_MARKER) {
            Outcome::Push
        } else {
            Outcome::Unknown
        }
    }
}

/// Drop every recap sentence from a lowercased line
fn without_recaps(line: &str) -> Cow<'_, str> {
    if !line.contains(LAST_POTD_MARKER) {
        return Cow::Borrowed(line);
    }

    let mut kept = String::new();
    let mut rest = line;
    while let Some(start) = rest.find(LAST_POTD_MARKER) {
        kept.push_str(&rest[..start]);
        let recap = &rest[start + LAST_POTD_MARKER.len()..];
        rest = sentence_end(recap).map_or("", |end| &recap[end..]);
    }
    kept.push_str(rest);
    Cow::Owned(kept)
}

/// Byte offset just past the first sentence terminator followed by
/// whitespace, so decimals like `2.5` do not end a sentence
fn sentence_end(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if SENTENCE_END.contains(&c) {
            match chars.peek() {
                Some((_, next)) if next.is_whitespace() => return Some(idx + c.len_utf8()),
                None => return Some(idx + c.len_utf8()),
                _ => {}
            }
        }
    }
    None
}

/// Classify with the standard glyph table
///
/// # Examples
///
/// ```
/// use potd_pipeline::models::Outcome;
/// use potd_pipeline::outcome::classify;
///
/// assert_eq!(classify("Result: push"), Outcome::Push);
/// assert_eq!(classify("no outcome mentioned"), Outcome::Unknown);
/// ```
pub fn classify(text: &str) -> Outcome {
    static CLASSIFIER: LazyLock<OutcomeClassifier> = LazyLock::new(OutcomeClassifier::default);
    CLASSIFIER.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_potd_line_is_skipped() {
        let text = "Last POTD: loss\nToday: WIN \u{2705}";
        assert_eq!(classify(text), Outcome::Win);
    }

    #[test]
    fn test_last_potd_only_is_unknown() {
        assert_eq!(classify("Last POTD: win"), Outcome::Unknown);
        assert_eq!(classify("Last POTD: win, 2.5 odds cashed"), Outcome::Unknown);
    }

    #[test]
    fn test_recap_sentence_on_same_line_is_skipped() {
        let text = "Last POTD: loss. Today: WIN \u{2705}";
        assert_eq!(classify(text), Outcome::Win);

        let text = "Today: push! Last POTD: win.";
        assert_eq!(classify(text), Outcome::Push);
    }

    #[test]
    fn test_decimal_does_not_end_recap() {
        assert_eq!(classify("Last POTD at 2.5 was a win"), Outcome::Unknown);
    }

    #[test]
    fn test_first_matching_line_wins() {
        let text = "yesterday was a loss\ntoday we win";
        assert_eq!(classify(text), Outcome::Loss);
    }

    #[test]
    fn test_win_checked_before_loss_on_same_line() {
        assert_eq!(classify("win some, loss some"), Outcome::Win);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(classify("winner winner"), Outcome::Unknown);
        assert_eq!(classify("lossless audio"), Outcome::Unknown);
    }

    #[test]
    fn test_push_is_substring() {
        assert_eq!(classify("Result: push"), Outcome::Push);
        assert_eq!(classify("it pushed"), Outcome::Push);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(classify("hit \u{2705}"), Outcome::Win);
        assert_eq!(classify("missed \u{274C}"), Outcome::Loss);
        assert_eq!(classify("missed \u{2718}"), Outcome::Loss);
    }

    #[test]
    fn test_garbled_glyph_is_repaired_first() {
        assert_eq!(classify("hit \u{E2}\u{153}\u{2026}"), Outcome::Win);
    }

    #[test]
    fn test_custom_glyph_table() {
        let mut glyphs = GlyphTable::default();
        glyphs.win.push("\u{1F4B0}".to_string());
        let classifier = OutcomeClassifier::with_glyphs(glyphs);
        assert_eq!(classifier.classify("cashed \u{1F4B0}"), Outcome::Win);
        assert_eq!(classify("cashed \u{1F4B0}"), Outcome::Unknown);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(classify(""), Outcome::Unknown);
    }
}
