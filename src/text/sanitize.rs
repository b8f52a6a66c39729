//! Comment text normalization
//!
//! Strips markdown emphasis and links from forum comments and repairs
//! mis-encoded outcome glyphs before the text reaches the model or the
//! outcome classifier.

use regex::Regex;
use std::sync::LazyLock;

use super::glyphs::GlyphTable;

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Normalize a comment body with the standard glyph table
///
/// # Examples
///
/// ```
/// use potd_pipeline::text::sanitize::normalize_comment;
///
/// let text = "**POTD** Lakers -5.5 https://example.com/slip";
/// assert_eq!(normalize_comment(text), "POTD Lakers -5.5 ");
/// ```
pub fn normalize_comment(text: &str) -> String {
    normalize_comment_with(text, GlyphTable::standard())
}

/// Normalize a comment body with a caller-supplied glyph table
pub fn normalize_comment_with(text: &str, glyphs: &GlyphTable) -> String {
    let result = strip_bold(text);
    let result = strip_links(&result);
    glyphs.repair(&result)
}

/// Unwrap `**bold**` markers, keeping the inner text
///
/// # Examples
///
/// ```
/// use potd_pipeline::text::sanitize::strip_bold;
///
/// assert_eq!(strip_bold("**Pick:** Over 2.5"), "Pick: Over 2.5");
/// ```
pub fn strip_bold(text: &str) -> String {
    BOLD_REGEX.replace_all(text, "$1").to_string()
}

/// Remove `http://` and `https://` links up to the next whitespace
pub fn strip_links(text: &str) -> String {
    LINK_REGEX.replace_all(text, "").to_string()
}

/// Character length as counted for the noise filter
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
