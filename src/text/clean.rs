//! Row-level helpers for the cleaning stage

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use super::sanitize::char_len;

/// Minimum normalized comment length kept by default
pub const DEFAULT_MIN_COMMENT_LENGTH: usize = 250;

/// Output format of `Extracted_Date`
pub const EXTRACTED_DATE_FORMAT: &str = "%m/%d/%Y";

static TITLE_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}/\d{1,2}/\d{2})").unwrap());

/// Markers left behind by moderation
const REMOVED_MARKERS: [&str; 2] = ["[deleted]", "[removed]"];

/// Pull the thread date out of a post title such as `"POTD 3/14/24"`
///
/// Returns the date as `MM/DD/YYYY`, or `None` when the title carries no
/// parseable `M/D/YY` date.
///
/// # Examples
///
/// ```
/// use potd_pipeline::text::clean::extract_post_date;
///
/// assert_eq!(extract_post_date("Pick of the Day 3/4/24").as_deref(), Some("03/04/2024"));
/// assert_eq!(extract_post_date("no date"), None);
/// ```
pub fn extract_post_date(title: &str) -> Option<String> {
    let captured = TITLE_DATE_REGEX.captures(title)?.get(1)?.as_str();
    NaiveDate::parse_from_str(captured, "%m/%d/%y")
        .ok()
        .map(|d| d.format(EXTRACTED_DATE_FORMAT).to_string())
}

/// Whether the comment body was deleted or removed by a moderator
pub fn is_removed(text: &str) -> bool {
    REMOVED_MARKERS.iter().any(|m| text.contains(m))
}

/// Whether a normalized comment is long enough to carry a real pick
pub fn is_long_enough(text: &str, min_len: usize) -> bool {
    char_len(text) >= min_len
}
