//! Comment text handling
//!
//! - [`sanitize`] - markdown/link stripping and glyph repair
//! - [`glyphs`] - configurable table of outcome glyphs
//! - [`clean`] - row filters and date extraction for the cleaning stage

pub mod clean;
pub mod glyphs;
pub mod sanitize;

pub use glyphs::{GlyphRepair, GlyphTable};
pub use sanitize::{normalize_comment, normalize_comment_with};
