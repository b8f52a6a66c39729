//! Outcome detection for reported picks
//!
//! - [`classifier`] - finds Win/Loss/Push markers in a comment
//! - [`linker`] - attaches an outcome to a same-author previous-pick reference

pub mod classifier;
pub mod linker;

pub use classifier::{classify, OutcomeClassifier};
pub use linker::{annotate, link_previous, link_previous_with, mentions_previous_pick};
