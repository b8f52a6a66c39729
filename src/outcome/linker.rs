//! Links a comment to its author's previous pick
//!
//! Only adjacent rows are compared: row `i` is linked when its author
//! matches row `i - 1` and its text refers back to an earlier pick. This is
//! a heuristic. A same-author row about some other earlier pick is still
//! linked, and same-author rows separated by another comment are not.

use crate::models::{CommentRecord, Outcome, OutcomeAnnotation};

use super::classifier::OutcomeClassifier;

/// Phrases that mark a reference to an earlier pick
pub const BACKWARD_PHRASES: [&str; 4] = ["previous pick", "last pick", "yesterday", "prior pick"];

/// Whether the text refers back to an earlier pick
pub fn mentions_previous_pick(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BACKWARD_PHRASES.iter().any(|p| lowered.contains(p))
}

/// Previous-pick result for each row of a chronological comment stream
///
/// The returned vector is aligned with `records`. The first row is never
/// linked.
pub fn link_previous(records: &[CommentRecord]) -> Vec<Outcome> {
    link_previous_with(&OutcomeClassifier::default(), records)
}

/// [`link_previous`] with an explicit classifier
pub fn link_previous_with(classifier: &OutcomeClassifier, records: &[CommentRecord]) -> Vec<Outcome> {
    let mut links = vec![Outcome::Unknown; records.len()];

    for (i, pair) in records.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.same_author(previous) && mentions_previous_pick(&current.text) {
            links[i + 1] = classifier.classify(&current.text);
        }
    }

    links
}

/// Classify every row and link previous-pick results in one pass
pub fn annotate(classifier: &OutcomeClassifier, records: &[CommentRecord]) -> Vec<OutcomeAnnotation> {
    let links = link_previous_with(classifier, records);

    records
        .iter()
        .zip(links)
        .map(|(record, previous_pick_result)| OutcomeAnnotation {
            result: classifier.classify(&record.text),
            previous_pick_result,
        })
        .collect()
}
