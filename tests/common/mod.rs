//! Common test utilities

use async_trait::async_trait;
use potd_pipeline::llm::{ExtractionError, LlmResult, PickExtractor};
use potd_pipeline::pipeline::RunConfig;
use potd_pipeline::table::Table;
use potd_pipeline::ExtractionResult;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Deterministic extractor: the comment becomes the pick
///
/// Comments starting with "fail" produce an error. A comment of the form
/// `sleep:<ms> ...` waits that long before answering, so completions can be
/// forced out of submission order.
pub struct StubExtractor {
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl StubExtractor {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

fn delay_of(comment: &str) -> Option<Duration> {
    let rest = comment.strip_prefix("sleep:")?;
    let ms: u64 = rest.split_whitespace().next()?.parse().ok()?;
    Some(Duration::from_millis(ms))
}

#[async_trait]
impl PickExtractor for StubExtractor {
    fn model(&self) -> &str {
        "stub"
    }

    async fn try_extract(&self, comment: &str) -> LlmResult<ExtractionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = delay_of(comment).unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if comment.starts_with("fail") {
            return Err(ExtractionError::EmptyReply);
        }
        Ok(ExtractionResult {
            pick: comment.to_string(),
            odds: "-110".to_string(),
            sport: "NBA".to_string(),
            unit: "2u".to_string(),
        })
    }
}

/// Run configuration without a progress bar
pub fn quiet_run(workers: usize, limit: Option<usize>) -> RunConfig {
    RunConfig {
        workers,
        limit,
        show_progress: false,
    }
}

/// Pad a comment past the default minimum length
#[allow(dead_code)]
pub fn long_comment(text: &str) -> String {
    format!("{text} {}", "analysis ".repeat(40))
}

/// Build a raw scrape table in the scraper's column order
#[allow(dead_code)]
pub fn raw_scrape(rows: &[(&str, &str, &str)]) -> Table {
    let mut table = Table::new([
        "Post_Title",
        "Post_Date",
        "Comment_Author",
        "Comment_Karma",
        "Comment_Date",
        "Comment_Text",
    ]);
    for (title, author, text) in rows {
        table
            .push_row([
                title.to_string(),
                "2024-03-04 08:00:00".to_string(),
                author.to_string(),
                "1".to_string(),
                "2024-03-04 09:00:00".to_string(),
                text.to_string(),
            ])
            .unwrap();
    }
    table
}
