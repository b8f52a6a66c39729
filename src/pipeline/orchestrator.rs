//! Concurrent extraction over a comment table
//!
//! Comments are fanned out to at most `workers` in-flight extractions with
//! `buffer_unordered`. Completions arrive in any order; each carries its row
//! index so the output is put back into submission order before returning.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::llm::PickExtractor;
use crate::models::ExtractionResult;

/// Default number of concurrent extractions
pub const DEFAULT_WORKERS: usize = 8;

/// Run configuration for one extraction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Concurrent extractions in flight
    pub workers: usize,

    /// Process only the first N comments
    pub limit: Option<usize>,

    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            limit: None,
            show_progress: true,
        }
    }
}

impl RunConfig {
    /// Number of rows a pass over `total` rows will process
    pub fn effective_len(&self, total: usize) -> usize {
        self.limit.map_or(total, |n| n.min(total))
    }
}

/// Fans comments out to a [`PickExtractor`] with bounded concurrency
pub struct ExtractionPipeline<'a, E: PickExtractor + ?Sized> {
    extractor: &'a E,
    config: RunConfig,
}

impl<'a, E: PickExtractor + ?Sized> ExtractionPipeline<'a, E> {
    pub fn new(extractor: &'a E, config: RunConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Extract every comment, honoring the configured row limit
    ///
    /// Returns one record per processed comment, in input order. Failures
    /// inside the extractor become fallback records and never cancel other
    /// extractions.
    pub async fn extract_all<S: AsRef<str>>(&self, comments: &[S]) -> Vec<ExtractionResult> {
        let total = self.config.effective_len(comments.len());
        let comments = &comments[..total];
        let workers = self.config.workers.max(1);

        tracing::info!(total, workers, model = %self.extractor.model(), "Starting extraction");

        let progress = self.progress_bar(total as u64);

        let mut indexed: Vec<(usize, ExtractionResult)> = stream::iter(comments.iter().enumerate())
            .map(|(idx, comment)| async move {
                let record = self.extractor.extract(comment.as_ref()).await;
                (idx, record)
            })
            .buffer_unordered(workers)
            .inspect(|_| progress.inc(1))
            .collect()
            .await;

        progress.finish_and_clear();

        indexed.sort_unstable_by_key(|(idx, _)| *idx);
        let records: Vec<ExtractionResult> = indexed.into_iter().map(|(_, r)| r).collect();

        let fallbacks = records.iter().filter(|r| r.is_fallback()).count();
        tracing::info!(total = records.len(), fallbacks, "Extraction complete");

        records
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} comments ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
        );
        pb
    }
}
