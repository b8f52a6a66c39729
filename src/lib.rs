//! potd-pipeline - structured pick extraction from forum comments
//!
//! Turns free-text "pick of the day" comments into structured bets with a
//! local language model, normalizes odds and stakes, and detects the
//! win/loss/push outcomes authors report afterwards.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`text`] - Comment normalization and cleaning filters
//! - [`llm`] - Ollama-backed pick extraction
//! - [`pipeline`] - Concurrent extraction and table stages
//! - [`validate`] - Odds/unit normalization and pick filtering
//! - [`outcome`] - Outcome classification and previous-pick linking
//! - [`table`] - CSV/JSON table storage
//!
//! # Example
//!
//! ```no_run
//! use potd_pipeline::llm::LlmClient;
//! use potd_pipeline::pipeline::{ExtractionPipeline, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = LlmClient::new()?;
//!     let comments = vec!["POTD: Lakers -5.5 (-110), 2u".to_string()];
//!     let records = ExtractionPipeline::new(&client, RunConfig::default())
//!         .extract_all(&comments)
//!         .await;
//!     println!("{records:?}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod table;
pub mod text;
pub mod validate;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, PipelineErrorTrait, Result};
    pub use crate::llm::{LlmClient, PickExtractor};
    pub use crate::models::{CommentRecord, ExtractionResult, Outcome, ValidatedRecord};
    pub use crate::outcome::{classify, link_previous, OutcomeClassifier};
    pub use crate::pipeline::{ExtractionPipeline, RunConfig};
    pub use crate::table::Table;
    pub use crate::validate::{filter_valid, validate_odds, validate_unit};
}

// Direct re-exports for convenience
pub use models::{CommentRecord, ExtractionResult, Outcome, ValidatedRecord};
