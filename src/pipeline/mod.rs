//! Batch pipeline over comment tables
//!
//! ```text
//! raw.csv ──clean──▶ cleaned.csv ──extract──▶ identified.csv ──validate──▶ validated.csv
//!                                                                             │
//!                                                                          outcome
//!                                                                             ▼
//!                                                                        results.csv
//! ```
//!
//! Stages run strictly one after another. Only the extraction stage is
//! concurrent; see [`orchestrator`].

pub mod orchestrator;
pub mod stages;

pub use orchestrator::{ExtractionPipeline, RunConfig, DEFAULT_WORKERS};
pub use stages::{clean_stage, extract_stage, outcome_stage, report_fatal, validate_stage};
