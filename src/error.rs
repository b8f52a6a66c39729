//! Unified error handling for the pick pipeline
//!
//! This module provides a unified error type that wraps the domain-specific
//! errors of each layer into a single `Error` enum.
//!
//! # Architecture
//!
//! - [`PipelineErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Extraction and validation failures are recovered inside their stage and
//! never reach this type in normal operation. What does reach it ends the
//! run: missing input structure, unreadable tables, an unusable client.

use thiserror::Error;

pub use crate::llm::ExtractionError;
pub use crate::table::TableError;

/// Common trait for all pipeline error types
pub trait PipelineErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// LLM reply contract errors
    Llm,
    /// Configuration and input-structure errors
    Config,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Llm => "llm",
            Self::Config => "config",
        }
    }
}

/// Unified error type for the pick pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Extraction client errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Table load/reshape/save errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

impl PipelineErrorTrait for ExtractionError {
    fn is_recoverable(&self) -> bool {
        ExtractionError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) | Self::Status { .. } => ErrorCategory::Network,
            _ => ErrorCategory::Llm,
        }
    }
}

impl PipelineErrorTrait for TableError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingColumn(_) | Self::ColumnOrder { .. } => ErrorCategory::Config,
            Self::RowWidth { .. } | Self::ColumnLength { .. } | Self::Csv { .. } => {
                ErrorCategory::Parsing
            }
            Self::Json { .. } | Self::Io { .. } => ErrorCategory::Storage,
        }
    }
}

impl PipelineErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Extraction(e) => PipelineErrorTrait::is_recoverable(e),
            Self::Table(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Extraction(e) => e.category(),
            Self::Table(e) => e.category(),
        }
    }
}

impl Error {
    /// Whether the input lacks structure a stage requires
    pub fn is_fatal_input(&self) -> bool {
        matches!(self, Self::Table(e) if e.is_missing_structure())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
