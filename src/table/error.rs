//! Error types for table storage

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading, reshaping or saving a table
#[derive(Error, Debug)]
pub enum TableError {
    /// A column a stage depends on is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Column range bounds are in the wrong order
    #[error("Column '{start}' comes after column '{end}'")]
    ColumnOrder { start: String, end: String },

    /// A row does not match the header width
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// New column values do not match the row count
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// CSV read or write failure
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON write failure
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the input is missing structure a stage requires
    pub fn is_missing_structure(&self) -> bool {
        matches!(self, Self::MissingColumn(_) | Self::ColumnOrder { .. })
    }
}
