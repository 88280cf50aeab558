//! Error types for the Scour library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Scour operations.
#[derive(Debug, Error)]
pub enum ScourError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed or inconsistent table input (ragged columns, duplicate
    /// names, invalid operation parameters).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation referenced a column the table does not have.
    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Error saving or loading an execution record.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
