//! Error types for placeholder rendering

use thiserror::Error;

/// Errors that can occur while loading merge data
#[derive(Debug, Error)]
pub enum MergeError {
    /// IO error reading a record file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing record JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;
