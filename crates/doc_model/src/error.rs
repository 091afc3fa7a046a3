//! Error types for document model operations

use crate::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Element not found: {0}")]
    ElementNotFound(NodeId),

    #[error("Page not found: {0}")]
    PageNotFound(NodeId),

    #[error("Duplicate element id: {0}")]
    DuplicateId(NodeId),

    #[error("Cannot delete the last remaining page")]
    LastPage,

    #[error("Table must keep at least one row")]
    LastRow,

    #[error("Table must keep at least one column")]
    LastColumn,

    #[error("Cell ({row}, {col}) is outside the table grid")]
    CellOutOfRange { row: usize, col: usize },

    #[error("Element {0} is not a table")]
    NotATable(NodeId),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocModelError {
    /// Whether this error is a structural-invariant rejection (the operation
    /// would have left the document with zero pages or an empty table).
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::LastPage | Self::LastRow | Self::LastColumn)
    }
}

pub type Result<T> = std::result::Result<T, DocModelError>;
