//! Error types for editing operations

use doc_model::DocModelError;
use layout_engine::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Document model error: {0}")]
    DocModel(#[from] DocModelError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl EditError {
    /// Whether the command was refused because it would break a structural
    /// invariant (deleting the last page, row or column).
    pub fn is_rejection(&self) -> bool {
        matches!(self, EditError::DocModel(e) if e.is_structural())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
