//! Error types for layout engine

use doc_model::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Page not found: {0}")]
    PageNotFound(NodeId),

    #[error("Element not found: {0}")]
    ElementNotFound(NodeId),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
