//! Document Model - Canvas document structure and element types
//!
//! This crate provides the data model for print-style canvas templates:
//! a shared header and footer zone, one or more content pages, and the
//! absolutely positioned text, image, line and table elements placed on them.
//! Everything serializes to the camelCase JSON the template store persists.

mod node_id;
mod error;
mod document;
mod element;
pub mod page_size;
pub mod table;

pub use node_id::*;
pub use error::*;
pub use document::*;
pub use element::*;
pub use page_size::*;
pub use table::*;
