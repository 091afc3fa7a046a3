//! Placeholder rendering for canvas templates
//!
//! This crate fills the `{{field}}` placeholders of a canvas document with
//! the values of a syllabus record.
//!
//! # Features
//!
//! - Syllabus record parsing with month and credit formatting
//! - Substitution in text elements and table cells, leaving unknown tokens
//! - Discovery of the placeholders a template uses
//!
//! # Example
//!
//! ```rust
//! use doc_model::{CanvasDocument, Element, TextElement};
//! use mail_merge::{render_canvas_document, SyllabusRecord};
//!
//! let mut doc = CanvasDocument::new();
//! doc.header.elements.push(Element::Text(TextElement {
//!     content: "Course: {{courseCode}}".to_string(),
//!     ..Default::default()
//! }));
//!
//! let record = SyllabusRecord::from_json(r#"{"courseCode": "CS101"}"#).unwrap();
//! let rendered = render_canvas_document(&doc, &record);
//! assert_eq!(rendered.header.elements[0].contents(), vec!["Course: CS101"]);
//! ```

mod error;
mod record;
pub mod merge_field;
pub mod merge_engine;

pub use error::{MergeError, Result};
pub use record::{format_month, is_known_field, Credits, PlaceholderValues, SyllabusRecord, FIELD_NAMES};
pub use merge_engine::{
    placeholders_in, render_canvas_document, render_element, render_page, render_with_values, render_zone,
    unknown_placeholders,
};
