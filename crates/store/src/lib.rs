//! Store - Template persistence, editor settings and migrations
//!
//! This crate reads and writes template records, keeps the editor's snap
//! preferences on disk, and converts legacy nested-group documents into the
//! flat canvas model.

mod error;
mod template;
pub mod settings;
pub mod migration;

pub use error::*;
pub use template::*;
pub use settings::{EditorSettings, SettingsManager};
pub use migration::{migrate_legacy_document, migrate_legacy_json, MigrationReport};
