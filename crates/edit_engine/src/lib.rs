//! Edit Engine - Commands for canvas templates
//!
//! This crate implements every mutation of a canvas document as a command:
//! element add/update/delete/move, page add/duplicate/delete, and the table
//! grid operations. Commands are pure; `EditingSession` strings them together
//! and tracks unsaved changes.

mod command;
mod executor;
mod error;
mod element_commands;
mod page_commands;
mod table_commands;

pub use command::{Command, CommandResult};
pub use executor::*;
pub use error::*;
pub use element_commands::*;
pub use page_commands::*;
pub use table_commands::*;
