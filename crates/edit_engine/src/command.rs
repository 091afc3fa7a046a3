//! Command system for canvas editing
//!
//! Every mutation is a command. A command never touches its input: it clones
//! the document, changes the clone, and hands the clone back. A failed command
//! therefore leaves the caller's document exactly as it was.

use crate::{EditError, Result};
use doc_model::{CanvasDocument, DocModelError, NodeId, TableElement};
use layout_engine::SnapGuide;
use serde_json::{Map, Value};

/// Result of applying a command
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The new document after the command
    pub document: CanvasDocument,
    /// Alignment guides produced by a snapped move
    pub guides: Vec<SnapGuide>,
    /// Id of the element or page the command created, if any
    pub created_id: Option<NodeId>,
}

impl CommandResult {
    pub fn new(document: CanvasDocument) -> Self {
        Self {
            document,
            guides: Vec::new(),
            created_id: None,
        }
    }

    pub fn with_created(mut self, id: NodeId) -> Self {
        self.created_id = Some(id);
        self
    }

    pub fn with_guides(mut self, guides: Vec<SnapGuide>) -> Self {
        self.guides = guides;
        self
    }
}

/// Trait for all editing commands
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply this command to a document
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;

    /// Clone this command into a box
    fn clone_box(&self) -> Box<dyn Command>;
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// ============================================================================
// Helpers shared by the command modules
// ============================================================================

/// Look up a table element by id
pub(crate) fn table_mut<'a>(document: &'a mut CanvasDocument, id: &NodeId) -> Result<&'a mut TableElement> {
    let element = document
        .find_element_mut(id)
        .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
    element
        .as_table_mut()
        .ok_or_else(|| DocModelError::NotATable(id.clone()).into())
}

/// Shallow-merge a JSON object patch into `target`.
///
/// Keys listed in `locked` may appear in the patch only with the value they
/// already have.
pub(crate) fn merge_patch(target: Value, patch: &Value, locked: &[&str]) -> Result<Value> {
    let patch = patch
        .as_object()
        .ok_or_else(|| EditError::InvalidPatch("patch must be a JSON object".to_string()))?;
    let mut merged: Map<String, Value> = match target {
        Value::Object(map) => map,
        _ => return Err(EditError::InvalidPatch("target is not an object".to_string())),
    };

    for (key, value) in patch {
        if locked.contains(&key.as_str()) && merged.get(key) != Some(value) {
            return Err(EditError::InvalidPatch(format!("`{key}` cannot be changed")));
        }
        merged.insert(key.clone(), value.clone());
    }

    Ok(Value::Object(merged))
}
