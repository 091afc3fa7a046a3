//! Element editing commands
//!
//! - AddElement: create a text, image, line or table element with defaults
//! - UpdateElement: merge a partial JSON patch into an element
//! - DeleteElement: remove an element from its zone or page
//! - MoveElement: snap, convert and clamp a dragged element, then commit

use crate::command::merge_patch;
use crate::{Command, CommandResult, EditError, Result};
use doc_model::{CanvasDocument, DocModelError, Element, ElementKind, ElementLocation, NodeId, PageDimensions};
use layout_engine::{plan_move, Point, SnapOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// AddElement Command
// =============================================================================

/// Add a new element with a fresh id and default style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddElement {
    pub location: ElementLocation,
    pub kind: ElementKind,
    /// Initial zone-relative position; the zone origin when absent
    #[serde(default)]
    pub position: Option<Point>,
}

impl AddElement {
    pub fn new(location: ElementLocation, kind: ElementKind) -> Self {
        Self {
            location,
            kind,
            position: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }
}

impl Command for AddElement {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();

        let mut element = Element::new(self.kind);
        if let Some(p) = self.position {
            element.set_position(p.x, p.y);
        }
        let id = element.id().clone();
        new_doc.insert_element(&self.location, element)?;

        tracing::debug!(element = %id, kind = ?self.kind, "added element");
        Ok(CommandResult::new(new_doc).with_created(id))
    }

    fn display_name(&self) -> &str {
        "Add Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// UpdateElement Command
// =============================================================================

/// Merge a partial patch into an element.
///
/// The patch is a JSON object using the element's wire names. It may not
/// change `id` or `type`, and the merged result must still be a valid
/// element. Table shape is repaired after the merge, so patching `rows` or
/// `cols` pads or truncates `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateElement {
    pub element_id: NodeId,
    pub patch: Value,
}

impl UpdateElement {
    pub fn new(element_id: NodeId, patch: Value) -> Self {
        Self { element_id, patch }
    }
}

impl Command for UpdateElement {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();

        let element = new_doc
            .find_element_mut(&self.element_id)
            .ok_or_else(|| DocModelError::ElementNotFound(self.element_id.clone()))?;

        let current = serde_json::to_value(&*element)
            .map_err(|e| EditError::InvalidPatch(e.to_string()))?;
        let merged = merge_patch(current, &self.patch, &["id", "type"])?;
        let mut updated: Element = serde_json::from_value(merged)
            .map_err(|e| EditError::InvalidPatch(e.to_string()))?;

        if let Some(table) = updated.as_table_mut() {
            table.normalize();
        }
        *element = updated;

        tracing::debug!(element = %self.element_id, "updated element");
        Ok(CommandResult::new(new_doc))
    }

    fn display_name(&self) -> &str {
        "Update Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// DeleteElement Command
// =============================================================================

/// Remove an element from whichever zone or page owns it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteElement {
    pub element_id: NodeId,
}

impl DeleteElement {
    pub fn new(element_id: NodeId) -> Self {
        Self { element_id }
    }
}

impl Command for DeleteElement {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let (location, _) = new_doc.remove_element(&self.element_id)?;
        tracing::debug!(element = %self.element_id, zone = ?location.zone_kind(), "deleted element");
        Ok(CommandResult::new(new_doc))
    }

    fn display_name(&self) -> &str {
        "Delete Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// MoveElement Command
// =============================================================================

/// Commit a drag: snap the proposed position against the zone and every
/// other element visible on `page_id`, then clamp it into the zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveElement {
    pub element_id: NodeId,
    /// Page being edited; header and footer elements snap against it too
    pub page_id: NodeId,
    /// Proposed zone-relative position
    pub proposed: Point,
    pub page: PageDimensions,
    #[serde(default)]
    pub snap: SnapOptions,
    #[serde(default = "default_clamp")]
    pub clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl MoveElement {
    pub fn new(element_id: NodeId, page_id: NodeId, x: f64, y: f64, page: PageDimensions) -> Self {
        Self {
            element_id,
            page_id,
            proposed: Point::new(x, y),
            page,
            snap: SnapOptions::default(),
            clamp: true,
        }
    }

    pub fn with_snap(mut self, snap: SnapOptions) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

impl Command for MoveElement {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let plan = plan_move(
            document,
            &self.page_id,
            &self.element_id,
            self.proposed,
            self.page,
            &self.snap,
            self.clamp,
        )?;

        let mut new_doc = document.clone();
        let element = new_doc
            .find_element_mut(&self.element_id)
            .ok_or_else(|| DocModelError::ElementNotFound(self.element_id.clone()))?;
        element.set_position(plan.x, plan.y);

        Ok(CommandResult::new(new_doc).with_guides(plan.guides))
    }

    fn display_name(&self) -> &str {
        "Move Element"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
