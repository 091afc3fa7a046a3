//! Table editing commands
//!
//! This module implements commands for reshaping and styling table elements:
//! - AddRow/AddColumn: Append a row or column of default cells
//! - RemoveRow/RemoveColumn: Remove by index (default last), never below 1
//! - ApplyBorderPreset: Full grid, outer only, horizontal, vertical, none, toggles
//! - ApplyCellStyleToAll: Copy one cell's style onto every cell
//! - ResizeColumn: Set the width of a whole column
//! - ResizeCellHeight: Set the height of a single cell
//! - UpdateCell: Patch one cell's content or style

use crate::command::{merge_patch, table_mut};
use crate::{Command, CommandResult, EditError, Result};
use doc_model::{BorderPreset, CanvasDocument, NodeId, TableCell, TableElement};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clone the document, run `edit` on the table, return the clone
fn edit_table(
    document: &CanvasDocument,
    table_id: &NodeId,
    edit: impl FnOnce(&mut TableElement) -> Result<()>,
) -> Result<CommandResult> {
    let mut new_doc = document.clone();
    edit(table_mut(&mut new_doc, table_id)?)?;
    Ok(CommandResult::new(new_doc))
}

// =============================================================================
// AddRow / AddColumn Commands
// =============================================================================

/// Append a row of default cells
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRow {
    pub table_id: NodeId,
}

impl AddRow {
    pub fn new(table_id: NodeId) -> Self {
        Self { table_id }
    }
}

impl Command for AddRow {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            table.add_row();
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Add Row"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Append a column of default cells
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    pub table_id: NodeId,
}

impl AddColumn {
    pub fn new(table_id: NodeId) -> Self {
        Self { table_id }
    }
}

impl Command for AddColumn {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            table.add_column();
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Add Column"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// RemoveRow / RemoveColumn Commands
// =============================================================================

/// Remove a row; the last row when no index is given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRow {
    pub table_id: NodeId,
    #[serde(default)]
    pub index: Option<usize>,
}

impl RemoveRow {
    pub fn last(table_id: NodeId) -> Self {
        Self { table_id, index: None }
    }

    pub fn at(table_id: NodeId, index: usize) -> Self {
        Self {
            table_id,
            index: Some(index),
        }
    }
}

impl Command for RemoveRow {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| Ok(table.remove_row(self.index)?))
    }

    fn display_name(&self) -> &str {
        "Remove Row"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Remove a column; the last column when no index is given
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveColumn {
    pub table_id: NodeId,
    #[serde(default)]
    pub index: Option<usize>,
}

impl RemoveColumn {
    pub fn last(table_id: NodeId) -> Self {
        Self { table_id, index: None }
    }

    pub fn at(table_id: NodeId, index: usize) -> Self {
        Self {
            table_id,
            index: Some(index),
        }
    }
}

impl Command for RemoveColumn {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| Ok(table.remove_column(self.index)?))
    }

    fn display_name(&self) -> &str {
        "Remove Column"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Styling Commands
// =============================================================================

/// Apply a border preset to every cell; applying it twice flips it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyBorderPreset {
    pub table_id: NodeId,
    pub preset: BorderPreset,
}

impl ApplyBorderPreset {
    pub fn new(table_id: NodeId, preset: BorderPreset) -> Self {
        Self { table_id, preset }
    }
}

impl Command for ApplyBorderPreset {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            table.apply_border_preset(self.preset);
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Apply Border Preset"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Copy one cell's style (not its content) onto every cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCellStyleToAll {
    pub table_id: NodeId,
    pub row: usize,
    pub col: usize,
}

impl ApplyCellStyleToAll {
    pub fn new(table_id: NodeId, row: usize, col: usize) -> Self {
        Self { table_id, row, col }
    }
}

impl Command for ApplyCellStyleToAll {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            Ok(table.apply_cell_style_to_all(self.row, self.col)?)
        })
    }

    fn display_name(&self) -> &str {
        "Apply Cell Style To All"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Sizing Commands
// =============================================================================

/// Column-edge drag: every cell in the column takes the new width
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeColumn {
    pub table_id: NodeId,
    pub col: usize,
    pub width: f64,
}

impl ResizeColumn {
    pub fn new(table_id: NodeId, col: usize, width: f64) -> Self {
        Self { table_id, col, width }
    }
}

impl Command for ResizeColumn {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            table.resize_column(self.col, self.width)?;
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Resize Column"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Row-edge drag: only the dragged cell takes the new height
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeCellHeight {
    pub table_id: NodeId,
    pub row: usize,
    pub col: usize,
    pub height: f64,
}

impl ResizeCellHeight {
    pub fn new(table_id: NodeId, row: usize, col: usize, height: f64) -> Self {
        Self {
            table_id,
            row,
            col,
            height,
        }
    }
}

impl Command for ResizeCellHeight {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            table.resize_cell_height(self.row, self.col, self.height)?;
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Resize Cell Height"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// UpdateCell Command
// =============================================================================

/// Patch the content or style of one cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCell {
    pub table_id: NodeId,
    pub row: usize,
    pub col: usize,
    pub patch: Value,
}

impl UpdateCell {
    pub fn new(table_id: NodeId, row: usize, col: usize, patch: Value) -> Self {
        Self {
            table_id,
            row,
            col,
            patch,
        }
    }

    /// Replace only the cell's text
    pub fn content(table_id: NodeId, row: usize, col: usize, content: impl Into<String>) -> Self {
        Self::new(table_id, row, col, serde_json::json!({ "content": content.into() }))
    }
}

impl Command for UpdateCell {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        edit_table(document, &self.table_id, |table| {
            let cell = table.cell_mut(self.row, self.col)?;
            let current = serde_json::to_value(&*cell)
                .map_err(|e| EditError::InvalidPatch(e.to_string()))?;
            let merged = merge_patch(current, &self.patch, &[])?;
            *cell = serde_json::from_value::<TableCell>(merged)
                .map_err(|e| EditError::InvalidPatch(e.to_string()))?;
            Ok(())
        })
    }

    fn display_name(&self) -> &str {
        "Update Cell"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}
