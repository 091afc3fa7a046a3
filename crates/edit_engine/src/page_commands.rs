//! Page commands
//!
//! A document always keeps at least one page. Duplicated pages get a new id,
//! and every element on them gets a new id too.

use crate::{Command, CommandResult, Result};
use doc_model::{CanvasDocument, DocModelError, NodeId, Page};
use serde::{Deserialize, Serialize};

// =============================================================================
// AddPage Command
// =============================================================================

/// Add a blank page, at the end unless an index is given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPage {
    #[serde(default)]
    pub index: Option<usize>,
}

impl AddPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_index(index: usize) -> Self {
        Self { index: Some(index) }
    }
}

impl Command for AddPage {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let page = Page::new();
        let id = page.id.clone();
        let index = self.index.unwrap_or(new_doc.pages.len());
        new_doc.insert_page(index, page);

        tracing::debug!(page = %id, index, "added page");
        Ok(CommandResult::new(new_doc).with_created(id))
    }

    fn display_name(&self) -> &str {
        "Add Page"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// DuplicatePage Command
// =============================================================================

/// Copy a page, placing the copy right after the original
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePage {
    pub page_id: NodeId,
}

impl DuplicatePage {
    pub fn new(page_id: NodeId) -> Self {
        Self { page_id }
    }
}

impl Command for DuplicatePage {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let index = new_doc
            .page_index(&self.page_id)
            .ok_or_else(|| DocModelError::PageNotFound(self.page_id.clone()))?;

        let copy = new_doc.pages[index].duplicate();
        let id = copy.id.clone();
        new_doc.insert_page(index + 1, copy);

        tracing::debug!(source = %self.page_id, page = %id, "duplicated page");
        Ok(CommandResult::new(new_doc).with_created(id))
    }

    fn display_name(&self) -> &str {
        "Duplicate Page"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

// =============================================================================
// DeletePage Command
// =============================================================================

/// Delete a page. Rejected when it is the only page left.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePage {
    pub page_id: NodeId,
}

impl DeletePage {
    pub fn new(page_id: NodeId) -> Self {
        Self { page_id }
    }
}

impl Command for DeletePage {
    fn apply(&self, document: &CanvasDocument) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        new_doc.remove_page(&self.page_id)?;
        tracing::debug!(page = %self.page_id, remaining = new_doc.pages.len(), "deleted page");
        Ok(CommandResult::new(new_doc))
    }

    fn display_name(&self) -> &str {
        "Delete Page"
    }

    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditError;
    use doc_model::{Element, ElementKind, ElementLocation};

    #[test]
    fn test_add_page_appends_and_inserts() {
        let doc = CanvasDocument::new();
        let first = doc.pages[0].id.clone();

        let result = AddPage::new().apply(&doc).unwrap();
        assert_eq!(result.document.pages.len(), 2);
        assert_eq!(result.document.pages[1].id, result.created_id.unwrap());

        let result = AddPage::at_index(0).apply(&result.document).unwrap();
        assert_eq!(result.document.pages[0].id, result.created_id.unwrap());
        assert_eq!(result.document.pages[1].id, first);
    }

    #[test]
    fn test_duplicate_page_assigns_new_ids() {
        let mut doc = CanvasDocument::new();
        let page_id = doc.pages[0].id.clone();
        let mut text = Element::new(ElementKind::Text);
        text.set_position(12.0, 34.0);
        let text_id = text.id().clone();
        doc.insert_element(&ElementLocation::content(page_id.clone()), text).unwrap();
        doc.pages.push(Page::new());

        let result = DuplicatePage::new(page_id.clone()).apply(&doc).unwrap();
        let pages = &result.document.pages;
        assert_eq!(pages.len(), 3);

        let copy = &pages[1];
        assert_eq!(Some(copy.id.clone()), result.created_id);
        assert_ne!(copy.id, page_id);
        assert_eq!(copy.elements.len(), 1);
        assert_ne!(copy.elements[0].id(), &text_id);
        assert_eq!(copy.elements[0].position(), (12.0, 34.0));
        assert!(result.document.is_consistent());
    }

    #[test]
    fn test_delete_last_page_rejected() {
        let doc = CanvasDocument::new();
        let page_id = doc.pages[0].id.clone();

        let err = DeletePage::new(page_id).apply(&doc).unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(err, EditError::DocModel(DocModelError::LastPage)));
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_delete_page() {
        let doc = AddPage::new().apply(&CanvasDocument::new()).unwrap().document;
        let first = doc.pages[0].id.clone();
        let result = DeletePage::new(first.clone()).apply(&doc).unwrap();
        assert_eq!(result.document.pages.len(), 1);
        assert!(result.document.page(&first).is_none());

        let err = DeletePage::new(NodeId::from("missing")).apply(&doc).unwrap_err();
        assert!(!err.is_rejection());
    }
}
