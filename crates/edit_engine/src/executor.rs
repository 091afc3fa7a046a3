//! Command execution with change tracking

use crate::{Command, CommandResult, Result};
use doc_model::{CanvasDocument, NodeId};
use layout_engine::SnapGuide;

/// Holds the document being edited and the last saved snapshot.
///
/// Commands run one at a time. A rejected command leaves the document as it
/// was. Comparing against the saved snapshot tells an autosave caller whether
/// there is anything to persist.
#[derive(Debug, Clone)]
pub struct EditingSession {
    document: CanvasDocument,
    saved: CanvasDocument,
    last_guides: Vec<SnapGuide>,
}

impl EditingSession {
    /// Start a session on an already saved document
    pub fn new(document: CanvasDocument) -> Self {
        Self {
            saved: document.clone(),
            document,
            last_guides: Vec::new(),
        }
    }

    /// Get the current document
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Consume the session, returning the current document
    pub fn into_document(self) -> CanvasDocument {
        self.document
    }

    /// Guides produced by the last executed command
    pub fn guides(&self) -> &[SnapGuide] {
        &self.last_guides
    }

    /// Execute a command. Returns the id of anything the command created.
    pub fn execute(&mut self, command: &dyn Command) -> Result<Option<NodeId>> {
        let CommandResult {
            document,
            guides,
            created_id,
        } = command.apply(&self.document).inspect_err(|e| {
            tracing::debug!(command = command.display_name(), error = %e, "command rejected");
        })?;

        self.document = document;
        self.last_guides = guides;
        Ok(created_id)
    }

    /// Whether the document differs from the last saved snapshot
    pub fn is_dirty(&self) -> bool {
        self.document != self.saved
    }

    /// Record the current document as saved
    pub fn mark_saved(&mut self) {
        self.saved = self.document.clone();
    }

    /// Throw away unsaved changes
    pub fn revert(&mut self) {
        self.document = self.saved.clone();
        self.last_guides.clear();
    }
}

impl Default for EditingSession {
    fn default() -> Self {
        Self::new(CanvasDocument::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddElement, AddPage, DeletePage};
    use doc_model::{ElementKind, ElementLocation};

    #[test]
    fn test_execute_tracks_dirty_state() {
        let mut session = EditingSession::default();
        assert!(!session.is_dirty());

        let created = session
            .execute(&AddElement::new(ElementLocation::Header, ElementKind::Line))
            .unwrap();
        assert!(created.is_some());
        assert!(session.is_dirty());

        session.mark_saved();
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_rejected_command_leaves_document() {
        let mut session = EditingSession::default();
        let before = session.document().clone();
        let page_id = before.pages[0].id.clone();

        let err = session.execute(&DeletePage::new(page_id)).unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(session.document(), &before);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_revert() {
        let mut session = EditingSession::default();
        session.execute(&AddPage::new()).unwrap();
        assert_eq!(session.document().pages.len(), 2);
        session.revert();
        assert_eq!(session.document().pages.len(), 1);
        assert!(!session.is_dirty());
    }
}
