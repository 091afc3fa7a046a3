//! Template file I/O
//!
//! A template record pairs a canvas document with the paper it prints on.

use crate::{Result, StoreError};
use doc_model::{CanvasDocument, Orientation, PageDimensions, PageSizePreset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A stored template: `{ pageSize, orientation, canvasDocument }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub page_size: PageSizePreset,
    pub orientation: Orientation,
    pub canvas_document: CanvasDocument,
}

impl Template {
    pub fn new(page_size: PageSizePreset, orientation: Orientation) -> Self {
        Self {
            page_size,
            orientation,
            canvas_document: CanvasDocument::new(),
        }
    }

    /// Parse a template and repair its document
    pub fn from_json(json: &str) -> Result<Self> {
        let mut template: Template = serde_json::from_str(json)?;
        let repairs = template.canvas_document.normalize();
        if repairs > 0 {
            tracing::debug!(repairs, "normalized template document");
        }
        Ok(template)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a template from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(StoreError::FileNotFound(path.display().to_string()));
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the template, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Page size in pixels for this template's paper and orientation
    pub fn page_dimensions(&self) -> PageDimensions {
        PageDimensions::from_preset(self.page_size, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_page_dimensions() {
        let template = Template::new(PageSizePreset::Letter, Orientation::Landscape);
        assert_eq!(template.page_dimensions(), PageDimensions::new(1056.0, 816.0));
        assert_eq!(Template::default().page_dimensions(), PageDimensions::new(794.0, 1123.0));
    }

    #[test]
    fn test_from_json_normalizes() {
        let template = Template::from_json(
            r#"{
                "pageSize": "Legal",
                "orientation": "portrait",
                "canvasDocument": {
                    "header": {"height": -5, "elements": [{"type": "text", "content": "Hi"}, {"type": "video"}]},
                    "footer": {"height": 60, "elements": []},
                    "pages": []
                }
            }"#,
        )
        .unwrap();

        assert_eq!(template.page_size, PageSizePreset::Legal);
        let doc = &template.canvas_document;
        assert_eq!(doc.header.height, 0.0);
        assert_eq!(doc.header.elements.len(), 1);
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("templates").join("syllabus.json");

        let template = Template::new(PageSizePreset::A3, Orientation::Portrait);
        template.save(&path).unwrap();

        let loaded = Template::load(&path).unwrap();
        assert_eq!(loaded, template);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Template::load(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::FileNotFound(_))));
    }
}
