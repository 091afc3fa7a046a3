//! Canvas document root: header and footer zones plus one or more pages
//!
//! The header and footer are shared by every page; each page carries its own
//! content elements. A document always has at least one page.

use crate::{DocModelError, Element, NodeId, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

pub const DEFAULT_HEADER_HEIGHT: f64 = 100.0;
pub const DEFAULT_FOOTER_HEIGHT: f64 = 80.0;

// =============================================================================
// Zones and Pages
// =============================================================================

/// The three vertical regions of a page, each with its own origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Header,
    Content,
    Footer,
}

/// Header or footer region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    /// Height in pixels, never negative
    pub height: f64,
    #[serde(deserialize_with = "deserialize_elements")]
    pub elements: Vec<Element>,
}

impl Zone {
    pub fn new(height: f64) -> Self {
        Self {
            height: height.max(0.0),
            elements: Vec::new(),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// One page of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub id: NodeId,
    #[serde(deserialize_with = "deserialize_elements")]
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            elements: Vec::new(),
        }
    }

    /// Copy of this page where the page and every element get new ids
    pub fn duplicate(&self) -> Self {
        Self {
            id: NodeId::new(),
            elements: self.elements.iter().map(Element::with_fresh_id).collect(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Where an element lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "lowercase")]
pub enum ElementLocation {
    Header,
    Footer,
    Content {
        #[serde(rename = "pageId")]
        page_id: NodeId,
    },
}

impl ElementLocation {
    pub fn content(page_id: NodeId) -> Self {
        Self::Content { page_id }
    }

    pub fn zone_kind(&self) -> ZoneKind {
        match self {
            ElementLocation::Header => ZoneKind::Header,
            ElementLocation::Footer => ZoneKind::Footer,
            ElementLocation::Content { .. } => ZoneKind::Content,
        }
    }
}

/// Document-wide default styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentStyles {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub background_color: String,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14.0,
            color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A canvas document: shared header/footer and a list of pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasDocument {
    pub header: Zone,
    pub footer: Zone,
    pub pages: Vec<Page>,
    pub styles: DocumentStyles,
}

impl CanvasDocument {
    /// Create a new document with default zone heights and one blank page
    pub fn new() -> Self {
        Self {
            header: Zone::new(DEFAULT_HEADER_HEIGHT),
            footer: Zone::new(DEFAULT_FOOTER_HEIGHT),
            pages: vec![Page::new()],
            styles: DocumentStyles::default(),
        }
    }

    /// Parse a stored document and repair its structure
    pub fn from_json(json: &str) -> Result<Self> {
        let mut document: CanvasDocument = serde_json::from_str(json)?;
        document.normalize();
        Ok(document)
    }

    /// Parse a document from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let mut document: CanvasDocument = serde_json::from_value(value)?;
        document.normalize();
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn page_index(&self, page_id: &NodeId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == page_id)
    }

    pub fn page(&self, page_id: &NodeId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == page_id)
    }

    /// Element list of a zone or page
    pub fn elements(&self, location: &ElementLocation) -> Result<&Vec<Element>> {
        match location {
            ElementLocation::Header => Ok(&self.header.elements),
            ElementLocation::Footer => Ok(&self.footer.elements),
            ElementLocation::Content { page_id } => self
                .page(page_id)
                .map(|p| &p.elements)
                .ok_or_else(|| DocModelError::PageNotFound(page_id.clone())),
        }
    }

    pub fn elements_mut(&mut self, location: &ElementLocation) -> Result<&mut Vec<Element>> {
        match location {
            ElementLocation::Header => Ok(&mut self.header.elements),
            ElementLocation::Footer => Ok(&mut self.footer.elements),
            ElementLocation::Content { page_id } => self
                .pages
                .iter_mut()
                .find(|p| &p.id == page_id)
                .map(|p| &mut p.elements)
                .ok_or_else(|| DocModelError::PageNotFound(page_id.clone())),
        }
    }

    /// Every element in the document with its location: header, footer, then
    /// pages in order
    pub fn all_elements(&self) -> impl Iterator<Item = (ElementLocation, &Element)> {
        let header = self.header.elements.iter().map(|e| (ElementLocation::Header, e));
        let footer = self.footer.elements.iter().map(|e| (ElementLocation::Footer, e));
        let pages = self.pages.iter().flat_map(|page| {
            page.elements
                .iter()
                .map(move |e| (ElementLocation::content(page.id.clone()), e))
        });
        header.chain(footer).chain(pages)
    }

    pub fn find_element(&self, id: &NodeId) -> Option<(ElementLocation, &Element)> {
        self.all_elements().find(|(_, e)| e.id() == id)
    }

    pub fn find_element_mut(&mut self, id: &NodeId) -> Option<&mut Element> {
        self.header
            .elements
            .iter_mut()
            .chain(self.footer.elements.iter_mut())
            .chain(self.pages.iter_mut().flat_map(|p| p.elements.iter_mut()))
            .find(|e| e.id() == id)
    }

    pub fn contains_id(&self, id: &NodeId) -> bool {
        self.find_element(id).is_some()
    }

    pub fn element_count(&self) -> usize {
        self.all_elements().count()
    }

    // -------------------------------------------------------------------------
    // Structural primitives
    // -------------------------------------------------------------------------

    /// Append an element to a zone or page. The id must be unused.
    pub fn insert_element(&mut self, location: &ElementLocation, element: Element) -> Result<()> {
        if self.contains_id(element.id()) {
            return Err(DocModelError::DuplicateId(element.id().clone()));
        }
        let elements = self.elements_mut(location)?;
        elements.push(element);
        Ok(())
    }

    /// Remove an element by id from whichever zone or page owns it
    pub fn remove_element(&mut self, id: &NodeId) -> Result<(ElementLocation, Element)> {
        let (location, _) = self
            .find_element(id)
            .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
        let elements = self.elements_mut(&location)?;
        let index = elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| DocModelError::ElementNotFound(id.clone()))?;
        let element = elements.remove(index);
        Ok((location, element))
    }

    /// Insert a page at `index` (clamped to the end)
    pub fn insert_page(&mut self, index: usize, page: Page) {
        let index = index.min(self.pages.len());
        self.pages.insert(index, page);
    }

    /// Remove a page; the last remaining page cannot be removed
    pub fn remove_page(&mut self, page_id: &NodeId) -> Result<Page> {
        let index = self
            .page_index(page_id)
            .ok_or_else(|| DocModelError::PageNotFound(page_id.clone()))?;
        if self.pages.len() <= 1 {
            return Err(DocModelError::LastPage);
        }
        Ok(self.pages.remove(index))
    }

    // -------------------------------------------------------------------------
    // Repair
    // -------------------------------------------------------------------------

    /// Restore every structural invariant on a loaded document. Returns the
    /// number of repairs made.
    pub fn normalize(&mut self) -> usize {
        let mut repairs = 0;

        for (name, zone) in [("header", &mut self.header), ("footer", &mut self.footer)] {
            if !(zone.height >= 0.0) {
                tracing::debug!(zone = name, height = zone.height, "clamping zone height");
                zone.height = 0.0;
                repairs += 1;
            }
        }

        if self.pages.is_empty() {
            tracing::debug!("document has no pages, adding a blank page");
            self.pages.push(Page::new());
            repairs += 1;
        }

        let mut seen_pages = HashSet::new();
        for page in &mut self.pages {
            if page.id.is_empty() || !seen_pages.insert(page.id.clone()) {
                page.id = NodeId::new();
                seen_pages.insert(page.id.clone());
                repairs += 1;
            }
        }

        let mut seen = HashSet::new();
        let zones = self
            .header
            .elements
            .iter_mut()
            .chain(self.footer.elements.iter_mut())
            .chain(self.pages.iter_mut().flat_map(|p| p.elements.iter_mut()));
        for element in zones {
            if element.id().is_empty() || !seen.insert(element.id().clone()) {
                let fresh = NodeId::new();
                tracing::debug!(old = %element.id(), new = %fresh, "reassigning duplicate element id");
                seen.insert(fresh.clone());
                element.set_id(fresh);
                repairs += 1;
            }
            if let Some(table) = element.as_table_mut() {
                if table.normalize() {
                    tracing::debug!(table = %table.id, "repaired table grid shape");
                    repairs += 1;
                }
            }
        }

        repairs
    }

    /// Check the invariants without changing anything
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        !self.pages.is_empty()
            && self.header.height >= 0.0
            && self.footer.height >= 0.0
            && self.all_elements().all(|(_, e)| {
                seen.insert(e.id().clone()) && e.as_table().map_or(true, |t| t.is_well_formed())
            })
    }
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an element list, skipping entries that are not valid elements
fn deserialize_elements<'de, D>(deserializer: D) -> std::result::Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let elements = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Element>(value) {
            Ok(element) => Some(element),
            Err(e) => {
                tracing::warn!(index, "skipping malformed element: {}", e);
                None
            }
        })
        .collect();
    Ok(elements)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementKind, TextElement};

    fn text(id: &str) -> Element {
        Element::Text(TextElement {
            id: NodeId::from(id),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = CanvasDocument::new();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.is_consistent());
    }

    #[test]
    fn test_insert_and_find() {
        let mut doc = CanvasDocument::new();
        let page_id = doc.pages[0].id.clone();
        doc.insert_element(&ElementLocation::Header, text("h1")).unwrap();
        doc.insert_element(&ElementLocation::content(page_id.clone()), text("c1")).unwrap();

        let (location, _) = doc.find_element(&NodeId::from("c1")).unwrap();
        assert_eq!(location, ElementLocation::content(page_id));
        assert_eq!(doc.element_count(), 2);

        let duplicate = doc.insert_element(&ElementLocation::Footer, text("h1"));
        assert!(matches!(duplicate, Err(DocModelError::DuplicateId(_))));
    }

    #[test]
    fn test_remove_element() {
        let mut doc = CanvasDocument::new();
        doc.insert_element(&ElementLocation::Footer, text("f1")).unwrap();
        let (location, removed) = doc.remove_element(&NodeId::from("f1")).unwrap();
        assert_eq!(location, ElementLocation::Footer);
        assert_eq!(removed.id().as_str(), "f1");
        assert!(doc.footer.elements.is_empty());
        assert!(doc.remove_element(&NodeId::from("f1")).is_err());
    }

    #[test]
    fn test_last_page_cannot_be_removed() {
        let mut doc = CanvasDocument::new();
        let only = doc.pages[0].id.clone();
        assert!(matches!(doc.remove_page(&only), Err(DocModelError::LastPage)));
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn test_page_duplicate_has_new_ids() {
        let mut page = Page::new();
        page.elements.push(Element::new(ElementKind::Text));
        page.elements.push(Element::new(ElementKind::Table));
        let copy = page.duplicate();

        assert_ne!(copy.id, page.id);
        for (a, b) in page.elements.iter().zip(&copy.elements) {
            assert_ne!(a.id(), b.id());
            assert_eq!(a.contents(), b.contents());
        }
    }

    #[test]
    fn test_malformed_elements_are_skipped() {
        let json = r#"{
            "header": {"height": 50, "elements": [
                {"type": "text", "id": "ok", "content": "hello"},
                {"type": "hologram", "id": "bad"},
                {"type": "image", "id": "bad2", "width": "wide"}
            ]},
            "footer": {"height": 40},
            "pages": [{"id": "p1", "elements": []}]
        }"#;
        let doc = CanvasDocument::from_json(json).unwrap();
        assert_eq!(doc.header.elements.len(), 1);
        assert_eq!(doc.header.elements[0].id().as_str(), "ok");
        assert!(doc.footer.elements.is_empty());
    }

    #[test]
    fn test_normalize_repairs_structure() {
        let json = r#"{
            "header": {"height": -20, "elements": [
                {"type": "text", "id": "dup"},
                {"type": "table", "id": "t", "rows": 2, "cols": 2, "data": [[{"content": "a"}]]}
            ]},
            "footer": {"height": 30, "elements": [{"type": "line", "id": "dup"}]},
            "pages": []
        }"#;
        let doc = CanvasDocument::from_json(json).unwrap();
        assert_eq!(doc.header.height, 0.0);
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.is_consistent());
        assert_eq!(doc.header.elements[0].id().as_str(), "dup");
        assert_ne!(doc.footer.elements[0].id().as_str(), "dup");

        let table = doc.header.elements[1].as_table().unwrap();
        assert_eq!(table.data[0][0].content, "a");
        assert!(table.is_well_formed());
    }

    #[test]
    fn test_json_round_trip_is_stable() {
        let mut doc = CanvasDocument::new();
        doc.insert_element(&ElementLocation::Header, Element::new(ElementKind::Table)).unwrap();
        doc.insert_element(&ElementLocation::Footer, Element::new(ElementKind::Line)).unwrap();
        let json = doc.to_json().unwrap();
        let back = CanvasDocument::from_json(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_location_json() {
        let location = ElementLocation::content(NodeId::from("p1"));
        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value, serde_json::json!({"zone": "content", "pageId": "p1"}));
        let header: ElementLocation = serde_json::from_str(r#"{"zone":"header"}"#).unwrap();
        assert_eq!(header, ElementLocation::Header);
    }
}
