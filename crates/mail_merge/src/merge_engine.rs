//! Template rendering
//!
//! Produces a copy of a canvas document with every known placeholder in
//! text content and table cells replaced by the record's value. Header,
//! footer and each page are rendered independently; the input is never
//! modified.

use crate::merge_field::{placeholder_names, substitute};
use crate::{is_known_field, PlaceholderValues, SyllabusRecord};
use doc_model::{CanvasDocument, Element, Page, Zone};
use std::collections::BTreeSet;

/// Render a whole document against a syllabus record
pub fn render_canvas_document(document: &CanvasDocument, record: &SyllabusRecord) -> CanvasDocument {
    let values = record.placeholder_values();
    let rendered = render_with_values(document, &values);
    tracing::debug!(pages = rendered.pages.len(), "rendered canvas document");
    rendered
}

/// Render a whole document against already resolved values
pub fn render_with_values(document: &CanvasDocument, values: &PlaceholderValues) -> CanvasDocument {
    CanvasDocument {
        header: render_zone(&document.header, values),
        footer: render_zone(&document.footer, values),
        pages: document.pages.iter().map(|page| render_page(page, values)).collect(),
        styles: document.styles.clone(),
    }
}

pub fn render_zone(zone: &Zone, values: &PlaceholderValues) -> Zone {
    Zone {
        height: zone.height,
        elements: render_elements(&zone.elements, values),
    }
}

pub fn render_page(page: &Page, values: &PlaceholderValues) -> Page {
    Page {
        id: page.id.clone(),
        elements: render_elements(&page.elements, values),
    }
}

fn render_elements(elements: &[Element], values: &PlaceholderValues) -> Vec<Element> {
    elements.iter().map(|e| render_element(e, values)).collect()
}

/// Render one element. Images and lines come back unchanged.
pub fn render_element(element: &Element, values: &PlaceholderValues) -> Element {
    let mut rendered = element.clone();
    rendered.for_each_content_mut(|content| {
        if content.contains("{{") {
            *content = substitute(content, values);
        }
    });
    rendered
}

/// Distinct placeholder names used anywhere in the document
pub fn placeholders_in(document: &CanvasDocument) -> BTreeSet<String> {
    document
        .all_elements()
        .flat_map(|(_, element)| element.contents())
        .flat_map(placeholder_names)
        .collect()
}

/// Placeholder names the syllabus record cannot fill
pub fn unknown_placeholders(document: &CanvasDocument) -> BTreeSet<String> {
    placeholders_in(document)
        .into_iter()
        .filter(|name| !is_known_field(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{ElementLocation, ImageElement, TableElement, TextElement};

    fn text(content: &str) -> Element {
        Element::Text(TextElement {
            content: content.to_string(),
            ..Default::default()
        })
    }

    fn sample_document() -> CanvasDocument {
        let mut doc = CanvasDocument::new();
        doc.header.elements.push(text("{{courseCode}}: {{courseTitle}}"));
        doc.footer.elements.push(text("Instructor: {{instructorName}} {{signature}}"));

        let mut table = TableElement::new(2, 2);
        table.data[0][0].content = "Credits".to_string();
        table.data[1][0].content = "{{credits}}".to_string();
        table.data[1][1].content = "{{startDate}} to {{endDate}}".to_string();
        let location = ElementLocation::content(doc.pages[0].id.clone());
        doc.insert_element(&location, Element::Table(table)).unwrap();
        doc.insert_element(&location, Element::Image(ImageElement {
            src: "{{courseCode}}.png".to_string(),
            ..Default::default()
        }))
        .unwrap();
        doc
    }

    fn record() -> SyllabusRecord {
        SyllabusRecord::from_json(
            r#"{
                "courseCode": "CS101",
                "courseTitle": "Intro to Programming",
                "credits": 3,
                "startDate": "2025-01",
                "endDate": "2025-05"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_document() {
        let doc = sample_document();
        let rendered = render_canvas_document(&doc, &record());

        assert_eq!(rendered.header.elements[0].contents(), vec!["CS101: Intro to Programming"]);
        // Absent value renders empty, unknown token survives
        assert_eq!(rendered.footer.elements[0].contents(), vec!["Instructor:  {{signature}}"]);

        let table = rendered.pages[0].elements[0].as_table().unwrap();
        assert_eq!(table.data[0][0].content, "Credits");
        assert_eq!(table.data[1][0].content, "3");
        assert_eq!(table.data[1][1].content, "January 2025 to May 2025");

        // Image sources are not placeholder content
        match &rendered.pages[0].elements[1] {
            Element::Image(image) => assert_eq!(image.src, "{{courseCode}}.png"),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_render_is_pure() {
        let doc = sample_document();
        let before = doc.clone();
        let rendered = render_canvas_document(&doc, &record());
        assert_eq!(doc, before);
        assert_eq!(rendered.pages[0].id, doc.pages[0].id);
        assert_eq!(rendered.header.height, doc.header.height);
    }

    #[test]
    fn test_placeholder_discovery() {
        let doc = sample_document();
        let used: Vec<String> = placeholders_in(&doc).into_iter().collect();
        assert_eq!(
            used,
            ["courseCode", "courseTitle", "credits", "endDate", "instructorName", "signature", "startDate"]
        );
        let unknown: Vec<String> = unknown_placeholders(&doc).into_iter().collect();
        assert_eq!(unknown, ["signature"]);
    }
}
