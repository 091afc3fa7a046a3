//! Migration of legacy nested-group documents
//!
//! Older templates nested elements inside `{"type": "group", "x", "y",
//! "children"}` nodes, with children positioned relative to their group.
//! The canvas model is flat, so groups are dissolved: each leaf's position
//! becomes the sum of its own offset and every ancestor group's offset.
//! Empty groups disappear. Leaves without an id get a fresh one when the
//! result is parsed.

use crate::{Result, StoreError};
use doc_model::CanvasDocument;
use serde_json::{Map, Value};

/// Summary of a migration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub groups_removed: usize,
    pub elements: usize,
}

/// Flatten a legacy document value into a canvas document
pub fn migrate_legacy_document(legacy: &Value) -> Result<(CanvasDocument, MigrationReport)> {
    let root = legacy
        .as_object()
        .ok_or_else(|| StoreError::InvalidFormat("legacy document must be a JSON object".to_string()))?;

    let mut report = MigrationReport::default();
    let mut migrated = root.clone();

    for name in ["header", "footer"] {
        if let Some(Value::Object(zone)) = migrated.get_mut(name) {
            flatten_container(zone, &mut report);
        }
    }
    if let Some(Value::Array(pages)) = migrated.get_mut("pages") {
        for page in pages.iter_mut().filter_map(Value::as_object_mut) {
            flatten_container(page, &mut report);
        }
    }

    let document = CanvasDocument::from_value(Value::Object(migrated))?;
    tracing::debug!(
        groups = report.groups_removed,
        elements = report.elements,
        "migrated legacy document"
    );
    Ok((document, report))
}

/// Parse and migrate a legacy document from JSON text
pub fn migrate_legacy_json(json: &str) -> Result<(CanvasDocument, MigrationReport)> {
    let value: Value = serde_json::from_str(json)?;
    migrate_legacy_document(&value)
}

fn flatten_container(container: &mut Map<String, Value>, report: &mut MigrationReport) {
    if let Some(Value::Array(nodes)) = container.get("elements") {
        let flat = flatten_nodes(nodes, 0.0, 0.0, report);
        report.elements += flat.len();
        container.insert("elements".to_string(), Value::Array(flat));
    }
}

fn offset(node: &Map<String, Value>, key: &str) -> f64 {
    node.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn flatten_nodes(nodes: &[Value], ox: f64, oy: f64, report: &mut MigrationReport) -> Vec<Value> {
    let mut flat = Vec::new();
    for node in nodes {
        let Some(object) = node.as_object() else {
            tracing::warn!("skipping non-object legacy node");
            continue;
        };
        let x = ox + offset(object, "x");
        let y = oy + offset(object, "y");

        if object.get("type").and_then(Value::as_str) == Some("group") {
            report.groups_removed += 1;
            if let Some(Value::Array(children)) = object.get("children") {
                flat.extend(flatten_nodes(children, x, y, report));
            }
            continue;
        }

        let mut leaf = object.clone();
        leaf.insert("x".to_string(), Value::from(x));
        leaf.insert("y".to_string(), Value::from(y));
        flat.push(Value::Object(leaf));
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_groups_sum_offsets() {
        let legacy = json!({
            "header": {"height": 120, "elements": [
                {"type": "group", "x": 10, "y": 5, "children": [
                    {"type": "text", "id": "t1", "x": 3, "y": 4, "content": "{{courseCode}}"},
                    {"type": "group", "x": 100, "y": 20, "children": [
                        {"type": "image", "id": "i1", "x": 1, "y": 2}
                    ]}
                ]}
            ]},
            "footer": {"height": 50, "elements": []},
            "pages": [{"id": "p1", "elements": [
                {"type": "group", "x": 7, "y": 7, "children": []},
                {"type": "line", "id": "l1", "x": 40, "y": 60}
            ]}]
        });

        let (doc, report) = migrate_legacy_document(&legacy).unwrap();
        assert_eq!(report, MigrationReport { groups_removed: 3, elements: 3 });

        let positions: Vec<(String, (f64, f64))> = doc
            .all_elements()
            .map(|(_, e)| (e.id().to_string(), e.position()))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("t1".to_string(), (13.0, 9.0)),
                ("i1".to_string(), (111.0, 27.0)),
                ("l1".to_string(), (40.0, 60.0)),
            ]
        );
        assert_eq!(doc.header.elements[0].contents(), vec!["{{courseCode}}"]);
    }

    #[test]
    fn test_missing_ids_are_filled() {
        let legacy = json!({
            "pages": [{"elements": [
                {"type": "group", "x": 5, "y": 5, "children": [
                    {"type": "text", "content": "a"},
                    {"type": "text", "content": "b"}
                ]}
            ]}]
        });
        let (doc, _) = migrate_legacy_document(&legacy).unwrap();
        let page = &doc.pages[0];
        assert_eq!(page.elements.len(), 2);
        assert!(!page.elements[0].id().is_empty());
        assert_ne!(page.elements[0].id(), page.elements[1].id());
        assert_eq!(page.elements[1].position(), (5.0, 5.0));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = migrate_legacy_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, StoreError::InvalidFormat(_)));
    }
}
