//! Drag alignment ("snapping")
//!
//! Given a proposed absolute position for a dragged element, look for a
//! nearby alignment on each axis independently:
//!
//! - the edges and center of the dragged element's own zone,
//! - the edges and centers of every other element, whatever zone it is in,
//! - optionally a regular grid, which wins over everything else on its axis.
//!
//! A candidate is only taken when it is strictly closer than the threshold.
//! The closest candidate wins; among equally close candidates the first one
//! found is kept (zone container first, then targets in the given order).

use crate::{coords, Point, Rect, Result, LayoutError};
use doc_model::{CanvasDocument, Element, NodeId, PageDimensions, ZoneKind};
use serde::{Deserialize, Serialize};

/// Default snap distance in pixels
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

// =============================================================================
// Options
// =============================================================================

/// Grid snapping settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    pub enabled: bool,
    /// Grid spacing in pixels
    pub size: f64,
}

impl GridSettings {
    fn is_active(&self) -> bool {
        self.enabled && self.size > 0.0
    }
}

/// Tuning for a snap calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapOptions {
    pub threshold: f64,
    #[serde(default)]
    pub grid: Option<GridSettings>,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SNAP_THRESHOLD,
            grid: None,
        }
    }
}

impl SnapOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_grid(mut self, size: f64) -> Self {
        self.grid = Some(GridSettings { enabled: true, size });
        self
    }
}

// =============================================================================
// Targets and Guides
// =============================================================================

/// Another element's absolute bounds, used as an alignment target
#[derive(Debug, Clone, PartialEq)]
pub struct SnapTarget {
    pub id: NodeId,
    pub zone: ZoneKind,
    pub bounds: Rect,
}

/// Orientation of a guide line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    /// A vertical line at some x (result of an x-axis snap)
    Vertical,
    /// A horizontal line at some y (result of a y-axis snap)
    Horizontal,
}

/// A visual guide describing the alignment that was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapGuide {
    #[serde(rename = "type")]
    pub orientation: GuideOrientation,
    /// Absolute x (vertical guides) or y (horizontal guides)
    pub coordinate: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_element_id: Option<NodeId>,
}

/// Outcome of a snap calculation, in absolute coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    /// At most one guide per axis
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn guide(&self, orientation: GuideOrientation) -> Option<&SnapGuide> {
        self.guides.iter().find(|g| g.orientation == orientation)
    }
}

// =============================================================================
// Candidate Search
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn orientation(self) -> GuideOrientation {
        match self {
            Axis::X => GuideOrientation::Vertical,
            Axis::Y => GuideOrientation::Horizontal,
        }
    }

    /// Start, end and center of a rectangle along this axis
    fn span(self, rect: &Rect) -> (f64, f64, f64) {
        match self {
            Axis::X => (rect.x, rect.right(), rect.center_x()),
            Axis::Y => (rect.y, rect.bottom(), rect.center_y()),
        }
    }

    fn container_labels(self) -> [&'static str; 3] {
        match self {
            Axis::X => ["Zone left", "Zone right", "Zone center"],
            Axis::Y => ["Zone top", "Zone bottom", "Zone middle"],
        }
    }

    /// Labels for start-start, end-end, center-center, start-to-end, end-to-start
    fn element_labels(self) -> [&'static str; 5] {
        match self {
            Axis::X => ["Align left", "Align right", "Align center", "Left to right", "Right to left"],
            Axis::Y => ["Align top", "Align bottom", "Align middle", "Top to bottom", "Bottom to top"],
        }
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    /// Snapped start coordinate of the dragged element
    position: f64,
    distance: f64,
    guide_coordinate: f64,
    label: &'static str,
    related: Option<NodeId>,
}

struct AxisSearch {
    proposed: f64,
    /// `None` when the far edge is pinned to the page edge; only the start
    /// edge moves, so only start-edge candidates apply.
    extent: Option<f64>,
    threshold: f64,
    best: Option<Candidate>,
}

impl AxisSearch {
    fn new(proposed: f64, extent: Option<f64>, threshold: f64) -> Self {
        Self {
            proposed,
            extent,
            threshold,
            best: None,
        }
    }

    fn offer(&mut self, position: f64, guide_coordinate: f64, label: &'static str, related: Option<&NodeId>) {
        let distance = (position - self.proposed).abs();
        if distance >= self.threshold {
            return;
        }
        if matches!(&self.best, Some(best) if distance >= best.distance) {
            return;
        }
        self.best = Some(Candidate {
            position,
            distance,
            guide_coordinate,
            label,
            related: related.cloned(),
        });
    }

    fn offer_container(&mut self, axis: Axis, container: &Rect) {
        let (start, end, center) = axis.span(container);
        let [start_label, end_label, center_label] = axis.container_labels();
        self.offer(start, start, start_label, None);
        if let Some(w) = self.extent {
            self.offer(end - w, end, end_label, None);
            self.offer(center - w / 2.0, center, center_label, None);
        }
    }

    fn offer_target(&mut self, axis: Axis, target: &SnapTarget) {
        let (start, end, center) = axis.span(&target.bounds);
        let [same_start, same_end, same_center, start_to_end, end_to_start] = axis.element_labels();
        let id = Some(&target.id);
        self.offer(start, start, same_start, id);
        if let Some(w) = self.extent {
            self.offer(end - w, end, same_end, id);
            self.offer(center - w / 2.0, center, same_center, id);
        }
        self.offer(end, end, start_to_end, id);
        if let Some(w) = self.extent {
            self.offer(start - w, start, end_to_start, id);
        }
    }

    /// Nearest grid line to the proposed start, if close enough
    fn grid(&self, grid: &GridSettings) -> Option<Candidate> {
        let position = (self.proposed / grid.size).round() * grid.size;
        let distance = (position - self.proposed).abs();
        (distance < self.threshold).then_some(Candidate {
            position,
            distance,
            guide_coordinate: position,
            label: "Grid",
            related: None,
        })
    }
}

fn resolve_axis(
    axis: Axis,
    proposed: f64,
    extent: Option<f64>,
    container: &Rect,
    targets: &[&SnapTarget],
    options: &SnapOptions,
) -> (f64, Option<SnapGuide>) {
    let mut search = AxisSearch::new(proposed, extent, options.threshold);
    search.offer_container(axis, container);
    for target in targets {
        search.offer_target(axis, target);
    }

    let grid_hit = options
        .grid
        .filter(GridSettings::is_active)
        .and_then(|grid| search.grid(&grid));
    let winner = grid_hit.or(search.best);

    match winner {
        Some(candidate) => {
            tracing::trace!(
                ?axis,
                proposed,
                snapped = candidate.position,
                label = candidate.label,
                "snap candidate selected"
            );
            let guide = SnapGuide {
                orientation: axis.orientation(),
                coordinate: candidate.guide_coordinate,
                label: candidate.label.to_string(),
                related_element_id: candidate.related,
            };
            (candidate.position, Some(guide))
        }
        None => (proposed, None),
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Snap a dragged element against its zone and every other element.
///
/// `proposed` is the element's unsnapped top-left corner in absolute page
/// coordinates; `targets` are the other elements (any zone) with absolute
/// bounds. The dragged element itself is ignored if it appears in `targets`.
pub fn calculate_snap_cross_zone(
    element: &Element,
    proposed: Point,
    zone: ZoneKind,
    targets: &[SnapTarget],
    document: &CanvasDocument,
    page: PageDimensions,
    options: &SnapOptions,
) -> SnapResult {
    let size = element.size_at(proposed.x, page.width);
    let width = (!element.fills_page_width()).then_some(size.width);
    let container = coords::zone_rect(zone, document, page);
    let others: Vec<&SnapTarget> = targets.iter().filter(|t| &t.id != element.id()).collect();

    let (x, vertical) = resolve_axis(Axis::X, proposed.x, width, &container, &others, options);
    let (y, horizontal) = resolve_axis(Axis::Y, proposed.y, Some(size.height), &container, &others, options);

    SnapResult {
        x,
        y,
        guides: vertical.into_iter().chain(horizontal).collect(),
    }
}

/// Gather alignment targets for a drag on `page_id`: every header and footer
/// element plus the elements of that page, with absolute bounds.
pub fn collect_snap_targets(
    document: &CanvasDocument,
    page_id: &NodeId,
    page: PageDimensions,
    exclude: Option<&NodeId>,
) -> Result<Vec<SnapTarget>> {
    let content = document
        .page(page_id)
        .ok_or_else(|| LayoutError::PageNotFound(page_id.clone()))?;

    let zones = [
        (ZoneKind::Header, &document.header.elements),
        (ZoneKind::Footer, &document.footer.elements),
        (ZoneKind::Content, &content.elements),
    ];

    let targets = zones
        .into_iter()
        .flat_map(|(zone, elements)| elements.iter().map(move |e| (zone, e)))
        .filter(|(_, e)| Some(e.id()) != exclude)
        .map(|(zone, e)| {
            let (x, y) = e.position();
            let origin = coords::zone_to_absolute(x, y, zone, document, page);
            let size = e.size(page.width);
            SnapTarget {
                id: e.id().clone(),
                zone,
                bounds: Rect::new(origin.x, origin.y, size.width, size.height),
            }
        })
        .collect();

    Ok(targets)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{ImageElement, Orientation, PageSizePreset, Zone};
    use proptest::prelude::*;

    fn page() -> PageDimensions {
        PageDimensions::from_preset(PageSizePreset::A4, Orientation::Portrait)
    }

    fn doc() -> CanvasDocument {
        CanvasDocument {
            header: Zone::new(100.0),
            footer: Zone::new(100.0),
            ..CanvasDocument::new()
        }
    }

    fn image(id: &str, width: f64, height: f64) -> Element {
        Element::Image(ImageElement {
            id: NodeId::from(id),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        })
    }

    fn target(id: &str, zone: ZoneKind, x: f64, y: f64, w: f64, h: f64) -> SnapTarget {
        SnapTarget {
            id: NodeId::from(id),
            zone,
            bounds: Rect::new(x, y, w, h),
        }
    }

    #[test]
    fn test_no_candidates_leaves_position() {
        let dragged = image("drag", 50.0, 50.0);
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(300.0, 400.0),
            ZoneKind::Content,
            &[],
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(result.position(), Point::new(300.0, 400.0));
        assert!(result.guides.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [target("other", ZoneKind::Content, 300.0, 600.0, 200.0, 40.0)];

        let eight_away = calculate_snap_cross_zone(
            &dragged,
            Point::new(308.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(eight_away.x, 308.0);
        assert!(eight_away.guide(GuideOrientation::Vertical).is_none());

        let seven_away = calculate_snap_cross_zone(
            &dragged,
            Point::new(307.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(seven_away.x, 300.0);
        let guide = seven_away.guide(GuideOrientation::Vertical).unwrap();
        assert_eq!(guide.coordinate, 300.0);
        assert_eq!(guide.related_element_id, Some(NodeId::from("other")));
    }

    #[test]
    fn test_axes_resolve_independently() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [target("other", ZoneKind::Content, 300.0, 600.0, 80.0, 40.0)];
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(303.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(result.position(), Point::new(300.0, 400.0));
        assert_eq!(result.guides.len(), 1);
        assert_eq!(result.guides[0].orientation, GuideOrientation::Vertical);
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [
            target("far", ZoneKind::Content, 306.0, 600.0, 80.0, 40.0),
            target("near", ZoneKind::Content, 301.0, 700.0, 80.0, 40.0),
        ];
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(300.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(result.x, 301.0);
        assert_eq!(
            result.guide(GuideOrientation::Vertical).unwrap().related_element_id,
            Some(NodeId::from("near"))
        );
    }

    #[test]
    fn test_adjacent_edges() {
        let dragged = image("drag", 50.0, 50.0);
        // Other element spans x 100..180; dragged left edge near 180.
        let targets = [target("other", ZoneKind::Content, 100.0, 600.0, 80.0, 40.0)];
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(184.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(result.x, 180.0);
        assert_eq!(result.guide(GuideOrientation::Vertical).unwrap().label, "Left to right");

        // Dragged right edge (x + 50) near 100.
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(47.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert_eq!(result.x, 50.0);
        assert_eq!(result.guide(GuideOrientation::Vertical).unwrap().coordinate, 100.0);
    }

    #[test]
    fn test_container_center_and_edges() {
        let dragged = image("drag", 100.0, 40.0);
        let page = page();
        // Page width 794 -> center 397 -> centered x = 347.
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(350.0, 500.0),
            ZoneKind::Content,
            &[],
            &doc(),
            page,
            &SnapOptions::default(),
        );
        assert_eq!(result.x, 347.0);
        assert_eq!(result.guide(GuideOrientation::Vertical).unwrap().label, "Zone center");

        // Content zone starts at y = 100.
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(200.0, 104.0),
            ZoneKind::Content,
            &[],
            &doc(),
            page,
            &SnapOptions::default(),
        );
        assert_eq!(result.y, 100.0);
        assert_eq!(result.guide(GuideOrientation::Horizontal).unwrap().label, "Zone top");
    }

    #[test]
    fn test_grid_overrides_elements() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [target("other", ZoneKind::Content, 303.0, 600.0, 80.0, 40.0)];
        let options = SnapOptions::default().with_grid(10.0);
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(304.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &options,
        );
        assert_eq!(result.x, 300.0);
        assert_eq!(result.guide(GuideOrientation::Vertical).unwrap().label, "Grid");
        assert_eq!(result.y, 400.0);
    }

    #[test]
    fn test_disabled_grid_is_ignored() {
        let dragged = image("drag", 50.0, 50.0);
        let options = SnapOptions {
            grid: Some(GridSettings { enabled: false, size: 10.0 }),
            ..SnapOptions::default()
        };
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(304.0, 403.0),
            ZoneKind::Content,
            &[],
            &doc(),
            page(),
            &options,
        );
        assert_eq!(result.position(), Point::new(304.0, 403.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [target("other", ZoneKind::Header, 220.0, 30.0, 80.0, 40.0)];
        let run = |p: Point| {
            calculate_snap_cross_zone(&dragged, p, ZoneKind::Content, &targets, &doc(), page(), &SnapOptions::default())
        };
        let first = run(Point::new(224.0, 500.0));
        let second = run(first.position());
        assert_eq!(second.position(), first.position());
        assert_eq!(second.guides, first.guides);
        assert_eq!(second.guides.len(), 1);
    }

    #[test]
    fn test_dragged_element_is_not_its_own_target() {
        let dragged = image("drag", 50.0, 50.0);
        let targets = [target("drag", ZoneKind::Content, 303.0, 403.0, 50.0, 50.0)];
        let result = calculate_snap_cross_zone(
            &dragged,
            Point::new(300.0, 400.0),
            ZoneKind::Content,
            &targets,
            &doc(),
            page(),
            &SnapOptions::default(),
        );
        assert!(result.guides.is_empty());
    }

    #[test]
    fn test_collect_targets_uses_absolute_bounds() {
        let mut document = doc();
        let page_id = document.pages[0].id.clone();
        let mut footer_image = image("f", 40.0, 20.0);
        footer_image.set_position(10.0, 5.0);
        document.footer.elements.push(footer_image);
        let mut content_image = image("c", 40.0, 20.0);
        content_image.set_position(10.0, 5.0);
        document.pages[0].elements.push(content_image);

        let targets = collect_snap_targets(&document, &page_id, page(), None).unwrap();
        let footer = targets.iter().find(|t| t.id.as_str() == "f").unwrap();
        // footer origin = 100 + (1123 - 200)
        assert_eq!(footer.bounds, Rect::new(10.0, 1028.0, 40.0, 20.0));
        let content = targets.iter().find(|t| t.id.as_str() == "c").unwrap();
        assert_eq!(content.bounds.y, 105.0);

        let without = collect_snap_targets(&document, &page_id, page(), Some(&NodeId::from("c"))).unwrap();
        assert_eq!(without.len(), 1);

        assert!(collect_snap_targets(&document, &NodeId::from("missing"), page(), None).is_err());
    }

    proptest! {
        #[test]
        fn prop_snapped_position_is_stable(
            px in 0.0f64..794.0,
            py in 0.0f64..1123.0,
            boxes in proptest::collection::vec((0.0f64..700.0, 0.0f64..1000.0, 10.0f64..200.0, 10.0f64..200.0), 0..6),
            grid in proptest::option::of(5.0f64..15.0),
        ) {
            let dragged = image("drag", 60.0, 40.0);
            let targets: Vec<SnapTarget> = boxes
                .iter()
                .enumerate()
                .map(|(i, &(x, y, w, h))| target(&format!("t{i}"), ZoneKind::Content, x, y, w, h))
                .collect();
            let options = SnapOptions {
                grid: grid.map(|size| GridSettings { enabled: true, size }),
                ..SnapOptions::default()
            };
            let run = |p: Point| {
                calculate_snap_cross_zone(&dragged, p, ZoneKind::Content, &targets, &doc(), page(), &options)
            };

            let first = run(Point::new(px, py));
            prop_assert!((first.x - px).abs() < options.threshold);
            prop_assert!((first.y - py).abs() < options.threshold);
            prop_assert!(first.guides.len() <= 2);

            let second = run(first.position());
            prop_assert!((second.x - first.x).abs() < 1e-9);
            prop_assert!((second.y - first.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_guide_json_shape() {
        let guide = SnapGuide {
            orientation: GuideOrientation::Vertical,
            coordinate: 120.0,
            label: "Align left".to_string(),
            related_element_id: Some(NodeId::from("e1")),
        };
        let value = serde_json::to_value(&guide).unwrap();
        assert_eq!(value["type"], "vertical");
        assert_eq!(value["relatedElementId"], "e1");
    }
}
