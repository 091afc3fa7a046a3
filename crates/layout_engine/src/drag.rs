//! Move planning for dragged elements
//!
//! Ties the coordinate transform, the snap engine and zone clamping together:
//! a zone-relative proposal goes to absolute coordinates, is snapped against
//! everything visible on the current page, comes back to zone coordinates and
//! is finally kept inside the zone.

use crate::{calculate_snap_cross_zone, collect_snap_targets, coords, LayoutError, Point, Result, SnapGuide, SnapOptions};
use doc_model::{CanvasDocument, ElementLocation, NodeId, PageDimensions};
use serde::{Deserialize, Serialize};

/// Final position of a dragged element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePlan {
    /// Zone-relative x
    pub x: f64,
    /// Zone-relative y
    pub y: f64,
    /// Guides in absolute coordinates
    pub guides: Vec<SnapGuide>,
    pub location: ElementLocation,
}

/// Work out where `element_id` lands when dragged to `proposed`.
///
/// `page_id` is the page being edited. Header and footer elements are drawn
/// on every page, so they snap against that page's content as well.
pub fn plan_move(
    document: &CanvasDocument,
    page_id: &NodeId,
    element_id: &NodeId,
    proposed: Point,
    page: PageDimensions,
    options: &SnapOptions,
    clamp: bool,
) -> Result<MovePlan> {
    let (location, element) = document
        .find_element(element_id)
        .ok_or_else(|| LayoutError::ElementNotFound(element_id.clone()))?;
    let zone = location.zone_kind();

    let targets = collect_snap_targets(document, page_id, page, Some(element_id))?;
    let absolute = coords::zone_to_absolute(proposed.x, proposed.y, zone, document, page);
    let snapped = calculate_snap_cross_zone(element, absolute, zone, &targets, document, page, options);
    let mut local = coords::absolute_to_zone(snapped.x, snapped.y, zone, document, page);

    if clamp {
        let size = element.size_at(local.x, page.width);
        local = coords::clamp_to_zone(local, size, zone, document, page);
    }

    tracing::debug!(
        element = %element_id,
        ?zone,
        x = local.x,
        y = local.y,
        guides = snapped.guides.len(),
        "planned element move"
    );

    Ok(MovePlan {
        x: local.x,
        y: local.y,
        guides: snapped.guides,
        location,
    })
}
