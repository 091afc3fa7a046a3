//! Cross-zone coordinate transform
//!
//! Elements store positions relative to the top-left corner of their zone.
//! The snap engine compares elements from different zones, so it works in
//! absolute page coordinates. The header starts at the top of the page, the
//! content area right below it, and the footer below the content area.
//! Content height is `page height - header - footer`, never negative.

use crate::{Point, Rect};
use doc_model::{CanvasDocument, PageDimensions, Size, ZoneKind};

/// Height of the content area between header and footer
pub fn content_height(document: &CanvasDocument, page: PageDimensions) -> f64 {
    (page.height - header_height(document) - footer_height(document)).max(0.0)
}

fn header_height(document: &CanvasDocument) -> f64 {
    document.header.height.max(0.0)
}

fn footer_height(document: &CanvasDocument) -> f64 {
    document.footer.height.max(0.0)
}

/// Absolute y of a zone's top edge
pub fn zone_origin(zone: ZoneKind, document: &CanvasDocument, page: PageDimensions) -> f64 {
    match zone {
        ZoneKind::Header => 0.0,
        ZoneKind::Content => header_height(document),
        ZoneKind::Footer => header_height(document) + content_height(document, page),
    }
}

/// Height of a zone
pub fn zone_height(zone: ZoneKind, document: &CanvasDocument, page: PageDimensions) -> f64 {
    match zone {
        ZoneKind::Header => header_height(document),
        ZoneKind::Content => content_height(document, page),
        ZoneKind::Footer => footer_height(document),
    }
}

/// A zone's container rectangle in absolute coordinates
pub fn zone_rect(zone: ZoneKind, document: &CanvasDocument, page: PageDimensions) -> Rect {
    Rect::new(
        0.0,
        zone_origin(zone, document, page),
        page.width,
        zone_height(zone, document, page),
    )
}

/// Convert a zone-relative position to absolute page coordinates
pub fn zone_to_absolute(
    x: f64,
    y: f64,
    zone: ZoneKind,
    document: &CanvasDocument,
    page: PageDimensions,
) -> Point {
    Point::new(x, y + zone_origin(zone, document, page))
}

/// Convert an absolute page position back to zone-relative coordinates
pub fn absolute_to_zone(
    x: f64,
    y: f64,
    zone: ZoneKind,
    document: &CanvasDocument,
    page: PageDimensions,
) -> Point {
    Point::new(x, y - zone_origin(zone, document, page))
}

/// Keep an element of `size` inside its zone.
///
/// `x` ends up in `[0, zone width - element width]` and `y` in
/// `[0, zone height - element height]`; when the element is larger than the
/// zone it is pinned to the zone's top-left corner.
pub fn clamp_to_zone(
    position: Point,
    size: Size,
    zone: ZoneKind,
    document: &CanvasDocument,
    page: PageDimensions,
) -> Point {
    let max_x = page.width - size.width;
    let max_y = zone_height(zone, document, page) - size.height;
    Point::new(
        position.x.min(max_x).max(0.0),
        position.y.min(max_y).max(0.0),
    )
}
