//! Positioned canvas elements
//!
//! Every element on the canvas is absolutely positioned inside its zone or
//! page. Elements form a tagged union on the `type` field so that layout and
//! rendering code can work through the accessors on [`Element`] without caring
//! which concrete variant it holds.

use crate::{NodeId, TableElement};
use serde::{Deserialize, Serialize};

/// Width used for text boxes without an explicit width
pub const DEFAULT_TEXT_WIDTH: f64 = 200.0;
/// Extra height added to a text box's font size
pub const TEXT_HEIGHT_PADDING: f64 = 10.0;
/// Width and height used for images without explicit dimensions
pub const DEFAULT_IMAGE_SIZE: f64 = 100.0;

// =============================================================================
// Shared Style Types
// =============================================================================

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment inside a text box or cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// CSS-style text transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Stroke pattern for lines and table borders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Width and height of an element's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Text
// =============================================================================

/// A positioned block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElement {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Fixed width; `None` means the default text width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Stretch the box to the right edge of the page
    pub full_width: bool,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    pub text_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub text_transform: TextTransform,
    pub letter_spacing: f64,
    pub line_height: f64,
    /// Text content; may contain `{{field}}` placeholders
    pub content: String,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            id: NodeId::new(),
            x: 0.0,
            y: 0.0,
            width: None,
            full_width: false,
            font_family: "Arial".to_string(),
            font_size: 14.0,
            font_weight: "normal".to_string(),
            color: "#000000".to_string(),
            text_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            text_transform: TextTransform::None,
            letter_spacing: 0.0,
            line_height: 1.2,
            content: "New text".to_string(),
        }
    }
}

// =============================================================================
// Image
// =============================================================================

/// A positioned image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageElement {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub src: String,
    pub alt: String,
    pub lock_aspect_ratio: bool,
}

impl Default for ImageElement {
    fn default() -> Self {
        Self {
            id: NodeId::new(),
            x: 0.0,
            y: 0.0,
            width: Some(DEFAULT_IMAGE_SIZE),
            height: Some(DEFAULT_IMAGE_SIZE),
            src: String::new(),
            alt: String::new(),
            lock_aspect_ratio: true,
        }
    }
}

// =============================================================================
// Line
// =============================================================================

/// A horizontal rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineElement {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Line length
    pub width: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
}

impl Default for LineElement {
    fn default() -> Self {
        Self {
            id: NodeId::new(),
            x: 0.0,
            y: 0.0,
            width: 200.0,
            stroke_color: "#000000".to_string(),
            stroke_width: 1.0,
            stroke_style: StrokeStyle::Solid,
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// Discriminant of an [`Element`], used when creating new elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Line,
    Table,
}

/// Any element that can be placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    Line(LineElement),
    Table(TableElement),
}

impl Element {
    /// Create an element of the given kind with a fresh id and default style.
    /// Tables start as 3x3 grids with a styled header row.
    pub fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Element::Text(TextElement::default()),
            ElementKind::Image => Element::Image(ImageElement::default()),
            ElementKind::Line => Element::Line(LineElement::default()),
            ElementKind::Table => Element::Table(TableElement::new(3, 3)),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
            Element::Line(_) => ElementKind::Line,
            Element::Table(_) => ElementKind::Table,
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Element::Text(e) => &e.id,
            Element::Image(e) => &e.id,
            Element::Line(e) => &e.id,
            Element::Table(e) => &e.id,
        }
    }

    pub fn set_id(&mut self, id: NodeId) {
        match self {
            Element::Text(e) => e.id = id,
            Element::Image(e) => e.id = id,
            Element::Line(e) => e.id = id,
            Element::Table(e) => e.id = id,
        }
    }

    /// Copy of this element with a new id, content and style preserved
    pub fn with_fresh_id(&self) -> Self {
        let mut copy = self.clone();
        copy.set_id(NodeId::new());
        copy
    }

    /// Zone-relative position
    pub fn position(&self) -> (f64, f64) {
        match self {
            Element::Text(e) => (e.x, e.y),
            Element::Image(e) => (e.x, e.y),
            Element::Line(e) => (e.x, e.y),
            Element::Table(e) => (e.x, e.y),
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        let (px, py) = match self {
            Element::Text(e) => (&mut e.x, &mut e.y),
            Element::Image(e) => (&mut e.x, &mut e.y),
            Element::Line(e) => (&mut e.x, &mut e.y),
            Element::Table(e) => (&mut e.x, &mut e.y),
        };
        *px = x;
        *py = y;
    }

    /// Bounding-box size used for alignment and clamping.
    ///
    /// `page_width` only matters for text boxes that stretch to the page edge.
    pub fn size(&self, page_width: f64) -> Size {
        self.size_at(self.position().0, page_width)
    }

    /// Bounding-box size if the element's left edge were at `x`. Only a text
    /// box stretching to the page edge changes width with its position.
    pub fn size_at(&self, x: f64, page_width: f64) -> Size {
        match self {
            Element::Text(e) => {
                let width = match e.width {
                    Some(w) => w,
                    None if e.full_width => (page_width - x).max(0.0),
                    None => DEFAULT_TEXT_WIDTH,
                };
                Size::new(width, e.font_size + TEXT_HEIGHT_PADDING)
            }
            Element::Image(e) => Size::new(
                e.width.unwrap_or(DEFAULT_IMAGE_SIZE),
                e.height.unwrap_or(DEFAULT_IMAGE_SIZE),
            ),
            Element::Line(e) => Size::new(e.width, e.stroke_width),
            Element::Table(t) => t.size(),
        }
    }

    /// Whether the right edge is pinned to the page edge
    pub fn fills_page_width(&self) -> bool {
        matches!(self, Element::Text(e) if e.width.is_none() && e.full_width)
    }

    /// All text that may carry placeholders: a text box's content or every
    /// table cell's content. Images and lines have none.
    pub fn contents(&self) -> Vec<&str> {
        match self {
            Element::Text(e) => vec![e.content.as_str()],
            Element::Table(t) => t
                .data
                .iter()
                .flatten()
                .map(|cell| cell.content.as_str())
                .collect(),
            Element::Image(_) | Element::Line(_) => Vec::new(),
        }
    }

    /// Visit every placeholder-bearing string mutably
    pub fn for_each_content_mut(&mut self, mut f: impl FnMut(&mut String)) {
        match self {
            Element::Text(e) => f(&mut e.content),
            Element::Table(t) => t.data.iter_mut().flatten().for_each(|cell| f(&mut cell.content)),
            Element::Image(_) | Element::Line(_) => {}
        }
    }

    pub fn as_table(&self) -> Option<&TableElement> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableElement> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }
}
