//! Page size presets and orientation
//!
//! Templates choose one of four named paper sizes and an orientation. The
//! canvas works in CSS pixels at 96 DPI, so every preset resolves to a fixed
//! pixel width and height.

use serde::{Deserialize, Serialize};

// =============================================================================
// Page Size Presets
// =============================================================================

/// Standard page size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageSizePreset {
    /// A4 (210mm x 297mm)
    #[default]
    #[serde(alias = "a4")]
    A4,
    /// US Letter (8.5" x 11")
    #[serde(alias = "letter")]
    Letter,
    /// Legal (8.5" x 14")
    #[serde(alias = "legal")]
    Legal,
    /// A3 (297mm x 420mm)
    #[serde(alias = "a3")]
    A3,
}

impl PageSizePreset {
    /// All supported presets
    pub const ALL: [PageSizePreset; 4] = [Self::A4, Self::Letter, Self::Legal, Self::A3];

    /// Portrait dimensions in pixels (width, height)
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSizePreset::A4 => (794.0, 1123.0),
            PageSizePreset::Letter => (816.0, 1056.0),
            PageSizePreset::Legal => (816.0, 1344.0),
            PageSizePreset::A3 => (1123.0, 1587.0),
        }
    }

    /// Get the preset name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            PageSizePreset::A4 => "A4",
            PageSizePreset::Letter => "Letter",
            PageSizePreset::Legal => "Legal",
            PageSizePreset::A3 => "A3",
        }
    }
}

// =============================================================================
// Page Orientation
// =============================================================================

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply orientation to dimensions
    pub fn apply(&self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Orientation::Portrait => (width.min(height), width.max(height)),
            Orientation::Landscape => (width.max(height), width.min(height)),
        }
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Resolved page size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl PageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Look up a preset in the fixed size table
    pub fn from_preset(preset: PageSizePreset, orientation: Orientation) -> Self {
        let (width, height) = preset.dimensions();
        let (width, height) = orientation.apply(width, height);
        Self { width, height }
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self::from_preset(PageSizePreset::default(), Orientation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_lookup() {
        let a4 = PageDimensions::from_preset(PageSizePreset::A4, Orientation::Portrait);
        assert_eq!(a4, PageDimensions::new(794.0, 1123.0));
    }

    #[test]
    fn test_landscape_swaps_axes() {
        for preset in PageSizePreset::ALL {
            let portrait = PageDimensions::from_preset(preset, Orientation::Portrait);
            let landscape = PageDimensions::from_preset(preset, Orientation::Landscape);
            assert_eq!(portrait.width, landscape.height);
            assert_eq!(portrait.height, landscape.width);
            assert!(landscape.width > landscape.height);
        }
    }

    #[test]
    fn test_preset_wire_names() {
        assert_eq!(serde_json::to_string(&PageSizePreset::Letter).unwrap(), "\"Letter\"");
        let legal: PageSizePreset = serde_json::from_str("\"legal\"").unwrap();
        assert_eq!(legal, PageSizePreset::Legal);
        let o: Orientation = serde_json::from_str("\"landscape\"").unwrap();
        assert_eq!(o, Orientation::Landscape);
    }
}
