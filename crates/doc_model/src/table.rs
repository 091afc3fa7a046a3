//! Table model - Grid of cells with per-cell style, borders and sizing
//!
//! A table element owns a `rows x cols` matrix of cells. Every structural
//! edit keeps that shape intact: rows and columns are added or removed as a
//! whole, and removing the last row or column is rejected.
//!
//! Border visibility resolves through three levels for every side of every
//! cell: the cell's own flag, then the table's flag, then `true`.

use crate::{DocModelError, HorizontalAlign, NodeId, Result, Size, StrokeStyle, VerticalAlign};
use serde::{Deserialize, Serialize};

/// Smallest width a column can be resized to
pub const MIN_CELL_WIDTH: f64 = 50.0;
/// Smallest height a cell can be resized to
pub const MIN_CELL_HEIGHT: f64 = 20.0;

const HEADER_BACKGROUND: &str = "#f3f4f6";

// =============================================================================
// Borders
// =============================================================================

/// One side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderSide {
    pub const ALL: [BorderSide; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];
}

/// Optional visibility flag per side. `None` means "inherit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_border_top: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_border_bottom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_border_left: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_border_right: Option<bool>,
}

impl BorderFlags {
    /// Every side explicitly set to `visible`
    pub fn all(visible: bool) -> Self {
        Self {
            show_border_top: Some(visible),
            show_border_bottom: Some(visible),
            show_border_left: Some(visible),
            show_border_right: Some(visible),
        }
    }

    pub fn get(&self, side: BorderSide) -> Option<bool> {
        match side {
            BorderSide::Top => self.show_border_top,
            BorderSide::Bottom => self.show_border_bottom,
            BorderSide::Left => self.show_border_left,
            BorderSide::Right => self.show_border_right,
        }
    }

    pub fn set(&mut self, side: BorderSide, value: Option<bool>) {
        let slot = match side {
            BorderSide::Top => &mut self.show_border_top,
            BorderSide::Bottom => &mut self.show_border_bottom,
            BorderSide::Left => &mut self.show_border_left,
            BorderSide::Right => &mut self.show_border_right,
        };
        *slot = value;
    }
}

/// Bulk border operations applied to every cell of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderPreset {
    /// Every side of every cell
    FullGrid,
    /// Only the sides on the table's outer boundary
    OuterOnly,
    /// Top and bottom of every cell
    Horizontal,
    /// Left and right of every cell
    Vertical,
    /// Nothing
    NoBorders,
    /// The outer boundary, leaving inner sides alone
    ToggleOuter,
    /// Everything except the outer boundary, leaving outer sides alone
    ToggleInner,
}

// =============================================================================
// Cells
// =============================================================================

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    /// Cell text; may contain `{{field}}` placeholders
    pub content: String,
    pub font_size: f64,
    pub font_weight: String,
    pub color: String,
    /// Background color, empty for transparent
    pub bg: String,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    /// Width override; `None` uses the table's `cellWidth`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height override; `None` uses the table's `cellHeight`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub borders: BorderFlags,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 12.0,
            font_weight: "normal".to_string(),
            color: "#000000".to_string(),
            bg: String::new(),
            align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Middle,
            width: None,
            height: None,
            borders: BorderFlags::default(),
        }
    }
}

impl TableCell {
    fn header() -> Self {
        Self {
            font_weight: "bold".to_string(),
            bg: HEADER_BACKGROUND.to_string(),
            ..Self::default()
        }
    }

    /// Copy the shareable style of `source` onto this cell. Content and size
    /// overrides stay as they are.
    pub fn copy_style_from(&mut self, source: &TableCell) {
        self.font_size = source.font_size;
        self.font_weight = source.font_weight.clone();
        self.color = source.color.clone();
        self.bg = source.bg.clone();
        self.align = source.align;
        self.vertical_align = source.vertical_align;
        self.borders = source.borders;
    }
}

// =============================================================================
// Table
// =============================================================================

/// A positioned table element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableElement {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub border_width: f64,
    pub border_style: StrokeStyle,
    pub border_color: String,
    #[serde(flatten)]
    pub borders: BorderFlags,
    /// `rows` arrays of `cols` cells each
    pub data: Vec<Vec<TableCell>>,
}

impl Default for TableElement {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl TableElement {
    /// Create a table with a fresh id. The first row gets header styling;
    /// this happens only here, never on later row insertions.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let data = (0..rows)
            .map(|r| {
                let cell = if r == 0 { TableCell::header() } else { TableCell::default() };
                vec![cell; cols]
            })
            .collect();

        Self {
            id: NodeId::new(),
            x: 0.0,
            y: 0.0,
            rows,
            cols,
            cell_width: 100.0,
            cell_height: 30.0,
            border_width: 1.0,
            border_style: StrokeStyle::Solid,
            border_color: "#000000".to_string(),
            borders: BorderFlags::default(),
            data,
        }
    }

    /// A fresh cell for column `col`. Border flags stay unset so the cell
    /// follows the table's own border settings; a resized column keeps its
    /// width.
    pub fn new_cell(&self, col: usize) -> TableCell {
        TableCell {
            width: self.data.last().and_then(|row| row.get(col)).and_then(|c| c.width),
            ..TableCell::default()
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut TableCell> {
        self.data
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(DocModelError::CellOutOfRange { row, col })
    }

    /// Effective width of a cell
    pub fn cell_width_at(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col)
            .and_then(|c| c.width)
            .unwrap_or(self.cell_width)
    }

    /// Effective height of a cell
    pub fn cell_height_at(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col)
            .and_then(|c| c.height)
            .unwrap_or(self.cell_height)
    }

    /// Height of a row: its tallest cell
    pub fn row_height(&self, row: usize) -> f64 {
        (0..self.cols)
            .map(|col| self.cell_height_at(row, col))
            .fold(0.0, f64::max)
    }

    /// Bounding box: first-row widths summed, row heights summed
    pub fn size(&self) -> Size {
        if self.data.is_empty() {
            return Size::new(
                self.cols as f64 * self.cell_width,
                self.rows as f64 * self.cell_height,
            );
        }
        let width = (0..self.cols).map(|col| self.cell_width_at(0, col)).sum();
        let height = (0..self.data.len()).map(|row| self.row_height(row)).sum();
        Size::new(width, height)
    }

    /// Whether a given side of a cell draws a border
    pub fn resolved_border(&self, row: usize, col: usize, side: BorderSide) -> bool {
        let cell_flag = self.cell(row, col).and_then(|c| c.borders.get(side));
        cell_flag.or(self.borders.get(side)).unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// Append a row at the bottom
    pub fn add_row(&mut self) {
        let row = (0..self.cols).map(|col| self.new_cell(col)).collect();
        self.data.push(row);
        self.rows += 1;
    }

    /// Append a column on the right
    pub fn add_column(&mut self) {
        let cell = TableCell::default();
        for row in &mut self.data {
            row.push(cell.clone());
        }
        self.cols += 1;
    }

    /// Remove a row (the last one when `index` is `None`)
    pub fn remove_row(&mut self, index: Option<usize>) -> Result<()> {
        if self.rows <= 1 {
            return Err(DocModelError::LastRow);
        }
        let index = index.unwrap_or(self.rows - 1);
        if index >= self.rows {
            return Err(DocModelError::CellOutOfRange { row: index, col: 0 });
        }
        self.data.remove(index);
        self.rows -= 1;
        Ok(())
    }

    /// Remove a column (the last one when `index` is `None`)
    pub fn remove_column(&mut self, index: Option<usize>) -> Result<()> {
        if self.cols <= 1 {
            return Err(DocModelError::LastColumn);
        }
        let index = index.unwrap_or(self.cols - 1);
        if index >= self.cols {
            return Err(DocModelError::CellOutOfRange { row: 0, col: index });
        }
        for row in &mut self.data {
            row.remove(index);
        }
        self.cols -= 1;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sizing
    // -------------------------------------------------------------------------

    /// Set the width of every cell in a column. Returns the applied width.
    pub fn resize_column(&mut self, col: usize, width: f64) -> Result<f64> {
        if col >= self.cols {
            return Err(DocModelError::CellOutOfRange { row: 0, col });
        }
        let width = width.max(MIN_CELL_WIDTH);
        for cell in self.data.iter_mut().filter_map(|row| row.get_mut(col)) {
            cell.width = Some(width);
        }
        Ok(width)
    }

    /// Set the height of a single cell. The rest of the row is untouched;
    /// the row grows to its tallest cell. Returns the applied height.
    pub fn resize_cell_height(&mut self, row: usize, col: usize, height: f64) -> Result<f64> {
        let height = height.max(MIN_CELL_HEIGHT);
        self.cell_mut(row, col)?.height = Some(height);
        Ok(height)
    }

    // -------------------------------------------------------------------------
    // Bulk styling
    // -------------------------------------------------------------------------

    /// Copy one cell's style (never its content) onto every cell
    pub fn apply_cell_style_to_all(&mut self, row: usize, col: usize) -> Result<()> {
        let source = self
            .cell(row, col)
            .cloned()
            .ok_or(DocModelError::CellOutOfRange { row, col })?;
        for cell in self.data.iter_mut().flatten() {
            cell.copy_style_from(&source);
        }
        Ok(())
    }

    fn is_outer(&self, row: usize, col: usize, side: BorderSide) -> bool {
        match side {
            BorderSide::Top => row == 0,
            BorderSide::Bottom => row + 1 == self.rows,
            BorderSide::Left => col == 0,
            BorderSide::Right => col + 1 == self.cols,
        }
    }

    /// Desired visibility of one side under a preset; `None` leaves it alone
    fn preset_target(&self, preset: BorderPreset, row: usize, col: usize, side: BorderSide) -> Option<bool> {
        let outer = self.is_outer(row, col, side);
        let horizontal = matches!(side, BorderSide::Top | BorderSide::Bottom);
        match preset {
            BorderPreset::FullGrid => Some(true),
            BorderPreset::NoBorders => Some(false),
            BorderPreset::OuterOnly => Some(outer),
            BorderPreset::Horizontal => Some(horizontal),
            BorderPreset::Vertical => Some(!horizontal),
            BorderPreset::ToggleOuter => outer.then_some(true),
            BorderPreset::ToggleInner => (!outer).then_some(true),
        }
    }

    /// Apply a border preset to every cell.
    ///
    /// When the grid already matches the preset, the preset flips instead:
    /// the sides it turns on are switched off (and `NoBorders` turns every
    /// side back on). Returns `true` when the flip was taken.
    pub fn apply_border_preset(&mut self, preset: BorderPreset) -> bool {
        let mut targets = Vec::with_capacity(self.rows * self.cols * 4);
        for row in 0..self.data.len() {
            for col in 0..self.cols {
                for side in BorderSide::ALL {
                    if let Some(want) = self.preset_target(preset, row, col, side) {
                        targets.push((row, col, side, want));
                    }
                }
            }
        }

        let already_applied = targets
            .iter()
            .all(|&(row, col, side, want)| self.resolved_border(row, col, side) == want);

        for (row, col, side, want) in targets {
            let value = match (already_applied, preset) {
                (false, _) => want,
                (true, BorderPreset::NoBorders) => true,
                (true, _) if want => false,
                (true, _) => continue,
            };
            if let Some(cell) = self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
                cell.borders.set(side, Some(value));
            }
        }

        tracing::debug!(table = %self.id, ?preset, flipped = already_applied, "applied border preset");
        already_applied
    }

    // -------------------------------------------------------------------------
    // Repair
    // -------------------------------------------------------------------------

    /// Restore the `rows x cols` shape of `data`. Returns `true` if anything
    /// had to change.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        if self.rows == 0 {
            self.rows = 1;
            changed = true;
        }
        if self.cols == 0 {
            self.cols = 1;
            changed = true;
        }
        if self.data.len() != self.rows {
            self.data.resize_with(self.rows, Vec::new);
            changed = true;
        }
        let cols = self.cols;
        for row in &mut self.data {
            if row.len() != cols {
                row.resize_with(cols, TableCell::default);
                changed = true;
            }
        }
        changed
    }

    /// Whether `data` matches `rows x cols`
    pub fn is_well_formed(&self) -> bool {
        self.rows >= 1
            && self.cols >= 1
            && self.data.len() == self.rows
            && self.data.iter().all(|row| row.len() == self.cols)
    }
}

// =============================================================================
// Tests
// =============================================================================
