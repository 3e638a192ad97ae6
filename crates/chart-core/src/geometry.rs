// File: crates/chart-core/src/geometry.rs
// Summary: Chart geometry (logical vs display size) and lightweight point/rect math.

use crate::types::{Margins, DISPLAY_HEIGHT, DISPLAY_WIDTH, LOGICAL_HEIGHT, LOGICAL_WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Point at `radius` along `angle`, with angle 0 at twelve o'clock and growing clockwise.
    pub fn polar(angle: f64, radius: f64) -> Self {
        Self { x: radius * angle.sin(), y: -radius * angle.cos() }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self { Self { x: self.x + dx, y: self.y + dy } }
}

/// Axis-aligned rectangle in logical units, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
    pub fn right(&self) -> f64 { self.left + self.width }
    pub fn bottom(&self) -> f64 { self.top + self.height }
    pub fn center_x(&self) -> f64 { self.left + self.width / 2.0 }

    /// True when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Size and margins of one chart instance. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartGeometry {
    pub logical_width: f64,
    pub logical_height: f64,
    pub margins: Margins,
    pub display_width: f64,
    pub display_height: f64,
}

impl ChartGeometry {
    /// 700x400 logical, 900x500 display.
    pub fn fixed(margins: Margins) -> Self {
        Self {
            logical_width: LOGICAL_WIDTH,
            logical_height: LOGICAL_HEIGHT,
            margins,
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
        }
    }

    /// Height grows with the number of rows; the displayed height is capped.
    pub fn per_row(rows: usize, rule: &RowSizing) -> Self {
        let n = rows as f64;
        Self {
            logical_width: LOGICAL_WIDTH,
            logical_height: rule.min_logical.max(n * rule.logical_row),
            margins: Margins::none(),
            display_width: DISPLAY_WIDTH,
            display_height: rule.max_display.min(n * rule.display_row + rule.display_padding),
        }
    }

    pub fn inner_width(&self) -> f64 { self.logical_width - self.margins.horizontal() }
    pub fn inner_height(&self) -> f64 { self.logical_height - self.margins.vertical() }

    /// Full logical area with a top-left origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_ltwh(0.0, 0.0, self.logical_width, self.logical_height)
    }

    /// Full logical area expressed around the center (for groups translated to the middle).
    pub fn centered_bounds(&self) -> Rect {
        Rect::from_ltwh(
            -self.logical_width / 2.0,
            -self.logical_height / 2.0,
            self.logical_width,
            self.logical_height,
        )
    }
}

/// Data-dependent sizing: `max(min_logical, n*logical_row)` logical,
/// `min(max_display, n*display_row + display_padding)` displayed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowSizing {
    pub logical_row: f64,
    pub min_logical: f64,
    pub display_row: f64,
    pub display_padding: f64,
    pub max_display: f64,
}

impl Default for RowSizing {
    fn default() -> Self {
        Self { logical_row: 35.0, min_logical: 300.0, display_row: 30.0, display_padding: 80.0, max_display: 500.0 }
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
