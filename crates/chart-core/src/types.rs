// File: crates/chart-core/src/types.rs
// Summary: Shared sizes (logical viewBox vs displayed pixels) and chart margins.

/// Logical (viewBox) width shared by all three charts.
pub const LOGICAL_WIDTH: f64 = 700.0;
/// Logical height of the fixed-size charts.
pub const LOGICAL_HEIGHT: f64 = 400.0;
/// Displayed width in pixels.
pub const DISPLAY_WIDTH: f64 = 900.0;
/// Displayed height of the fixed-size charts.
pub const DISPLAY_HEIGHT: f64 = 500.0;

/// Space between the chart edge and the plot area, in logical units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Clockwise from the top, CSS order.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn none() -> Self { Self::new(0.0, 0.0, 0.0, 0.0) }

    pub fn horizontal(&self) -> f64 { self.left + self.right }
    pub fn vertical(&self) -> f64 { self.top + self.bottom }
}
