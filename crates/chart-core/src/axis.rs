// File: crates/chart-core/src/axis.rs
// Summary: Axis decorations (domain line, tick marks, tick labels) in logical coordinates.

use crate::geometry::Point;
use crate::scale::{BandScale, LinearScale};
use crate::text::format_tick;

/// Length of a tick mark.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between the end of a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Where the tick meets the axis.
    pub at: Point,
    pub label_at: Point,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Domain line; `None` for label-only axes.
    pub domain: Option<(Point, Point)>,
    pub tick_size: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn new(orient: AxisOrient, domain: Option<(Point, Point)>, tick_size: f64) -> Self {
        Self { orient, domain, tick_size, ticks: Vec::new() }
    }

    /// Add a tick at `at`; the label is placed outside the tick mark.
    pub fn push_tick(&mut self, at: Point, label: impl Into<String>) {
        let gap = self.tick_size + TICK_PADDING;
        let label_at = match self.orient {
            AxisOrient::Bottom => at.offset(0.0, gap),
            AxisOrient::Left => at.offset(-gap, 0.0),
        };
        self.ticks.push(Tick { at, label_at, label: label.into() });
    }

    /// Label without a tick mark, drawn at `at` itself.
    pub fn push_label(&mut self, at: Point, label: impl Into<String>) {
        self.ticks.push(Tick { at, label_at: at, label: label.into() });
    }

    /// End point of the tick mark drawn at `tick`.
    pub fn tick_end(&self, tick: &Tick) -> Point {
        match self.orient {
            AxisOrient::Bottom => tick.at.offset(0.0, self.tick_size),
            AxisOrient::Left => tick.at.offset(-self.tick_size, 0.0),
        }
    }

    /// Horizontal axis at `y` with one tick per band center.
    pub fn bottom_bands(scale: &BandScale, y: f64, labels: &[(String, String)]) -> Self {
        let (r0, r1) = scale.range();
        let mut axis = Self::new(AxisOrient::Bottom, Some((Point::new(r0, y), Point::new(r1, y))), TICK_SIZE);
        for (key, label) in labels {
            if let Some(band) = scale.band(key) {
                axis.push_tick(Point::new(band.center(), y), label.clone());
            }
        }
        axis
    }

    /// Vertical axis at `x` with nice numeric ticks.
    pub fn left_linear(scale: &LinearScale, x: f64, count: usize) -> Self {
        let (r0, r1) = scale.range();
        let mut axis = Self::new(AxisOrient::Left, Some((Point::new(x, r0), Point::new(x, r1))), TICK_SIZE);
        for t in scale.ticks(count) {
            axis.push_tick(Point::new(x, scale.apply(t)), format_tick(t));
        }
        axis
    }
}
