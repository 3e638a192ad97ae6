// File: crates/chart-core/src/tooltip.rs
// Summary: Tooltip layout (natural anchor, boundary clamping) and the single-tooltip state machine.

use crate::geometry::{clamp, Point, Rect};
use crate::text::{format_share, group_thousands};

pub const TOOLTIP_WIDTH: f64 = 130.0;
pub const TOOLTIP_HEIGHT: f64 = 40.0;
/// Extra inward push applied when the box would overflow an edge.
pub const TOOLTIP_MARGIN: f64 = 20.0;
/// Baselines of the two text lines, measured from the top of the box.
pub const VALUE_LINE_OFFSET: f64 = 18.0;
pub const SHARE_LINE_OFFSET: f64 = 34.0;

/// The two lines shown in a tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipContent {
    pub value_line: String,
    pub share_line: String,
}

impl TooltipContent {
    /// `"1,500 units"` / `"75.0% share"`.
    pub fn units_and_share(count: u64, share_percent: f64) -> Self {
        Self {
            value_line: format!("{} units", group_thousands(count)),
            share_line: format!("{}% share", format_share(share_percent)),
        }
    }
}

/// Where a tooltip would sit before clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipAnchor {
    /// Point on the hovered mark the tooltip belongs to.
    pub point: Point,
    /// Unclamped box.
    pub frame: Rect,
}

impl TooltipAnchor {
    /// Box whose top-left corner is at `point + (dx, dy)`.
    pub fn offset(point: Point, dx: f64, dy: f64) -> Self {
        let frame = Rect::from_ltwh(point.x + dx, point.y + dy, TOOLTIP_WIDTH, TOOLTIP_HEIGHT);
        Self { point, frame }
    }

    /// Box horizontally centered on `point`, its top `dy` away from it.
    pub fn centered(point: Point, dy: f64) -> Self {
        Self::offset(point, -TOOLTIP_WIDTH / 2.0, dy)
    }
}

/// A placed tooltip: clamped frame plus its text.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipLayout {
    pub anchor: TooltipAnchor,
    pub frame: Rect,
    pub content: TooltipContent,
}

impl TooltipLayout {
    pub fn value_line_position(&self) -> Point {
        Point::new(self.frame.center_x(), self.frame.top + VALUE_LINE_OFFSET)
    }

    pub fn share_line_position(&self) -> Point {
        Point::new(self.frame.center_x(), self.frame.top + SHARE_LINE_OFFSET)
    }
}

/// Keep `[start, start+len]` inside `[lo, hi]`: an overflow pushes the box back by
/// the overflow plus `margin`. A box longer than the span is pinned to `lo`.
fn clamp_axis(start: f64, len: f64, lo: f64, hi: f64, margin: f64) -> f64 {
    if len >= hi - lo {
        return lo;
    }
    let pushed = if start + len > hi {
        start - (start + len - hi) - margin
    } else if start < lo {
        start + (lo - start) + margin
    } else {
        start
    };
    clamp(pushed, lo, hi - len)
}

/// Clamp `frame` so it lies within `bounds`.
pub fn clamp_frame(frame: Rect, bounds: Rect, margin: f64) -> Rect {
    Rect {
        left: clamp_axis(frame.left, frame.width, bounds.left, bounds.right(), margin),
        top: clamp_axis(frame.top, frame.height, bounds.top, bounds.bottom(), margin),
        ..frame
    }
}

/// Place a tooltip for `anchor` inside `bounds`.
pub fn place(anchor: TooltipAnchor, bounds: Rect, content: TooltipContent) -> TooltipLayout {
    TooltipLayout { anchor, frame: clamp_frame(anchor.frame, bounds, TOOLTIP_MARGIN), content }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TooltipState {
    #[default]
    Hidden,
    Shown { index: usize, layout: TooltipLayout },
}

/// Owns the (at most one) live tooltip of a chart.
#[derive(Clone, Debug)]
pub struct TooltipController {
    bounds: Rect,
    state: TooltipState,
}

impl TooltipController {
    /// `bounds` is the chart area in the coordinate system of the tooltip layer.
    pub fn new(bounds: Rect) -> Self {
        Self { bounds, state: TooltipState::Hidden }
    }

    pub fn bounds(&self) -> Rect { self.bounds }
    pub fn state(&self) -> &TooltipState { &self.state }
    pub fn is_shown(&self) -> bool { matches!(self.state, TooltipState::Shown { .. }) }

    pub fn current(&self) -> Option<&TooltipLayout> {
        match &self.state {
            TooltipState::Shown { layout, .. } => Some(layout),
            TooltipState::Hidden => None,
        }
    }

    /// Mount a tooltip for datum `index`, replacing any live one.
    pub fn on_enter(&mut self, index: usize, anchor: TooltipAnchor, content: TooltipContent) -> TooltipLayout {
        self.on_leave();
        let layout = place(anchor, self.bounds, content);
        self.state = TooltipState::Shown { index, layout: layout.clone() };
        layout
    }

    pub fn on_leave(&mut self) {
        self.state = TooltipState::Hidden;
    }
}
