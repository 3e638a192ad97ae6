// File: crates/chart-core/tests/tooltip.rs
// Purpose: Tooltip boundary clamping (including extreme anchors) and the single-tooltip state machine.

use tvchart_core::geometry::{Point, Rect};
use tvchart_core::tooltip::{
    clamp_frame, place, TooltipAnchor, TooltipContent, TOOLTIP_HEIGHT, TOOLTIP_MARGIN, TOOLTIP_WIDTH,
};
use tvchart_core::{ChartGeometry, TooltipController, TooltipState};
use tvchart_core::types::Margins;

fn content() -> TooltipContent {
    TooltipContent::units_and_share(1500, 75.0)
}

fn sweep() -> impl Iterator<Item = Point> {
    (-12..=40).flat_map(|i| (-12..=30).map(move |j| Point::new(i as f64 * 25.0, j as f64 * 25.0)))
}

#[test]
fn content_lines_are_grouped_and_one_decimal() {
    let c = content();
    assert_eq!(c.value_line, "1,500 units");
    assert_eq!(c.share_line, "75.0% share");
    assert_eq!(TooltipContent::units_and_share(0, 0.0).share_line, "0.0% share");
}

#[test]
fn box_stays_inside_top_left_bounds_for_every_anchor() {
    let bounds = ChartGeometry::fixed(Margins::none()).bounds();
    for p in sweep() {
        for anchor in [TooltipAnchor::offset(p, 15.0, -12.0), TooltipAnchor::offset(p, 0.0, -60.0)] {
            let tip = place(anchor, bounds, content());
            assert!(bounds.contains_rect(&tip.frame), "anchor {p:?} escaped: {:?}", tip.frame);
            assert_eq!(tip.frame.width, TOOLTIP_WIDTH);
            assert_eq!(tip.frame.height, TOOLTIP_HEIGHT);
        }
    }
}

#[test]
fn box_stays_inside_centered_bounds_for_every_anchor() {
    let bounds = ChartGeometry::fixed(Margins::none()).centered_bounds();
    for p in sweep() {
        let p = p.offset(-350.0, -200.0);
        let tip = place(TooltipAnchor::centered(p, -20.0), bounds, content());
        assert!(bounds.contains_rect(&tip.frame), "anchor {p:?} escaped: {:?}", tip.frame);
    }
}

#[test]
fn overflow_is_pushed_back_by_overflow_plus_margin() {
    let bounds = Rect::from_ltwh(0.0, 0.0, 700.0, 400.0);

    let right = clamp_frame(Rect::from_ltwh(650.0, 100.0, 130.0, 40.0), bounds, TOOLTIP_MARGIN);
    assert_eq!(right.left, 700.0 - 130.0 - 20.0);
    assert_eq!(right.top, 100.0);

    let left = clamp_frame(Rect::from_ltwh(-30.0, 100.0, 130.0, 40.0), bounds, TOOLTIP_MARGIN);
    assert_eq!(left.left, 20.0);

    let top = clamp_frame(Rect::from_ltwh(100.0, -5.0, 130.0, 40.0), bounds, TOOLTIP_MARGIN);
    assert_eq!(top.top, 20.0);

    let bottom = clamp_frame(Rect::from_ltwh(100.0, 380.0, 130.0, 40.0), bounds, TOOLTIP_MARGIN);
    assert_eq!(bottom.top, 400.0 - 40.0 - 20.0);
}

#[test]
fn box_inside_bounds_is_unchanged() {
    let bounds = Rect::from_ltwh(0.0, 0.0, 700.0, 400.0);
    let frame = Rect::from_ltwh(0.0, 360.0, 130.0, 40.0);
    assert_eq!(clamp_frame(frame, bounds, TOOLTIP_MARGIN), frame);
}

#[test]
fn box_larger_than_bounds_is_pinned_to_the_low_edge() {
    let bounds = Rect::from_ltwh(10.0, 5.0, 100.0, 30.0);
    let frame = clamp_frame(Rect::from_ltwh(300.0, 300.0, 130.0, 40.0), bounds, TOOLTIP_MARGIN);
    assert_eq!((frame.left, frame.top), (10.0, 5.0));
}

#[test]
fn controller_shows_at_most_one_tooltip() {
    let bounds = ChartGeometry::fixed(Margins::none()).bounds();
    let mut ctl = TooltipController::new(bounds);
    assert_eq!(ctl.state(), &TooltipState::Hidden);
    assert!(ctl.current().is_none());

    let first = ctl.on_enter(0, TooltipAnchor::offset(Point::new(100.0, 100.0), 15.0, -12.0), content());
    assert!(ctl.is_shown());
    assert_eq!(ctl.current(), Some(&first));

    let second = TooltipContent::units_and_share(500, 25.0);
    let layout = ctl.on_enter(1, TooltipAnchor::offset(Point::new(690.0, 390.0), 15.0, -12.0), second.clone());
    match ctl.state() {
        TooltipState::Shown { index, layout: shown } => {
            assert_eq!(*index, 1);
            assert_eq!(shown, &layout);
            assert_eq!(shown.content, second);
        }
        TooltipState::Hidden => panic!("tooltip should be shown"),
    }
    assert!(bounds.contains_rect(&layout.frame));

    ctl.on_leave();
    assert!(!ctl.is_shown());
    ctl.on_leave();
    assert_eq!(ctl.state(), &TooltipState::Hidden);
}

#[test]
fn text_lines_sit_inside_the_box() {
    let tip = place(TooltipAnchor::offset(Point::new(50.0, 50.0), 0.0, 0.0), Rect::from_ltwh(0.0, 0.0, 700.0, 400.0), content());
    let v = tip.value_line_position();
    let s = tip.share_line_position();
    assert_eq!(v.x, tip.frame.center_x());
    assert!(v.y > tip.frame.top && s.y > v.y && s.y < tip.frame.bottom());
}
