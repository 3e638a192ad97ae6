// File: crates/chart-core/tests/view.rs
// Purpose: Hover dispatch: highlight + single tooltip transitions, handler registration and disposal.

use std::cell::RefCell;
use std::rc::Rc;

use tvchart_core::record::sort_by_count_desc;
use tvchart_core::{
    BrandRecord, ChartConfig, ChartRenderer, ChartView, HoverEvent, RenderOptions, TechRecord, Theme, TooltipState,
    ViewError,
};

fn brand_view() -> ChartView {
    let mut data = vec![BrandRecord::new("A", 50), BrandRecord::new("B", 150)];
    sort_by_count_desc(&mut data);
    ChartRenderer::new(ChartConfig::brand_market_share(), RenderOptions { theme: Theme::aurora(), animate: false })
        .view(&data)
}

fn shown_index(view: &ChartView) -> Option<usize> {
    match view.tooltip() {
        TooltipState::Shown { index, .. } => Some(*index),
        TooltipState::Hidden => None,
    }
}

#[test]
fn enter_then_leave_round_trips_to_hidden() {
    let mut view = brand_view();
    assert_eq!(view.tooltip(), &TooltipState::Hidden);

    view.dispatch(HoverEvent::Enter(0)).unwrap();
    assert_eq!(shown_index(&view), Some(0));
    assert_eq!(view.highlighted(), Some(0));
    if let TooltipState::Shown { layout, .. } = view.tooltip() {
        assert_eq!(layout.content.value_line, "150 units");
        assert_eq!(layout.content.share_line, "75.0% share");
        assert!(view.layout().tooltip_bounds.contains_rect(&layout.frame));
    }

    view.dispatch(HoverEvent::Leave(0)).unwrap();
    assert_eq!(view.tooltip(), &TooltipState::Hidden);
    assert_eq!(view.highlighted(), None);
}

#[test]
fn entering_another_mark_replaces_the_tooltip() {
    let mut view = brand_view();
    view.dispatch(HoverEvent::Enter(0)).unwrap();
    view.dispatch(HoverEvent::Enter(1)).unwrap();
    assert_eq!(shown_index(&view), Some(1));
    assert_eq!(view.highlighted(), Some(1));

    let svg = view.to_svg();
    assert!(svg.contains("id=\"brand-tip-1\""));
    assert!(!svg.contains("id=\"brand-tip-0\""));
    assert!(svg.contains("brand-mark mark highlighted"));

    // a late leave for the first mark still hides the live tooltip but keeps mark 1 lit
    view.dispatch(HoverEvent::Leave(0)).unwrap();
    assert_eq!(view.tooltip(), &TooltipState::Hidden);
    assert_eq!(view.highlighted(), Some(1));
}

#[test]
fn hidden_view_draws_no_tooltip_and_no_hover_css() {
    let view = brand_view();
    let svg = view.to_svg();
    assert!(!svg.contains("brand-tip"));
    assert!(!svg.contains("<style>"));
    assert!(!svg.contains("highlighted"));
}

#[test]
fn unknown_mark_is_an_error_and_leaves_state_alone() {
    let mut view = brand_view();
    view.dispatch(HoverEvent::Enter(1)).unwrap();
    let err = view.dispatch(HoverEvent::Enter(5)).unwrap_err();
    assert_eq!(err, ViewError::NoSuchMark { index: 5, len: 2 });
    assert_eq!(err.to_string(), "no mark at index 5 (chart has 2)");
    assert_eq!(shown_index(&view), Some(1));
}

#[test]
fn handlers_see_every_event_until_disposed() {
    let mut view = brand_view();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&seen);
    let sub = view.on_hover(move |event, state| {
        log.borrow_mut().push((*event, matches!(state, TooltipState::Shown { .. })));
    });
    assert!(sub.is_active());
    assert_eq!(view.handler_count(), 1);

    view.dispatch(HoverEvent::Enter(1)).unwrap();
    view.dispatch(HoverEvent::Leave(1)).unwrap();
    assert_eq!(*seen.borrow(), vec![(HoverEvent::Enter(1), true), (HoverEvent::Leave(1), false)]);

    sub.dispose();
    assert_eq!(view.handler_count(), 0);
    view.dispatch(HoverEvent::Enter(0)).unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn dropping_the_subscription_unregisters() {
    let mut view = brand_view();
    let hits = Rc::new(RefCell::new(0));
    {
        let hits = Rc::clone(&hits);
        let _sub = view.on_hover(move |_, _| *hits.borrow_mut() += 1);
        view.dispatch(HoverEvent::Enter(0)).unwrap();
    }
    view.dispatch(HoverEvent::Enter(1)).unwrap();
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(view.handler_count(), 0);
}

#[test]
fn several_handlers_are_independent() {
    let mut view = brand_view();
    let a = Rc::new(RefCell::new(0));
    let b = Rc::new(RefCell::new(0));
    let (ca, cb) = (Rc::clone(&a), Rc::clone(&b));
    let sub_a = view.on_hover(move |_, _| *ca.borrow_mut() += 1);
    let sub_b = view.on_hover(move |_, _| *cb.borrow_mut() += 1);

    view.dispatch(HoverEvent::Enter(0)).unwrap();
    drop(sub_a);
    view.dispatch(HoverEvent::Leave(0)).unwrap();
    assert_eq!((*a.borrow(), *b.borrow()), (1, 2));
    assert!(sub_b.is_active());
    assert_eq!(view.handler_count(), 1);
}

#[test]
fn subscription_may_outlive_its_view() {
    let sub;
    {
        let mut view = ChartRenderer::new(ChartConfig::screen_technologies(), RenderOptions::default())
            .view(&[TechRecord::new("LED", 70, 70.0), TechRecord::new("OLED", 30, 30.0)]);
        sub = view.on_hover(|_, _| {});
        view.dispatch(HoverEvent::Enter(1)).unwrap();
        assert!(view.to_svg().contains("id=\"tech-tip-1\""));
    }
    // registry already gone
    drop(sub);
}
