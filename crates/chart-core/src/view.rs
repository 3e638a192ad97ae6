// File: crates/chart-core/src/view.rs
// Summary: Interactive chart view: hover dispatch, highlight, tooltip mounting and
// handler registration that returns a disposer.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::trace;

use crate::chart::ChartLayout;
use crate::svg::{write_chart, Interaction};
use crate::theme::Theme;
use crate::tooltip::{TooltipController, TooltipState};

/// Pointer entering or leaving the mark with the given index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(usize),
    Leave(usize),
}

impl HoverEvent {
    pub fn index(&self) -> usize {
        match *self {
            HoverEvent::Enter(i) | HoverEvent::Leave(i) => i,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no mark at index {index} (chart has {len})")]
    NoSuchMark { index: usize, len: usize },
}

type Handler = Box<dyn FnMut(&HoverEvent, &TooltipState)>;

struct Registration {
    id: u64,
    active: Rc<Cell<bool>>,
    handler: Handler,
}

type Registry = Rc<RefCell<Vec<Registration>>>;

/// Keeps a hover handler registered; dropping it (or calling `dispose`) unregisters.
#[must_use = "dropping the subscription unregisters the handler"]
pub struct HoverSubscription {
    id: u64,
    active: Rc<Cell<bool>>,
    registry: Weak<RefCell<Vec<Registration>>>,
}

impl HoverSubscription {
    pub fn dispose(self) {}

    pub fn is_active(&self) -> bool { self.active.get() }
}

impl Drop for HoverSubscription {
    fn drop(&mut self) {
        self.active.set(false);
        // inside a dispatch the registry is borrowed; dispatch prunes inactive entries itself
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut regs) = registry.try_borrow_mut() {
                regs.retain(|r| r.id != self.id);
            }
        }
    }
}

/// A laid-out chart plus its hover state.
pub struct ChartView {
    layout: ChartLayout,
    theme: Theme,
    animate: bool,
    tooltip: TooltipController,
    highlighted: Option<usize>,
    handlers: Registry,
    next_id: u64,
}

impl ChartView {
    pub fn new(layout: ChartLayout, theme: Theme, animate: bool) -> Self {
        let tooltip = TooltipController::new(layout.tooltip_bounds);
        Self { layout, theme, animate, tooltip, highlighted: None, handlers: Rc::default(), next_id: 0 }
    }

    pub fn layout(&self) -> &ChartLayout { &self.layout }
    pub fn tooltip(&self) -> &TooltipState { self.tooltip.state() }
    pub fn highlighted(&self) -> Option<usize> { self.highlighted }
    pub fn handler_count(&self) -> usize { self.handlers.borrow().len() }

    /// Register `handler`, called after every dispatched event with the resulting tooltip state.
    pub fn on_hover<F>(&mut self, handler: F) -> HoverSubscription
    where
        F: FnMut(&HoverEvent, &TooltipState) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        let active = Rc::new(Cell::new(true));
        self.handlers.borrow_mut().push(Registration { id, active: Rc::clone(&active), handler: Box::new(handler) });
        HoverSubscription { id, active, registry: Rc::downgrade(&self.handlers) }
    }

    pub fn dispatch(&mut self, event: HoverEvent) -> Result<(), ViewError> {
        let index = event.index();
        let Some(mark) = self.layout.mark(index) else {
            return Err(ViewError::NoSuchMark { index, len: self.layout.marks.len() });
        };
        match event {
            HoverEvent::Enter(_) => {
                self.tooltip.on_enter(index, mark.tooltip_anchor, mark.tooltip.clone());
                self.highlighted = Some(index);
            }
            HoverEvent::Leave(_) => {
                self.tooltip.on_leave();
                if self.highlighted == Some(index) {
                    self.highlighted = None;
                }
            }
        }
        trace!(chart = self.layout.id, ?event, shown = self.tooltip.is_shown(), "hover");

        let mut regs = self.handlers.borrow_mut();
        for reg in regs.iter_mut() {
            if reg.active.get() {
                (reg.handler)(&event, self.tooltip.state());
            }
        }
        regs.retain(|r| r.active.get());
        Ok(())
    }

    /// SVG of the current state: highlighted mark and at most one mounted tooltip.
    pub fn to_svg(&self) -> String {
        let tooltip = match self.tooltip.state() {
            TooltipState::Shown { index, layout } => Some((*index, layout)),
            TooltipState::Hidden => None,
        };
        write_chart(
            &self.layout,
            &self.theme,
            self.animate,
            Some(Interaction { highlighted: self.highlighted, tooltip }),
        )
    }
}
