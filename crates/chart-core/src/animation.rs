// File: crates/chart-core/src/animation.rs
// Summary: Entrance transitions (duration + delay, per-index stagger) and pie sweep keyframes.

/// A single timed transition, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub delay_ms: u32,
    pub duration_ms: u32,
}

impl Transition {
    pub const fn new(duration_ms: u32) -> Self { Self { delay_ms: 0, duration_ms } }

    pub const fn delayed(self, delay_ms: u32) -> Self {
        Self { delay_ms: self.delay_ms.saturating_add(delay_ms), duration_ms: self.duration_ms }
    }

    pub const fn end_ms(&self) -> u32 { self.delay_ms.saturating_add(self.duration_ms) }
}

/// Transition whose delay grows by `per_item_ms` for each item index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stagger {
    pub base: Transition,
    pub per_item_ms: u32,
}

impl Stagger {
    pub const fn none(base: Transition) -> Self { Self { base, per_item_ms: 0 } }

    pub const fn new(base: Transition, per_item_ms: u32) -> Self { Self { base, per_item_ms } }

    pub fn at(&self, index: usize) -> Transition {
        let step = u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(self.per_item_ms);
        self.base.delayed(step)
    }
}

/// Number of keyframes used to sweep a pie slice open.
pub const SWEEP_FRAMES: usize = 24;

/// Angle pairs interpolated from `(0, 0)` to `(start, end)`, inclusive of both ends.
pub fn sweep_frames(start: f64, end: f64, frames: usize) -> Vec<(f64, f64)> {
    let frames = frames.max(2);
    (0..frames)
        .map(|i| {
            let t = i as f64 / (frames - 1) as f64;
            (start * t, end * t)
        })
        .collect()
}
