// File: crates/chart-core/src/scale.rs
// Summary: Linear (magnitude) and band (category) scales mapping data to logical pixels.

use indexmap::IndexSet;

use crate::grid::nice_ticks;

/// Continuous `[0, domain_max] -> [range.0, range.1]` mapping.
///
/// A zero (or non-finite) `domain_max` is degenerate: every input maps to `range.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_max: f64,
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        Self { domain_max, range }
    }

    pub fn domain_max(&self) -> f64 { self.domain_max }
    pub fn range(&self) -> (f64, f64) { self.range }

    pub fn is_degenerate(&self) -> bool {
        !self.domain_max.is_finite() || self.domain_max == 0.0
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return r0;
        }
        r0 + (value / self.domain_max) * (r1 - r0)
    }

    /// Distance covered by `value` from the scale origin, always non-negative.
    #[inline]
    pub fn extent(&self, value: f64) -> f64 {
        (self.apply(value) - self.range.0).abs()
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if self.domain_max.is_finite() {
            nice_ticks(0.0, self.domain_max, count)
        } else {
            Vec::new()
        }
    }
}

/// One slot of a band scale: `[start, start + width)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub start: f64,
    pub width: f64,
}

impl Band {
    pub fn end(&self) -> f64 { self.start + self.width }
    pub fn center(&self) -> f64 { self.start + self.width / 2.0 }
}

/// Ordered categories partitioned into equal slots across a range.
///
/// Insertion order is display order; duplicate categories keep their first slot.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    categories: IndexSet<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    first: f64,
}

impl BandScale {
    pub fn new<I, S>(categories: I, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let padding_outer = padding_outer.max(0.0);

        let n = categories.len() as f64;
        let (lo, hi) = if range.0 <= range.1 { range } else { (range.1, range.0) };
        let span = hi - lo;
        let step = span / (n - padding_inner + 2.0 * padding_outer).max(1.0);
        let first = lo + (span - step * (n - padding_inner)) * 0.5;

        Self { categories, range, padding_inner, padding_outer, step, first }
    }

    /// Same padding on both sides.
    pub fn with_padding<I, S>(categories: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(categories, range, padding, padding)
    }

    pub fn len(&self) -> usize { self.categories.len() }
    pub fn is_empty(&self) -> bool { self.categories.is_empty() }
    pub fn step(&self) -> f64 { self.step }
    pub fn bandwidth(&self) -> f64 { self.step * (1.0 - self.padding_inner) }
    pub fn range(&self) -> (f64, f64) { self.range }
    pub fn padding(&self) -> (f64, f64) { (self.padding_inner, self.padding_outer) }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(String::as_str)
    }

    pub fn band(&self, category: &str) -> Option<Band> {
        let mut index = self.categories.get_index_of(category)?;
        if self.range.1 < self.range.0 {
            index = self.len() - 1 - index;
        }
        Some(Band { start: self.first + self.step * index as f64, width: self.bandwidth() })
    }

    /// Every category with its slot, in display order.
    pub fn bands(&self) -> Vec<(&str, Band)> {
        self.categories()
            .filter_map(|c| self.band(c).map(|b| (c, b)))
            .collect()
    }
}
