// File: crates/chart-core/src/record.rs
// Summary: Typed input rows (brand, screen size, screen technology) and ordering helpers.

/// What a chart needs from one input row.
pub trait Datum {
    /// Category key used by band scales and the pie ordinal palette.
    fn key(&self) -> String;
    /// Human label for axes; defaults to the key.
    fn tick_label(&self) -> String { self.key() }
    fn count(&self) -> u64;
    /// Share carried by the input itself, if any (percent, 0..=100).
    fn precomputed_share(&self) -> Option<f64> { None }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrandRecord {
    pub brand: String,
    pub count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeRecord {
    /// Diagonal in inches.
    pub size: u32,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TechRecord {
    pub technology: String,
    pub count: u64,
    pub percentage: f64,
}

impl BrandRecord {
    pub fn new(brand: impl Into<String>, count: u64) -> Self { Self { brand: brand.into(), count } }
}

impl SizeRecord {
    pub const fn new(size: u32, count: u64) -> Self { Self { size, count } }
}

impl TechRecord {
    pub fn new(technology: impl Into<String>, count: u64, percentage: f64) -> Self {
        Self { technology: technology.into(), count, percentage }
    }
}

impl Datum for BrandRecord {
    fn key(&self) -> String { self.brand.clone() }
    fn count(&self) -> u64 { self.count }
}

impl Datum for SizeRecord {
    fn key(&self) -> String { self.size.to_string() }
    fn tick_label(&self) -> String { format!("{}\"", self.size) }
    fn count(&self) -> u64 { self.count }
}

impl Datum for TechRecord {
    fn key(&self) -> String { self.technology.clone() }
    fn count(&self) -> u64 { self.count }
    fn precomputed_share(&self) -> Option<f64> { Some(self.percentage) }
}

/// Sum of all counts; widened so any number of `u64` counts fits.
pub fn total_count<D: Datum>(data: &[D]) -> u128 {
    data.iter().map(|d| u128::from(d.count())).sum()
}

pub fn max_count<D: Datum>(data: &[D]) -> u64 {
    data.iter().map(Datum::count).max().unwrap_or(0)
}

/// `count / total * 100`, or 0 when the total is 0.
pub fn share_percent(count: u64, total: u128) -> f64 {
    fraction(count, total) * 100.0
}

/// `count / total` in `[0, 1]`, or 0 when the total is 0.
pub fn fraction(count: u64, total: u128) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Largest brand first; ties keep input order.
pub fn sort_by_count_desc(records: &mut [BrandRecord]) {
    records.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Smallest screen first; ties keep input order.
pub fn sort_by_size_asc(records: &mut [SizeRecord]) {
    records.sort_by_key(|r| r.size);
}
