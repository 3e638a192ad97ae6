// File: crates/chart-core/src/grid.rs
// Summary: Tick layout helpers ("nice" 1/2/5 x 10^k steps) for grid lines and axes.

/// Step between ticks, split into a power of ten and a 1/2/5/10 factor.
/// Returns `None` for empty or non-finite spans.
fn tick_step(start: f64, stop: f64, count: usize) -> Option<(i32, f64)> {
    let step = (stop - start) / count.max(1) as f64;
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some((power as i32, factor))
}

/// Roughly `count` evenly spaced, human-friendly values covering `[start, stop]`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(start.is_finite() && stop.is_finite()) || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let Some((power, factor)) = tick_step(lo, hi, count) else {
        return Vec::new();
    };

    let mut ticks = if power >= 0 {
        let inc = factor * 10f64.powi(power);
        let (i0, i1) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
        (i0..=i1).map(|i| i as f64 * inc).collect::<Vec<_>>()
    } else {
        // divide by the inverse to keep 0.1-style steps exact
        let inv = 10f64.powi(-power) / factor;
        let (i0, i1) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
        (i0..=i1).map(|i| i as f64 / inv).collect::<Vec<_>>()
    };
    if start > stop {
        ticks.reverse();
    }
    ticks
}
