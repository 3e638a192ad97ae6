// File: crates/chart-core/src/text.rs
// Summary: Label formatting (grouped thousands, shares, ticks) and XML escaping.

use std::borrow::Cow;

use num_format::{Locale, ToFormattedString};

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Share with one decimal, e.g. `75.0`.
pub fn format_share(percent: f64) -> String {
    format!("{percent:.1}")
}

/// Plain number without a trailing `.0` (`70`, `33.3`).
pub fn format_plain(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Tick label: whole numbers are grouped, fractions printed as-is.
pub fn format_tick(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value < 1e15 {
        group_thousands(value as u64)
    } else {
        format_plain(value)
    }
}

/// Escape text for XML/HTML content and attribute values.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Percent rounded to one decimal, without a trailing `.0` (`70`, `33.3`).
pub fn format_percent(percent: f64) -> String {
    format_plain((percent * 10.0).round() / 10.0)
}
