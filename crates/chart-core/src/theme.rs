// File: crates/chart-core/src/theme.rs
// Summary: Color themes for chart backgrounds, bars, slices and tooltips.

/// Two-stop linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    pub const fn new(from: &'static str, to: &'static str) -> Self { Self { from, to } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Diagonal (135deg) chart background.
    pub background: Gradient,
    pub title: &'static str,
    pub label: &'static str,
    pub tick_label: &'static str,
    pub axis_line: &'static str,
    pub grid: &'static str,
    /// Horizontal bars, left to right.
    pub bar: Gradient,
    pub bar_hover: Gradient,
    /// Vertical bars, top to bottom.
    pub column: Gradient,
    /// Ordinal slice palette, cycled when there are more slices than colors.
    pub slices: [&'static str; 3],
    pub slice_stroke: &'static str,
    pub tooltip_background: &'static str,
    pub tooltip_text: &'static str,
    pub tooltip_accent: &'static str,
}

impl Theme {
    pub fn aurora() -> Self {
        Self {
            name: "aurora",
            background: Gradient::new("#667eea", "#764ba2"),
            title: "#ffffff",
            label: "#ffffff",
            tick_label: "rgba(255,255,255,0.7)",
            axis_line: "#ffffff",
            grid: "rgba(255,255,255,0.15)",
            bar: Gradient::new("#ff9a9e", "#fecfef"),
            bar_hover: Gradient::new("#ffecd2", "#fcb69f"),
            column: Gradient::new("#ffd700", "#ff8c00"),
            slices: ["#FF6B6B", "#4ECDC4", "#45B7D1"],
            slice_stroke: "#ffffff",
            tooltip_background: "rgba(0,0,0,0.9)",
            tooltip_text: "#ffffff",
            tooltip_accent: "#ffd700",
        }
    }

    pub fn midnight() -> Self {
        Self {
            name: "midnight",
            background: Gradient::new("#141e30", "#243b55"),
            title: "#f5f7fb",
            label: "#e6e9f0",
            tick_label: "rgba(230,233,240,0.7)",
            axis_line: "#9aa5b8",
            grid: "rgba(230,233,240,0.12)",
            bar: Gradient::new("#4facfe", "#00f2fe"),
            bar_hover: Gradient::new("#43e97b", "#38f9d7"),
            column: Gradient::new("#f6d365", "#fda085"),
            slices: ["#f093fb", "#4facfe", "#43e97b"],
            slice_stroke: "#141e30",
            tooltip_background: "rgba(10,12,20,0.92)",
            tooltip_text: "#f5f7fb",
            tooltip_accent: "#f6d365",
        }
    }

    /// Slice color for the `index`-th category.
    pub fn slice_color(&self, index: usize) -> &'static str {
        self.slices[index % self.slices.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::aurora() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::aurora(), Theme::midnight()]
}

/// Find a theme by its `name`, falling back to aurora.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::aurora()
}
