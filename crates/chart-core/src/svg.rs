// File: crates/chart-core/src/svg.rs
// Summary: SVG emission for a ChartLayout: gradients, marks with SMIL entrance animations,
// axes/grid, and tooltip groups (CSS-revealed in static output, mounted in view snapshots).

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::animation::{sweep_frames, Transition, SWEEP_FRAMES};
use crate::axis::{Axis, AxisOrient};
use crate::chart::{ChartLayout, Grow, LabelRole, Mark, MarkShape, RenderOptions, Slice};
use crate::geometry::Point;
use crate::text::escape_xml;
use crate::theme::{Gradient, Theme};
use crate::tooltip::TooltipLayout;

const FONT_FAMILY: &str = "Arial, sans-serif";
const BAR_SHADOW: &str = "filter: drop-shadow(2px 2px 4px rgba(0,0,0,0.2))";
const BAR_SHADOW_HOVER: &str = "filter: drop-shadow(3px 3px 6px rgba(0,0,0,0.3))";
const SLICE_GLOW: &str = "filter: drop-shadow(0 0 8px rgba(255,255,255,0.3))";
const TOOLTIP_SHADOW: &str = "filter: drop-shadow(2px 2px 4px rgba(0,0,0,0.3))";

/// Compact number for attributes: at most two decimals, no trailing zeros.
pub fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() { "0".to_string() } else { s.to_string() }
}

/// Pie slice path centered on the origin.
pub fn arc_path(start: f64, end: f64, radius: f64) -> String {
    let span = end - start;
    if span <= 0.0 || radius <= 0.0 {
        return "M0,0Z".to_string();
    }
    let r = num(radius);
    if span >= TAU - 1e-9 {
        return format!("M0,-{r}A{r},{r},0,1,1,0,{r}A{r},{r},0,1,1,0,-{r}Z");
    }
    let p0 = Point::polar(start, radius);
    let p1 = Point::polar(end, radius);
    let large = if span > PI { 1 } else { 0 };
    format!("M0,0L{},{}A{r},{r},0,{large},1,{},{}Z", num(p0.x), num(p0.y), num(p1.x), num(p1.y))
}

/// Minimal indenting writer; attribute values are escaped, text content is escaped by callers.
pub struct SvgWriter {
    buf: String,
    depth: usize,
}

impl SvgWriter {
    pub fn new() -> Self { Self { buf: String::new(), depth: 0 } }

    fn start_line(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn tag(&mut self, tag: &str, attrs: &[(&str, String)]) {
        let _ = write!(self.buf, "<{tag}");
        for (k, v) in attrs {
            let _ = write!(self.buf, " {k}=\"{}\"", escape_xml(v));
        }
    }

    pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.start_line();
        self.tag(tag, attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.start_line();
        let _ = writeln!(self.buf, "</{tag}>");
    }

    pub fn empty(&mut self, tag: &str, attrs: &[(&str, String)]) {
        self.start_line();
        self.tag(tag, attrs);
        self.buf.push_str("/>\n");
    }

    /// Element on one line; `inner` is inserted verbatim (already-escaped text and/or markup).
    pub fn inline(&mut self, tag: &str, attrs: &[(&str, String)], inner: &str) {
        self.start_line();
        self.tag(tag, attrs);
        let _ = writeln!(self.buf, ">{inner}</{tag}>");
    }

    pub fn raw_line(&mut self, line: &str) {
        self.start_line();
        let _ = writeln!(self.buf, "{line}");
    }

    pub fn finish(self) -> String { self.buf }
}

impl Default for SvgWriter {
    fn default() -> Self { Self::new() }
}

/// Hover state to draw instead of the CSS-driven static behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interaction<'a> {
    pub highlighted: Option<usize>,
    pub tooltip: Option<(usize, &'a TooltipLayout)>,
}

/// Standalone SVG with every tooltip pre-rendered and revealed by `:hover`.
pub fn chart_svg(layout: &ChartLayout, options: &RenderOptions) -> String {
    write_chart(layout, &options.theme, options.animate, None)
}

/// SVG for `layout`. With `interaction`, only the mounted tooltip is drawn and the
/// highlighted mark uses its hover styling.
pub fn write_chart(layout: &ChartLayout, theme: &Theme, animate: bool, interaction: Option<Interaction<'_>>) -> String {
    let g = &layout.geometry;
    let id = layout.id;
    let mut w = SvgWriter::new();

    w.open(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ("class", format!("chart chart-{id}")),
            ("viewBox", format!("0 0 {} {}", num(g.logical_width), num(g.logical_height))),
            ("width", num(g.display_width)),
            ("height", num(g.display_height)),
            ("role", "img".to_string()),
            ("aria-label", layout.title.text.clone()),
        ],
    );
    write_defs(&mut w, id, theme);
    if interaction.is_none() {
        write_hover_style(&mut w, layout);
    }
    w.empty(
        "rect",
        &[
            ("class", "background".to_string()),
            ("width", num(g.logical_width)),
            ("height", num(g.logical_height)),
            ("rx", "12".to_string()),
            ("fill", format!("url(#{id}-bg)")),
        ],
    );
    write_title(&mut w, layout, theme);

    for line in &layout.grid {
        w.empty(
            "line",
            &[
                ("class", "grid-line".to_string()),
                ("x1", num(line.from.x)),
                ("y1", num(line.from.y)),
                ("x2", num(line.to.x)),
                ("y2", num(line.to.y)),
                ("stroke", theme.grid.to_string()),
                ("stroke-width", "0.5".to_string()),
                ("stroke-dasharray", "2,2".to_string()),
            ],
        );
    }
    for axis in &layout.axes {
        write_axis(&mut w, axis, theme);
    }

    let translate = format!("translate({},{})", num(layout.origin.x), num(layout.origin.y));
    w.open("g", &[("class", "marks".to_string()), ("transform", translate.clone())]);
    let highlighted = interaction.and_then(|i| i.highlighted);
    for mark in &layout.marks {
        write_mark(&mut w, layout, mark, theme, animate, highlighted == Some(mark.index));
    }
    w.close("g");

    w.open("g", &[("class", "tooltips".to_string()), ("transform", translate)]);
    match interaction {
        None => {
            for mark in &layout.marks {
                if let Some(tip) = layout.tooltip_for(mark.index) {
                    write_tooltip(&mut w, id, mark.index, &tip, theme);
                }
            }
        }
        Some(Interaction { tooltip: Some((index, tip)), .. }) => write_tooltip(&mut w, id, index, tip, theme),
        Some(_) => {}
    }
    w.close("g");

    w.close("svg");
    w.finish()
}

fn write_gradient(w: &mut SvgWriter, id: String, gradient: &Gradient, to: (u8, u8)) {
    w.open(
        "linearGradient",
        &[
            ("id", id),
            ("x1", "0%".to_string()),
            ("y1", "0%".to_string()),
            ("x2", format!("{}%", to.0)),
            ("y2", format!("{}%", to.1)),
        ],
    );
    w.empty("stop", &[("offset", "0%".to_string()), ("stop-color", gradient.from.to_string())]);
    w.empty("stop", &[("offset", "100%".to_string()), ("stop-color", gradient.to.to_string())]);
    w.close("linearGradient");
}

fn write_defs(w: &mut SvgWriter, id: &str, theme: &Theme) {
    w.open("defs", &[]);
    write_gradient(w, format!("{id}-bg"), &theme.background, (100, 100));
    write_gradient(w, format!("{id}-bar"), &theme.bar, (100, 0));
    write_gradient(w, format!("{id}-bar-hover"), &theme.bar_hover, (100, 0));
    write_gradient(w, format!("{id}-column"), &theme.column, (0, 100));
    w.close("defs");
}

fn write_hover_style(w: &mut SvgWriter, layout: &ChartLayout) {
    let id = layout.id;
    let mut css = vec![
        format!(".{id}-mark {{ cursor: pointer; }}"),
        format!(".{id}-mark .shape {{ transition: filter 150ms, opacity 150ms; }}"),
        format!(".{id}-mark:hover .bar {{ fill: url(#{id}-bar-hover); {BAR_SHADOW_HOVER}; }}"),
        format!(".{id}-mark:hover .column {{ {BAR_SHADOW_HOVER}; }}"),
        format!(".{id}-mark:hover .slice {{ opacity: 1; {SLICE_GLOW}; }}"),
        format!(".{id}-tip {{ visibility: hidden; pointer-events: none; }}"),
    ];
    for mark in &layout.marks {
        css.push(format!(
            "svg:has(#{id}-mark-{i}:hover) #{id}-tip-{i} {{ visibility: visible; }}",
            i = mark.index
        ));
    }
    w.open("style", &[]);
    for rule in css {
        w.raw_line(&escape_xml(&rule));
    }
    w.close("style");
}

fn write_title(w: &mut SvgWriter, layout: &ChartLayout, theme: &Theme) {
    let t = &layout.title;
    w.inline(
        "text",
        &[
            ("class", "title".to_string()),
            ("x", num(t.position.x)),
            ("y", num(t.position.y)),
            ("text-anchor", "middle".to_string()),
            ("font-family", FONT_FAMILY.to_string()),
            ("font-size", num(t.font_size)),
            ("font-weight", "bold".to_string()),
            ("fill", theme.title.to_string()),
            ("style", "text-shadow: 2px 2px 4px rgba(0,0,0,0.3)".to_string()),
        ],
        &escape_xml(&t.text),
    );
}

fn write_axis(w: &mut SvgWriter, axis: &Axis, theme: &Theme) {
    let (class, anchor, dy) = match axis.orient {
        AxisOrient::Bottom => ("axis axis-bottom", "middle", "0.71em"),
        AxisOrient::Left => ("axis axis-left", "end", "0.32em"),
    };
    // label-only axes are the faint tick labels under a grid
    let (font_size, color) = if axis.domain.is_some() { ("12", theme.label) } else { ("10", theme.tick_label) };

    w.open("g", &[("class", class.to_string())]);
    if let Some((a, b)) = axis.domain {
        w.empty(
            "line",
            &[
                ("class", "domain".to_string()),
                ("x1", num(a.x)),
                ("y1", num(a.y)),
                ("x2", num(b.x)),
                ("y2", num(b.y)),
                ("stroke", theme.axis_line.to_string()),
            ],
        );
    }
    for tick in &axis.ticks {
        if axis.tick_size > 0.0 {
            let end = axis.tick_end(tick);
            w.empty(
                "line",
                &[
                    ("x1", num(tick.at.x)),
                    ("y1", num(tick.at.y)),
                    ("x2", num(end.x)),
                    ("y2", num(end.y)),
                    ("stroke", theme.axis_line.to_string()),
                ],
            );
        }
        let mut attrs = vec![
            ("x", num(tick.label_at.x)),
            ("y", num(tick.label_at.y)),
            ("text-anchor", anchor.to_string()),
            ("font-family", FONT_FAMILY.to_string()),
            ("font-size", font_size.to_string()),
            ("fill", color.to_string()),
        ];
        if axis.tick_size > 0.0 {
            attrs.push(("dy", dy.to_string()));
        }
        w.inline("text", &attrs, &escape_xml(&tick.label));
    }
    w.close("g");
}

fn animate_tag(attribute: &str, from: &str, to: &str, t: Transition) -> String {
    format!(
        "<animate attributeName=\"{attribute}\" from=\"{from}\" to=\"{to}\" begin=\"{}ms\" dur=\"{}ms\" fill=\"freeze\"/>",
        t.delay_ms, t.duration_ms
    )
}

fn sweep_tag(slice: &Slice, t: Transition) -> String {
    let frames = sweep_frames(slice.start_angle, slice.end_angle, SWEEP_FRAMES);
    let values = frames.iter().map(|&(a, b)| arc_path(a, b, slice.radius)).collect::<Vec<_>>().join(";");
    let times = (0..frames.len())
        .map(|i| num(i as f64 / (frames.len() - 1) as f64))
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "<animate attributeName=\"d\" calcMode=\"discrete\" values=\"{values}\" keyTimes=\"{times}\" begin=\"{}ms\" dur=\"{}ms\" fill=\"freeze\"/>",
        t.delay_ms, t.duration_ms
    )
}

fn write_mark(w: &mut SvgWriter, layout: &ChartLayout, mark: &Mark, theme: &Theme, animate: bool, highlighted: bool) {
    let id = layout.id;
    let class = if highlighted { format!("{id}-mark mark highlighted") } else { format!("{id}-mark mark") };
    w.open("g", &[("class", class), ("id", format!("{id}-mark-{}", mark.index))]);

    match mark.shape {
        MarkShape::Bar { rect, hover, grow: Grow::Rightward } => {
            let (height, fill, style) = if highlighted {
                (hover.height, format!("url(#{id}-bar-hover)"), BAR_SHADOW_HOVER)
            } else {
                (rect.height, format!("url(#{id}-bar)"), BAR_SHADOW)
            };
            let width = num(rect.width);
            let attrs = [
                ("class", "shape bar".to_string()),
                ("x", num(rect.left)),
                ("y", num(rect.top)),
                ("width", if animate { "0".to_string() } else { width.clone() }),
                ("height", num(height)),
                ("rx", "6".to_string()),
                ("ry", "6".to_string()),
                ("fill", fill),
                ("style", style.to_string()),
            ];
            if animate {
                w.inline("rect", &attrs, &animate_tag("width", "0", &width, mark.enter));
            } else {
                w.empty("rect", &attrs);
            }
        }
        MarkShape::Bar { rect, grow: Grow::Upward, .. } => {
            let style = if highlighted { BAR_SHADOW_HOVER } else { BAR_SHADOW };
            let (y, height) = (num(rect.top), num(rect.height));
            let base = num(rect.bottom());
            let attrs = [
                ("class", "shape column".to_string()),
                ("x", num(rect.left)),
                ("y", if animate { base.clone() } else { y.clone() }),
                ("width", num(rect.width)),
                ("height", if animate { "0".to_string() } else { height.clone() }),
                ("rx", "4".to_string()),
                ("fill", format!("url(#{id}-column)")),
                ("style", style.to_string()),
            ];
            if animate {
                let inner = animate_tag("y", &base, &y, mark.enter) + &animate_tag("height", "0", &height, mark.enter);
                w.inline("rect", &attrs, &inner);
            } else {
                w.empty("rect", &attrs);
            }
        }
        MarkShape::Slice { slice, color } => {
            let mut attrs = vec![
                ("class", "shape slice".to_string()),
                ("d", if animate { arc_path(0.0, 0.0, slice.radius) } else { arc_path(slice.start_angle, slice.end_angle, slice.radius) }),
                ("fill", theme.slice_color(color).to_string()),
                ("stroke", theme.slice_stroke.to_string()),
                ("stroke-width", "2".to_string()),
                ("opacity", (if highlighted { "1" } else { "0.9" }).to_string()),
            ];
            if highlighted {
                attrs.push(("style", SLICE_GLOW.to_string()));
            }
            if animate {
                w.inline("path", &attrs, &sweep_tag(&slice, mark.enter));
            } else {
                w.empty("path", &attrs);
            }
        }
    }

    for label in &mark.labels {
        let (size, weight, shadow) = match label.role {
            LabelRole::Category => ("13", "600", "1px 1px 2px rgba(0,0,0,0.5)"),
            LabelRole::Value => ("12", "bold", "1px 1px 2px rgba(0,0,0,0.7)"),
            LabelRole::Share => ("12", "bold", "1px 1px 2px rgba(0,0,0,0.5)"),
        };
        let mut attrs = vec![
            ("class", "label".to_string()),
            ("x", num(label.position.x)),
            ("y", num(label.position.y)),
            ("text-anchor", label.anchor.as_str().to_string()),
            ("font-family", FONT_FAMILY.to_string()),
            ("font-size", size.to_string()),
            ("font-weight", weight.to_string()),
            ("fill", theme.label.to_string()),
            ("style", format!("text-shadow: {shadow}")),
        ];
        match label.role {
            LabelRole::Share => attrs.push(("dy", "0.35em".to_string())),
            LabelRole::Category | LabelRole::Value => attrs.push(("dominant-baseline", "middle".to_string())),
        }
        let fades = animate && label.enter.duration_ms > 0;
        let mut inner = escape_xml(&label.text).into_owned();
        if fades {
            attrs.push(("opacity", "0".to_string()));
            inner.push_str(&animate_tag("opacity", "0", "1", label.enter));
        }
        w.inline("text", &attrs, &inner);
    }
    w.close("g");
}

fn write_tooltip(w: &mut SvgWriter, id: &str, index: usize, tip: &TooltipLayout, theme: &Theme) {
    w.open("g", &[("class", format!("{id}-tip tooltip")), ("id", format!("{id}-tip-{index}"))]);
    w.empty(
        "rect",
        &[
            ("x", num(tip.frame.left)),
            ("y", num(tip.frame.top)),
            ("width", num(tip.frame.width)),
            ("height", num(tip.frame.height)),
            ("rx", "6".to_string()),
            ("fill", theme.tooltip_background.to_string()),
            ("style", TOOLTIP_SHADOW.to_string()),
        ],
    );
    let value = tip.value_line_position();
    w.inline(
        "text",
        &[
            ("x", num(value.x)),
            ("y", num(value.y)),
            ("text-anchor", "middle".to_string()),
            ("font-family", FONT_FAMILY.to_string()),
            ("font-size", "12".to_string()),
            ("font-weight", "bold".to_string()),
            ("fill", theme.tooltip_text.to_string()),
        ],
        &escape_xml(&tip.content.value_line),
    );
    let share = tip.share_line_position();
    w.inline(
        "text",
        &[
            ("x", num(share.x)),
            ("y", num(share.y)),
            ("text-anchor", "middle".to_string()),
            ("font-family", FONT_FAMILY.to_string()),
            ("font-size", "10".to_string()),
            ("font-weight", "600".to_string()),
            ("fill", theme.tooltip_accent.to_string()),
        ],
        &escape_xml(&tip.content.share_line),
    );
    w.close("g");
}
