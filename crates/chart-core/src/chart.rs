// File: crates/chart-core/src/chart.rs
// Summary: One parametrized chart renderer (horizontal bars, vertical bars, pie) producing a
// ChartLayout that the SVG writer and the interactive view both consume.

use std::f64::consts::TAU;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::animation::{Stagger, Transition};
use crate::axis::{Axis, AxisOrient};
use crate::geometry::{ChartGeometry, Point, Rect, RowSizing};
use crate::page::MountPoint;
use crate::record::{fraction, max_count, share_percent, total_count, Datum};
use crate::scale::{BandScale, LinearScale};
use crate::text::{format_percent, format_tick, group_thousands};
use crate::theme::Theme;
use crate::tooltip::{place, TooltipAnchor, TooltipContent, TooltipLayout};
use crate::types::Margins;
use crate::view::ChartView;

/// Points of divergence tolerated between a precomputed and a derived share.
const SHARE_DIVERGENCE: f64 = 0.5;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    /// Emit entrance animations; when off, marks are drawn at their final extent.
    pub animate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::default(), animate: true }
    }
}

/// Which value is shown as a datum's share.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShareSource {
    /// `count / total * 100`.
    #[default]
    Derived,
    /// The record's own percentage, when it carries one.
    Precomputed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryRule {
    Fixed(Margins),
    PerRow(RowSizing),
}

/// Bars growing rightwards from a label column, categories stacked vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalBars {
    /// x where every bar starts; category labels end just left of it.
    pub label_column: f64,
    pub label_gap: f64,
    pub value_gap: f64,
    /// Width kept free for labels, subtracted from the value range.
    pub reserved_width: f64,
    pub band_top: f64,
    pub band_bottom_gap: f64,
    pub padding_inner: f64,
    pub padding_outer: f64,
    /// Inset of the bar inside its band (top and bottom).
    pub bar_inset: f64,
    pub grid_ticks: usize,
    /// Distance of the tick labels above the bottom edge.
    pub tick_label_lift: f64,
}

impl Default for HorizontalBars {
    fn default() -> Self {
        Self {
            label_column: 200.0,
            label_gap: 12.0,
            value_gap: 10.0,
            reserved_width: 250.0,
            band_top: 50.0,
            band_bottom_gap: 30.0,
            padding_inner: 0.1,
            padding_outer: 0.05,
            bar_inset: 2.0,
            grid_ticks: 5,
            tick_label_lift: 15.0,
        }
    }
}

/// Bars growing upwards from the bottom margin, categories along x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalBars {
    pub padding: f64,
    pub y_ticks: usize,
    /// How far above the bar top the tooltip box starts.
    pub tooltip_lift: f64,
}

impl Default for VerticalBars {
    fn default() -> Self {
        Self { padding: 0.2, y_ticks: 10, tooltip_lift: 60.0 }
    }
}

/// Slices in input order around the chart center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlices {
    /// Radius as a fraction of `min(width, height)`.
    pub radius_ratio: f64,
    pub label_inner: f64,
    pub label_outer: f64,
    pub tooltip_radius: f64,
}

impl Default for PieSlices {
    fn default() -> Self {
        Self { radius_ratio: 1.0 / 3.0, label_inner: 0.6, label_outer: 1.1, tooltip_radius: 1.2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordinateSystem {
    HorizontalBars(HorizontalBars),
    VerticalBars(VerticalBars),
    Pie(PieSlices),
}

/// Entrance timing of shapes and their labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub shape: Stagger,
    pub category_label: Stagger,
    pub value_label: Stagger,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TitleLayout {
    pub text: String,
    pub position: Point,
    pub font_size: f64,
}

/// Per-datum values a chart displays.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkDatum {
    pub key: String,
    pub tick_label: String,
    pub count: u64,
    /// Percent, 0..=100.
    pub share: f64,
}

pub type TooltipContentFn = fn(&MarkDatum) -> TooltipContent;

/// `"{count} units"` / `"{share}% share"`.
pub fn units_and_share(datum: &MarkDatum) -> TooltipContent {
    TooltipContent::units_and_share(datum.count, datum.share)
}

#[derive(Clone, Debug)]
pub struct ChartConfig {
    /// Short id; prefixes element ids so several charts can share a page.
    pub id: &'static str,
    /// Class of the container the chart mounts into.
    pub mount: &'static str,
    pub title: String,
    pub title_y: f64,
    pub title_size: f64,
    pub geometry: GeometryRule,
    pub coords: CoordinateSystem,
    pub timing: Timing,
    pub share_source: ShareSource,
    pub tooltip: TooltipContentFn,
}

impl ChartConfig {
    /// Horizontal bars of units per brand.
    pub fn brand_market_share() -> Self {
        Self {
            id: "brand",
            mount: crate::page::BRAND_MOUNT,
            title: "📺 TV Brand Market Share Analysis".to_string(),
            title_y: 30.0,
            title_size: 20.0,
            geometry: GeometryRule::PerRow(RowSizing::default()),
            coords: CoordinateSystem::HorizontalBars(HorizontalBars::default()),
            timing: Timing {
                shape: Stagger::new(Transition::new(1000), 100),
                category_label: Stagger::new(Transition::new(600).delayed(200), 100),
                value_label: Stagger::new(Transition::new(600).delayed(300), 100),
            },
            share_source: ShareSource::Derived,
            tooltip: units_and_share,
        }
    }

    /// Vertical bars of units per screen size.
    pub fn screen_sizes() -> Self {
        Self {
            id: "size",
            mount: crate::page::SIZE_MOUNT,
            title: "📺 TV Screen Size Distribution".to_string(),
            title_y: 30.0,
            title_size: 20.0,
            geometry: GeometryRule::Fixed(Margins::new(50.0, 30.0, 50.0, 60.0)),
            coords: CoordinateSystem::VerticalBars(VerticalBars::default()),
            timing: Timing {
                shape: Stagger::none(Transition::new(1000)),
                category_label: Stagger::none(Transition::new(0)),
                value_label: Stagger::none(Transition::new(0)),
            },
            share_source: ShareSource::Derived,
            tooltip: units_and_share,
        }
    }

    /// Pie of units per screen technology.
    pub fn screen_technologies() -> Self {
        Self {
            id: "tech",
            mount: crate::page::TECH_MOUNT,
            title: "📺 TV Screen Technology Distribution".to_string(),
            title_y: 40.0,
            title_size: 22.0,
            geometry: GeometryRule::Fixed(Margins::none()),
            coords: CoordinateSystem::Pie(PieSlices::default()),
            timing: Timing {
                shape: Stagger::none(Transition::new(1000)),
                category_label: Stagger::none(Transition::new(0)),
                value_label: Stagger::none(Transition::new(500).delayed(1000)),
            },
            share_source: ShareSource::Derived,
            tooltip: units_and_share,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_share_source(mut self, source: ShareSource) -> Self {
        self.share_source = source;
        self
    }

    pub fn with_tooltip(mut self, tooltip: TooltipContentFn) -> Self {
        self.tooltip = tooltip;
        self
    }
}

/// Arc of a pie, angles in radians from twelve o'clock, clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub start_angle: f64,
    pub end_angle: f64,
    pub radius: f64,
}

impl Slice {
    pub fn span(&self) -> f64 { self.end_angle - self.start_angle }
    pub fn mid_angle(&self) -> f64 { (self.start_angle + self.end_angle) / 2.0 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Grow {
    /// Width animates from 0.
    Rightward,
    /// Height animates from 0 with the bottom edge fixed.
    Upward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkShape {
    Bar { rect: Rect, hover: Rect, grow: Grow },
    Slice { slice: Slice, color: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelRole {
    Category,
    Value,
    Share,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkLabel {
    pub role: LabelRole,
    pub text: String,
    pub position: Point,
    pub anchor: TextAnchor,
    pub enter: Transition,
}

/// One datum's visuals.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub index: usize,
    pub datum: MarkDatum,
    pub shape: MarkShape,
    pub labels: Vec<MarkLabel>,
    pub enter: Transition,
    pub tooltip_anchor: TooltipAnchor,
    pub tooltip: TooltipContent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

/// Everything needed to draw one chart, in logical coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartLayout {
    pub id: &'static str,
    pub geometry: ChartGeometry,
    pub title: TitleLayout,
    /// Translation of the mark group (chart center for pies).
    pub origin: Point,
    pub marks: Vec<Mark>,
    pub axes: Vec<Axis>,
    pub grid: Vec<GridLine>,
    /// Tooltip bounds, in the mark group's coordinates.
    pub tooltip_bounds: Rect,
}

impl ChartLayout {
    pub fn is_empty(&self) -> bool { self.marks.is_empty() }

    pub fn mark(&self, index: usize) -> Option<&Mark> { self.marks.get(index) }

    /// Clamped tooltip for mark `index`.
    pub fn tooltip_for(&self, index: usize) -> Option<TooltipLayout> {
        let mark = self.marks.get(index)?;
        Some(place(mark.tooltip_anchor, self.tooltip_bounds, mark.tooltip.clone()))
    }

    pub fn slices(&self) -> impl Iterator<Item = &Slice> + '_ {
        self.marks.iter().filter_map(|m| match &m.shape {
            MarkShape::Slice { slice, .. } => Some(slice),
            MarkShape::Bar { .. } => None,
        })
    }
}

pub struct ChartRenderer {
    config: ChartConfig,
    options: RenderOptions,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig, options: RenderOptions) -> Self {
        Self { config, options }
    }

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn options(&self) -> &RenderOptions { &self.options }

    pub fn geometry(&self, rows: usize) -> ChartGeometry {
        match self.config.geometry {
            GeometryRule::Fixed(margins) => ChartGeometry::fixed(margins),
            GeometryRule::PerRow(rule) => ChartGeometry::per_row(rows, &rule),
        }
    }

    /// Lay out `data` in its given order.
    pub fn layout<D: Datum>(&self, data: &[D]) -> ChartLayout {
        let geometry = self.geometry(data.len());
        let total = total_count(data);
        let datums = data.iter().map(|d| self.mark_datum(d, total)).collect::<Vec<_>>();
        let max = max_count(data) as f64;

        let title = TitleLayout {
            text: self.config.title.clone(),
            position: Point::new(geometry.logical_width / 2.0, self.config.title_y),
            font_size: self.config.title_size,
        };
        let mut layout = ChartLayout {
            id: self.config.id,
            geometry,
            title,
            origin: Point::default(),
            marks: Vec::with_capacity(datums.len()),
            axes: Vec::new(),
            grid: Vec::new(),
            tooltip_bounds: geometry.bounds(),
        };

        match self.config.coords {
            CoordinateSystem::HorizontalBars(h) => self.layout_horizontal(&mut layout, datums, max, &h),
            CoordinateSystem::VerticalBars(v) => self.layout_vertical(&mut layout, datums, max, &v),
            CoordinateSystem::Pie(p) => self.layout_pie(&mut layout, datums, total, &p),
        }
        debug!(chart = self.config.id, marks = layout.marks.len(), %total, "chart layout");
        layout
    }

    /// Standalone SVG document for `data`.
    pub fn render_svg<D: Datum>(&self, data: &[D]) -> String {
        crate::svg::chart_svg(&self.layout(data), &self.options)
    }

    /// Append the chart to `mount`. Calling twice appends two charts.
    pub fn render<D: Datum>(&self, data: &[D], mount: &mut MountPoint) {
        mount.append(self.render_svg(data));
    }

    /// Interactive view over the laid-out chart.
    pub fn view<D: Datum>(&self, data: &[D]) -> ChartView {
        ChartView::new(self.layout(data), self.options.theme, self.options.animate)
    }

    fn mark_datum<D: Datum>(&self, d: &D, total: u128) -> MarkDatum {
        let derived = share_percent(d.count(), total);
        let share = match (self.config.share_source, d.precomputed_share()) {
            (ShareSource::Precomputed, Some(p)) => p,
            (ShareSource::Derived, Some(p)) => {
                if (p - derived).abs() > SHARE_DIVERGENCE {
                    warn!(key = %d.key(), precomputed = p, derived, "precomputed share disagrees with counts");
                }
                derived
            }
            (_, None) => derived,
        };
        MarkDatum { key: d.key(), tick_label: d.tick_label(), count: d.count(), share }
    }

    fn layout_horizontal(&self, layout: &mut ChartLayout, datums: Vec<MarkDatum>, max: f64, h: &HorizontalBars) {
        let g = layout.geometry;
        let bottom = g.logical_height - h.band_bottom_gap;
        let x = LinearScale::new(max, (0.0, g.logical_width - h.reserved_width));
        let y = BandScale::new(datums.iter().map(|d| d.key.clone()), (h.band_top, bottom), h.padding_inner, h.padding_outer);
        let bw = y.bandwidth();
        debug!(max, bandwidth = bw, "horizontal bar scales");

        for t in x.ticks(h.grid_ticks) {
            let px = h.label_column + x.apply(t);
            layout.grid.push(GridLine { from: Point::new(px, h.band_top), to: Point::new(px, bottom) });
        }
        let mut ticks = Axis::new(AxisOrient::Bottom, None, 0.0);
        for t in x.ticks(h.grid_ticks) {
            let at = Point::new(h.label_column + x.apply(t), g.logical_height - h.tick_label_lift);
            ticks.push_label(at, format_tick(t));
        }
        layout.axes.push(ticks);

        for (index, datum) in datums.into_iter().enumerate() {
            let Some(band) = y.band(&datum.key) else { continue };
            let len = x.extent(datum.count as f64);
            let top = band.start + h.bar_inset;
            let rect = Rect::from_ltwh(h.label_column, top, len, (bw - 2.0 * h.bar_inset).max(0.0));
            let hover = Rect::from_ltwh(h.label_column, top, len, (bw - h.bar_inset).max(0.0));
            let mid_y = band.start + bw / 2.0 + 1.0;
            let bar_end = h.label_column + len;

            let labels = vec![
                MarkLabel {
                    role: LabelRole::Category,
                    text: datum.key.clone(),
                    position: Point::new(h.label_column - h.label_gap, mid_y),
                    anchor: TextAnchor::End,
                    enter: self.config.timing.category_label.at(index),
                },
                MarkLabel {
                    role: LabelRole::Value,
                    text: group_thousands(datum.count),
                    position: Point::new(bar_end + h.value_gap, mid_y),
                    anchor: TextAnchor::Start,
                    enter: self.config.timing.value_label.at(index),
                },
            ];
            let tooltip = (self.config.tooltip)(&datum);
            layout.marks.push(Mark {
                index,
                datum,
                shape: MarkShape::Bar { rect, hover, grow: Grow::Rightward },
                labels,
                enter: self.config.timing.shape.at(index),
                tooltip_anchor: TooltipAnchor::offset(Point::new(bar_end, band.start), 15.0, -12.0),
                tooltip,
            });
        }
    }

    fn layout_vertical(&self, layout: &mut ChartLayout, datums: Vec<MarkDatum>, max: f64, v: &VerticalBars) {
        let g = layout.geometry;
        let left = g.margins.left;
        let top = g.margins.top;
        let baseline = top + g.inner_height();
        let x = BandScale::with_padding(datums.iter().map(|d| d.key.clone()), (left, left + g.inner_width()), v.padding);
        let y = LinearScale::new(max, (baseline, top));
        debug!(max, bandwidth = x.bandwidth(), "vertical bar scales");

        let tick_labels = datums.iter().map(|d| (d.key.clone(), d.tick_label.clone())).collect::<Vec<_>>();
        layout.axes.push(Axis::bottom_bands(&x, baseline, &tick_labels));
        layout.axes.push(Axis::left_linear(&y, left, v.y_ticks));

        for (index, datum) in datums.into_iter().enumerate() {
            let Some(band) = x.band(&datum.key) else { continue };
            let bar_top = y.apply(datum.count as f64);
            let rect = Rect::from_ltwh(band.start, bar_top, band.width, baseline - bar_top);
            let tooltip = (self.config.tooltip)(&datum);
            layout.marks.push(Mark {
                index,
                datum,
                shape: MarkShape::Bar { rect, hover: rect, grow: Grow::Upward },
                labels: Vec::new(),
                enter: self.config.timing.shape.at(index),
                tooltip_anchor: TooltipAnchor::offset(Point::new(band.start, bar_top), 0.0, -v.tooltip_lift),
                tooltip,
            });
        }
    }

    fn layout_pie(&self, layout: &mut ChartLayout, datums: Vec<MarkDatum>, total: u128, p: &PieSlices) {
        let g = layout.geometry;
        let radius = g.logical_width.min(g.logical_height) * p.radius_ratio;
        let label_radius = radius * (p.label_inner + p.label_outer) / 2.0;
        layout.origin = Point::new(g.logical_width / 2.0, g.logical_height / 2.0);
        layout.tooltip_bounds = g.centered_bounds();

        // ordinal palette: one color per distinct key, in first-seen order
        let mut palette = IndexSet::new();
        let mut angle = 0.0;
        for (index, datum) in datums.into_iter().enumerate() {
            let (color, _) = palette.insert_full(datum.key.clone());
            let span = fraction(datum.count, total) * TAU;
            let slice = Slice { start_angle: angle, end_angle: angle + span, radius };
            angle += span;

            let mid = slice.mid_angle();
            let labels = vec![MarkLabel {
                role: LabelRole::Share,
                text: format!("{}%", format_percent(datum.share)),
                position: Point::polar(mid, label_radius),
                anchor: TextAnchor::Middle,
                enter: self.config.timing.value_label.at(index),
            }];
            let tooltip = (self.config.tooltip)(&datum);
            layout.marks.push(Mark {
                index,
                datum,
                shape: MarkShape::Slice { slice, color },
                labels,
                enter: self.config.timing.shape.at(index),
                tooltip_anchor: TooltipAnchor::centered(Point::polar(mid, radius * p.tooltip_radius), -20.0),
                tooltip,
            });
        }
    }
}
