// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports records, data loading, scales, chart layout and rendering.

pub mod animation;
pub mod axis;
pub mod chart;
pub mod data;
pub mod geometry;
pub mod grid;
pub mod page;
pub mod record;
pub mod scale;
pub mod svg;
pub mod text;
pub mod theme;
pub mod tooltip;
pub mod types;
pub mod view;

pub use chart::{ChartConfig, ChartLayout, ChartRenderer, RenderOptions, ShareSource};
pub use data::{CsvSource, DataError, DataSource};
pub use geometry::ChartGeometry;
pub use page::{MountPoint, Page, PageError};
pub use record::{BrandRecord, Datum, SizeRecord, TechRecord};
pub use scale::{Band, BandScale, LinearScale};
pub use theme::Theme;
pub use tooltip::{TooltipController, TooltipLayout, TooltipState};
pub use types::Margins;
pub use view::{ChartView, HoverEvent, HoverSubscription, ViewError};
