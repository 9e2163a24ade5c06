//! raster-chart: x/y series rendered into an in-memory raster buffer.
//!
//! A [`Chart`] owns its series, margin, autoscale flag, cursor and RGBA
//! buffer. Each redraw runs the full pipeline (scale, series through a
//! pluggable draw strategy, frame, axis labels, cursor overlay) on a
//! [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Chart, ChartConfig, ChartWidget, WidgetRenderer};
pub use error::{ChartError, ChartResult};
pub use render::DrawStyle;
