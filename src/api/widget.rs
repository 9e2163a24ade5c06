use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ChartResult;
use crate::render::{RasterBuffer, Renderer};

use super::chart::Chart;

/// Logical widget size as reported by a host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whole pixels, rounded to nearest; negative or NaN sizes become `0`.
    #[must_use]
    pub fn to_pixels(self) -> (u32, u32) {
        let px = |value: f64| {
            if value.is_nan() || value <= 0.0 {
                0
            } else {
                value.round().min(f64::from(u32::MAX)) as u32
            }
        };
        (px(self.width), px(self.height))
    }
}

/// What a host toolkit needs from a chart widget.
pub trait WidgetRenderer {
    /// Records the size the next refresh paints at.
    fn layout(&mut self, size: Size);

    fn min_size(&self) -> Size;

    /// Paintable objects, back to front.
    fn objects(&self) -> Vec<&RasterBuffer>;

    /// Repaints at the last laid-out size.
    fn refresh(&mut self) -> ChartResult<()>;

    fn destroy(&mut self);
}

/// Adapts a [`Chart`] to the [`WidgetRenderer`] contract.
#[derive(Debug)]
pub struct ChartWidget<R: Renderer> {
    chart: Chart<R>,
    size: Size,
    destroyed: bool,
}

impl<R: Renderer> ChartWidget<R> {
    /// Starts at the chart's current buffer size.
    #[must_use]
    pub fn new(chart: Chart<R>) -> Self {
        let viewport = chart.buffer().viewport();
        Self {
            chart,
            size: Size::new(f64::from(viewport.width), f64::from(viewport.height)),
            destroyed: false,
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn chart(&self) -> &Chart<R> {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart<R> {
        &mut self.chart
    }

    pub fn on_drag(&mut self, x: f64, y: f64) {
        self.chart.on_drag(x, y);
    }

    pub fn on_drag_end(&mut self) {
        self.chart.on_drag_end();
    }
}

impl<R: Renderer> WidgetRenderer for ChartWidget<R> {
    fn layout(&mut self, size: Size) {
        self.size = size;
    }

    fn min_size(&self) -> Size {
        self.chart.config().min_size
    }

    fn objects(&self) -> Vec<&RasterBuffer> {
        vec![self.chart.buffer()]
    }

    fn refresh(&mut self) -> ChartResult<()> {
        if self.destroyed {
            trace!("refresh after destroy ignored");
            return Ok(());
        }
        let (width, height) = self.size.to_pixels();
        self.chart.redraw(width, height)?;
        Ok(())
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
