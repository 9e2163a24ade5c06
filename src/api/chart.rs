use std::sync::Arc;

use tracing::debug;

use crate::core::Series;
use crate::error::ChartResult;
use crate::interaction::CursorState;
use crate::render::{DrawStrategy, DrawStyle, FontHandle, RasterBuffer, Renderer};

use super::axis_labeler::AxisLabeler;
use super::chart_state::ChartState;
use super::config::ChartConfig;
use super::label_format::compact_cursor_formatter;
use super::render_pipeline::{FrameLayout, RenderPipeline};

/// An x/y chart drawing into its own raster buffer through `R`.
///
/// The draw style is fixed at construction. Data, autoscale and cursor
/// state change between redraws; every redraw repaints the whole buffer.
#[derive(Debug)]
pub struct Chart<R: Renderer> {
    renderer: R,
    state: ChartState,
    pipeline: RenderPipeline,
    config: ChartConfig,
}

impl<R: Renderer> Chart<R> {
    /// Creates a chart with the default configuration.
    pub fn new(renderer: R, width: u32, height: u32, style: DrawStyle) -> ChartResult<Self> {
        Self::with_config(renderer, width, height, style, ChartConfig::default())
    }

    pub fn with_config(
        renderer: R,
        width: u32,
        height: u32,
        style: DrawStyle,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        let strategy = style.strategy(&config.theme);
        Self::with_strategy(renderer, width, height, strategy, config)
    }

    /// Creates a chart with a caller-provided draw style.
    pub fn with_strategy(
        renderer: R,
        width: u32,
        height: u32,
        strategy: Box<dyn DrawStrategy>,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let state = ChartState::new(width, height, config.margin, config.autoscale_y)?;
        let pipeline = RenderPipeline::new(
            strategy,
            AxisLabeler::with_significant_digits(config.axis_label_significant_digits),
            compact_cursor_formatter(config.cursor_label_significant_digits),
            config.theme,
        );
        debug!(width, height, margin = config.margin, "chart created");
        Ok(Self {
            renderer,
            state,
            pipeline,
            config,
        })
    }

    /// Sets the font used for every label.
    #[must_use]
    pub fn with_font(mut self, font: FontHandle) -> Self {
        self.state.set_font(font);
        self
    }

    /// Validates and replaces the series wholesale.
    ///
    /// On error the previous series is kept.
    pub fn set_data(&mut self, xs: Vec<f64>, ys: Vec<f64>) -> ChartResult<()> {
        let series = Series::new(xs, ys)?;
        self.state.set_series(series);
        Ok(())
    }

    pub fn set_autoscale_y(&mut self, enabled: bool) {
        self.state.set_autoscale_y(enabled);
    }

    #[must_use]
    pub fn autoscale_y(&self) -> bool {
        self.state.autoscale_y()
    }

    /// Current samples; both slices are empty before the first `set_data`.
    #[must_use]
    pub fn data(&self) -> (&[f64], &[f64]) {
        match self.state.series() {
            Some(series) => (series.xs(), series.ys()),
            None => (&[][..], &[][..]),
        }
    }

    pub fn set_font(&mut self, font: FontHandle) {
        self.state.set_font(font);
    }

    pub fn set_axis_label_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.pipeline.labeler_mut().set_formatter(Arc::new(formatter));
    }

    pub fn set_cursor_label_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(f64, f64) -> String + Send + Sync + 'static,
    {
        self.pipeline.set_cursor_formatter(Arc::new(formatter));
    }

    /// Redraws at `width` x `height`, reallocating the buffer first when the
    /// size changed.
    pub fn redraw(&mut self, width: u32, height: u32) -> ChartResult<&RasterBuffer> {
        self.pipeline
            .redraw(&mut self.state, &mut self.renderer, width, height)?;
        Ok(self.state.buffer())
    }

    /// Redraws at the current buffer size.
    pub fn trigger_redraw(&mut self) -> ChartResult<&RasterBuffer> {
        let viewport = self.state.viewport();
        self.redraw(viewport.width, viewport.height)
    }

    pub fn on_drag(&mut self, x: f64, y: f64) {
        self.state.on_drag(x, y);
    }

    pub fn on_drag_end(&mut self) {
        self.state.on_drag_end();
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.state.cursor()
    }

    /// Layout the next redraw at the current size would use, if data is set.
    pub fn frame_layout(&self) -> ChartResult<Option<FrameLayout>> {
        self.state
            .series()
            .map(|series| {
                FrameLayout::compute(
                    self.state.viewport(),
                    self.state.margin(),
                    self.state.autoscale_y(),
                    series,
                )
            })
            .transpose()
    }

    #[must_use]
    pub fn buffer(&self) -> &RasterBuffer {
        self.state.buffer()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
