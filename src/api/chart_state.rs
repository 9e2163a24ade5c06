use tracing::debug;

use crate::core::{DrawableBounds, Series, Viewport};
use crate::error::ChartResult;
use crate::interaction::CursorState;
use crate::render::{FontHandle, RasterBuffer};

/// Mutable state of one chart: series, margin, autoscale flag, cursor,
/// font and the backing raster buffer.
///
/// Owned by exactly one [`crate::api::Chart`] and lent to the render
/// pipeline for the duration of a redraw.
#[derive(Debug)]
pub struct ChartState {
    series: Option<Series>,
    margin: f64,
    autoscale_y: bool,
    cursor: CursorState,
    font: Option<FontHandle>,
    buffer: RasterBuffer,
}

/// Read-only view of the state a frame is painted from, split off the
/// buffer so both can be borrowed at once.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameSource<'a> {
    pub series: Option<&'a Series>,
    pub margin: f64,
    pub autoscale_y: bool,
    pub cursor: CursorState,
    pub font: Option<&'a FontHandle>,
}

impl ChartState {
    pub fn new(width: u32, height: u32, margin: f64, autoscale_y: bool) -> ChartResult<Self> {
        Ok(Self {
            series: None,
            margin,
            autoscale_y,
            cursor: CursorState::default(),
            font: None,
            buffer: RasterBuffer::new(width, height)?,
        })
    }

    /// Replaces the series wholesale.
    pub fn set_series(&mut self, series: Series) {
        debug!(samples = series.len(), "series replaced");
        self.series = Some(series);
    }

    #[must_use]
    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    #[must_use]
    pub fn autoscale_y(&self) -> bool {
        self.autoscale_y
    }

    pub fn set_autoscale_y(&mut self, enabled: bool) {
        self.autoscale_y = enabled;
    }

    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    #[must_use]
    pub fn font(&self) -> Option<&FontHandle> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: FontHandle) {
        self.font = Some(font);
    }

    #[must_use]
    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.buffer.viewport()
    }

    #[must_use]
    pub fn drawable_bounds(&self) -> DrawableBounds {
        self.viewport().drawable(self.margin)
    }

    pub fn on_drag(&mut self, x: f64, y: f64) {
        let bounds = self.drawable_bounds();
        self.cursor.on_drag(x, y, bounds);
    }

    pub fn on_drag_end(&mut self) {
        self.cursor.on_drag_end();
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) -> ChartResult<bool> {
        self.buffer.resize_if_needed(width, height)
    }

    pub(crate) fn frame_parts(&mut self) -> (&mut RasterBuffer, FrameSource<'_>) {
        (
            &mut self.buffer,
            FrameSource {
                series: self.series.as_ref(),
                margin: self.margin,
                autoscale_y: self.autoscale_y,
                cursor: self.cursor,
                font: self.font.as_ref(),
            },
        )
    }
}
