use tracing::{debug, trace, warn};

use crate::core::{DrawableBounds, ScaleParams, Series, Viewport, compute_parameters};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{CursorState, find_nearest};
use crate::render::{ChartTheme, DrawContext, DrawStrategy, Renderer, SampleContext};

use super::axis_labeler::{AxisLabeler, AxisTicks};
use super::chart_state::{ChartState, FrameSource};
use super::label_format::CursorLabelFormatterFn;

/// Geometry shared by every drawing step of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub viewport: Viewport,
    pub bounds: DrawableBounds,
    pub x_span: f64,
    pub scale: ScaleParams,
}

impl FrameLayout {
    /// Resolves drawable bounds and scale factors for `series`.
    ///
    /// With autoscale off the vertical ratio is `1` and the offset `0`. A
    /// series whose values are all zero has no span to fill and keeps the
    /// unit ratio.
    pub fn compute(
        viewport: Viewport,
        margin: f64,
        autoscale_y: bool,
        series: &Series,
    ) -> ChartResult<Self> {
        let bounds = viewport.drawable(margin);
        let x_span = series.x_span();
        let ratio_x = bounds.width / x_span;

        let (ratio_y, y_offset) = if autoscale_y {
            let params = compute_parameters(series.ys())?;
            if params.span > 0.0 {
                (bounds.height / params.span, params.offset)
            } else {
                debug!("autoscale span is zero, keeping unit vertical ratio");
                (1.0, params.offset)
            }
        } else {
            (1.0, 0.0)
        };

        Ok(Self {
            viewport,
            bounds,
            x_span,
            scale: ScaleParams {
                ratio_x,
                ratio_y,
                y_offset,
                height: bounds.height,
                margin,
            },
        })
    }

    /// Whether the horizontal scale is usable for plotting.
    ///
    /// A span that overflows to infinity collapses every sample onto the
    /// left border and counts as degenerate.
    #[must_use]
    pub fn has_horizontal_span(&self) -> bool {
        self.x_span.is_finite()
            && self.x_span > 0.0
            && self.scale.ratio_x.is_finite()
    }

    /// Canvas y of data value `0`.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.scale.to_canvas(0.0, 0.0).y
    }
}

/// Drives one full redraw of a chart into its raster buffer.
///
/// Holds the per-instance drawing configuration; the mutable chart state is
/// lent in on each call.
pub struct RenderPipeline {
    strategy: Box<dyn DrawStrategy>,
    labeler: AxisLabeler,
    cursor_formatter: CursorLabelFormatterFn,
    theme: ChartTheme,
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("labeler", &self.labeler)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl RenderPipeline {
    #[must_use]
    pub fn new(
        strategy: Box<dyn DrawStrategy>,
        labeler: AxisLabeler,
        cursor_formatter: CursorLabelFormatterFn,
        theme: ChartTheme,
    ) -> Self {
        Self {
            strategy,
            labeler,
            cursor_formatter,
            theme,
        }
    }

    #[must_use]
    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn labeler_mut(&mut self) -> &mut AxisLabeler {
        &mut self.labeler
    }

    pub fn set_cursor_formatter(&mut self, formatter: CursorLabelFormatterFn) {
        self.cursor_formatter = formatter;
    }

    /// Axis labels for `layout`, as drawn by [`Self::redraw`].
    #[must_use]
    pub fn ticks(&self, layout: &FrameLayout) -> AxisTicks {
        AxisTicks {
            vertical: self.labeler.vertical_ticks(layout.viewport, &layout.scale),
            horizontal: self.labeler.horizontal_ticks(
                layout.viewport,
                &layout.scale,
                layout.x_span,
                layout.bounds.width,
            ),
        }
    }

    /// Resizes the buffer if needed, then paints background, series, frame,
    /// axis labels and cursor overlay.
    ///
    /// A series without horizontal span is skipped: the rest of the frame is
    /// still painted and `ChartError::Render` is returned afterwards.
    pub fn redraw<R: Renderer + ?Sized>(
        &self,
        state: &mut ChartState,
        renderer: &mut R,
        width: u32,
        height: u32,
    ) -> ChartResult<()> {
        state.resize_if_needed(width, height)?;
        let viewport = state.viewport();
        let (buffer, source) = state.frame_parts();

        let layout = source
            .series
            .map(|series| FrameLayout::compute(viewport, source.margin, source.autoscale_y, series))
            .transpose()?;
        let degenerate = layout.is_some_and(|layout| !layout.has_horizontal_span());
        if let Some(layout) = &layout {
            trace!(
                samples = source.series.map_or(0, Series::len),
                ratio_x = layout.scale.ratio_x,
                ratio_y = layout.scale.ratio_y,
                y_offset = layout.scale.y_offset,
                "redraw"
            );
        }

        renderer.paint(buffer, &mut |context: &mut dyn DrawContext| {
            self.paint_frame(context, viewport, &source, layout.as_ref())
        })?;

        if degenerate {
            warn!(
                width,
                height, "series has no horizontal span; drew frame without series"
            );
            return Err(ChartError::Render(
                "series x span is zero or not finite; cannot scale horizontally".to_owned(),
            ));
        }
        Ok(())
    }

    fn paint_frame(
        &self,
        context: &mut dyn DrawContext,
        viewport: Viewport,
        source: &FrameSource<'_>,
        layout: Option<&FrameLayout>,
    ) -> ChartResult<()> {
        context.clear(self.theme.background)?;
        if let Some(font) = source.font {
            context.set_font_face(font);
        }

        if let (Some(series), Some(layout)) = (source.series, layout) {
            if layout.has_horizontal_span() {
                self.paint_series(context, series, layout)?;
            }
        }

        self.paint_borders(context, viewport, source.margin)?;

        if let Some(layout) = layout {
            context.set_color(self.theme.axis_text);
            self.labeler.draw(context, &self.ticks(layout))?;
        }

        if let (Some(series), Some(layout)) = (source.series, layout) {
            if source.cursor.is_visible() && layout.has_horizontal_span() {
                self.paint_cursor(context, series, layout, source.cursor)?;
            }
        }
        Ok(())
    }

    fn paint_series(
        &self,
        context: &mut dyn DrawContext,
        series: &Series,
        layout: &FrameLayout,
    ) -> ChartResult<()> {
        let scale = &layout.scale;
        let baseline_y = layout.baseline_y();
        let (first_x, first_y) = series.first();

        context.save()?;
        self.strategy.begin(context, scale.to_canvas(first_x, first_y))?;
        for (index, (x, y)) in series.points().enumerate() {
            let sample = SampleContext {
                index,
                sample_count: series.len(),
                baseline_y,
                bounds: layout.bounds,
            };
            self.strategy.point(context, scale.to_canvas(x, y), sample)?;
        }
        self.strategy.end(context)?;
        context.restore()
    }

    fn paint_borders(
        &self,
        context: &mut dyn DrawContext,
        viewport: Viewport,
        margin: f64,
    ) -> ChartResult<()> {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        context.set_color(self.theme.frame);
        context.rectangle(0.0, 0.0, width, margin);
        context.rectangle(0.0, height - margin, width, margin);
        context.rectangle(0.0, margin, margin, height - 2.0 * margin);
        context.rectangle(width - margin, margin, margin, height - 2.0 * margin);
        context.fill()
    }

    fn paint_cursor(
        &self,
        context: &mut dyn DrawContext,
        series: &Series,
        layout: &FrameLayout,
        cursor: CursorState,
    ) -> ChartResult<()> {
        let pointer = cursor.pointer();
        let Some(nearest) = find_nearest(series.xs(), &layout.scale, pointer.x) else {
            return Ok(());
        };
        let margin = layout.scale.margin;
        let canvas_height = f64::from(layout.viewport.height);

        context.set_color(self.theme.cursor_guide);
        context.move_to(nearest.screen_x, margin);
        context.line_to(nearest.screen_x, canvas_height - margin);
        context.stroke()?;

        let text = (self.cursor_formatter)(series.xs()[nearest.index], series.ys()[nearest.index]);
        let extent = context.measure_text(&text);
        context.set_color(self.theme.cursor_box);
        context.rectangle(
            pointer.x - extent.width / 4.0,
            pointer.y - extent.height * 1.5,
            extent.width * 1.5,
            extent.height * 2.0,
        );
        context.fill()?;

        context.set_color(self.theme.cursor_text);
        context.draw_text(&text, pointer.x, pointer.y)
    }
}
