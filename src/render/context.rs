use crate::error::ChartResult;
use crate::render::{Color, FontHandle, RasterBuffer, TextExtent};

/// Immediate-mode drawing primitives a backend must provide.
///
/// Paths are built with `move_to`/`line_to`/`rectangle` and consumed by
/// `fill` or `stroke`, which both clear the pending path. `save`/`restore`
/// bracket paint state (color, font) so a draw style cannot leak into later
/// drawing.
pub trait DrawContext {
    fn set_color(&mut self, color: Color);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill(&mut self) -> ChartResult<()>;
    fn stroke(&mut self) -> ChartResult<()>;
    fn save(&mut self) -> ChartResult<()>;
    fn restore(&mut self) -> ChartResult<()>;
    fn measure_text(&mut self, text: &str) -> TextExtent;
    /// Draws `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;
    fn set_font_face(&mut self, font: &FontHandle);
    /// Paints the whole target with `color`, discarding any pending path.
    fn clear(&mut self, color: Color) -> ChartResult<()>;
}

/// Callback that draws one frame on a backend context.
pub type FramePainter<'a> = dyn FnMut(&mut dyn DrawContext) -> ChartResult<()> + 'a;

/// Contract implemented by any rendering backend.
///
/// A backend turns the chart's raster buffer into a [`DrawContext`] for the
/// duration of one frame and leaves the finished pixels in the buffer.
pub trait Renderer {
    fn paint(&mut self, buffer: &mut RasterBuffer, frame: &mut FramePainter<'_>)
    -> ChartResult<()>;
}
