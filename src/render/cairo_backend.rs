use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawContext, FALLBACK_FONT_SIZE_PX, FontHandle, FramePainter, GlyphSegment,
    RasterBuffer, Renderer, TextExtent,
};

/// Font state of a [`CairoContext`].
#[derive(Clone)]
enum TextFace {
    /// No font set; Pango's default sans face.
    Fallback(FontDescription),
    /// Glyphs are measured and filled from the loaded face.
    Loaded(FontHandle),
}

/// [`DrawContext`] over a cairo context.
///
/// Text uses the chart's [`FontHandle`] once one is set and Pango's sans
/// face before that.
pub struct CairoContext<'a> {
    context: &'a Context,
    face: TextFace,
    saved_faces: Vec<TextFace>,
}

impl<'a> CairoContext<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        context.set_line_width(1.0);
        Self {
            context,
            face: TextFace::Fallback(font_description(FALLBACK_FONT_SIZE_PX)),
            saved_faces: Vec::new(),
        }
    }

    fn pango_layout(&self, description: &FontDescription, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(self.context);
        layout.set_font_description(Some(description));
        layout.set_text(text);
        layout
    }

    fn fill_glyphs(&self, font: &FontHandle, text: &str, x: f64, y: f64) -> ChartResult<()> {
        self.context.new_path();
        for segment in font.outline_text(text, x, y) {
            match segment {
                GlyphSegment::MoveTo { x, y } => self.context.move_to(x, y),
                GlyphSegment::LineTo { x, y } => self.context.line_to(x, y),
                GlyphSegment::CurveTo { c1, c2, to } => {
                    self.context.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
                }
            }
        }
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill glyphs", err))
    }
}

impl DrawContext for CairoContext<'_> {
    fn set_color(&mut self, color: Color) {
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.rectangle(x, y, width, height);
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        self.saved_faces.push(self.face.clone());
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        let face = self.saved_faces.pop().ok_or_else(|| {
            ChartError::Backend("restore called without a matching save".to_owned())
        })?;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        self.face = face;
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> TextExtent {
        match &self.face {
            TextFace::Loaded(font) => font.measure(text),
            TextFace::Fallback(description) => {
                let (width, height) = self.pango_layout(description, text).pixel_size();
                TextExtent::new(f64::from(width), f64::from(height))
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        match &self.face {
            TextFace::Loaded(font) => self.fill_glyphs(font, text, x, y),
            TextFace::Fallback(description) => {
                let layout = self.pango_layout(description, text);
                let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
                self.context.move_to(x, y - baseline);
                pangocairo::functions::show_layout(self.context, &layout);
                self.context.new_path();
                Ok(())
            }
        }
    }

    fn set_font_face(&mut self, font: &FontHandle) {
        self.face = TextFace::Loaded(font.clone());
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        self.context.new_path();
        self.set_color(color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }
}

/// Rasterizes frames with cairo on an offscreen image surface and copies
/// the result into the chart's buffer.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    frames_painted: usize,
}

impl CairoRenderer {
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn frames_painted(&self) -> usize {
        self.frames_painted
    }
}

impl Renderer for CairoRenderer {
    fn paint(
        &mut self,
        buffer: &mut RasterBuffer,
        frame: &mut FramePainter<'_>,
    ) -> ChartResult<()> {
        let width = surface_dimension(buffer.width())?;
        let height = surface_dimension(buffer.height())?;
        let mut surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            let mut draw = CairoContext::new(&context);
            frame(&mut draw)?;
        }
        surface.flush();
        let stride = usize::try_from(surface.stride())
            .map_err(|_| ChartError::Backend("negative cairo stride".to_owned()))?;
        let data = surface
            .data()
            .map_err(|err| ChartError::Backend(format!("failed to read cairo surface: {err}")))?;
        copy_argb32_into(&data, stride, buffer);
        self.frames_painted += 1;
        trace!(width, height, "cairo frame copied into raster buffer");
        Ok(())
    }
}

/// Paints a finished raster buffer onto an external cairo context, e.g. a
/// GTK draw callback.
pub fn paint_buffer_on_context(context: &Context, buffer: &RasterBuffer) -> ChartResult<()> {
    let width = surface_dimension(buffer.width())?;
    let height = surface_dimension(buffer.height())?;
    let stride = width * 4;
    let surface = ImageSurface::create_for_data(
        rgba_to_argb32(buffer),
        Format::ARgb32,
        width,
        height,
        stride,
    )
    .map_err(|err| map_backend_error("failed to wrap raster buffer", err))?;
    context
        .set_source_surface(&surface, 0.0, 0.0)
        .map_err(|err| map_backend_error("failed to set buffer source", err))?;
    context
        .paint()
        .map_err(|err| map_backend_error("failed to paint buffer", err))
}

fn font_description(points: f64) -> FontDescription {
    FontDescription::from_string(&format!("Sans {points}"))
}

fn surface_dimension(value: u32) -> ChartResult<i32> {
    i32::try_from(value)
        .map_err(|_| ChartError::Backend(format!("surface dimension {value} exceeds i32")))
}

/// Converts native-endian premultiplied ARGB32 rows into straight RGBA8.
fn copy_argb32_into(source: &[u8], stride: usize, buffer: &mut RasterBuffer) {
    let width = buffer.width() as usize;
    let target_stride = buffer.stride();
    let pixels = buffer.pixels_mut();
    for (row, target_row) in pixels.chunks_exact_mut(target_stride).enumerate() {
        let source_row = &source[row * stride..row * stride + width * 4];
        for (source_px, target_px) in source_row
            .chunks_exact(4)
            .zip(target_row.chunks_exact_mut(4))
        {
            let argb = u32::from_ne_bytes([source_px[0], source_px[1], source_px[2], source_px[3]]);
            let alpha = (argb >> 24) & 0xff;
            let unpremultiply = |channel: u32| -> u8 {
                if alpha == 0 {
                    0
                } else {
                    ((channel * 255 + alpha / 2) / alpha).min(255) as u8
                }
            };
            target_px[0] = unpremultiply((argb >> 16) & 0xff);
            target_px[1] = unpremultiply((argb >> 8) & 0xff);
            target_px[2] = unpremultiply(argb & 0xff);
            target_px[3] = alpha as u8;
        }
    }
}

/// Converts straight RGBA8 into native-endian premultiplied ARGB32.
fn rgba_to_argb32(buffer: &RasterBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.pixels().len());
    for px in buffer.pixels().chunks_exact(4) {
        let alpha = u32::from(px[3]);
        let premultiply = |channel: u8| (u32::from(channel) * alpha + 127) / 255;
        let argb = (alpha << 24)
            | (premultiply(px[0]) << 16)
            | (premultiply(px[1]) << 8)
            | premultiply(px[2]);
        out.extend_from_slice(&argb.to_ne_bytes());
    }
    out
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
