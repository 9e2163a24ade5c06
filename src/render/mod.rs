mod context;
mod font;
mod primitives;
mod raster;
mod recording;
mod strategy;
mod theme;

pub use context::{DrawContext, FramePainter, Renderer};
pub use font::{FontHandle, GlyphSegment};
pub use primitives::{Color, TextExtent, estimate_text_extent};
pub use raster::RasterBuffer;
pub use recording::{
    DrawCommand, FALLBACK_FONT_SIZE_PX, PathElement, RecordedPath, RecordingContext,
    RecordingRenderer,
};
pub use strategy::{
    AreaStrategy, BarStrategy, DrawStrategy, DrawStyle, LineStrategy, SampleContext,
};
pub use theme::ChartTheme;

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContext, CairoRenderer, paint_buffer_on_context};
