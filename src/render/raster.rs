use tracing::debug;

use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::Color;

/// In-memory RGBA8 pixel store owned by a chart.
///
/// Rows are tightly packed (`stride == width * 4`) and channels are straight
/// (not premultiplied) alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        Viewport::new(width, height).validate()?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y as usize * self.stride() + x as usize * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[start..start + 4]);
        Some(out)
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Reallocates a zeroed buffer when the requested size differs.
    ///
    /// Returns `true` when the old allocation and its contents were dropped.
    /// Matching dimensions leave the buffer untouched.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) -> ChartResult<bool> {
        if width == self.width && height == self.height {
            return Ok(false);
        }
        Viewport::new(width, height).validate()?;
        debug!(
            from_width = self.width,
            from_height = self.height,
            width, height, "reallocating raster buffer"
        );
        *self = Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        };
        Ok(true)
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[cfg(test)]
mod tests {
    use super::RasterBuffer;
    use crate::ChartError;
    use crate::render::Color;

    #[test]
    fn rejects_zero_dimensions() {
        let err = RasterBuffer::new(0, 10).expect_err("zero width must fail");
        assert!(matches!(err, ChartError::InvalidViewport { width: 0, .. }));
    }

    #[test]
    fn same_size_keeps_allocation_and_contents() {
        let mut buffer = RasterBuffer::new(4, 3).expect("buffer");
        buffer.fill(Color::WHITE);
        let before = buffer.pixels().as_ptr();

        let reallocated = buffer.resize_if_needed(4, 3).expect("resize");

        assert!(!reallocated);
        assert_eq!(buffer.pixels().as_ptr(), before);
        assert_eq!(buffer.pixel(3, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn new_size_discards_contents() {
        let mut buffer = RasterBuffer::new(4, 3).expect("buffer");
        buffer.fill(Color::WHITE);

        let reallocated = buffer.resize_if_needed(5, 3).expect("resize");

        assert!(reallocated);
        assert_eq!(buffer.width(), 5);
        assert_eq!(buffer.pixels().len(), 5 * 3 * 4);
        assert!(buffer.pixels().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let buffer = RasterBuffer::new(2, 2).expect("buffer");
        assert!(buffer.pixel(2, 0).is_none());
        assert_eq!(buffer.pixel(1, 1), Some([0, 0, 0, 0]));
    }
}
