use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Full canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Area left after reserving `margin` on all four sides.
    #[must_use]
    pub fn drawable(self, margin: f64) -> DrawableBounds {
        DrawableBounds {
            left: margin,
            top: margin,
            width: f64::from(self.width) - 2.0 * margin,
            height: f64::from(self.height) - 2.0 * margin,
        }
    }
}

/// Pixel-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Canvas region inside the margins, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawableBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DrawableBounds {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Strict containment: points on the margin edge are outside.
    #[must_use]
    pub fn contains_strict(self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right() && y > self.top && y < self.bottom()
    }
}
