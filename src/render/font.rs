use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::{Font, FontVec, GlyphId, OutlineCurve, Point, PxScale, PxScaleFont, ScaleFont};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::TextExtent;

/// A parsed font at a fixed point size.
///
/// Loaded once by the host and handed to charts explicitly. Cloning shares
/// the parsed font data.
#[derive(Clone)]
pub struct FontHandle {
    font: Arc<FontVec>,
    points: f64,
}

impl FontHandle {
    /// Reads and parses a TrueType/OpenType file.
    pub fn load(path: impl AsRef<Path>, points: f64) -> ChartResult<Self> {
        let path = path.as_ref();
        validate_points(points)?;
        let data = std::fs::read(path).map_err(|source| ChartError::FontIo {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|err| ChartError::FontFormat {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), points, "loaded font face");
        Ok(Self {
            font: Arc::new(font),
            points,
        })
    }

    /// Parses font data already in memory (e.g. `include_bytes!`).
    pub fn from_bytes(data: Vec<u8>, points: f64) -> ChartResult<Self> {
        validate_points(points)?;
        let font = FontVec::try_from_vec(data).map_err(|err| ChartError::FontFormat {
            path: "<memory>".into(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            font: Arc::new(font),
            points,
        })
    }

    #[must_use]
    pub fn points(&self) -> f64 {
        self.points
    }

    /// Advance width of `text` and the line height of the face.
    #[must_use]
    pub fn measure(&self, text: &str) -> TextExtent {
        let scaled = self.scaled();
        let (_, width) = layout_glyphs(&scaled, text);
        TextExtent::new(f64::from(width), f64::from(scaled.ascent() - scaled.descent()))
    }

    /// Glyph outlines of `text` placed with the baseline starting at
    /// (`x`, `baseline`), in canvas coordinates with y growing downwards.
    ///
    /// Quadratic segments come out as equivalent cubics. Contours are
    /// implicitly closed.
    #[must_use]
    pub fn outline_text(&self, text: &str, x: f64, baseline: f64) -> Vec<GlyphSegment> {
        let scaled = self.scaled();
        let h_factor = f64::from(scaled.h_scale_factor());
        let v_factor = f64::from(scaled.v_scale_factor());
        let (glyphs, _) = layout_glyphs(&scaled, text);

        let mut segments = Vec::new();
        for (glyph, pen_x) in glyphs {
            let Some(outline) = self.font.outline(glyph) else {
                continue;
            };
            let origin = x + f64::from(pen_x);
            let place = |point: Point| {
                (
                    origin + f64::from(point.x) * h_factor,
                    baseline - f64::from(point.y) * v_factor,
                )
            };

            let mut current: Option<Point> = None;
            for curve in &outline.curves {
                let (start, end) = match *curve {
                    OutlineCurve::Line(start, end)
                    | OutlineCurve::Quad(start, _, end)
                    | OutlineCurve::Cubic(start, _, _, end) => (start, end),
                };
                if current != Some(start) {
                    let (x, y) = place(start);
                    segments.push(GlyphSegment::MoveTo { x, y });
                }
                segments.push(match *curve {
                    OutlineCurve::Line(_, end) => {
                        let (x, y) = place(end);
                        GlyphSegment::LineTo { x, y }
                    }
                    OutlineCurve::Quad(start, control, end) => {
                        let (sx, sy) = place(start);
                        let (cx, cy) = place(control);
                        let (ex, ey) = place(end);
                        GlyphSegment::CurveTo {
                            c1: (sx + 2.0 / 3.0 * (cx - sx), sy + 2.0 / 3.0 * (cy - sy)),
                            c2: (ex + 2.0 / 3.0 * (cx - ex), ey + 2.0 / 3.0 * (cy - ey)),
                            to: (ex, ey),
                        }
                    }
                    OutlineCurve::Cubic(_, c1, c2, end) => GlyphSegment::CurveTo {
                        c1: place(c1),
                        c2: place(c2),
                        to: place(end),
                    },
                });
                current = Some(end);
            }
        }
        segments
    }

    fn scaled(&self) -> PxScaleFont<&FontVec> {
        self.font.as_scaled(PxScale::from(self.points as f32))
    }
}

/// One path segment of a placed glyph outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        c1: (f64, f64),
        c2: (f64, f64),
        to: (f64, f64),
    },
}

impl GlyphSegment {
    /// End point of the segment.
    #[must_use]
    pub fn end(&self) -> (f64, f64) {
        match *self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => (x, y),
            Self::CurveTo { to, .. } => to,
        }
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("points", &self.points)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Glyphs of `text` with their pen x offsets, and the total advance.
fn layout_glyphs(scaled: &PxScaleFont<&FontVec>, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen_x = 0.0_f32;
    let mut previous = None;
    for ch in text.chars() {
        let glyph = scaled.glyph_id(ch);
        if let Some(previous) = previous {
            pen_x += scaled.kern(previous, glyph);
        }
        glyphs.push((glyph, pen_x));
        pen_x += scaled.h_advance(glyph);
        previous = Some(glyph);
    }
    (glyphs, pen_x)
}

fn validate_points(points: f64) -> ChartResult<()> {
    if !points.is_finite() || points <= 0.0 {
        return Err(ChartError::InvalidData(
            "font point size must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
