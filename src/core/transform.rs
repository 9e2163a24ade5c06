use crate::core::ScreenPoint;

/// Maps a data-space sample to drawable-area pixels.
///
/// `height` is the drawable height. The vertical axis is flipped so larger
/// `y` values land higher on screen. Margins are not applied here.
#[must_use]
#[inline]
pub fn transform(
    x: f64,
    y: f64,
    ratio_x: f64,
    ratio_y: f64,
    y_offset: f64,
    height: f64,
) -> (f64, f64) {
    (ratio_x * x, height - ratio_y * (y - y_offset))
}

/// Inverse of [`transform`] for the same parameters.
#[must_use]
#[inline]
pub fn inverse_transform(
    screen_x: f64,
    screen_y: f64,
    ratio_x: f64,
    ratio_y: f64,
    y_offset: f64,
    height: f64,
) -> (f64, f64) {
    (screen_x / ratio_x, (height - screen_y) / ratio_y + y_offset)
}

/// Scale factors resolved once per redraw and shared by the series,
/// the axis labels and the cursor lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub ratio_x: f64,
    pub ratio_y: f64,
    pub y_offset: f64,
    /// Drawable height in pixels.
    pub height: f64,
    pub margin: f64,
}

impl ScaleParams {
    /// Drawable-area coordinates, without the margin.
    #[must_use]
    pub fn to_drawable(&self, x: f64, y: f64) -> ScreenPoint {
        let (sx, sy) = transform(x, y, self.ratio_x, self.ratio_y, self.y_offset, self.height);
        ScreenPoint::new(sx, sy)
    }

    /// Canvas coordinates: drawable coordinates shifted by the margin.
    #[must_use]
    pub fn to_canvas(&self, x: f64, y: f64) -> ScreenPoint {
        self.to_drawable(x, y).offset(self.margin, self.margin)
    }

    #[must_use]
    pub fn canvas_x(&self, x: f64) -> f64 {
        self.ratio_x * x + self.margin
    }

    /// Data span covered by the drawable height.
    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.height / self.ratio_y
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleParams, inverse_transform, transform};

    #[test]
    fn flips_vertical_axis() {
        let (_, low) = transform(0.0, 1.0, 1.0, 10.0, 0.0, 100.0);
        let (_, high) = transform(0.0, 5.0, 1.0, 10.0, 0.0, 100.0);
        assert!(high < low);
        assert_eq!(low, 90.0);
        assert_eq!(high, 50.0);
    }

    #[test]
    fn offset_moves_minimum_to_bottom_edge() {
        let (_, y) = transform(0.0, -5.0, 1.0, 2.0, -5.0, 300.0);
        assert_eq!(y, 300.0);
    }

    #[test]
    fn inverse_recovers_x_at_unit_vertical_ratio() {
        for x in [0.0, 0.125, 3.5, 1_024.0, -7.25] {
            let (sx, sy) = transform(x, 0.0, 4.0, 1.0, 0.0, 380.0);
            let (rx, ry) = inverse_transform(sx, sy, 4.0, 1.0, 0.0, 380.0);
            assert_eq!(rx, x);
            assert_eq!(ry, 0.0);
        }
    }

    #[test]
    fn canvas_coordinates_add_margin_on_both_axes() {
        let params = ScaleParams {
            ratio_x: 2.0,
            ratio_y: 1.0,
            y_offset: 0.0,
            height: 100.0,
            margin: 50.0,
        };
        let point = params.to_canvas(10.0, 40.0);
        assert_eq!(point.x, 70.0);
        assert_eq!(point.y, 110.0);
        assert_eq!(params.canvas_x(10.0), 70.0);
    }
}
