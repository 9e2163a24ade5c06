use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{DrawableBounds, ScaleParams, ScreenPoint};

/// Pointer position and cursor visibility, driven by drag events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    pointer: ScreenPoint,
    visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            pointer: ScreenPoint::new(0.0, 0.0),
            visible: false,
        }
    }
}

impl CursorState {
    #[must_use]
    pub fn pointer(self) -> ScreenPoint {
        self.pointer
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.visible
    }

    /// Tracks the pointer; the cursor shows only strictly inside `bounds`.
    pub fn on_drag(&mut self, x: f64, y: f64, bounds: DrawableBounds) {
        self.pointer = ScreenPoint::new(x, y);
        self.visible = bounds.contains_strict(x, y);
    }

    pub fn on_drag_end(&mut self) {
        self.visible = false;
    }
}

/// Sample closest to a pointer along the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestSample {
    pub index: usize,
    /// Canvas x of the sample, margin included.
    pub screen_x: f64,
}

/// Linear scan for the sample whose canvas x is closest to `target_x`.
///
/// Only a strictly smaller distance replaces the current best, so on an
/// exact tie the lowest index wins. Returns `None` for an empty slice.
#[must_use]
pub fn find_nearest(xs: &[f64], params: &ScaleParams, target_x: f64) -> Option<NearestSample> {
    let mut best: Option<(OrderedFloat<f64>, NearestSample)> = None;
    for (index, &x) in xs.iter().enumerate() {
        let screen_x = params.canvas_x(x);
        let distance = OrderedFloat((screen_x - target_x).abs());
        match best {
            Some((current, _)) if current <= distance => {}
            _ => best = Some((distance, NearestSample { index, screen_x })),
        }
    }
    best.map(|(_, sample)| sample)
}

#[cfg(test)]
mod tests {
    use super::{CursorState, find_nearest};
    use crate::core::{ScaleParams, Viewport};

    fn params() -> ScaleParams {
        ScaleParams {
            ratio_x: 10.0,
            ratio_y: 1.0,
            y_offset: 0.0,
            height: 380.0,
            margin: 50.0,
        }
    }

    #[test]
    fn exact_hit_on_first_sample_returns_index_zero() {
        let xs = [0.0, 1.0, 2.0];
        let nearest = find_nearest(&xs, &params(), 50.0).expect("nearest");
        assert_eq!(nearest.index, 0);
        assert_eq!(nearest.screen_x, 50.0);
    }

    #[test]
    fn tie_resolves_to_lowest_index() {
        let xs = [0.0, 1.0, 2.0];
        // 65 is exactly between sample 1 (60) and sample 2 (70).
        let nearest = find_nearest(&xs, &params(), 65.0).expect("nearest");
        assert_eq!(nearest.index, 1);
    }

    #[test]
    fn duplicate_x_resolves_to_first_occurrence() {
        let xs = [0.0, 3.0, 3.0, 4.0];
        let nearest = find_nearest(&xs, &params(), 81.0).expect("nearest");
        assert_eq!(nearest.index, 1);
    }

    #[test]
    fn far_pointer_still_snaps_to_closest_edge_sample() {
        let xs = [0.0, 1.0, 2.0];
        let nearest = find_nearest(&xs, &params(), 10_000.0).expect("nearest");
        assert_eq!(nearest.index, 2);
    }

    #[test]
    fn empty_input_has_no_nearest() {
        assert!(find_nearest(&[], &params(), 0.0).is_none());
    }

    #[test]
    fn cursor_visibility_follows_drawable_bounds() {
        let bounds = Viewport::new(640, 480).drawable(50.0);
        let mut cursor = CursorState::default();

        cursor.on_drag(100.0, 100.0, bounds);
        assert!(cursor.is_visible());

        cursor.on_drag(50.0, 100.0, bounds);
        assert!(!cursor.is_visible(), "margin edge is outside");
        assert_eq!(cursor.pointer().x, 50.0);

        cursor.on_drag(320.0, 240.0, bounds);
        cursor.on_drag_end();
        assert!(!cursor.is_visible());
    }
}
