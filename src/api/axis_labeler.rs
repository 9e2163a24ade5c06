use crate::core::{ScaleParams, ScreenPoint, Viewport};
use crate::error::ChartResult;
use crate::render::DrawContext;

use super::label_format::{AxisLabelFormatterFn, compact_axis_formatter};

/// One axis label: data value, text baseline position on the canvas and
/// formatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub position: ScreenPoint,
    pub text: String,
}

/// Tick labels for both axes of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTicks {
    pub vertical: Vec<AxisTick>,
    pub horizontal: Vec<AxisTick>,
}

impl AxisTicks {
    pub fn iter(&self) -> impl Iterator<Item = &AxisTick> + '_ {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

/// Vertical tick count: `2 * canvas / (canvas - drawable)`, truncated.
///
/// Returns `0` when no margin is reserved.
#[must_use]
pub fn vertical_tick_count(canvas_height: f64, drawable_height: f64) -> usize {
    density_count(canvas_height * 2.0, canvas_height - drawable_height)
}

/// Horizontal tick count: `canvas / (canvas - drawable)`, truncated.
#[must_use]
pub fn horizontal_tick_count(canvas_width: f64, drawable_width: f64) -> usize {
    density_count(canvas_width, canvas_width - drawable_width)
}

fn density_count(numerator: f64, reserved: f64) -> usize {
    if reserved <= 0.0 {
        return 0;
    }
    let count = (numerator / reserved).trunc();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Places and formats axis labels with the same scale as the series.
#[derive(Clone)]
pub struct AxisLabeler {
    formatter: AxisLabelFormatterFn,
}

impl std::fmt::Debug for AxisLabeler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisLabeler").finish_non_exhaustive()
    }
}

impl AxisLabeler {
    #[must_use]
    pub fn new(formatter: AxisLabelFormatterFn) -> Self {
        Self { formatter }
    }

    #[must_use]
    pub fn with_significant_digits(significant_digits: usize) -> Self {
        Self::new(compact_axis_formatter(significant_digits))
    }

    pub fn set_formatter(&mut self, formatter: AxisLabelFormatterFn) {
        self.formatter = formatter;
    }

    /// Labels along the left margin, spread symmetrically around data `0`.
    ///
    /// The step is the visible data span divided by the tick count; tick
    /// `i` runs from `-count / 2` for `count` steps.
    #[must_use]
    pub fn vertical_ticks(&self, viewport: Viewport, params: &ScaleParams) -> Vec<AxisTick> {
        let canvas_height = f64::from(viewport.height);
        let count = vertical_tick_count(canvas_height, params.height);
        if count == 0 {
            return Vec::new();
        }
        let step = params.y_span() / count as f64;
        let start = -(count as i64) / 2;
        (start..start + count as i64)
            .filter_map(|i| {
                let value = step * i as f64;
                let y = params.height - (value - params.y_offset) * params.ratio_y;
                y.is_finite().then(|| AxisTick {
                    value,
                    position: ScreenPoint::new(params.margin / 6.0, y + params.margin),
                    text: (self.formatter)(value),
                })
            })
            .collect()
    }

    /// Labels along the bottom margin, from the left edge inward.
    ///
    /// Tick `0` is skipped since it sits on the left border.
    #[must_use]
    pub fn horizontal_ticks(
        &self,
        viewport: Viewport,
        params: &ScaleParams,
        x_span: f64,
        drawable_width: f64,
    ) -> Vec<AxisTick> {
        if !x_span.is_finite() || x_span <= 0.0 || !params.ratio_x.is_finite() {
            return Vec::new();
        }
        let canvas_width = f64::from(viewport.width);
        let canvas_height = f64::from(viewport.height);
        let count = horizontal_tick_count(canvas_width, drawable_width);
        if count == 0 {
            return Vec::new();
        }
        let step = x_span / count as f64;
        (1..count)
            .map(|i| {
                let value = step * i as f64;
                AxisTick {
                    value,
                    position: ScreenPoint::new(
                        value * params.ratio_x + params.margin,
                        canvas_height - params.margin / 2.0,
                    ),
                    text: (self.formatter)(value),
                }
            })
            .collect()
    }

    /// Draws every tick label with the current context color.
    pub fn draw(&self, context: &mut dyn DrawContext, ticks: &AxisTicks) -> ChartResult<()> {
        for tick in ticks.iter() {
            context.draw_text(&tick.text, tick.position.x, tick.position.y)?;
        }
        Ok(())
    }
}

impl Default for AxisLabeler {
    fn default() -> Self {
        Self::with_significant_digits(2)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AxisLabeler, horizontal_tick_count, vertical_tick_count};
    use crate::core::{ScaleParams, Viewport};

    fn params() -> ScaleParams {
        ScaleParams {
            ratio_x: 54.0,
            ratio_y: 1.0,
            y_offset: 0.0,
            height: 380.0,
            margin: 50.0,
        }
    }

    #[test]
    fn tick_counts_follow_canvas_to_margin_ratio() {
        assert_eq!(vertical_tick_count(480.0, 380.0), 9);
        assert_eq!(horizontal_tick_count(640.0, 540.0), 6);
        assert_eq!(vertical_tick_count(480.0, 480.0), 0);
    }

    #[test]
    fn vertical_ticks_are_symmetric_around_zero() {
        let labeler = AxisLabeler::default();
        let ticks = labeler.vertical_ticks(Viewport::new(640, 480), &params());

        assert_eq!(ticks.len(), 9);
        let step = 380.0 / 9.0;
        assert_relative_eq!(ticks[0].value, -4.0 * step);
        assert_relative_eq!(ticks[8].value, 4.0 * step);
        assert_eq!(ticks[4].value, 0.0);
        assert_eq!(ticks[4].text, "0");
        // Data zero lands on the bottom edge of the drawable area.
        assert_relative_eq!(ticks[4].position.y, 430.0);
        assert_relative_eq!(ticks[4].position.x, 50.0 / 6.0);
    }

    #[test]
    fn horizontal_ticks_skip_left_edge() {
        let labeler = AxisLabeler::default();
        let ticks = labeler.horizontal_ticks(Viewport::new(640, 480), &params(), 10.0, 540.0);

        assert_eq!(ticks.len(), 5);
        let step = 10.0 / 6.0;
        assert_relative_eq!(ticks[0].value, step);
        assert_relative_eq!(ticks[0].position.x, step * 54.0 + 50.0);
        assert_relative_eq!(ticks[0].position.y, 455.0);
        assert_eq!(ticks[0].text, "1.7");
    }

    #[test]
    fn degenerate_span_has_no_horizontal_ticks() {
        let labeler = AxisLabeler::default();
        let ticks = labeler.horizontal_ticks(Viewport::new(640, 480), &params(), 0.0, 540.0);
        assert!(ticks.is_empty());
    }

    #[test]
    fn infinite_span_has_no_horizontal_ticks() {
        let labeler = AxisLabeler::default();
        let mut params = params();
        params.ratio_x = 0.0;
        let ticks =
            labeler.horizontal_ticks(Viewport::new(640, 480), &params, f64::INFINITY, 540.0);
        assert!(ticks.is_empty());
    }

    #[test]
    fn custom_formatter_is_used_for_every_label() {
        let mut labeler = AxisLabeler::default();
        labeler.set_formatter(std::sync::Arc::new(|value| format!("<{value:.0}>")));
        let ticks = labeler.vertical_ticks(Viewport::new(640, 480), &params());
        assert!(ticks.iter().all(|tick| tick.text.starts_with('<')));
    }
}
