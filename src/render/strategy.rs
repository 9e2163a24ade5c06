use serde::{Deserialize, Serialize};

use crate::core::{DrawableBounds, ScreenPoint};
use crate::error::ChartResult;
use crate::render::{ChartTheme, Color, DrawContext};

/// Per-sample information handed to [`DrawStrategy::point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleContext {
    pub index: usize,
    pub sample_count: usize,
    /// Canvas y of the data value `0`.
    pub baseline_y: f64,
    pub bounds: DrawableBounds,
}

impl SampleContext {
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.sample_count
    }
}

/// Visual style of a series, driven by the render pipeline.
///
/// The pipeline calls `begin` once with the first sample, `point` once per
/// sample in series order and `end` once. Implementations hold no per-frame
/// state; everything they need arrives through the arguments, and the
/// pipeline restores the context state after `end`.
pub trait DrawStrategy {
    fn begin(&self, context: &mut dyn DrawContext, first: ScreenPoint) -> ChartResult<()>;

    fn point(
        &self,
        context: &mut dyn DrawContext,
        point: ScreenPoint,
        sample: SampleContext,
    ) -> ChartResult<()>;

    fn end(&self, context: &mut dyn DrawContext) -> ChartResult<()>;
}

/// Polyline through all samples, stroked once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStrategy {
    pub color: Color,
}

impl DrawStrategy for LineStrategy {
    fn begin(&self, context: &mut dyn DrawContext, first: ScreenPoint) -> ChartResult<()> {
        context.set_color(self.color);
        context.move_to(first.x, first.y);
        Ok(())
    }

    fn point(
        &self,
        context: &mut dyn DrawContext,
        point: ScreenPoint,
        sample: SampleContext,
    ) -> ChartResult<()> {
        // `begin` already placed the path at the first sample.
        if !sample.is_first() {
            context.line_to(point.x, point.y);
        }
        Ok(())
    }

    fn end(&self, context: &mut dyn DrawContext) -> ChartResult<()> {
        context.stroke()
    }
}

/// One filled bar per sample, from the zero baseline to the value.
///
/// Bars share the drawable width evenly and are centered on their sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStrategy {
    pub color: Color,
}

impl BarStrategy {
    #[must_use]
    pub fn bar_width(bounds: DrawableBounds, sample_count: usize) -> f64 {
        bounds.width / sample_count.max(1) as f64
    }
}

impl DrawStrategy for BarStrategy {
    fn begin(&self, context: &mut dyn DrawContext, _first: ScreenPoint) -> ChartResult<()> {
        context.set_color(self.color);
        Ok(())
    }

    fn point(
        &self,
        context: &mut dyn DrawContext,
        point: ScreenPoint,
        sample: SampleContext,
    ) -> ChartResult<()> {
        let width = Self::bar_width(sample.bounds, sample.sample_count);
        context.rectangle(
            point.x - width / 2.0,
            point.y,
            width,
            sample.baseline_y - point.y,
        );
        Ok(())
    }

    fn end(&self, context: &mut dyn DrawContext) -> ChartResult<()> {
        context.fill()
    }
}

/// Region between the zero baseline and the curve, filled once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaStrategy {
    pub color: Color,
}

impl DrawStrategy for AreaStrategy {
    fn begin(&self, context: &mut dyn DrawContext, _first: ScreenPoint) -> ChartResult<()> {
        context.set_color(self.color);
        Ok(())
    }

    fn point(
        &self,
        context: &mut dyn DrawContext,
        point: ScreenPoint,
        sample: SampleContext,
    ) -> ChartResult<()> {
        if sample.is_first() {
            context.move_to(point.x, sample.baseline_y);
        }
        context.line_to(point.x, point.y);
        if sample.is_last() {
            context.line_to(point.x, sample.baseline_y);
        }
        Ok(())
    }

    fn end(&self, context: &mut dyn DrawContext) -> ChartResult<()> {
        context.fill()
    }
}

/// Built-in draw styles selectable at chart construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStyle {
    Line,
    Bar,
    Area,
}

impl DrawStyle {
    #[must_use]
    pub fn strategy(self, theme: &ChartTheme) -> Box<dyn DrawStrategy> {
        match self {
            Self::Line => Box::new(LineStrategy {
                color: theme.line_stroke,
            }),
            Self::Bar => Box::new(BarStrategy {
                color: theme.bar_fill,
            }),
            Self::Area => Box::new(AreaStrategy {
                color: theme.area_fill,
            }),
        }
    }
}
