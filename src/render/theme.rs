use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

/// Palette used by the frame, the axes, the draw styles and the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub frame: Color,
    pub axis_text: Color,
    pub line_stroke: Color,
    pub bar_fill: Color,
    pub area_fill: Color,
    pub cursor_guide: Color,
    pub cursor_box: Color,
    pub cursor_text: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0.84, 0.72, 0.40),
            frame: Color::WHITE,
            axis_text: Color::BLACK,
            line_stroke: Color::BLACK,
            bar_fill: Color::rgb(0.0, 0.3, 0.5),
            area_fill: Color::rgba(0.0, 0.3, 0.5, 0.6),
            cursor_guide: Color::rgb(0.6, 0.0, 0.0),
            cursor_box: Color::WHITE,
            cursor_text: Color::BLACK,
        }
    }
}

impl ChartTheme {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background,
            self.frame,
            self.axis_text,
            self.line_stroke,
            self.bar_fill,
            self.area_fill,
            self.cursor_guide,
            self.cursor_box,
            self.cursor_text,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
