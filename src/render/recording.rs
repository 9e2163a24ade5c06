use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawContext, FontHandle, FramePainter, RasterBuffer, Renderer, TextExtent,
    estimate_text_extent,
};

/// Font size assumed for text measurement when no font handle is set.
pub const FALLBACK_FONT_SIZE_PX: f64 = 11.0;

/// One element of a path handed to `fill` or `stroke`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

/// Path consumed by one paint operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPath {
    pub elements: Vec<PathElement>,
}

impl RecordedPath {
    /// Number of straight segments appended with `line_to`.
    #[must_use]
    pub fn line_segment_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, PathElement::LineTo { .. }))
            .count()
    }

    /// Number of `move_to` calls, i.e. separate polylines.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, PathElement::MoveTo { .. }))
            .count()
    }

    /// Rectangles as `(x, y, width, height)`.
    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.elements.iter().filter_map(|element| match *element {
            PathElement::Rect {
                x,
                y,
                width,
                height,
            } => Some((x, y, width, height)),
            _ => None,
        })
    }
}

/// Observable effect of one `DrawContext` call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    SetColor(Color),
    SetFontFace { points: f64 },
    Save,
    Restore,
    Fill { color: Color, path: RecordedPath },
    Stroke { color: Color, path: RecordedPath },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: Color,
    },
}

#[derive(Debug, Clone)]
struct PaintState {
    color: Color,
    font: Option<FontHandle>,
}

/// Drawing context that records calls instead of rasterizing them.
///
/// Only `clear` touches the pixels of the target buffer.
pub struct RecordingContext<'a> {
    buffer: &'a mut RasterBuffer,
    state: PaintState,
    saved: SmallVec<[PaintState; 4]>,
    path: RecordedPath,
    commands: Vec<DrawCommand>,
}

impl<'a> RecordingContext<'a> {
    #[must_use]
    pub fn new(buffer: &'a mut RasterBuffer) -> Self {
        Self {
            buffer,
            state: PaintState {
                color: Color::BLACK,
                font: None,
            },
            saved: SmallVec::new(),
            path: RecordedPath::default(),
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl DrawContext for RecordingContext<'_> {
    fn set_color(&mut self, color: Color) {
        self.state.color = color;
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.elements.push(PathElement::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.elements.push(PathElement::LineTo { x, y });
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.path.elements.push(PathElement::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill(&mut self) -> ChartResult<()> {
        let path = std::mem::take(&mut self.path);
        self.commands.push(DrawCommand::Fill {
            color: self.state.color,
            path,
        });
        Ok(())
    }

    fn stroke(&mut self) -> ChartResult<()> {
        let path = std::mem::take(&mut self.path);
        self.commands.push(DrawCommand::Stroke {
            color: self.state.color,
            path,
        });
        Ok(())
    }

    fn save(&mut self) -> ChartResult<()> {
        self.saved.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        let state = self.saved.pop().ok_or_else(|| {
            ChartError::Backend("restore called without a matching save".to_owned())
        })?;
        self.state = state;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> TextExtent {
        match &self.state.font {
            Some(font) => font.measure(text),
            None => estimate_text_extent(text, FALLBACK_FONT_SIZE_PX),
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color: self.state.color,
        });
        Ok(())
    }

    fn set_font_face(&mut self, font: &FontHandle) {
        self.state.font = Some(font.clone());
        self.commands.push(DrawCommand::SetFontFace {
            points: font.points(),
        });
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.path = RecordedPath::default();
        self.buffer.fill(color);
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }
}

/// Headless renderer that keeps the command list of the last frame.
///
/// Used by tests and by hosts that only need geometry, not pixels.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    last_commands: Vec<DrawCommand>,
    frames_painted: usize,
}

impl RecordingRenderer {
    #[must_use]
    pub fn last_commands(&self) -> &[DrawCommand] {
        &self.last_commands
    }

    #[must_use]
    pub fn frames_painted(&self) -> usize {
        self.frames_painted
    }

    /// Paint operations of the last frame, in order.
    pub fn paints(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.last_commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Fill { .. } | DrawCommand::Stroke { .. }))
    }

    /// Text runs of the last frame, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.last_commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn paint(
        &mut self,
        buffer: &mut RasterBuffer,
        frame: &mut FramePainter<'_>,
    ) -> ChartResult<()> {
        let mut context = RecordingContext::new(buffer);
        let result = frame(&mut context);
        let unbalanced = context.save_depth();
        self.last_commands = context.into_commands();
        self.frames_painted += 1;
        result?;
        if unbalanced != 0 {
            return Err(ChartError::Backend(format!(
                "frame finished with {unbalanced} unrestored save(s)"
            )));
        }
        Ok(())
    }
}
