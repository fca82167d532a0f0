//! Display List
//!
//! Recording surface. Stores every primitive instead of rasterizing it,
//! which makes draw order observable without pixels.

use pixart_grid::{Color, RasterImage, Size};

use crate::{Rect, RenderError, Surface};

/// Recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface reallocated
    Resize(Size),
    /// Rect reset to transparent
    Clear(Rect),
    /// Solid rect fill
    FillRect(Rect, Color),
    /// Rect border
    StrokeRect { rect: Rect, color: Color, line_width: f32 },
    /// Image stretched into a rect
    DrawImage { source: Size, dest: Rect },
}

/// Surface that records commands
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self { size, commands: Vec::new() }
    }

    /// Commands recorded since the last `take_commands`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded border strokes
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::StrokeRect { .. }))
            .count()
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), RenderError> {
        if size.is_empty() {
            return Err(RenderError::SurfaceAllocation(size));
        }
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, line_width });
    }

    fn draw_image_scaled(&mut self, image: &RasterImage, dest: Rect) {
        self.commands.push(DrawCommand::DrawImage { source: image.size(), dest });
    }

    /// Recording has no pixels; answers with the last fill covering the point.
    fn sample_pixel(&self, x: u32, y: u32) -> Option<Color> {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DrawCommand::FillRect(r, color)
                if px >= r.x && px < r.x + r.width && py >= r.y && py < r.y + r.height =>
            {
                Some(*color)
            }
            _ => None,
        })
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Encode("display list holds no pixels".to_string()))
    }
}
