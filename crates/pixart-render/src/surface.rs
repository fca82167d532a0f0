//! Drawing surface abstraction

use pixart_grid::{Cell, Color, RasterImage, Size};

use crate::RenderError;

/// Rectangle in surface units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle covering a whole surface
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    pub fn from_cell(cell: &Cell) -> Self {
        Self::new(
            cell.x() as f32,
            cell.y() as f32,
            cell.width() as f32,
            cell.height() as f32,
        )
    }
}

/// Raster surface primitives used by the compositor
pub trait Surface {
    /// Current surface size
    fn size(&self) -> Size;

    /// Reallocate at a new size. Contents are discarded.
    ///
    /// On failure the previous surface stays intact.
    fn resize(&mut self, size: Size) -> Result<(), RenderError>;

    /// Reset a rectangle to transparent
    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    /// Draw an image stretched to `dest`
    fn draw_image_scaled(&mut self, image: &RasterImage, dest: Rect);

    /// Color of one surface pixel, alpha dropped
    fn sample_pixel(&self, x: u32, y: u32) -> Option<Color>;

    /// Encode the surface as PNG
    fn encode_png(&self) -> Result<Vec<u8>, RenderError>;
}
