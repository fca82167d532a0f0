//! Pixmap surface - tiny-skia backed raster

use pixart_grid::{Color, RasterImage, Size};
use tiny_skia::{
    BlendMode, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::{Rect, RenderError, Surface};

/// Surface backed by a tiny-skia Pixmap
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Create a transparent surface
    pub fn new(size: Size) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(size.width, size.height)
            .ok_or(RenderError::SurfaceAllocation(size))?;
        Ok(Self { pixmap })
    }

    /// Premultiplied RGBA data
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = false;
    paint
}

/// Convert straight RGBA into a premultiplied pixmap
fn image_to_pixmap(image: &RasterImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = image.pixels().to_vec();
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for channel in &mut px[..3] {
            *channel = ((u16::from(*channel) * a + 127) / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size)
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, size: Size) -> Result<(), RenderError> {
        self.pixmap = Pixmap::new(size.width, size.height)
            .ok_or(RenderError::SurfaceAllocation(size))?;
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) {
        if let Some(rect) = to_skia_rect(rect) {
            let mut paint = Paint::default();
            paint.blend_mode = BlendMode::Clear;
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if let Some(rect) = to_skia_rect(rect) {
            self.pixmap.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: line_width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &solid_paint(color), &stroke, Transform::identity(), None);
    }

    fn draw_image_scaled(&mut self, image: &RasterImage, dest: Rect) {
        let Some(source) = image_to_pixmap(image) else {
            tracing::warn!("Skipping image draw: {}x{} source", image.width(), image.height());
            return;
        };
        let sx = dest.width / image.width() as f32;
        let sy = dest.height / image.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, dest.x, dest.y),
            None,
        );
    }

    fn sample_pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgb(px.red(), px.green(), px.blue()))
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}
