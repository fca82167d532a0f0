//! Compositor
//!
//! Full-surface redraws in a fixed order, image fitting and image-to-grid
//! quantization.
//!
//! Draw order is background, image, cell fills, grid lines. Fills must land
//! on top of the image and lines on top of the fills; a partial redraw cannot
//! recover from getting this wrong.

use pixart_grid::{Color, GridModel, RasterImage, Size, snap_to_cell};

use crate::{
    BACKGROUND_COLOR, GRID_LINE_COLOR, GRID_LINE_WIDTH, MAX_FITTED_EDGE, Rect, RenderError,
    Surface,
};

/// Fit an image inside `MAX_FITTED_EDGE`, preserving its aspect ratio.
///
/// Fractional results are truncated.
pub fn fit_image_bounds(image: Size) -> Size {
    let (w, h) = (f64::from(image.width), f64::from(image.height));
    if image.is_empty() {
        return Size::default();
    }
    let max = f64::from(MAX_FITTED_EDGE);
    let ratio = w / h;

    let (width, height) = if ratio > 1.0 {
        let width = w.min(max);
        (width, width / ratio)
    } else if ratio < 1.0 {
        let height = h.min(max);
        (height * ratio, height)
    } else {
        let edge = w.min(max);
        (edge, edge)
    };

    Size::new(width as u32, height as u32)
}

/// Surface size for an image: fitted, then snapped down to the cell size
pub fn resize_surface_to_image(image: Size, cell_size: u32) -> Size {
    snap_to_cell(fit_image_bounds(image), cell_size)
}

/// Sample the image once per cell at the cell center.
///
/// The image is stretched over the surface, so surface coordinates are
/// scaled into image coordinates. Samples come back in canonical cell order
/// and are clamped onto the image. Translucent pixels are composited over
/// `BACKGROUND_COLOR`, the same way `redraw_all` shows them.
pub fn sample_cell_colors(image: &RasterImage, model: &GridModel) -> Vec<Color> {
    let surface = model.surface_size();
    let scale_x = f64::from(image.width()) / f64::from(surface.width.max(1));
    let scale_y = f64::from(image.height()) / f64::from(surface.height.max(1));

    model
        .cells()
        .iter()
        .map(|cell| {
            let (cx, cy) = cell.center();
            let ix = (cx * scale_x).floor() as i64;
            let iy = (cy * scale_y).floor() as i64;
            image.sample_clamped_over(ix, iy, BACKGROUND_COLOR)
        })
        .collect()
}

/// Drives a surface from a grid model
#[derive(Debug)]
pub struct Compositor<S: Surface> {
    surface: S,
}

impl<S: Surface> Compositor<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Change bounds and cell size on both the model and the surface.
    ///
    /// Validation and surface allocation happen before the model is touched,
    /// so a failure leaves model and surface as they were.
    pub fn apply_geometry(
        &mut self,
        model: &mut GridModel,
        bounds: Size,
        cell_size: u32,
    ) -> Result<Size, RenderError> {
        let planned = model.plan_reshape(bounds, cell_size)?;
        if self.surface.size() != planned {
            self.surface.resize(planned)?;
        }
        let surface = model.reshape(bounds, cell_size)?;
        tracing::debug!("Geometry applied: bounds {}, surface {}, cell {}", bounds, surface, cell_size);
        Ok(surface)
    }

    /// Change the cell size, keeping the model's bounds
    pub fn set_cell_size(&mut self, model: &mut GridModel, cell_size: u32) -> Result<Size, RenderError> {
        let bounds = model.bounds();
        self.apply_geometry(model, bounds, cell_size)
    }

    /// Fit the surface to the background image at the current cell size
    pub fn resize_surface_to_image(&mut self, model: &mut GridModel) -> Result<Size, RenderError> {
        let image = model.background_image().ok_or(RenderError::NoActiveImage)?;
        let bounds = fit_image_bounds(image.size());
        let cell_size = model.cell_size();
        self.apply_geometry(model, bounds, cell_size)
    }

    /// Redraw the whole surface from the model
    pub fn redraw_all(&mut self, model: &GridModel) -> Result<(), RenderError> {
        let size = self.surface.size();
        if size != model.surface_size() {
            return Err(RenderError::SurfaceMismatch {
                surface: size,
                grid: model.surface_size(),
            });
        }
        let full = Rect::from_size(size);

        self.surface.clear_rect(full);
        self.surface.fill_rect(full, BACKGROUND_COLOR);

        if let Some(image) = model.background_image() {
            self.surface.draw_image_scaled(image, full);
        }

        let config = model.configuration();
        for cell in model.cells() {
            let rect = Rect::from_cell(cell);
            if config.paint_fill_enabled {
                if let Some(color) = cell.fill {
                    self.surface.fill_rect(rect, color);
                }
            }
            if config.grid_lines_visible {
                self.surface.stroke_rect(rect, GRID_LINE_COLOR, GRID_LINE_WIDTH);
            }
        }

        tracing::debug!("Redrew {} cells on {} surface", model.cells().len(), size);
        Ok(())
    }

    /// Color every cell from the background image, enable fills and redraw
    pub fn quantize_image_to_grid(&mut self, model: &mut GridModel) -> Result<(), RenderError> {
        let image = model.background_image().ok_or(RenderError::NoActiveImage)?;
        let samples = sample_cell_colors(image, model);

        model.assign_fill_colors(&samples)?;
        model.set_paint_fill_enabled(true);
        tracing::info!("Quantized image into {} cells", samples.len());

        self.redraw_all(model)
    }

    /// Encode the current surface as PNG
    pub fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        let bytes = self.surface.encode_png()?;
        tracing::info!("Exported {} surface ({} bytes)", self.surface.size(), bytes.len());
        Ok(bytes)
    }
}
