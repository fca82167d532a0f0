//! pixart Render - Compositor
//!
//! Redraws the grid model onto a raster surface and quantizes background
//! images into the grid.
//!
//! This crate provides:
//! - `Surface` trait over the drawing primitives the compositor needs
//! - `PixmapSurface` backed by a tiny-skia Pixmap, with PNG export
//! - `DisplayList`, a recording surface for headless inspection
//! - `Compositor`: ordered full redraws, image fitting and quantization
//! - Image decoding via the image crate

mod surface;
mod pixmap;
mod display_list;
mod compositor;
pub mod image;

pub use surface::{Surface, Rect};
pub use pixmap::PixmapSurface;
pub use display_list::{DisplayList, DrawCommand};
pub use compositor::{Compositor, fit_image_bounds, resize_surface_to_image, sample_cell_colors};
pub use crate::image::{decode_image, ImageFormat};

use pixart_grid::{Color, GridError, Size};

/// Neutral background painted under everything
pub const BACKGROUND_COLOR: Color = Color::WHITE;

/// Grid line stroke color
pub const GRID_LINE_COLOR: Color = Color::BLACK;

/// Grid line stroke width
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// Longest edge a fitted image may occupy
pub const MAX_FITTED_EDGE: u32 = 600;

/// Render error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("No background image loaded")]
    NoActiveImage,

    #[error("Decode failed: {0}")]
    DecodeFailure(String),

    #[error("Cannot allocate {0} surface")]
    SurfaceAllocation(Size),

    #[error("Surface is {surface} but the grid tiles {grid}")]
    SurfaceMismatch { surface: Size, grid: Size },

    #[error("Encode failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}
