//! Background raster image
//!
//! A decoded RGBA image held by the grid model. Replaced wholesale on load.

use crate::{Color, Size};

/// A decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    /// RGBA pixel data, row-major
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create from raw RGBA data
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RasterError::InvalidDataLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create an image of a single color
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Self, RasterError> {
        let pixel = [color.r, color.g, color.b, 255];
        let count = width as usize * height as usize;
        Self::from_rgba(pixel.repeat(count), width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw RGBA data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at (x, y), or `None` outside the image. Alpha is dropped.
    pub fn sample_at(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some(Color::rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    /// Color at (x, y) with coordinates clamped onto the image
    pub fn sample_clamped(&self, x: i64, y: i64) -> Color {
        let [r, g, b, _] = self.rgba_clamped(x, y);
        Color::rgb(r, g, b)
    }

    /// Clamped sample composited over `backdrop` by its alpha.
    ///
    /// Matches what the image looks like once drawn onto a surface filled
    /// with `backdrop`.
    pub fn sample_clamped_over(&self, x: i64, y: i64, backdrop: Color) -> Color {
        let [r, g, b, a] = self.rgba_clamped(x, y);
        let a = u32::from(a);
        let blend = |c: u8, under: u8| ((u32::from(c) * a + u32::from(under) * (255 - a)) / 255) as u8;
        Color::rgb(blend(r, backdrop.r), blend(g, backdrop.g), blend(b, backdrop.b))
    }

    fn rgba_clamped(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2], self.pixels[idx + 3]]
    }
}

/// Raster construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("Image has zero width or height")]
    Empty,

    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}
