//! Image decoder for various formats
//!
//! Supports PNG, JPEG, GIF, WebP and BMP via the image crate.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat as ImgFormat};
use pixart_grid::RasterImage;

use crate::RenderError;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Self::Gif;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        // BMP: BM
        if data.len() >= 14 && data.starts_with(b"BM") {
            return Self::Bmp;
        }

        Self::Unknown
    }

    fn to_image_format(self) -> Option<ImgFormat> {
        match self {
            Self::Png => Some(ImgFormat::Png),
            Self::Jpeg => Some(ImgFormat::Jpeg),
            Self::Gif => Some(ImgFormat::Gif),
            Self::WebP => Some(ImgFormat::WebP),
            Self::Bmp => Some(ImgFormat::Bmp),
            Self::Unknown => None,
        }
    }
}

/// Decode image bytes, detecting the format from magic bytes
pub fn decode_image(data: &[u8]) -> Result<RasterImage, RenderError> {
    decode_image_with_format(data, ImageFormat::from_bytes(data))
}

/// Decode with a known format
pub fn decode_image_with_format(data: &[u8], format: ImageFormat) -> Result<RasterImage, RenderError> {
    let img_format = format
        .to_image_format()
        .ok_or_else(|| RenderError::DecodeFailure("unsupported image format".to_string()))?;

    let img = image::load(Cursor::new(data), img_format)
        .map_err(|e| RenderError::DecodeFailure(e.to_string()))?;

    let raster = to_raster(img)?;
    tracing::info!("Decoded {:?} image {}", format, raster.size());
    Ok(raster)
}

fn to_raster(img: DynamicImage) -> Result<RasterImage, RenderError> {
    let (width, height) = img.dimensions();
    let rgba = img.into_rgba8();
    RasterImage::from_rgba(rgba.into_raw(), width, height)
        .map_err(|e| RenderError::DecodeFailure(e.to_string()))
}
