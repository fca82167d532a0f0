//! Image loading
//!
//! File reads and decoding run on smol's blocking pool. The session only sees
//! the image once the returned future resolves and its result is delivered as
//! an `ImageDecoded` event.

use std::path::PathBuf;

use pixart_grid::RasterImage;
use pixart_render::{RenderError, decode_image};

/// Read and decode an image file off the event thread
pub async fn load_image_file(path: impl Into<PathBuf>) -> Result<RasterImage, RenderError> {
    let path = path.into();
    tracing::info!("Loading image {}", path.display());

    smol::unblock(move || {
        let bytes = std::fs::read(&path)
            .map_err(|e| RenderError::DecodeFailure(format!("{}: {}", path.display(), e)))?;
        decode_image(&bytes)
    })
    .await
}

/// Decode already-read image bytes off the event thread
pub async fn load_image_bytes(bytes: Vec<u8>) -> Result<RasterImage, RenderError> {
    smol::unblock(move || decode_image(&bytes)).await
}
