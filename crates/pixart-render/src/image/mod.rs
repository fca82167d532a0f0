//! Image handling module
//!
//! Decodes user-selected files into background images.

mod decoder;

pub use decoder::{ImageFormat, decode_image, decode_image_with_format};
