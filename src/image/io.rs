//! Convenience helpers for loading pixels via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{PixelBuffer, PixelFormat};
use crate::util::{LiveMatchError, LiveMatchResult};
use std::path::Path;

/// Creates a pixel buffer from an RGBA image buffer.
pub fn pixels_from_rgba_image(img: &image::RgbaImage) -> LiveMatchResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_packed(img.as_raw().clone(), width, height, PixelFormat::Rgba8)
}

/// Creates a pixel buffer from any decoded image.
pub fn pixels_from_dynamic_image(img: &image::DynamicImage) -> LiveMatchResult<PixelBuffer> {
    pixels_from_rgba_image(&img.to_rgba8())
}

/// Loads an image from disk as an RGBA pixel buffer.
pub fn load_pixels<P: AsRef<Path>>(path: P) -> LiveMatchResult<PixelBuffer> {
    let img = image::open(path).map_err(|err| LiveMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    pixels_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image (PNG or JPEG) as an RGBA pixel buffer.
pub fn decode_pixels(bytes: &[u8]) -> LiveMatchResult<PixelBuffer> {
    let img = image::load_from_memory(bytes).map_err(|err| LiveMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    pixels_from_dynamic_image(&img)
}
