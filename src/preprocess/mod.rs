//! Scale-independent preprocessing shared by frames and templates.
//!
//! The pipeline runs in a fixed order: channel extraction (grayscale or
//! RGB), Gaussian blur when the kernel is larger than 1x1, then Sobel edge
//! magnitude. Frames run it on every search; templates run it once per
//! `PreprocessKey` through the variant cache.

mod filters;

pub use filters::{gaussian_blur, gaussian_kernel, sobel_magnitude};

use crate::image::{PixelBuffer, Plane, Rect, BYTES_PER_PIXEL};
use crate::util::{LiveMatchError, LiveMatchResult};

/// Identity of one preprocessed representation.
///
/// `blur_kernel` is normalized: 0 and 1 mean no blur, even sizes are bumped
/// to the next odd size, so equivalent option sets share one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PreprocessKey {
    pub grayscale: bool,
    pub edge: bool,
    pub blur_kernel: u32,
}

impl PreprocessKey {
    pub fn new(grayscale: bool, edge: bool, blur_kernel: Option<u32>) -> Self {
        Self {
            grayscale,
            edge,
            blur_kernel: normalize_kernel(blur_kernel.unwrap_or(0)),
        }
    }

    /// Output channel count for this key.
    pub fn channels(&self) -> usize {
        if self.grayscale {
            1
        } else {
            3
        }
    }

    pub fn blurs(&self) -> bool {
        self.blur_kernel > 1
    }
}

fn normalize_kernel(k: u32) -> u32 {
    match k {
        0 | 1 => 0,
        k if k % 2 == 0 => k.saturating_add(1),
        k => k,
    }
}

/// Runs the preprocessing pipeline over `region` of `pixels` (whole buffer
/// when `None`). The region must already be clamped to the buffer.
pub fn apply(
    pixels: &PixelBuffer,
    region: Option<Rect>,
    key: &PreprocessKey,
) -> LiveMatchResult<Plane> {
    let mut plane = extract(pixels, region, key.grayscale)?;
    if key.blurs() {
        plane = gaussian_blur(&plane, key.blur_kernel as usize)?;
    }
    if key.edge {
        plane = sobel_magnitude(&plane)?;
    }
    Ok(plane)
}

/// Converts a region of 4-byte pixels to a grayscale or RGB plane.
///
/// Grayscale uses BT.601 weights in 8.8 fixed point:
/// `(77 r + 150 g + 29 b + 128) >> 8`.
pub fn extract(
    pixels: &PixelBuffer,
    region: Option<Rect>,
    grayscale: bool,
) -> LiveMatchResult<Plane> {
    let (x0, y0, width, height) = match region {
        Some(r) => (r.x.max(0) as usize, r.y.max(0) as usize, r.width as usize, r.height as usize),
        None => (0, 0, pixels.width(), pixels.height()),
    };
    let view = pixels
        .view()
        .roi(x0 * BYTES_PER_PIXEL, y0, width * BYTES_PER_PIXEL, height)?;
    let format = pixels.format();
    let channels = if grayscale { 1 } else { 3 };
    let mut out = Vec::with_capacity(width * height * channels);

    for y in 0..height {
        let row = view.row(y).ok_or(LiveMatchError::BufferTooSmall {
            needed: (y0 + y + 1) * pixels.stride(),
            got: pixels.as_bytes().len(),
        })?;
        for px in row.chunks_exact(BYTES_PER_PIXEL) {
            let [r, g, b] = format.rgb(px);
            if grayscale {
                let luma = 77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b) + 128;
                out.push((luma >> 8) as u8);
            } else {
                out.extend_from_slice(&[r, g, b]);
            }
        }
    }

    Plane::new(out, width, height, channels)
}
