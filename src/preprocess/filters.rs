//! Blur and edge filters over interleaved planes.
//!
//! Both filters treat channels independently and replicate border pixels.

use crate::image::Plane;
use crate::util::LiveMatchResult;

/// Normalized 1D Gaussian weights for an odd kernel size `k`.
///
/// The standard deviation follows the usual derivation from the kernel
/// size, `sigma = 0.3 * ((k - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(k: usize) -> Vec<f32> {
    let k = if k % 2 == 0 { k + 1 } else { k.max(1) };
    let sigma = 0.3 * ((k as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (k / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Separable Gaussian blur with kernel size `k` (bumped to odd).
pub fn gaussian_blur(src: &Plane, k: usize) -> LiveMatchResult<Plane> {
    let weights = gaussian_kernel(k);
    let half = (weights.len() / 2) as isize;
    let (width, height, channels) = (src.width(), src.height(), src.channels());
    let data = src.data();

    let mut horizontal = vec![0.0f32; data.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (i, w) in weights.iter().enumerate() {
                    let sx = clamp_index(x as isize + i as isize - half, width);
                    acc += w * data[(y * width + sx) * channels + c] as f32;
                }
                horizontal[(y * width + x) * channels + c] = acc;
            }
        }
    }

    let mut out = vec![0u8; data.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (i, w) in weights.iter().enumerate() {
                    let sy = clamp_index(y as isize + i as isize - half, height);
                    acc += w * horizontal[(sy * width + x) * channels + c];
                }
                out[(y * width + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Plane::new(out, width, height, channels)
}

/// 3x3 Sobel gradient magnitude, `sqrt(gx^2 + gy^2) / 4` clamped to 255.
pub fn sobel_magnitude(src: &Plane) -> LiveMatchResult<Plane> {
    let (width, height, channels) = (src.width(), src.height(), src.channels());
    let data = src.data();
    let at = |x: isize, y: isize, c: usize| -> f32 {
        let xi = clamp_index(x, width);
        let yi = clamp_index(y, height);
        data[(yi * width + xi) * channels + c] as f32
    };

    let mut out = vec![0u8; data.len()];
    for y in 0..height as isize {
        for x in 0..width as isize {
            for c in 0..channels {
                let gx = (at(x + 1, y - 1, c) + 2.0 * at(x + 1, y, c) + at(x + 1, y + 1, c))
                    - (at(x - 1, y - 1, c) + 2.0 * at(x - 1, y, c) + at(x - 1, y + 1, c));
                let gy = (at(x - 1, y + 1, c) + 2.0 * at(x, y + 1, c) + at(x + 1, y + 1, c))
                    - (at(x - 1, y - 1, c) + 2.0 * at(x, y - 1, c) + at(x + 1, y - 1, c));
                let magnitude = (gx * gx + gy * gy).sqrt() * 0.25;
                out[(y as usize * width + x as usize) * channels + c] =
                    magnitude.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Plane::new(out, width, height, channels)
}
