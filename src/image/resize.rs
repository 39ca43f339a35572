//! Bilinear resampling for planes.

use crate::image::Plane;
use crate::util::LiveMatchResult;

/// Resizes a plane to `width x height` using bilinear sampling.
///
/// Destination pixel centres map to source coordinates with the half-pixel
/// convention `src = (dst + 0.5) * (src_len / dst_len) - 0.5`, clamped to the
/// valid range, so edges replicate instead of fading. Each channel is
/// sampled independently and rounded to the nearest integer.
pub fn resize_bilinear(src: &Plane, width: usize, height: usize) -> LiveMatchResult<Plane> {
    let channels = src.channels();
    let src_w = src.width();
    let src_h = src.height();
    if width == src_w && height == src_h {
        return Ok(src.clone());
    }

    let mut out = vec![0u8; width.saturating_mul(height).saturating_mul(channels)];
    let sx = src_w as f32 / width.max(1) as f32;
    let sy = src_h as f32 / height.max(1) as f32;
    let max_x = src_w as f32 - 1.0;
    let max_y = src_h as f32 - 1.0;
    let data = src.data();
    let row_len = src.row_len();

    for y in 0..height {
        let fy_src = ((y as f32 + 0.5) * sy - 0.5).clamp(0.0, max_y);
        let y0 = fy_src.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = fy_src - y0 as f32;
        let row0 = &data[y0 * row_len..(y0 + 1) * row_len];
        let row1 = &data[y1 * row_len..(y1 + 1) * row_len];

        for x in 0..width {
            let fx_src = ((x as f32 + 0.5) * sx - 0.5).clamp(0.0, max_x);
            let x0 = fx_src.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let fx = fx_src - x0 as f32;

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;

            for c in 0..channels {
                let a = row0[x0 * channels + c] as f32;
                let b = row0[x1 * channels + c] as f32;
                let cc = row1[x0 * channels + c] as f32;
                let d = row1[x1 * channels + c] as f32;
                let value = a * w00 + b * w10 + cc * w01 + d * w11;
                out[(y * width + x) * channels + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Plane::new(out, width, height, channels)
}
