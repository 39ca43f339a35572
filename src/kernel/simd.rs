//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The inner template row loop is vectorized to process 8 elements at a
//! time using `f32x8`; the tail falls back to scalar code.

use crate::kernel::Kernel;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 u8 values and convert to f32x8.
#[inline]
fn load_u8x8_as_f32x8(slice: &[u8]) -> f32x8 {
    f32x8::from([
        slice[0] as f32,
        slice[1] as f32,
        slice[2] as f32,
        slice[3] as f32,
        slice[4] as f32,
        slice[5] as f32,
        slice[6] as f32,
        slice[7] as f32,
    ])
}

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Horizontal sum of f32x8.
#[inline]
fn hsum(v: f32x8) -> f32 {
    v.to_array().iter().sum()
}

/// 8-lane dot-product kernel.
pub struct SimdKernel;

impl Kernel for SimdKernel {
    #[inline]
    fn dot_row(weights: &[f32], window: &[u8]) -> f32 {
        let len = weights.len().min(window.len());
        let simd_end = len / LANES * LANES;

        let mut acc = f32x8::ZERO;
        for i in (0..simd_end).step_by(LANES) {
            acc += load_f32x8(&weights[i..]) * load_u8x8_as_f32x8(&window[i..]);
        }

        let mut tail = 0.0f32;
        for i in simd_end..len {
            tail += weights[i] * window[i] as f32;
        }
        hsum(acc) + tail
    }
}
