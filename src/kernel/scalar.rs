//! Scalar reference kernel.

use crate::kernel::Kernel;

/// Plain iterator dot product; the reference every other kernel is
/// checked against.
pub struct ScalarKernel;

impl Kernel for ScalarKernel {
    #[inline]
    fn dot_row(weights: &[f32], window: &[u8]) -> f32 {
        weights
            .iter()
            .zip(window)
            .map(|(&w, &v)| w * v as f32)
            .sum()
    }
}
