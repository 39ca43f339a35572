//! Low-level building blocks for custom matching pipelines.
//!
//! These expose preprocessing, template plans, kernels and score surfaces
//! for callers that want to drive correlation themselves. Most users should
//! prefer `find_best`, `find_all` and `LiveMatcher`.

pub use crate::candidate::{best_peak, nms_half_extents, Peak};
pub use crate::image::resize::resize_bilinear;
pub use crate::kernel::scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SimdKernel;
pub use crate::kernel::{score, Correlator, Kernel, Surface};
pub use crate::preprocess::{
    apply as preprocess, extract, gaussian_blur, gaussian_kernel, sobel_magnitude,
};
pub use crate::template::TemplatePlan;
