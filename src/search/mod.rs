//! Search strategies for locating template matches in frames.
//!
//! `find_best` sweeps template scales and keeps the single best placement;
//! `find_all` extracts several placements from one unit-scale surface with
//! non-maximum suppression. Both share ROI clamping and preprocessing.

mod metric;
mod multi;
mod scale;

pub use metric::Metric;
pub use multi::find_all;
pub use scale::find_best;

use crate::image::{PixelBuffer, Point, Rect};
use crate::preprocess::PreprocessKey;
use crate::util::math::scale_range;

/// Options for a single search.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOptions {
    /// Correlation metric; fixes the score direction.
    pub metric: Metric,
    /// Acceptance threshold in `[0, 1]`. Lower-is-better metrics accept
    /// scores at or below `1 - threshold`.
    pub threshold: f32,
    /// Scale sweep bounds (inclusive); their order does not matter.
    pub scale_min: f32,
    pub scale_max: f32,
    /// Sweep increment; non-positive values fall back to 0.01.
    pub scale_step: f32,
    /// Region of interest in frame pixels; clamped to the frame.
    pub roi: Option<Rect>,
    pub grayscale: bool,
    /// Match on Sobel edge magnitude instead of intensity.
    pub edge: bool,
    /// Gaussian blur kernel size (`None`, 0 and 1 disable blurring).
    pub blur_kernel: Option<u32>,
    /// Stable polls required before a wait returns.
    pub consecutive_hits_required: u32,
    /// Single-shot searches retry without locality unless this holds.
    pub require_hard_pass: bool,
    /// Score surface rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            metric: Metric::Zncc,
            threshold: 0.8,
            scale_min: 1.0,
            scale_max: 1.0,
            scale_step: 0.05,
            roi: None,
            grayscale: true,
            edge: false,
            blur_kernel: None,
            consecutive_hits_required: 1,
            require_hard_pass: true,
            parallel: false,
        }
    }
}

impl MatchOptions {
    /// Preprocessing identity shared by the frame and the template variant.
    pub fn preprocess_key(&self) -> PreprocessKey {
        PreprocessKey::new(self.grayscale, self.edge, self.blur_kernel)
    }

    /// Scales visited by the sweep, ascending.
    pub fn scales(&self) -> Vec<f32> {
        scale_range(self.scale_min, self.scale_max, self.scale_step)
    }

    /// Whether `score` clears the threshold under the metric's direction.
    pub fn is_hard_pass(&self, score: f32) -> bool {
        self.metric.passes(score, self.threshold)
    }
}

/// One located template instance, in absolute frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    pub bounds: Rect,
    pub center: Point,
    pub score: f32,
    pub scale: f32,
    pub hard_pass: bool,
}

impl MatchResult {
    pub(crate) fn new(bounds: Rect, score: f32, scale: f32, hard_pass: bool) -> Self {
        Self {
            bounds,
            center: bounds.center(),
            score,
            scale,
            hard_pass,
        }
    }
}

/// Clamps the optional ROI to the buffer; `None` when nothing remains.
pub(crate) fn resolve_region(pixels: &PixelBuffer, roi: Option<Rect>) -> Option<Rect> {
    match roi {
        Some(roi) => roi.clamp_to(pixels.width(), pixels.height()),
        None => Some(Rect::new(0, 0, pixels.width() as u32, pixels.height() as u32)),
    }
}
