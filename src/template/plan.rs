//! Template plan precomputation for correlation metrics.

use crate::image::Plane;
use crate::search::Metric;
use crate::util::{LiveMatchError, LiveMatchResult};

/// Template values as `f32` plus the statistics every metric needs.
///
/// Values are stored in row-major element order, so a 3-channel template
/// row holds `3 * width` interleaved values. A mean-centred copy is kept
/// for ZNCC so its numerator is a single dot product without cancellation.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    channels: usize,
    values: Vec<f32>,
    centered: Vec<f32>,
    sum: f64,
    sum_sq: f64,
}

impl TemplatePlan {
    /// Builds a plan from a preprocessed (and possibly resized) template.
    pub fn from_plane(tpl: &Plane) -> LiveMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = tpl
            .row_len()
            .checked_mul(height)
            .ok_or(LiveMatchError::InvalidDimensions { width, height })?;

        let mut values = Vec::with_capacity(count);
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &value in tpl.data() {
            let v = f64::from(value);
            sum += v;
            sum_sq += v * v;
            values.push(value as f32);
        }

        let mean = sum / count.max(1) as f64;
        let centered = tpl.data().iter().map(|&v| (f64::from(v) - mean) as f32).collect();

        Ok(Self {
            width,
            height,
            channels: tpl.channels(),
            values,
            centered,
            sum,
            sum_sq,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Elements per template row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Number of elements compared per placement.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Template values in row-major element order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mean-centred template values.
    pub fn centered(&self) -> &[f32] {
        &self.centered
    }

    /// Values the kernel dot product runs against for `metric`.
    pub fn weights(&self, metric: Metric) -> &[f32] {
        match metric {
            Metric::Zncc => &self.centered,
            Metric::Ncc | Metric::SqDiffNormed => &self.values,
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Mean element value.
    pub fn mean(&self) -> f64 {
        self.sum / self.values.len().max(1) as f64
    }

    /// Sum of squared deviations from the mean (`n * variance`).
    pub fn centered_energy(&self) -> f64 {
        (self.sum_sq - self.sum * self.sum / self.values.len().max(1) as f64).max(0.0)
    }
}
