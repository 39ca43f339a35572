//! Correlation kernels and score surfaces.
//!
//! A `Kernel` supplies the per-placement dot product between a template
//! and a source window; window sums come from integral images, so the
//! metric formulas only need `(dot, sum, sum_sq)` per placement.

mod surface;

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use surface::Surface;

use crate::image::integral::IntegralImage;
use crate::image::{ImageView, Plane};
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::util::{LiveMatchError, LiveMatchResult};

/// Windows whose centred energy falls below this are treated as flat.
pub(crate) const FLAT_EPS: f64 = 1e-3;

/// Dot-product kernel used for every placement of a correlation scan.
pub trait Kernel {
    /// Dot product of one template row with an equally long window row.
    fn dot_row(weights: &[f32], window: &[u8]) -> f32;

    /// Dot product of the template `weights` (`row_len` elements per row)
    /// with the window whose top-left element is `(x, y)`.
    ///
    /// The caller guarantees the window lies inside `image`.
    #[inline]
    fn dot_at(
        image: ImageView<'_, u8>,
        weights: &[f32],
        row_len: usize,
        x: usize,
        y: usize,
    ) -> f64 {
        let mut acc = 0.0f64;
        for (ty, tpl_row) in weights.chunks_exact(row_len).enumerate() {
            if let Some(img_row) = image.row(y + ty) {
                acc += f64::from(Self::dot_row(tpl_row, &img_row[x..x + row_len]));
            }
        }
        acc
    }
}

#[cfg(feature = "simd")]
pub(crate) type DefaultKernel = simd::SimdKernel;

#[cfg(not(feature = "simd"))]
pub(crate) type DefaultKernel = scalar::ScalarKernel;

/// Scores one placement from its dot product and window statistics.
///
/// For `Zncc` the dot product must be taken against the mean-centred
/// template values (`TemplatePlan::weights`).
pub fn score(metric: Metric, tpl: &TemplatePlan, dot: f64, sum_i: f64, sum_sq_i: f64) -> f32 {
    let n = tpl.len() as f64;
    match metric {
        Metric::Zncc => {
            let var_t = tpl.centered_energy();
            let var_i = (sum_sq_i - sum_i * sum_i / n).max(0.0);
            // Zero variance on either side carries no correlation signal.
            if var_t <= FLAT_EPS || var_i <= FLAT_EPS {
                return 0.0;
            }
            ((dot / (var_t * var_i).sqrt()) as f32).clamp(-1.0, 1.0)
        }
        Metric::Ncc => {
            let denom = (tpl.sum_sq() * sum_sq_i).sqrt();
            if denom <= 0.0 {
                return if tpl.sum_sq() <= 0.0 && sum_sq_i <= 0.0 { 1.0 } else { 0.0 };
            }
            ((dot / denom) as f32).clamp(0.0, 1.0)
        }
        Metric::SqDiffNormed => {
            let denom = (tpl.sum_sq() * sum_sq_i).sqrt();
            if denom <= 0.0 {
                return if tpl.sum_sq() <= 0.0 && sum_sq_i <= 0.0 { 0.0 } else { 1.0 };
            }
            (((sum_sq_i - 2.0 * dot + tpl.sum_sq()) / denom) as f32).clamp(0.0, 1.0)
        }
    }
}

/// Correlates templates against one preprocessed source.
///
/// The integral images are built once and shared by every template scale
/// scanned against the same source.
pub struct Correlator<'a> {
    source: &'a Plane,
    integral: IntegralImage,
}

impl<'a> Correlator<'a> {
    pub fn new(source: &'a Plane) -> Self {
        Self {
            source,
            integral: IntegralImage::new(source),
        }
    }

    pub fn source(&self) -> &Plane {
        self.source
    }

    /// Builds the full score surface for `tpl`, or `None` when the template
    /// does not fit inside the source.
    pub fn surface(
        &self,
        tpl: &TemplatePlan,
        metric: Metric,
        parallel: bool,
    ) -> LiveMatchResult<Option<Surface>> {
        if tpl.channels() != self.source.channels() {
            return Err(LiveMatchError::InvalidInput(
                "template and source channel counts differ",
            ));
        }
        if tpl.width() > self.source.width() || tpl.height() > self.source.height() {
            return Ok(None);
        }
        let width = self.source.width() - tpl.width() + 1;
        let height = self.source.height() - tpl.height() + 1;
        let mut data = vec![metric.worst_score(); width * height];
        let scan = RowScan {
            image: self.source.view(),
            integral: &self.integral,
            tpl,
            metric,
        };
        fill::<DefaultKernel>(&scan, &mut data, width, parallel);
        Ok(Some(Surface::from_vec(data, width, height)))
    }
}

/// Everything a row of placements needs; shared read-only across threads.
pub(crate) struct RowScan<'a> {
    image: ImageView<'a, u8>,
    integral: &'a IntegralImage,
    tpl: &'a TemplatePlan,
    metric: Metric,
}

impl RowScan<'_> {
    /// Scores every placement of row `y` into `out`.
    pub(crate) fn score_row<K: Kernel>(&self, y: usize, out: &mut [f32]) {
        let channels = self.tpl.channels();
        let row_len = self.tpl.row_len();
        let weights = self.tpl.weights(self.metric);
        for (x, slot) in out.iter_mut().enumerate() {
            let ex = x * channels;
            let dot = K::dot_at(self.image, weights, row_len, ex, y);
            let (sum_i, sum_sq_i) = self.integral.window(ex, y, row_len, self.tpl.height());
            *slot = score(self.metric, self.tpl, dot, sum_i, sum_sq_i);
        }
    }
}

fn fill_rows<K: Kernel>(scan: &RowScan<'_>, data: &mut [f32], width: usize) {
    for (y, row) in data.chunks_mut(width).enumerate() {
        scan.score_row::<K>(y, row);
    }
}

#[cfg(feature = "rayon")]
fn fill<K: Kernel>(scan: &RowScan<'_>, data: &mut [f32], width: usize, parallel: bool) {
    if parallel {
        self::rayon::fill_rows_par::<K>(scan, data, width);
    } else {
        fill_rows::<K>(scan, data, width);
    }
}

#[cfg(not(feature = "rayon"))]
fn fill<K: Kernel>(scan: &RowScan<'_>, data: &mut [f32], width: usize, _parallel: bool) {
    fill_rows::<K>(scan, data, width);
}
