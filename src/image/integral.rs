//! Summed-area tables for constant-time window statistics.

use crate::image::Plane;

/// Integral images of element values and squared values over a plane.
///
/// Columns are counted in elements, so a window of `w` pixels on a
/// 3-channel plane spans `3 * w` columns.
pub(crate) struct IntegralImage {
    cols: usize,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl IntegralImage {
    pub(crate) fn new(plane: &Plane) -> Self {
        let cols = plane.row_len();
        let rows = plane.height();
        let stride = cols + 1;
        let mut sum = vec![0.0f64; stride * (rows + 1)];
        let mut sum_sq = vec![0.0f64; stride * (rows + 1)];
        for y in 0..rows {
            let row = plane.row(y).unwrap_or(&[]);
            let mut acc = 0.0f64;
            let mut acc_sq = 0.0f64;
            for (x, &value) in row.iter().enumerate() {
                let v = f64::from(value);
                acc += v;
                acc_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + acc;
                sum_sq[idx] = sum_sq[idx - stride] + acc_sq;
            }
        }
        Self { cols, sum, sum_sq }
    }

    /// Returns `(sum, sum_of_squares)` over the window of `w` columns and
    /// `h` rows whose top-left element is `(x, y)`.
    #[inline]
    pub(crate) fn window(&self, x: usize, y: usize, w: usize, h: usize) -> (f64, f64) {
        let stride = self.cols + 1;
        let a = y * stride + x;
        let b = y * stride + x + w;
        let c = (y + h) * stride + x;
        let d = (y + h) * stride + x + w;
        (
            self.sum[d] - self.sum[b] - self.sum[c] + self.sum[a],
            self.sum_sq[d] - self.sum_sq[b] - self.sum_sq[c] + self.sum_sq[a],
        )
    }
}
