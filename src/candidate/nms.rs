//! Peak extraction and non-maximum suppression on score surfaces.

use crate::kernel::Surface;
use crate::search::Metric;

/// A placement on a score surface (top-left coordinates).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

/// Returns the best placement under the metric's direction.
pub fn best_peak(surface: &Surface, metric: Metric) -> Option<Peak> {
    surface
        .extremum(metric.higher_is_better())
        .map(|(x, y, score)| Peak { x, y, score })
}

/// Half extents of the suppression window for a template of
/// `tpl_width x tpl_height`, grown by `overlap` (negative counts as 0).
///
/// The window is `round(size * (1 + overlap))` wide; its half extent is the
/// floor of half of that.
pub fn nms_half_extents(tpl_width: usize, tpl_height: usize, overlap: f32) -> (usize, usize) {
    let grow = 1.0 + if overlap.is_finite() { overlap.max(0.0) } else { 0.0 };
    let w = (tpl_width as f32 * grow).round() as usize;
    let h = (tpl_height as f32 * grow).round() as usize;
    (w / 2, h / 2)
}

/// Overwrites the neighbourhood of `peak` with the metric's worst score so
/// the next extremum lies outside it.
pub(crate) fn suppress_peak(
    surface: &mut Surface,
    peak: &Peak,
    half: (usize, usize),
    metric: Metric,
) {
    surface.suppress(peak.x, peak.y, half.0, half.1, metric.worst_score());
}
