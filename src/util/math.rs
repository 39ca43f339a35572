//! Numeric helpers shared by the scale sweep and the stabilizer.

/// Step used when a non-positive or non-finite scale step is configured.
pub(crate) const FALLBACK_SCALE_STEP: f32 = 0.01;

/// Scales closer than this to 1.0 reuse the unscaled template.
pub(crate) const UNIT_SCALE_EPS: f32 = 1e-3;

/// Upper bound on the number of values a single sweep expands to.
pub(crate) const MAX_SCALE_STEPS: usize = 4096;

/// Expands an inclusive `[lo, hi]` range into evenly spaced scale values.
///
/// The bounds are ordered first, so `scale_range(1.2, 0.8, ..)` sweeps
/// upwards from 0.8. Values are computed as `lo + i * step` to avoid
/// accumulating floating-point drift; a small epsilon keeps `hi` itself
/// in the sweep when the range is an exact multiple of `step`. The sweep
/// is truncated to `MAX_SCALE_STEPS` values.
pub(crate) fn scale_range(a: f32, b: f32, step: f32) -> Vec<f32> {
    let lo = a.min(b);
    let hi = a.max(b);
    let step = if step.is_finite() && step > 0.0 {
        step
    } else {
        FALLBACK_SCALE_STEP
    };
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let steps = ((f64::from(hi) - f64::from(lo)) / f64::from(step) + 1e-4).floor();
    let count = if steps < (MAX_SCALE_STEPS - 1) as f64 {
        steps as usize + 1
    } else {
        MAX_SCALE_STEPS
    };
    (0..count).map(|i| lo + i as f32 * step).collect()
}

/// Returns true when `scale` is close enough to 1.0 to skip resampling.
pub(crate) fn is_unit_scale(scale: f32) -> bool {
    (scale - 1.0).abs() < UNIT_SCALE_EPS
}

/// Scales a pixel extent and rounds to the nearest integer, never below 1.
pub(crate) fn scaled_extent(extent: usize, scale: f32) -> usize {
    ((extent as f32 * scale).round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::{is_unit_scale, scale_range, scaled_extent, MAX_SCALE_STEPS};

    #[test]
    fn scale_range_includes_both_ends() {
        let scales = scale_range(0.8, 1.2, 0.1);
        assert_eq!(scales.len(), 5);
        assert!((scales[0] - 0.8).abs() < 1e-6);
        assert!((scales[4] - 1.2).abs() < 1e-5);
    }

    #[test]
    fn scale_range_orders_bounds_and_fixes_step() {
        let scales = scale_range(1.02, 1.0, 0.0);
        assert_eq!(scales.len(), 3);
        assert!((scales[0] - 1.0).abs() < 1e-6);

        let single = scale_range(1.0, 1.0, 0.05);
        assert_eq!(single, vec![1.0]);
    }

    #[test]
    fn huge_ranges_are_truncated() {
        let scales = scale_range(1.0, f32::MAX, 0.05);
        assert_eq!(scales.len(), MAX_SCALE_STEPS);
        assert!((scales[1] - 1.05).abs() < 1e-6);

        let tiny_step = scale_range(0.0, 1.0e6, 1e-30);
        assert_eq!(tiny_step.len(), MAX_SCALE_STEPS);
    }

    #[test]
    fn unit_scale_and_extent_rounding() {
        assert!(is_unit_scale(1.0004));
        assert!(!is_unit_scale(1.01));
        assert_eq!(scaled_extent(10, 1.25), 13);
        assert_eq!(scaled_extent(3, 0.1), 1);
    }
}
