//! Correlation metrics and their score direction.

/// Correlation metric used to score template placements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Zero-mean normalized cross-correlation in `[-1, 1]`.
    #[default]
    Zncc,
    /// Normalized cross-correlation in `[0, 1]`.
    Ncc,
    /// Normalized squared difference clamped to `[0, 1]`; lower is better.
    SqDiffNormed,
}

impl Metric {
    pub fn higher_is_better(self) -> bool {
        !matches!(self, Metric::SqDiffNormed)
    }

    /// Score no placement can do worse than; used to fill suppressed windows.
    pub fn worst_score(self) -> f32 {
        match self {
            Metric::Zncc => -1.0,
            Metric::Ncc => 0.0,
            Metric::SqDiffNormed => 1.0,
        }
    }

    /// Strict comparison: true when `a` beats `b`.
    pub fn is_better(self, a: f32, b: f32) -> bool {
        if self.higher_is_better() {
            a > b
        } else {
            a < b
        }
    }

    /// Hard acceptance: `score >= threshold`, or `score <= 1 - threshold`
    /// when lower is better.
    pub fn passes(self, score: f32, threshold: f32) -> bool {
        if self.higher_is_better() {
            score >= threshold
        } else {
            score <= 1.0 - threshold
        }
    }

    /// Relaxed acceptance with the threshold loosened by `margin`.
    pub fn near_passes(self, score: f32, threshold: f32, margin: f32) -> bool {
        self.passes(score, threshold - margin.max(0.0))
    }
}
