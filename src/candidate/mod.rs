//! Candidate selection and pruning utilities.
//!
//! Picks surface extrema and applies window non-maximum suppression.

pub(crate) mod nms;

pub use nms::{best_peak, nms_half_extents, Peak};
