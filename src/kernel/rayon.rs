//! Rayon row-parallel surface fill (feature-gated).
//!
//! Each output row is independent, so rows are scored on the rayon pool
//! with the same per-row code as the sequential path; results are
//! identical to the sequential surface.

use crate::kernel::{Kernel, RowScan};
use rayon::prelude::*;

pub(crate) fn fill_rows_par<K: Kernel>(scan: &RowScan<'_>, data: &mut [f32], width: usize) {
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| scan.score_row::<K>(y, row));
}
