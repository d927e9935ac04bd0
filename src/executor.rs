//! Task-parallel kernel pass over one worker's effective row range.
//!
//! The pass only reads the current snapshot and only writes disjoint rows of
//! the band-local output buffer, so the rows can be processed in any order or
//! grouping; the result is identical regardless of scheduling.
use rayon::prelude::*;

use crate::decompose::RowBand;
use crate::image::{RgbView, CHANNELS};
use crate::kernel::{diffuse_row, DiffusionParams};

/// Apply the diffusion kernel to every interior pixel-channel of `band`'s
/// effective range, writing into `next` (one tightly packed row per effective
/// row). Fans out across the current rayon pool.
pub fn run_band_pass(snapshot: &RgbView, band: &RowBand, params: &DiffusionParams, next: &mut [u8]) {
    let row_samples = snapshot.w * CHANNELS;
    debug_assert_eq!(next.len(), band.effective_rows() * row_samples);

    next.par_chunks_mut(row_samples)
        .enumerate()
        .for_each(|(i, row_out)| {
            diffuse_row(snapshot, band.effective_start + i, params, row_out);
        });
}
