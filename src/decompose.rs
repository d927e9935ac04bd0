//! Row-band decomposition of an image across cooperating workers.
//!
//! Purpose
//! - Split `height` rows into one contiguous band per worker, as evenly as
//!   possible: the first `height % workers` ranks get one extra row.
//! - Derive each band's *effective* sub-range: the rows the worker actually
//!   writes. Rows `0` and `height-1` are never written by anyone, so the
//!   effective ranges tile exactly `[1, height-1)` in rank order.
//!
//! Notes
//! - `decompose` is a pure function of `(height, workers)`; every worker
//!   computes the same table, so each rank knows every other rank's segment.
//! - More workers than interior rows is legal: excess ranks get an empty
//!   effective range and contribute a zero-length segment.
use crate::image::CHANNELS;

/// One worker's row ownership. `start..end` is the owned band,
/// `effective_start..effective_end` the sub-range it writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
    pub effective_start: usize,
    pub effective_end: usize,
}

impl RowBand {
    #[inline]
    pub fn rows(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn effective_rows(&self) -> usize {
        self.effective_end - self.effective_start
    }

    #[inline]
    pub fn is_effective_empty(&self) -> bool {
        self.effective_start == self.effective_end
    }

    /// Byte placement of the effective range inside a full-image buffer,
    /// expressed in samples.
    pub fn segment(&self, width: usize) -> Segment {
        Segment {
            offset: self.effective_start * width * CHANNELS,
            count: self.effective_rows() * width * CHANNELS,
        }
    }
}

/// `(offset, count)` pair, in samples, locating one worker's contribution
/// inside the shared full-image buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub offset: usize,
    pub count: usize,
}

/// Split `height` rows across `workers` ranks, in rank order.
pub fn decompose(height: usize, workers: usize) -> Vec<RowBand> {
    assert!(workers >= 1, "worker count must be positive");
    let base = height / workers;
    let extra = height % workers;

    let interior_end = height.saturating_sub(1);
    let mut start = 0usize;
    (0..workers)
        .map(|rank| {
            let rows = if rank < extra { base + 1 } else { base };
            let end = start + rows;
            let effective_start = start.max(1).min(interior_end.max(1));
            let effective_end = end.min(interior_end).max(effective_start);
            let band = RowBand {
                start,
                end,
                effective_start,
                effective_end,
            };
            start = end;
            band
        })
        .collect()
}

/// Check that the effective ranges tile `[1, height-1)` with no gap and no
/// overlap. Any violation means the decomposition tables diverged, which
/// would corrupt the synchronization.
pub fn validate_cover(bands: &[RowBand], height: usize) -> Result<(), String> {
    let interior_start = 1usize.min(height.saturating_sub(1));
    let interior_end = height.saturating_sub(1);
    let mut cursor = interior_start;
    for (rank, band) in bands.iter().enumerate() {
        if band.effective_end < band.effective_start {
            return Err(format!(
                "Worker {rank} has inverted effective range {}..{}",
                band.effective_start, band.effective_end
            ));
        }
        if band.is_effective_empty() {
            continue;
        }
        if band.effective_start != cursor {
            return Err(format!(
                "Worker {rank} effective range starts at row {} but row {cursor} is next uncovered",
                band.effective_start
            ));
        }
        cursor = band.effective_end;
    }
    if cursor != interior_end {
        return Err(format!(
            "Effective ranges cover interior rows up to {cursor}, expected {interior_end}"
        ));
    }
    Ok(())
}
