//! Collective snapshot exchange between workers.
//!
//! Purpose
//! - After each iteration, every worker has rewritten only its own effective
//!   rows. Before the next iteration can start, every worker must hold a
//!   byte-identical full-image snapshot containing everyone's new rows.
//!
//! Design
//! - An all-gather with variable per-participant segment sizes: a shared
//!   staging buffer plus two barrier phases. In the post phase each worker
//!   copies its effective-range bytes to its precomputed offset (disjoint
//!   slices, empty segments contribute nothing). After the post barrier each
//!   worker copies the assembled staging buffer into its private snapshot.
//!   The fetch barrier keeps any worker from reposting for the next
//!   iteration while a slower one is still reading this one.
//! - The staging buffer is seeded with the initial snapshot, so rows that no
//!   worker ever writes (the global border rows) keep their original bytes
//!   across every iteration.
//!
//! Notes
//! - This is a collective primitive, not pairwise messaging; all
//!   participants must call `exchange` the same number of times. A worker
//!   that stops calling stalls the others by design.
use std::sync::{Barrier, Mutex};

use crate::decompose::Segment;

pub struct SegmentGather {
    staging: Mutex<Vec<u8>>,
    post: Barrier,
    fetch: Barrier,
}

impl SegmentGather {
    /// A collective for `participants` workers over a buffer the size of
    /// `initial`, which seeds the staging area.
    pub fn new(participants: usize, initial: &[u8]) -> Self {
        assert!(participants >= 1, "collective needs at least one participant");
        Self {
            staging: Mutex::new(initial.to_vec()),
            post: Barrier::new(participants),
            fetch: Barrier::new(participants),
        }
    }

    /// Contribute `bytes` at `segment` and leave with `snapshot` holding the
    /// fully merged state. Blocks until every participant has both posted and
    /// fetched.
    pub fn exchange(&self, segment: Segment, bytes: &[u8], snapshot: &mut [u8]) {
        debug_assert_eq!(bytes.len(), segment.count);
        if segment.count > 0 {
            let mut staging = self.staging.lock().expect("gather staging poisoned");
            staging[segment.offset..segment.offset + segment.count].copy_from_slice(bytes);
        }
        self.post.wait();
        {
            let staging = self.staging.lock().expect("gather staging poisoned");
            snapshot.copy_from_slice(&staging);
        }
        self.fetch.wait();
    }
}
