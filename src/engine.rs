//! Iteration control and worker orchestration for the diffusion filter.
//!
//! Purpose
//! - Run the edge-aware diffusion stencil for a fixed number of iterations
//!   over row bands owned by `workers` cooperating workers, each of which may
//!   further fan the kernel out across a private thread pool.
//!
//! Design
//! - Workers are scoped OS threads that share nothing during an iteration:
//!   each holds its own full-image snapshot and a band-local output buffer.
//!   The only cross-worker communication is the per-iteration
//!   `SegmentGather::exchange`, a barrier that also merges everyone's rows.
//! - The current snapshot is immutable while a pass runs; new values go to
//!   the band buffer and become visible to anyone only through the exchange.
//!   This current/next separation keeps the inner fan-out lock-free.
//! - Configuration is rejected up front, before any worker state is
//!   allocated, so a bad run either fails entirely or not at all.
//!
//! Notes
//! - The row decomposition is a performance partition, never a semantic one:
//!   output bytes are identical for every `workers`/`threads_per_worker`
//!   combination.
//! - A panicking worker aborts the whole run when the thread scope unwinds;
//!   there is no partial-result salvage.
use std::thread;
use std::time::Instant;

use log::debug;
use rayon::ThreadPool;

use crate::decompose::{decompose, validate_cover, RowBand};
use crate::executor::run_band_pass;
use crate::image::{RgbImage, RgbView, CHANNELS};
use crate::kernel::DiffusionParams;
use crate::report::{DenoiseReport, TimingBreakdown};
use crate::sync::SegmentGather;

/// Execution strategy: `workers` share-nothing workers, each fanning the
/// kernel out across `threads_per_worker` threads (0 = the global rayon
/// pool). `1 x 1` is the single-threaded reference strategy.
#[derive(Clone, Copy, Debug)]
pub struct EngineOptions {
    pub workers: usize,
    pub threads_per_worker: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            threads_per_worker: 0,
        }
    }
}

impl EngineOptions {
    /// One worker, one thread: the reference strategy.
    pub fn serial() -> Self {
        Self {
            workers: 1,
            threads_per_worker: 1,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Worker count must be positive".to_string());
        }
        Ok(())
    }
}

/// Final image plus the run summary.
#[derive(Clone, Debug)]
pub struct DenoiseOutcome {
    pub image: RgbImage,
    pub report: DenoiseReport,
}

pub struct DiffusionEngine {
    params: DiffusionParams,
    options: EngineOptions,
}

impl DiffusionEngine {
    pub fn new(params: DiffusionParams, options: EngineOptions) -> Self {
        Self { params, options }
    }

    /// Run the configured number of diffusion passes over `input`.
    ///
    /// Interior pixels are rewritten per the kernel; the outermost row and
    /// column are returned byte-identical to the input.
    pub fn run(&self, input: &RgbImage) -> Result<DenoiseOutcome, String> {
        let t_total = Instant::now();
        self.params.validate()?;
        self.options.validate()?;
        let (width, height) = (input.width(), input.height());
        if width < 2 || height < 2 {
            return Err(format!(
                "Image must be at least 2x2 for a 4-connected stencil, got {width}x{height}"
            ));
        }

        let mut timing = TimingBreakdown::default();
        let workers = self.options.workers;

        let t_stage = Instant::now();
        let bands = decompose(height, workers);
        validate_cover(&bands, height)?;
        timing.push("decompose", t_stage.elapsed().as_secs_f64() * 1000.0);
        debug!("decomposed {height} rows across {workers} workers");

        let pools = self.build_pools()?;
        let gather = SegmentGather::new(workers, input.as_bytes());

        let t_filter = Instant::now();
        let final_bytes = thread::scope(|scope| {
            for (rank, band) in bands.iter().copied().enumerate().skip(1) {
                let gather = &gather;
                let pool = pools.as_deref().map(|p| &p[rank]);
                let input_bytes = input.as_bytes();
                scope.spawn(move || {
                    self.worker_loop(rank, band, width, height, input_bytes, gather, pool);
                });
            }
            self.worker_loop(
                0,
                bands[0],
                width,
                height,
                input.as_bytes(),
                &gather,
                pools.as_deref().map(|p| &p[0]),
            )
        });
        let filter_ms = t_filter.elapsed().as_secs_f64() * 1000.0;
        timing.push("diffusion", filter_ms);
        timing.total_ms = t_total.elapsed().as_secs_f64() * 1000.0;

        let report = DenoiseReport {
            width,
            height,
            workers,
            threads_per_worker: self.options.threads_per_worker,
            iterations: self.params.iterations,
            filter_ms,
            timing,
        };
        Ok(DenoiseOutcome {
            image: RgbImage::from_raw(width, height, final_bytes)?,
            report,
        })
    }

    /// Private per-worker rayon pools, or `None` to share the global pool.
    fn build_pools(&self) -> Result<Option<Vec<ThreadPool>>, String> {
        let threads = self.options.threads_per_worker;
        if threads == 0 {
            return Ok(None);
        }
        (0..self.options.workers)
            .map(|_| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| format!("Failed to build worker thread pool: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// One worker's life: copy the initial snapshot, then alternate local
    /// kernel passes with collective exchanges for exactly `iterations`
    /// rounds. Returns the worker's final snapshot (identical across ranks).
    fn worker_loop(
        &self,
        rank: usize,
        band: RowBand,
        width: usize,
        height: usize,
        input_bytes: &[u8],
        gather: &SegmentGather,
        pool: Option<&ThreadPool>,
    ) -> Vec<u8> {
        let mut snapshot = input_bytes.to_vec();
        let mut next = vec![0u8; band.effective_rows() * width * CHANNELS];
        let segment = band.segment(width);

        for iteration in 0..self.params.iterations {
            let t_iter = Instant::now();
            {
                let view = RgbView::from_bytes(width, height, &snapshot);
                match pool {
                    Some(pool) => pool.install(|| {
                        run_band_pass(&view, &band, &self.params, &mut next);
                    }),
                    None => run_band_pass(&view, &band, &self.params, &mut next),
                }
            }
            gather.exchange(segment, &next, &mut snapshot);
            if rank == 0 {
                debug!(
                    "iteration {iteration} merged in {:.3} ms",
                    t_iter.elapsed().as_secs_f64() * 1000.0
                );
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(alpha: f32, iterations: usize, workers: usize) -> DiffusionEngine {
        DiffusionEngine::new(
            DiffusionParams::new(alpha, iterations),
            EngineOptions {
                workers,
                threads_per_worker: 1,
            },
        )
    }

    #[test]
    fn rejects_configuration_before_running() {
        let img = RgbImage::filled(4, 4, 10);
        assert!(engine(0.0, 3, 1).run(&img).is_err());
        assert!(engine(0.5, 0, 1).run(&img).is_err());
        assert!(DiffusionEngine::new(
            DiffusionParams::default(),
            EngineOptions {
                workers: 0,
                threads_per_worker: 0
            }
        )
        .run(&img)
        .is_err());
    }

    #[test]
    fn rejects_undersized_images() {
        let img = RgbImage::filled(1, 5, 10);
        assert!(engine(0.5, 1, 1).run(&img).is_err());
    }

    #[test]
    fn report_reflects_the_run() {
        let img = RgbImage::filled(8, 8, 128);
        let outcome = engine(0.5, 2, 3).run(&img).unwrap();
        assert_eq!(outcome.report.workers, 3);
        assert_eq!(outcome.report.iterations, 2);
        assert_eq!(outcome.report.width, 8);
        assert!(outcome.report.filter_ms >= 0.0);
        assert_eq!(outcome.report.timing.stages.len(), 2);
    }
}
