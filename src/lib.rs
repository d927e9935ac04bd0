#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod engine;
pub mod image;
pub mod median;
pub mod noise;
pub mod report;

// Engine internals – still public for benchmarks and tools, but considered
// unstable.
pub mod decompose;
pub mod executor;
pub mod kernel;
pub mod sync;

// --- High-level re-exports -------------------------------------------------

pub use crate::engine::{DenoiseOutcome, DiffusionEngine, EngineOptions};
pub use crate::kernel::DiffusionParams;
pub use crate::report::DenoiseReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use rgb_denoiser::prelude::*;
///
/// # fn main() {
/// let image = RgbImage::filled(64, 64, 128);
/// let engine = DiffusionEngine::new(
///     DiffusionParams::new(0.5, 3),
///     EngineOptions::default(),
/// );
/// let outcome = engine.run(&image).expect("valid configuration");
/// println!("took {:.3} ms", outcome.report.filter_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{RgbImage, RgbView};
    pub use crate::{DenoiseOutcome, DiffusionEngine, DiffusionParams, EngineOptions};
}
