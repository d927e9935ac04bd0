use serde::{Deserialize, Serialize};

/// Timing entry for a single stage of a denoising run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Summary of one diffusion run: configuration and wall-clock timings.
/// `filter_ms` covers the diffusion pass alone (decomposition excluded);
/// `timing.total_ms` covers the whole engine call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenoiseReport {
    pub width: usize,
    pub height: usize,
    pub workers: usize,
    pub threads_per_worker: usize,
    pub iterations: usize,
    pub filter_ms: f64,
    pub timing: TimingBreakdown,
}
