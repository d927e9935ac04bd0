//! Edge-aware diffusion update for a single pixel channel.
//!
//! Each interior sample moves toward a Gaussian-weighted blend of its four
//! 4-connected neighbors on the same channel. A blend that differs from the
//! center by more than `threshold` replaces it outright (impulse noise);
//! otherwise the center takes a damped step of size `alpha` toward the blend,
//! which smooths gently without flattening edges. Border pixels are never
//! passed to the kernel and keep their input value for the whole run.
use crate::image::RgbView;

/// Parameters of the diffusion filter, immutable for the duration of a run.
#[derive(Clone, Copy, Debug)]
pub struct DiffusionParams {
    /// Damping factor of the partial update, in `(0, 1]`.
    pub alpha: f32,
    /// Number of full passes over the image (>= 1). No convergence check.
    pub iterations: usize,
    /// Gaussian scale of the neighbor weights.
    pub sigma: f32,
    /// Blend-center difference above which the blend replaces the center.
    pub threshold: f32,
}

impl DiffusionParams {
    pub fn new(alpha: f32, iterations: usize) -> Self {
        Self {
            alpha,
            iterations,
            ..Default::default()
        }
    }

    /// Reject configurations before any per-run state is allocated.
    pub fn validate(&self) -> Result<(), String> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(format!(
                "Alpha must be in (0, 1], got {}",
                self.alpha
            ));
        }
        if self.iterations == 0 {
            return Err("Iterations must be a positive integer".to_string());
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(format!("Sigma must be positive, got {}", self.sigma));
        }
        Ok(())
    }
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            iterations: 10,
            sigma: 20.0,
            threshold: 20.0,
        }
    }
}

/// Diffused value of channel `c` at interior pixel `(x, y)`.
///
/// Requires `1 <= x < w-1` and `1 <= y < h-1`. If the weight sum degenerates
/// (zero or non-finite, unreachable for byte inputs with a sane sigma) the
/// center byte is returned unchanged.
#[inline]
pub fn diffuse_sample(snapshot: &RgbView, x: usize, y: usize, c: usize, params: &DiffusionParams) -> u8 {
    let center_byte = snapshot.get(x, y, c);
    let center = center_byte as f32;
    let neighbors = [
        snapshot.get(x, y - 1, c) as f32,
        snapshot.get(x, y + 1, c) as f32,
        snapshot.get(x - 1, y, c) as f32,
        snapshot.get(x + 1, y, c) as f32,
    ];

    let mut weight_sum = 0.0f32;
    let mut weighted_value = 0.0f32;
    for neighbor in neighbors {
        let diff = neighbor - center;
        let weight = (-(diff * diff) / (2.0 * params.sigma * params.sigma)).exp();
        weight_sum += weight;
        weighted_value += weight * neighbor;
    }

    let smooth = weighted_value / weight_sum;
    if !smooth.is_finite() {
        return center_byte;
    }

    let delta = (smooth - center).abs();
    let result = if delta > params.threshold {
        smooth
    } else {
        center + params.alpha * (smooth - center)
    };
    result.clamp(0.0, 255.0).round() as u8
}

/// Diffuse one full row into `out` (`w * 3` samples). The border columns are
/// copied through unchanged.
pub fn diffuse_row(snapshot: &RgbView, y: usize, params: &DiffusionParams, out: &mut [u8]) {
    use crate::image::CHANNELS;

    debug_assert!(y >= 1 && y + 1 < snapshot.h);
    debug_assert_eq!(out.len(), snapshot.w * CHANNELS);

    out.copy_from_slice(snapshot.row(y));
    for x in 1..snapshot.w.saturating_sub(1) {
        for c in 0..CHANNELS {
            out[x * CHANNELS + c] = diffuse_sample(snapshot, x, y, c, params);
        }
    }
}
