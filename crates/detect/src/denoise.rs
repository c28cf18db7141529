//! Wavelet shrinkage denoising with the universal threshold.

use tracing::debug;
use wavematch_stats::mean_absolute_deviation;
use wavematch_wavelet::{
    ThresholdMode, WaveletFamily, max_dwt_level, threshold_in_place, wavedec, waverec,
};

use crate::error::DetectError;

/// Converts a mean absolute deviation into a Gaussian-equivalent standard
/// deviation.
pub const MAD_TO_SIGMA: f64 = 0.6745;

/// Denoising parameters.
///
/// | Parameter | Default |
/// |-----------|---------|
/// | `level` | 1 |
/// | `sigma_band` | 1 (finest detail) |
/// | `mode` | hard |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DenoiseOptions {
    level: Option<usize>,
    sigma_band: usize,
    mode: ThresholdMode,
}

impl Default for DenoiseOptions {
    fn default() -> Self {
        Self {
            level: Some(1),
            sigma_band: 1,
            mode: ThresholdMode::Hard,
        }
    }
}

impl DenoiseOptions {
    /// Options decomposing `level` times, giving `level + 1` bands.
    pub fn at_level(level: usize) -> Self {
        Self::default().with_level(Some(level))
    }

    /// Sets the level; `None` decomposes as deep as the family and signal
    /// length allow.
    pub fn with_level(mut self, level: Option<usize>) -> Self {
        self.level = level;
        self
    }

    pub fn with_sigma_band(mut self, band: usize) -> Self {
        self.sigma_band = band;
        self
    }

    pub fn with_mode(mut self, mode: ThresholdMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn sigma_band(&self) -> usize {
        self.sigma_band
    }

    pub fn mode(&self) -> ThresholdMode {
        self.mode
    }
}

/// Noise scale from a detail band: mean absolute deviation around the mean,
/// divided by [`MAD_TO_SIGMA`].
pub fn noise_sigma(band: &[f64]) -> f64 {
    mean_absolute_deviation(band) / MAD_TO_SIGMA
}

/// Universal threshold `sigma * sqrt(2 ln n)`.
pub fn universal_threshold(sigma: f64, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    sigma * (2.0 * (n as f64).ln()).sqrt()
}

/// Denoises `signal` with `family`.
///
/// Decomposes with periodized boundaries, estimates the noise scale from the
/// configured detail band, thresholds every detail band with the universal
/// threshold and reconstructs. The approximation band is never thresholded.
/// The output has the same length as the input.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DetectError::Wavelet`] | the family cannot decompose `signal` at the level |
/// | [`DetectError::SigmaBandOutOfRange`] | `sigma_band` is 0 or deeper than the level |
pub fn denoise(
    signal: &[f64],
    family: WaveletFamily,
    options: &DenoiseOptions,
) -> Result<Vec<f64>, DetectError> {
    let n = signal.len();
    let level = options.level.unwrap_or_else(|| max_dwt_level(n, &family));
    let mut coeffs = wavedec(signal, family, level)?;

    let band = coeffs
        .detail(options.sigma_band)
        .ok_or(DetectError::SigmaBandOutOfRange {
            band: options.sigma_band,
            levels: coeffs.n_levels(),
        })?;
    let sigma = noise_sigma(band);
    let tau = universal_threshold(sigma, n);
    debug!(%family, level, sigma, tau, "denoise");

    for band in coeffs.details_mut() {
        threshold_in_place(band, tau, options.mode);
    }
    Ok(waverec(&coeffs)?)
}
