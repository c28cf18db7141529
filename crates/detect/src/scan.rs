//! Sliding-window scan of one denoised channel for one wavelet family.

use tracing::trace;
use wavematch_wavelet::WaveletFamily;

use crate::denoise::{DenoiseOptions, denoise};
use crate::error::DetectError;
use crate::score::WindowScorer;

/// Scores every window of `reference.len()` samples in the denoised signal.
///
/// Returns one score per offset `i` in `0..signal.len() - reference.len()`;
/// the final full window is not scored.
///
/// # Errors
///
/// Returns an error if the signal cannot be denoised with `family`. The
/// caller is expected to have checked that the reference fits the signal.
pub fn scan_family(
    signal: &[f64],
    reference: &[f64],
    family: WaveletFamily,
    options: &DenoiseOptions,
    scorer: &WindowScorer,
) -> Result<Vec<f64>, DetectError> {
    let denoised = denoise(signal, family, options)?;
    Ok(score_windows(&denoised, reference, scorer))
}

/// Scores every window of an already-denoised signal.
pub fn score_windows(denoised: &[f64], reference: &[f64], scorer: &WindowScorer) -> Vec<f64> {
    let window = reference.len();
    let n_offsets = denoised.len().saturating_sub(window);
    let scores: Vec<f64> = (0..n_offsets)
        .map(|i| scorer.score(&denoised[i..i + window], reference))
        .collect();
    trace!(n_offsets, window, "scored windows");
    scores
}
