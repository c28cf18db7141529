//! Multilevel discrete wavelet transform with periodization boundaries.

use tracing::trace;

use crate::error::WaveletError;
use crate::family::WaveletFamily;
use crate::lifting;

/// Computes the maximum useful decomposition level for a signal length and
/// family.
///
/// The level `J` is `floor(log2(n / (L - 1)))`, where `L` is the filter
/// length; it is 0 when the signal is shorter than `L - 1`.
///
/// # Example
///
/// ```ignore
/// use wavematch_wavelet::{WaveletFamily, max_dwt_level};
///
/// assert_eq!(max_dwt_level(500, &WaveletFamily::Daubechies(4)), 6);
/// ```
pub fn max_dwt_level(n: usize, family: &WaveletFamily) -> usize {
    let l = family.filter_length();
    if l < 2 || n < l - 1 {
        return 0;
    }
    let ratio = n as f64 / (l - 1) as f64;
    ratio.log2().floor() as usize
}

/// Coefficient bands of a multilevel DWT.
///
/// Holds the coarsest approximation band and one detail band per level.
/// Detail levels are 1-indexed: level 1 is the finest band.
#[derive(Clone, Debug)]
pub struct DwtCoeffs {
    approx: Vec<f64>,
    /// Finest first.
    details: Vec<Vec<f64>>,
    family: WaveletFamily,
    signal_len: usize,
}

impl DwtCoeffs {
    /// Returns the number of decomposition levels.
    pub fn n_levels(&self) -> usize {
        self.details.len()
    }

    /// Returns the coarsest approximation band.
    pub fn approx(&self) -> &[f64] {
        &self.approx
    }

    /// Returns the detail band at `level` (1 = finest), or `None` if out of range.
    pub fn detail(&self, level: usize) -> Option<&[f64]> {
        level
            .checked_sub(1)
            .and_then(|i| self.details.get(i))
            .map(|v| v.as_slice())
    }

    /// Returns mutable access to every detail band, finest first.
    ///
    /// The approximation band is deliberately not reachable from here.
    pub fn details_mut(&mut self) -> impl Iterator<Item = &mut Vec<f64>> {
        self.details.iter_mut()
    }

    /// Returns the family used for the decomposition.
    pub fn family(&self) -> WaveletFamily {
        self.family
    }

    /// Returns the length of the decomposed signal.
    pub fn signal_len(&self) -> usize {
        self.signal_len
    }
}

/// Single-level analysis/synthesis pair for one family.
enum Kernel {
    Orthogonal { lo: Vec<f64>, hi: Vec<f64> },
    Lifting,
}

impl Kernel {
    fn for_family(family: &WaveletFamily) -> Result<Self, WaveletError> {
        match family.scaling_coeffs()? {
            Some(lo) => {
                let l = lo.len();
                let hi = (0..l)
                    .map(|j| if j % 2 == 0 { lo[l - 1 - j] } else { -lo[l - 1 - j] })
                    .collect();
                Ok(Self::Orthogonal { lo, hi })
            }
            None => Ok(Self::Lifting),
        }
    }

    /// Splits `x` into `(approx, detail)`, each of length `ceil(len / 2)`.
    /// Odd inputs are extended by repeating the last sample.
    fn forward(&self, x: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let mut padded = x.to_vec();
        if padded.len() % 2 == 1
            && let Some(&last) = padded.last()
        {
            padded.push(last);
        }
        match self {
            Self::Orthogonal { lo, hi } => {
                let n = padded.len();
                let half = n / 2;
                let mut approx = vec![0.0; half];
                let mut detail = vec![0.0; half];
                for k in 0..half {
                    for (j, (&l, &h)) in lo.iter().zip(hi.iter()).enumerate() {
                        let v = padded[(2 * k + j) % n];
                        approx[k] += l * v;
                        detail[k] += h * v;
                    }
                }
                (approx, detail)
            }
            Self::Lifting => lifting::forward(&padded),
        }
    }

    /// Inverse of [`Kernel::forward`] before trimming; returns `2 * len` samples.
    fn inverse(&self, approx: &[f64], detail: &[f64]) -> Vec<f64> {
        match self {
            Self::Orthogonal { lo, hi } => {
                let n = 2 * approx.len();
                let mut x = vec![0.0; n];
                for (k, (&a, &d)) in approx.iter().zip(detail.iter()).enumerate() {
                    for (j, (&l, &h)) in lo.iter().zip(hi.iter()).enumerate() {
                        x[(2 * k + j) % n] += l * a + h * d;
                    }
                }
                x
            }
            Self::Lifting => lifting::inverse(approx, detail),
        }
    }
}

/// Decomposes `signal` into `level` detail bands plus one approximation band.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::EmptySignal`] | `signal` is empty |
/// | [`WaveletError::NonFiniteData`] | any sample is NaN or infinite |
/// | [`WaveletError::LevelOutOfRange`] | `level` is 0 or above [`max_dwt_level`] |
/// | [`WaveletError::FilterDerivation`] | the family filter cannot be derived |
pub fn wavedec(
    signal: &[f64],
    family: WaveletFamily,
    level: usize,
) -> Result<DwtCoeffs, WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::EmptySignal);
    }
    if !signal.iter().all(|v| v.is_finite()) {
        return Err(WaveletError::NonFiniteData);
    }
    let max = max_dwt_level(signal.len(), &family);
    if level == 0 || level > max {
        return Err(WaveletError::LevelOutOfRange {
            requested: level,
            max,
            len: signal.len(),
        });
    }

    let kernel = Kernel::for_family(&family)?;
    let mut details = Vec::with_capacity(level);
    let mut approx = signal.to_vec();
    for _ in 0..level {
        let (a, d) = kernel.forward(&approx);
        details.push(d);
        approx = a;
    }
    trace!(%family, level, len = signal.len(), "wavedec");

    Ok(DwtCoeffs {
        approx,
        details,
        family,
        signal_len: signal.len(),
    })
}

/// Reconstructs a signal of the original length from its coefficient bands.
///
/// # Errors
///
/// Returns [`WaveletError::MalformedCoefficients`] if band lengths are not
/// consistent with one decomposition, or [`WaveletError::FilterDerivation`]
/// if the family filter cannot be derived.
pub fn waverec(coeffs: &DwtCoeffs) -> Result<Vec<f64>, WaveletError> {
    let kernel = Kernel::for_family(&coeffs.family)?;
    let mut approx = coeffs.approx.clone();
    for (i, detail) in coeffs.details.iter().enumerate().rev() {
        if approx.len() == detail.len() + 1 {
            approx.pop();
        }
        if approx.len() != detail.len() {
            return Err(WaveletError::MalformedCoefficients(format!(
                "level {}: approximation has {} coefficients, detail has {}",
                i + 1,
                approx.len(),
                detail.len()
            )));
        }
        approx = kernel.inverse(&approx, detail);
    }
    approx.truncate(coeffs.signal_len);
    if approx.len() != coeffs.signal_len {
        return Err(WaveletError::MalformedCoefficients(format!(
            "reconstructed {} samples, expected {}",
            approx.len(),
            coeffs.signal_len
        )));
    }
    Ok(approx)
}
