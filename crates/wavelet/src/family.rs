//! Wavelet family identifiers.

use std::fmt;
use std::str::FromStr;

use crate::daubechies;
use crate::error::WaveletError;

/// Name prefixes of continuous wavelets. They are recognised so that the
/// rejection reason is precise, but none of them can be used for denoising.
const CONTINUOUS_PREFIXES: &[&str] = &["cgau", "cmor", "fbsp", "gaus", "mexh", "morl", "shan"];

/// Largest supported order for the Daubechies and Symlet families.
pub const MAX_ORDER: u8 = 10;

/// Supported discrete wavelet families.
///
/// | Name | Variant | Filter length |
/// |------|---------|---------------|
/// | `haar` | [`WaveletFamily::Haar`] | 2 |
/// | `db1` .. `db10` | [`WaveletFamily::Daubechies`] | 2N |
/// | `sym2` .. `sym10` | [`WaveletFamily::Symlet`] | 2N |
/// | `bior4.4` | [`WaveletFamily::Cdf97`] | 10 |
///
/// # Example
///
/// ```
/// use wavematch_wavelet::WaveletFamily;
///
/// let family = WaveletFamily::from_name("db8").unwrap();
/// assert_eq!(family.filter_length(), 16);
/// assert_eq!(family.to_string(), "db8");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveletFamily {
    /// Haar wavelet.
    Haar,
    /// Extremal-phase Daubechies wavelet with `N` vanishing moments.
    Daubechies(u8),
    /// Least-asymmetric Daubechies wavelet with `N` vanishing moments.
    Symlet(u8),
    /// Cohen-Daubechies-Feauveau 9/7 biorthogonal wavelet (`bior4.4`).
    Cdf97,
}

impl Default for WaveletFamily {
    /// Returns `db4` as the default family.
    fn default() -> Self {
        Self::Daubechies(4)
    }
}

impl WaveletFamily {
    /// Parses a family from a case-insensitive name.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::ContinuousFamily`] | a known continuous wavelet such as `cmor1.5-1.0` |
    /// | [`WaveletError::UnsupportedFamily`] | anything else outside the supported set |
    pub fn from_name(name: &str) -> Result<Self, WaveletError> {
        let lower = name.trim().to_lowercase();
        if lower == "haar" {
            return Ok(Self::Haar);
        }
        if lower == "bior4.4" {
            return Ok(Self::Cdf97);
        }
        if let Some(order) = lower.strip_prefix("db").and_then(parse_order)
            && (1..=MAX_ORDER).contains(&order)
        {
            return Ok(Self::Daubechies(order));
        }
        if let Some(order) = lower.strip_prefix("sym").and_then(parse_order)
            && (2..=MAX_ORDER).contains(&order)
        {
            return Ok(Self::Symlet(order));
        }
        if CONTINUOUS_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return Err(WaveletError::ContinuousFamily(name.to_string()));
        }
        Err(WaveletError::UnsupportedFamily(name.to_string()))
    }

    /// Returns every supported family in a stable order.
    pub fn all() -> Vec<Self> {
        let mut families = vec![Self::Haar];
        families.extend((1..=MAX_ORDER).map(Self::Daubechies));
        families.extend((2..=MAX_ORDER).map(Self::Symlet));
        families.push(Self::Cdf97);
        families
    }

    /// Returns the length of the decomposition filter.
    ///
    /// Used to derive the maximum decomposition level.
    pub fn filter_length(&self) -> usize {
        match self {
            Self::Haar => 2,
            Self::Daubechies(n) | Self::Symlet(n) => 2 * usize::from(*n),
            Self::Cdf97 => 10,
        }
    }

    /// Returns `true` for families with an orthonormal filter bank.
    pub fn is_orthogonal(&self) -> bool {
        !matches!(self, Self::Cdf97)
    }

    /// Returns the orthonormal scaling filter, normalised to sum to `sqrt(2)`.
    ///
    /// Returns `Ok(None)` for biorthogonal families, which are computed by
    /// lifting instead of convolution.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::FilterDerivation`] if the root search behind
    /// the Daubechies construction fails.
    pub fn scaling_coeffs(&self) -> Result<Option<Vec<f64>>, WaveletError> {
        match self {
            Self::Haar => Ok(Some(vec![std::f64::consts::FRAC_1_SQRT_2; 2])),
            Self::Daubechies(n) => daubechies::extremal_phase(*n).map(Some),
            Self::Symlet(n) => daubechies::least_asymmetric(*n).map(Some),
            Self::Cdf97 => Ok(None),
        }
    }
}

fn parse_order(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for WaveletFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Haar => write!(f, "haar"),
            Self::Daubechies(n) => write!(f, "db{n}"),
            Self::Symlet(n) => write!(f, "sym{n}"),
            Self::Cdf97 => write!(f, "bior4.4"),
        }
    }
}

impl FromStr for WaveletFamily {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
