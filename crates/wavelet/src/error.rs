//! Error types for the wavematch-wavelet crate.

/// Error type for all fallible operations in the wavematch-wavelet crate.
///
/// Every variant describes a reason why a family cannot transform a given
/// signal. Callers in the detection pipeline treat all of them as "skip this
/// family" rather than as fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveletError {
    /// Returned when the input signal is empty.
    #[error("signal is empty")]
    EmptySignal,

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the requested decomposition level is zero or exceeds the maximum.
    #[error("level out of range: requested {requested}, max for length {len} is {max}")]
    LevelOutOfRange {
        /// Level that was requested.
        requested: usize,
        /// Maximum feasible level.
        max: usize,
        /// Length of the input signal.
        len: usize,
    },

    /// Returned when a family name is not part of the supported set.
    #[error("unsupported wavelet family: {0}")]
    UnsupportedFamily(String),

    /// Returned for continuous wavelets, which have no discrete transform.
    #[error("wavelet family {0} is continuous and has no discrete transform")]
    ContinuousFamily(String),

    /// Returned when the Daubechies polynomial root search does not converge.
    #[error("filter derivation failed for {family}: {reason}")]
    FilterDerivation {
        /// Canonical family name.
        family: String,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when coefficient bands are inconsistent with each other.
    #[error("malformed coefficients: {0}")]
    MalformedCoefficients(String),
}
