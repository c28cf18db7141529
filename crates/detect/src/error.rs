//! Error types for the wavematch-detect crate.

use wavematch_wavelet::WaveletError;

/// Error type for all fallible operations in the wavematch-detect crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectError {
    /// Wavelet transform error.
    #[error(transparent)]
    Wavelet(#[from] WaveletError),

    /// Returned when the correlation method name is not recognised.
    #[error("unsupported correlation method: {0:?} (expected \"pearson\" or \"spearman\")")]
    UnsupportedMethod(String),

    /// Returned when a wavelet family cannot be used on a channel.
    #[error("wavelet family {family} unusable: {reason}")]
    FamilyUnusable {
        /// Configured family name.
        family: String,
        /// Why the family was skipped.
        reason: String,
    },

    /// Returned when every configured family was skipped for a channel.
    #[error("no usable wavelet family for channel '{channel}' ({skipped} skipped)")]
    NoUsableFamily {
        /// Channel name.
        channel: String,
        /// Number of families that were tried.
        skipped: usize,
    },

    /// Returned when the reference is longer than the signal it is scanned against.
    #[error("reference has {window} samples but channel '{channel}' has only {len}")]
    ReferenceTooLong {
        /// Channel name.
        channel: String,
        /// Channel length.
        len: usize,
        /// Reference length.
        window: usize,
    },

    /// Returned when a signal is empty, too short, or holds non-finite values.
    #[error("invalid signal: {reason}")]
    InvalidSignal {
        /// What is wrong with the data.
        reason: String,
    },

    /// Returned when the noise band index exceeds the decomposition depth.
    #[error("noise band {band} out of range for {levels} decomposition level(s)")]
    SigmaBandOutOfRange {
        /// Requested detail band (1 = finest).
        band: usize,
        /// Levels actually computed.
        levels: usize,
    },

    /// One or more configuration checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },
}
