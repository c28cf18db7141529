//! # wavematch-wavelet
//!
//! Discrete wavelet transforms for signal denoising.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["&[f64]"] -->|"wavedec(signal, family, level)?"| B["DwtCoeffs"]
//!     B -->|"details_mut() + threshold_in_place()"| B
//!     B -->|"waverec(&coeffs)?"| C["Vec<f64>"]
//! ```
//!
//! ## Supported Families
//!
//! | Name | Construction | Filter length |
//! |------|--------------|---------------|
//! | `haar` | closed form | 2 |
//! | `db1` .. `db10` | spectral factorisation, extremal phase | 2N |
//! | `sym2` .. `sym10` | spectral factorisation, least asymmetric | 2N |
//! | `bior4.4` | CDF 9/7 lifting | 10 |
//!
//! Continuous wavelets (`cmor`, `cgau`, `morl`, ...) are recognised by name
//! and rejected with [`WaveletError::ContinuousFamily`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavematch_wavelet::{ThresholdMode, WaveletFamily, threshold_in_place, wavedec, waverec};
//!
//! let family = WaveletFamily::from_name("db8")?;
//! let mut coeffs = wavedec(&signal, family, 1)?;
//! for band in coeffs.details_mut() {
//!     threshold_in_place(band, 0.5, ThresholdMode::Hard);
//! }
//! let denoised = waverec(&coeffs)?;
//! ```

mod daubechies;
mod dwt;
mod error;
mod family;
mod lifting;
mod threshold;

pub use dwt::{DwtCoeffs, max_dwt_level, wavedec, waverec};
pub use error::WaveletError;
pub use family::{MAX_ORDER, WaveletFamily};
pub use threshold::{ThresholdMode, threshold, threshold_in_place};
