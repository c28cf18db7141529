//! # wavematch-detect
//!
//! Locates a short reference waveform inside longer measured channels.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Channel"] -->|"denoise() per family"| B["denoised"]
//!     B -->|"score_windows()"| C["FamilyScores"]
//!     C -->|"aggregate()"| D["ScoreTable (mean)"]
//!     D -->|"extract_intervals()"| E["Vec<Interval>"]
//! ```
//!
//! Each family denoises the channel independently; its window scores are
//! averaged with the other families so no single wavelet decides alone.
//! Families that cannot handle a channel are skipped, not scored as zero.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavematch_detect::{Channel, DetectConfig, Reference, run};
//!
//! let reference = Reference::new(reference_samples)?;
//! let channels = vec![Channel::new("Sensor1", samples)?];
//! let detection = run(&channels, &reference, &DetectConfig::default())?;
//! for outcome in &detection.channels {
//!     if let Ok(found) = &outcome.result {
//!         for iv in &found.intervals {
//!             println!("{}: from {} to {}", outcome.name, iv.start, iv.end);
//!         }
//!     }
//! }
//! ```

mod aggregate;
mod config;
mod denoise;
mod error;
mod interval;
mod pipeline;
mod scan;
mod score;
mod signal;

pub use aggregate::{FamilyScores, ScoreTable, SkippedFamily, aggregate};
pub use config::{CorrelationMethod, DEFAULT_FAMILIES, DetectConfig};
pub use denoise::{DenoiseOptions, MAD_TO_SIGMA, denoise, noise_sigma, universal_threshold};
pub use error::DetectError;
pub use interval::{Interval, extract_intervals, group_offsets, select_offsets};
pub use pipeline::{ChannelDetection, ChannelOutcome, Detection, detect_channel, run};
pub use scan::{scan_family, score_windows};
pub use score::WindowScorer;
pub use signal::{Channel, MIN_REFERENCE_LEN, Reference};

pub use wavematch_stats::Alternative;
pub use wavematch_wavelet::{ThresholdMode, WaveletFamily};
