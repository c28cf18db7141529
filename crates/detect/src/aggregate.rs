//! Multi-family score aggregation.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use wavematch_wavelet::WaveletFamily;

use crate::config::DetectConfig;
use crate::denoise::DenoiseOptions;
use crate::error::DetectError;
use crate::scan::scan_family;
use crate::score::WindowScorer;
use crate::signal::{Channel, Reference};

/// Scores of one wavelet family, one per window offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FamilyScores {
    pub family: String,
    pub scores: Vec<f64>,
}

/// A configured family that produced no scores for a channel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedFamily {
    pub family: String,
    pub reason: String,
}

/// Per-family score vectors of one channel plus their elementwise mean.
///
/// Columns keep the configured family order. Skipped families have no
/// column and do not contribute to the mean.
#[derive(Clone, Debug)]
pub struct ScoreTable {
    columns: Vec<FamilyScores>,
    mean: Vec<f64>,
    skipped: Vec<SkippedFamily>,
}

impl ScoreTable {
    /// Builds a table from equal-length columns.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Validation`] if the columns differ in length.
    pub fn new(columns: Vec<FamilyScores>, skipped: Vec<SkippedFamily>) -> Result<Self, DetectError> {
        let len = columns.first().map_or(0, |c| c.scores.len());
        let bad: Vec<String> = columns
            .iter()
            .filter(|c| c.scores.len() != len)
            .map(|c| format!("{} has {} scores, expected {len}", c.family, c.scores.len()))
            .collect();
        if !bad.is_empty() {
            return Err(DetectError::Validation {
                count: bad.len(),
                details: bad.join("; "),
            });
        }
        let mean = column_mean(&columns, len);
        Ok(Self {
            columns,
            mean,
            skipped,
        })
    }

    /// Returns the per-family columns in configured order.
    pub fn columns(&self) -> &[FamilyScores] {
        &self.columns
    }

    /// Returns the scores of `family`, if it was used.
    pub fn scores(&self, family: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.family == family)
            .map(|c| c.scores.as_slice())
    }

    /// Returns the elementwise mean across families.
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Returns the families skipped for this channel.
    pub fn skipped(&self) -> &[SkippedFamily] {
        &self.skipped
    }

    /// Returns the number of window offsets.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Returns `true` if there are no window offsets.
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

fn column_mean(columns: &[FamilyScores], len: usize) -> Vec<f64> {
    if columns.is_empty() {
        return vec![0.0; len];
    }
    let k = columns.len() as f64;
    (0..len)
        .map(|i| columns.iter().map(|c| c.scores[i]).sum::<f64>() / k)
        .collect()
}

/// Scans `channel` once per configured family, in parallel, and averages
/// the resulting score vectors.
///
/// Families that cannot be resolved or cannot decompose the channel are
/// skipped and logged; they are listed in [`ScoreTable::skipped`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DetectError::ReferenceTooLong`] | the reference is longer than the channel |
/// | [`DetectError::NoUsableFamily`] | every configured family was skipped |
pub fn aggregate(
    channel: &Channel,
    reference: &Reference,
    config: &DetectConfig,
) -> Result<ScoreTable, DetectError> {
    if channel.len() < reference.window() {
        return Err(DetectError::ReferenceTooLong {
            channel: channel.name().to_string(),
            len: channel.len(),
            window: reference.window(),
        });
    }

    let scorer = WindowScorer::from_config(config);
    let options = config.denoise_options();
    let results: Vec<(String, Result<Vec<f64>, DetectError>)> = config
        .families()
        .par_iter()
        .map(|name| {
            let result = scan_named(channel.as_slice(), reference.as_slice(), name, &options, &scorer);
            (name.clone(), result)
        })
        .collect();

    let mut columns = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (family, result) in results {
        match result {
            Ok(scores) => columns.push(FamilyScores { family, scores }),
            Err(DetectError::FamilyUnusable { family, reason }) => {
                info!(channel = channel.name(), %family, %reason, "skipping wavelet family");
                skipped.push(SkippedFamily { family, reason });
            }
            Err(e) => return Err(e),
        }
    }

    if columns.is_empty() {
        return Err(DetectError::NoUsableFamily {
            channel: channel.name().to_string(),
            skipped: skipped.len(),
        });
    }
    debug!(
        channel = channel.name(),
        used = columns.len(),
        skipped = skipped.len(),
        "aggregated family scores"
    );
    ScoreTable::new(columns, skipped)
}

/// Resolves `name` and scans with it; every failure becomes
/// [`DetectError::FamilyUnusable`].
fn scan_named(
    signal: &[f64],
    reference: &[f64],
    name: &str,
    options: &DenoiseOptions,
    scorer: &WindowScorer,
) -> Result<Vec<f64>, DetectError> {
    WaveletFamily::from_name(name)
        .map_err(DetectError::from)
        .and_then(|family| scan_family(signal, reference, family, options, scorer))
        .map_err(|e| DetectError::FamilyUnusable {
            family: name.to_string(),
            reason: e.to_string(),
        })
}
