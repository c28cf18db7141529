//! Per-channel detection orchestration.

use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::aggregate::{ScoreTable, aggregate};
use crate::config::DetectConfig;
use crate::error::DetectError;
use crate::interval::{Interval, extract_intervals};
use crate::signal::{Channel, Reference};

/// Intervals found in one channel together with the scores behind them.
#[derive(Clone, Debug)]
pub struct ChannelDetection {
    pub intervals: Vec<Interval>,
    pub table: ScoreTable,
}

/// Outcome for one channel. A failed channel does not affect the others.
#[derive(Clone, Debug)]
pub struct ChannelOutcome {
    pub name: String,
    pub result: Result<ChannelDetection, DetectError>,
}

/// Results of a full run, in input channel order.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Threshold applied to the mean score.
    pub threshold: f64,
    /// Reference length.
    pub window: usize,
    pub channels: Vec<ChannelOutcome>,
}

impl Detection {
    /// Returns the outcome for `name`, if that channel was processed.
    pub fn channel(&self, name: &str) -> Option<&ChannelOutcome> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Number of channels that failed.
    pub fn n_failed(&self) -> usize {
        self.channels.iter().filter(|c| c.result.is_err()).count()
    }
}

/// Scores one channel against the reference and extracts its intervals.
///
/// # Errors
///
/// Propagates [`aggregate`] errors.
pub fn detect_channel(
    channel: &Channel,
    reference: &Reference,
    config: &DetectConfig,
) -> Result<ChannelDetection, DetectError> {
    let table = aggregate(channel, reference, config)?;
    let intervals = extract_intervals(
        table.mean(),
        config.active_threshold(),
        reference.window(),
        config.stepsize(),
    );
    info!(
        channel = channel.name(),
        n_intervals = intervals.len(),
        "channel scanned"
    );
    Ok(ChannelDetection { intervals, table })
}

/// Runs detection over every channel in parallel.
///
/// Channel failures are reported per channel in [`Detection::channels`].
///
/// # Errors
///
/// Returns [`DetectError::Validation`] if `config` fails validation; no
/// channel is scanned in that case.
pub fn run(
    channels: &[Channel],
    reference: &Reference,
    config: &DetectConfig,
) -> Result<Detection, DetectError> {
    config.validate()?;
    let _span = info_span!(
        "run",
        n_channels = channels.len(),
        window = reference.window(),
        method = %config.method(),
        probability = config.probability()
    )
    .entered();

    let outcomes: Vec<ChannelOutcome> = channels
        .par_iter()
        .map(|channel| ChannelOutcome {
            name: channel.name().to_string(),
            result: detect_channel(channel, reference, config),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            warn!(channel = %outcome.name, error = %e, "channel failed");
        }
    }

    Ok(Detection {
        threshold: config.active_threshold(),
        window: reference.window(),
        channels: outcomes,
    })
}
