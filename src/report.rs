//! Detection summaries: plain text for stdout and a JSON report.

use std::fmt::Write as _;

use serde::Serialize;

use wavematch_detect::{DetectConfig, Detection, Interval, SkippedFamily};

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub method: String,
    pub probability: bool,
    pub threshold: f64,
    pub window: usize,
    pub stepsize: usize,
    pub channels: Vec<ChannelReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChannelReport<'a> {
    pub name: &'a str,
    pub intervals: &'a [Interval],
    /// Families that contributed to the mean score.
    pub families: Vec<&'a str>,
    pub skipped: &'a [SkippedFamily],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(detection: &'a Detection, config: &DetectConfig) -> Self {
        let channels = detection
            .channels
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(found) => ChannelReport {
                    name: &outcome.name,
                    intervals: &found.intervals,
                    families: found
                        .table
                        .columns()
                        .iter()
                        .map(|c| c.family.as_str())
                        .collect(),
                    skipped: found.table.skipped(),
                    error: None,
                },
                Err(e) => ChannelReport {
                    name: &outcome.name,
                    intervals: &[],
                    families: Vec::new(),
                    skipped: &[],
                    error: Some(e.to_string()),
                },
            })
            .collect();
        Self {
            method: config.method().to_string(),
            probability: config.probability(),
            threshold: detection.threshold,
            window: detection.window,
            stepsize: config.stepsize(),
            channels,
        }
    }
}

/// One line per interval, `"<channel>: from START to END timestep"`.
/// Channels without intervals or with a failure get a single line.
pub fn render_text(detection: &Detection) -> String {
    let mut out = String::new();
    for outcome in &detection.channels {
        let name = &outcome.name;
        match &outcome.result {
            Ok(found) if found.intervals.is_empty() => {
                let _ = writeln!(out, "{name}: no interval found");
            }
            Ok(found) => {
                for iv in &found.intervals {
                    let _ = writeln!(out, "{name}: from {} to {} timestep", iv.start, iv.end);
                }
            }
            Err(e) => {
                let _ = writeln!(out, "{name}: failed: {e}");
            }
        }
    }
    out
}
