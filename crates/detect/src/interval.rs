//! Interval extraction from thresholded scores.

use serde::Serialize;

/// Inclusive `[start, end]` range of signal indices where the reference
/// was found. `end` is the last selected offset plus the window length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Offsets whose score is strictly above `threshold`, ascending.
pub fn select_offsets(scores: &[f64], threshold: f64) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Groups ascending `offsets` into intervals.
///
/// A new group starts whenever two consecutive offsets differ by more than
/// `stepsize`. Each group becomes `Interval(first, last + window)`.
///
/// ```
/// use wavematch_detect::{Interval, group_offsets};
///
/// let intervals = group_offsets(&[0, 1, 2, 90, 91], 5, 80);
/// assert_eq!(intervals, vec![Interval::new(0, 7), Interval::new(90, 96)]);
/// ```
pub fn group_offsets(offsets: &[usize], window: usize, stepsize: usize) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let Some((&first, rest)) = offsets.split_first() else {
        return intervals;
    };
    let mut start = first;
    let mut last = first;
    for &offset in rest {
        if offset - last > stepsize {
            intervals.push(Interval::new(start, last + window));
            start = offset;
        }
        last = offset;
    }
    intervals.push(Interval::new(start, last + window));
    intervals
}

/// Thresholds `scores` and groups the surviving offsets into intervals.
pub fn extract_intervals(
    scores: &[f64],
    threshold: f64,
    window: usize,
    stepsize: usize,
) -> Vec<Interval> {
    group_offsets(&select_offsets(scores, threshold), window, stepsize)
}
