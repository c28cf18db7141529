//! Statistical helper functions for wavematch.
//!
//! The mean and the mean absolute deviation used for noise estimation live
//! here; correlation coefficients, their significance tests and ranking are
//! re-exported from submodules.

mod correlation;
mod rank;

pub use correlation::{
    Alternative, CorrelationTest, pearson, pearson_correlation, spearman,
};
pub use rank::average_ranks;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean absolute deviation around the mean: `mean(|x - mean(x)|)`.
///
/// Not the median absolute deviation. Returns 0.0 if empty.
pub fn mean_absolute_deviation(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m).abs()).sum::<f64>() / data.len() as f64
}
