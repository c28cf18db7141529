//! Window scoring against the reference.

use wavematch_stats::{Alternative, pearson, spearman};

use crate::config::{CorrelationMethod, DetectConfig};

/// Scores one window of a denoised signal against the reference.
///
/// | Method | Probability mode | Raw mode |
/// |--------|------------------|----------|
/// | Pearson | `1 - p` (two-sided) | `r` |
/// | Spearman | `p` for `alternative` | `rho` |
///
/// Spearman probability mode reports the p-value itself rather than its
/// complement. Any undefined statistic (constant window, NaN) scores 0, so
/// every score is finite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowScorer {
    method: CorrelationMethod,
    probability: bool,
    alternative: Alternative,
}

impl WindowScorer {
    pub fn new(method: CorrelationMethod, probability: bool, alternative: Alternative) -> Self {
        Self {
            method,
            probability,
            alternative,
        }
    }

    /// Scorer matching a pipeline configuration.
    pub fn from_config(config: &DetectConfig) -> Self {
        Self::new(config.method(), config.probability(), config.alternative())
    }

    /// Scores `window` against `reference`; both must have the same length.
    pub fn score(&self, window: &[f64], reference: &[f64]) -> f64 {
        debug_assert_eq!(window.len(), reference.len());
        let value = match (self.method, self.probability) {
            (CorrelationMethod::Pearson, true) => {
                pearson(window, reference).map_or(f64::NAN, |t| 1.0 - t.p_value)
            }
            (CorrelationMethod::Pearson, false) => {
                pearson(window, reference).map_or(f64::NAN, |t| t.coefficient)
            }
            (CorrelationMethod::Spearman, true) => {
                spearman(window, reference, self.alternative).map_or(0.0, |t| t.p_value)
            }
            (CorrelationMethod::Spearman, false) => {
                spearman(window, reference, Alternative::TwoSided)
                    .map_or(f64::NAN, |t| t.coefficient)
            }
        };
        if value.is_nan() { 0.0 } else { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const X: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const Y: [f64; 5] = [2.0, 1.0, 4.0, 3.0, 5.0];

    fn scorer(method: CorrelationMethod, probability: bool) -> WindowScorer {
        WindowScorer::new(method, probability, Alternative::TwoSided)
    }

    #[test]
    fn pearson_raw_is_coefficient() {
        let s = scorer(CorrelationMethod::Pearson, false).score(&X, &Y);
        assert_relative_eq!(s, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn pearson_probability_is_complement_of_p() {
        let s = scorer(CorrelationMethod::Pearson, true).score(&X, &Y);
        assert_relative_eq!(s, 1.0 - 0.104_088_038_661_827_77, epsilon = 1e-9);
    }

    #[test]
    fn spearman_probability_is_p_itself() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let b = [2.0, 1.0, 4.0, 3.0, 6.0, 5.0, 8.0, 7.0];
        let s = scorer(CorrelationMethod::Spearman, true).score(&a, &b);
        assert_relative_eq!(s, 0.002_008_275_505_429_469, epsilon = 1e-9);

        let greater = WindowScorer::new(CorrelationMethod::Spearman, true, Alternative::Greater);
        assert_relative_eq!(greater.score(&a, &b), 0.001_004_137_752_714_734_5, epsilon = 1e-9);
    }

    #[test]
    fn spearman_raw_ignores_alternative() {
        let less = WindowScorer::new(CorrelationMethod::Spearman, false, Alternative::Less);
        let two = scorer(CorrelationMethod::Spearman, false);
        assert_eq!(less.score(&X, &Y), two.score(&X, &Y));
        assert_relative_eq!(two.score(&X, &Y), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn constant_window_scores_zero_in_every_mode() {
        let flat = [0.0; 5];
        for method in [CorrelationMethod::Pearson, CorrelationMethod::Spearman] {
            for probability in [true, false] {
                let s = scorer(method, probability).score(&flat, &Y);
                assert_eq!(s, 0.0, "{method} probability={probability}");
            }
        }
    }

    #[test]
    fn scores_are_finite_for_perfect_correlation() {
        for method in [CorrelationMethod::Pearson, CorrelationMethod::Spearman] {
            for probability in [true, false] {
                let s = scorer(method, probability).score(&X, &X);
                assert!(s.is_finite());
            }
        }
        assert_eq!(scorer(CorrelationMethod::Pearson, true).score(&X, &X), 1.0);
    }

    #[test]
    fn from_config_copies_settings() {
        let cfg = DetectConfig::default()
            .with_method(CorrelationMethod::Spearman)
            .with_probability(false)
            .with_alternative(Alternative::Less);
        assert_eq!(
            WindowScorer::from_config(&cfg),
            WindowScorer::new(CorrelationMethod::Spearman, false, Alternative::Less)
        );
    }
}
