//! Detection configuration.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use wavematch_stats::Alternative;
use wavematch_wavelet::ThresholdMode;

use crate::denoise::DenoiseOptions;
use crate::error::DetectError;

/// Correlation statistic used to score each window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pearson => write!(f, "pearson"),
            Self::Spearman => write!(f, "spearman"),
        }
    }
}

impl FromStr for CorrelationMethod {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            _ => Err(DetectError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Families scanned when none are configured.
pub const DEFAULT_FAMILIES: [&str; 3] = ["bior4.4", "db8", "sym8"];

/// Configuration for the detection pipeline.
///
/// Uses a builder pattern with defaults matching the reference setup.
///
/// # Example
///
/// ```ignore
/// use wavematch_detect::{CorrelationMethod, DetectConfig};
///
/// let config = DetectConfig::default()
///     .with_method(CorrelationMethod::Spearman)
///     .with_families(["db4", "sym8"])
///     .with_probability(false);
/// config.validate()?;
/// ```
#[derive(Clone, Debug)]
pub struct DetectConfig {
    method: CorrelationMethod,
    families: Vec<String>,
    probability: bool,
    alternative: Alternative,
    correlation_thr: f64,
    probability_thr: f64,
    stepsize: usize,
    /// `None` decomposes to the maximum level for each family and channel.
    level: Option<usize>,
    sigma_band: usize,
    threshold_mode: ThresholdMode,
}

impl Default for DetectConfig {
    /// | Parameter | Default |
    /// |-----------|---------|
    /// | `method` | pearson |
    /// | `families` | bior4.4, db8, sym8 |
    /// | `probability` | true |
    /// | `alternative` | two-sided |
    /// | `correlation_thr` | 0.5 |
    /// | `probability_thr` | 0.995 |
    /// | `stepsize` | 80 |
    /// | `level` | 1 |
    /// | `sigma_band` | 1 |
    /// | `threshold_mode` | hard |
    fn default() -> Self {
        Self {
            method: CorrelationMethod::Pearson,
            families: DEFAULT_FAMILIES.iter().map(|s| s.to_string()).collect(),
            probability: true,
            alternative: Alternative::TwoSided,
            correlation_thr: 0.5,
            probability_thr: 0.995,
            stepsize: 80,
            level: Some(1),
            sigma_band: 1,
            threshold_mode: ThresholdMode::Hard,
        }
    }
}

impl DetectConfig {
    /// Sets the correlation method.
    pub fn with_method(mut self, method: CorrelationMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the wavelet family names, in scan order.
    pub fn with_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.families = families.into_iter().map(Into::into).collect();
        self
    }

    /// Scores windows by significance instead of raw coefficient.
    pub fn with_probability(mut self, probability: bool) -> Self {
        self.probability = probability;
        self
    }

    /// Sets the alternative hypothesis for Spearman p-values.
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Sets the threshold used in raw-coefficient mode.
    pub fn with_correlation_thr(mut self, thr: f64) -> Self {
        self.correlation_thr = thr;
        self
    }

    /// Sets the threshold used in probability mode.
    pub fn with_probability_thr(mut self, thr: f64) -> Self {
        self.probability_thr = thr;
        self
    }

    /// Sets the largest offset gap that still joins two selections into one interval.
    pub fn with_stepsize(mut self, stepsize: usize) -> Self {
        self.stepsize = stepsize;
        self
    }

    /// Sets the decomposition level; `None` uses the maximum level each
    /// family allows on the channel being scanned.
    pub fn with_level(mut self, level: Option<usize>) -> Self {
        self.level = level;
        self
    }

    /// Sets the detail band used for the noise estimate (1 = finest).
    pub fn with_sigma_band(mut self, band: usize) -> Self {
        self.sigma_band = band;
        self
    }

    /// Sets the coefficient thresholding rule.
    pub fn with_threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.threshold_mode = mode;
        self
    }

    pub fn method(&self) -> CorrelationMethod {
        self.method
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn probability(&self) -> bool {
        self.probability
    }

    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    pub fn correlation_thr(&self) -> f64 {
        self.correlation_thr
    }

    pub fn probability_thr(&self) -> f64 {
        self.probability_thr
    }

    pub fn stepsize(&self) -> usize {
        self.stepsize
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }

    pub fn sigma_band(&self) -> usize {
        self.sigma_band
    }

    pub fn threshold_mode(&self) -> ThresholdMode {
        self.threshold_mode
    }

    /// Threshold applied to the mean score: `probability_thr` in probability
    /// mode, `correlation_thr` otherwise.
    pub fn active_threshold(&self) -> f64 {
        if self.probability {
            self.probability_thr
        } else {
            self.correlation_thr
        }
    }

    /// Denoising parameters derived from this configuration.
    pub fn denoise_options(&self) -> DenoiseOptions {
        DenoiseOptions::default()
            .with_level(self.level)
            .with_sigma_band(self.sigma_band)
            .with_mode(self.threshold_mode)
    }

    /// Checks every parameter and reports all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::Validation`] listing each failed check.
    pub fn validate(&self) -> Result<(), DetectError> {
        let mut errors = Vec::new();

        if !self.correlation_thr.is_finite() {
            errors.push(format!(
                "correlation_thr must be finite, got {}",
                self.correlation_thr
            ));
        }
        if !self.probability_thr.is_finite() {
            errors.push(format!(
                "probability_thr must be finite, got {}",
                self.probability_thr
            ));
        }
        if self.families.is_empty() {
            errors.push("at least one wavelet family is required".to_string());
        }
        let mut seen = HashSet::new();
        for name in &self.families {
            if !seen.insert(name.trim().to_lowercase()) {
                errors.push(format!("duplicate wavelet family '{name}'"));
            }
        }
        if self.level == Some(0) {
            errors.push("level must be at least 1".to_string());
        }
        if self.sigma_band == 0 {
            errors.push("sigma_band must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DetectError::Validation {
                count: errors.len(),
                details: errors.join("; "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = DetectConfig::default();
        assert_eq!(cfg.method(), CorrelationMethod::Pearson);
        assert_eq!(cfg.families(), &["bior4.4", "db8", "sym8"]);
        assert!(cfg.probability());
        assert_eq!(cfg.alternative(), Alternative::TwoSided);
        assert_eq!(cfg.correlation_thr(), 0.5);
        assert_eq!(cfg.probability_thr(), 0.995);
        assert_eq!(cfg.stepsize(), 80);
        assert_eq!(cfg.level(), Some(1));
        assert_eq!(cfg.sigma_band(), 1);
        assert_eq!(cfg.threshold_mode(), ThresholdMode::Hard);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn active_threshold_follows_mode() {
        let cfg = DetectConfig::default()
            .with_correlation_thr(0.7)
            .with_probability_thr(0.9);
        assert_eq!(cfg.active_threshold(), 0.9);
        assert_eq!(cfg.with_probability(false).active_threshold(), 0.7);
    }

    #[test]
    fn method_parsing() {
        assert_eq!(
            "Pearson".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Pearson
        );
        assert_eq!(
            " spearman ".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Spearman
        );
        let err = "kendall".parse::<CorrelationMethod>().unwrap_err();
        assert_eq!(err, DetectError::UnsupportedMethod("kendall".to_string()));
        assert_eq!(CorrelationMethod::Spearman.to_string(), "spearman");
    }

    #[test]
    fn validate_accumulates_errors() {
        let cfg = DetectConfig::default()
            .with_correlation_thr(f64::NAN)
            .with_probability_thr(f64::INFINITY)
            .with_level(Some(0))
            .with_sigma_band(0);
        match cfg.validate().unwrap_err() {
            DetectError::Validation { count, details } => {
                assert_eq!(count, 4);
                assert!(details.contains("correlation_thr"));
                assert!(details.contains("probability_thr"));
                assert!(details.contains("level"));
                assert!(details.contains("sigma_band"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_empty_families() {
        let cfg = DetectConfig::default().with_families(Vec::<String>::new());
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("at least one wavelet family"));
    }

    #[test]
    fn validate_duplicate_families() {
        let cfg = DetectConfig::default().with_families(["db4", "sym8", "DB4"]);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate wavelet family 'DB4'"));
    }

    #[test]
    fn unknown_family_names_pass_validation() {
        // Unknown names are skipped per channel, not rejected up front.
        let cfg = DetectConfig::default().with_families(["cgau8", "db8"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn denoise_options_carry_settings() {
        let opts = DetectConfig::default()
            .with_level(Some(2))
            .with_sigma_band(2)
            .with_threshold_mode(ThresholdMode::Soft)
            .denoise_options();
        assert_eq!(opts.level(), Some(2));
        assert_eq!(opts.sigma_band(), 2);
        assert_eq!(opts.mode(), ThresholdMode::Soft);
    }
}
