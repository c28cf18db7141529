use std::path::PathBuf;

use serde::Deserialize;
use wavematch_detect::DEFAULT_FAMILIES;

/// Top-level wavematch configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WavematchConfig {
    /// Input file locations.
    #[serde(default)]
    pub data: DataToml,

    /// Detection settings.
    #[serde(default)]
    pub detect: DetectToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_measurement_file")]
    pub measurement_file: String,
    #[serde(default = "default_reference_file")]
    pub reference_file: String,
    #[serde(default)]
    pub reference_column: Option<String>,
}

impl Default for DataToml {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            measurement_file: default_measurement_file(),
            reference_file: default_reference_file(),
            reference_column: None,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}
fn default_measurement_file() -> String {
    "MeasuredSignals.csv".to_string()
}
fn default_reference_file() -> String {
    "ReferenceSignal.csv".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_families")]
    pub families: Vec<String>,
    #[serde(default = "default_true")]
    pub probability: bool,
    #[serde(default = "default_alternative")]
    pub alternative: String,
    #[serde(default = "default_correlation_thr")]
    pub correlation_thr: f64,
    #[serde(default = "default_probability_thr")]
    pub probability_thr: f64,
    #[serde(default = "default_stepsize")]
    pub stepsize: usize,
    #[serde(default)]
    pub level: LevelToml,
    #[serde(default = "default_sigma_band")]
    pub sigma_band: usize,
    #[serde(default = "default_threshold_mode")]
    pub threshold_mode: String,
}

impl Default for DetectToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            families: default_families(),
            probability: true,
            alternative: default_alternative(),
            correlation_thr: default_correlation_thr(),
            probability_thr: default_probability_thr(),
            stepsize: default_stepsize(),
            level: LevelToml::default(),
            sigma_band: default_sigma_band(),
            threshold_mode: default_threshold_mode(),
        }
    }
}

/// Decomposition level: a count of levels, or `"max"` for the deepest level
/// each family allows on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LevelToml {
    Count(usize),
    Named(String),
}

impl Default for LevelToml {
    fn default() -> Self {
        LevelToml::Count(1)
    }
}

fn default_method() -> String {
    "pearson".to_string()
}
fn default_families() -> Vec<String> {
    DEFAULT_FAMILIES.iter().map(|s| s.to_string()).collect()
}
fn default_true() -> bool {
    true
}
fn default_alternative() -> String {
    "two-sided".to_string()
}
fn default_correlation_thr() -> f64 {
    0.5
}
fn default_probability_thr() -> f64 {
    0.995
}
fn default_stepsize() -> usize {
    80
}
fn default_sigma_band() -> usize {
    1
}
fn default_threshold_mode() -> String {
    "hard".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: WavematchConfig = toml::from_str("").unwrap();
        assert_eq!(config.data.path, PathBuf::from("./data"));
        assert_eq!(config.data.measurement_file, "MeasuredSignals.csv");
        assert_eq!(config.data.reference_file, "ReferenceSignal.csv");
        assert_eq!(config.detect.method, "pearson");
        assert_eq!(config.detect.families, vec!["bior4.4", "db8", "sym8"]);
        assert!(config.detect.probability);
        assert_eq!(config.detect.stepsize, 80);
        assert_eq!(config.detect.level, LevelToml::Count(1));
    }

    #[test]
    fn full_file_parses() {
        let text = r#"
            [data]
            path = "/srv/data"
            measurement_file = "m.csv"
            reference_file = "r.csv"
            reference_column = "SourceSignal"

            [detect]
            method = "spearman"
            families = ["db4", "sym6"]
            probability = false
            alternative = "greater"
            correlation_thr = 0.8
            probability_thr = 0.99
            stepsize = 20
            level = 2
            sigma_band = 1
            threshold_mode = "soft"
        "#;
        let config: WavematchConfig = toml::from_str(text).unwrap();
        assert_eq!(config.data.reference_column.as_deref(), Some("SourceSignal"));
        assert_eq!(config.detect.families, vec!["db4", "sym6"]);
        assert_eq!(config.detect.level, LevelToml::Count(2));
        assert_eq!(config.detect.threshold_mode, "soft");
    }

    #[test]
    fn level_accepts_max() {
        let config: WavematchConfig = toml::from_str("[detect]\nlevel = \"max\"\n").unwrap();
        assert_eq!(config.detect.level, LevelToml::Named("max".to_string()));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = toml::from_str::<WavematchConfig>("[detect]\nwindow = 5\n").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
