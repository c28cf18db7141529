//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::*;

use wavematch_detect::{Alternative, CorrelationMethod, DetectConfig, ThresholdMode};
use wavematch_io::ReaderConfig;

/// Parses a correlation method name into the corresponding enum variant.
pub fn parse_method(s: &str) -> Result<CorrelationMethod> {
    s.parse::<CorrelationMethod>()
        .with_context(|| format!("invalid [detect].method {s:?}"))
}

/// Parses an alternative hypothesis name into the corresponding enum variant.
pub fn parse_alternative(s: &str) -> Result<Alternative> {
    s.trim().parse::<Alternative>().map_err(anyhow::Error::msg)
}

/// Parses a thresholding mode name into the corresponding enum variant.
pub fn parse_threshold_mode(s: &str) -> Result<ThresholdMode> {
    s.trim().parse::<ThresholdMode>().map_err(anyhow::Error::msg)
}

/// Converts `[detect].level` into a decomposition level; `"max"` maps to
/// `None`, the deepest level each family allows.
pub fn parse_level(level: &LevelToml) -> Result<Option<usize>> {
    match level {
        LevelToml::Count(n) => Ok(Some(*n)),
        LevelToml::Named(name) if name.trim().eq_ignore_ascii_case("max") => Ok(None),
        LevelToml::Named(other) => {
            bail!("invalid [detect].level {other:?}: expected a positive integer or \"max\"")
        }
    }
}

/// Builds a validated [`DetectConfig`] from the `[detect]` table.
pub fn build_detect_config(detect: &DetectToml) -> Result<DetectConfig> {
    let config = DetectConfig::default()
        .with_method(parse_method(&detect.method)?)
        .with_families(detect.families.iter().map(|f| f.trim()))
        .with_probability(detect.probability)
        .with_alternative(parse_alternative(&detect.alternative)?)
        .with_correlation_thr(detect.correlation_thr)
        .with_probability_thr(detect.probability_thr)
        .with_stepsize(detect.stepsize)
        .with_level(parse_level(&detect.level)?)
        .with_sigma_band(detect.sigma_band)
        .with_threshold_mode(parse_threshold_mode(&detect.threshold_mode)?);
    config.validate().context("invalid [detect] configuration")?;
    Ok(config)
}

/// Builds a [`ReaderConfig`] from the `[data]` table.
pub fn build_reader_config(data: &DataToml) -> Result<ReaderConfig> {
    let config = ReaderConfig::default().with_reference_column(data.reference_column.as_deref());
    config.validate().context("invalid [data] configuration")?;
    Ok(config)
}

/// Resolves an input path: the CLI override wins, otherwise `file` under `base`.
pub fn resolve_path(override_path: Option<&Path>, base: &Path, file: &str) -> PathBuf {
    match override_path {
        Some(p) => p.to_path_buf(),
        None => base.join(file),
    }
}

/// File names for the per-channel score tables, in channel order.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`. When two channels map to
/// the same name (compared case-insensitively), the later one gets its
/// channel position appended.
pub fn scores_file_names<'a>(channels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    channels
        .into_iter()
        .enumerate()
        .map(|(position, channel)| {
            let stem = sanitize(channel);
            let mut file = format!("{stem}_scores.csv");
            let mut suffix = position;
            while !taken.insert(file.to_lowercase()) {
                file = format!("{stem}_{suffix}_scores.csv");
                suffix += 1;
            }
            file
        })
        .collect()
}

fn sanitize(channel: &str) -> String {
    channel
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(parse_method("pearson").unwrap(), CorrelationMethod::Pearson);
        assert_eq!(parse_method("Spearman").unwrap(), CorrelationMethod::Spearman);
        let err = parse_method("kendall").unwrap_err();
        assert!(format!("{err:#}").contains("kendall"));
    }

    #[test]
    fn alternative_names() {
        assert_eq!(parse_alternative("two-sided").unwrap(), Alternative::TwoSided);
        assert_eq!(parse_alternative("two_sided").unwrap(), Alternative::TwoSided);
        assert_eq!(parse_alternative("LESS").unwrap(), Alternative::Less);
        assert_eq!(parse_alternative("greater").unwrap(), Alternative::Greater);
        assert!(parse_alternative("both").is_err());
    }

    #[test]
    fn threshold_mode_names() {
        assert_eq!(parse_threshold_mode("hard").unwrap(), ThresholdMode::Hard);
        assert_eq!(parse_threshold_mode("Soft").unwrap(), ThresholdMode::Soft);
        assert!(parse_threshold_mode("garrote").is_err());
    }

    #[test]
    fn default_detect_table_builds() {
        let config = build_detect_config(&DetectToml::default()).unwrap();
        assert_eq!(config.method(), CorrelationMethod::Pearson);
        assert!(config.probability());
        assert_eq!(config.active_threshold(), 0.995);
        assert_eq!(config.stepsize(), 80);
        assert_eq!(config.families(), &["bior4.4", "db8", "sym8"]);
    }

    #[test]
    fn invalid_detect_table_rejected() {
        let detect = DetectToml {
            families: vec![],
            sigma_band: 0,
            ..DetectToml::default()
        };
        let err = build_detect_config(&detect).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid [detect] configuration"), "{msg}");
    }

    #[test]
    fn blank_reference_column_rejected() {
        let data = DataToml {
            reference_column: Some("  ".to_string()),
            ..DataToml::default()
        };
        assert!(build_reader_config(&data).is_err());
    }

    #[test]
    fn cli_path_overrides_config() {
        let base = Path::new("./data");
        assert_eq!(
            resolve_path(None, base, "MeasuredSignals.csv"),
            PathBuf::from("./data/MeasuredSignals.csv")
        );
        assert_eq!(
            resolve_path(Some(Path::new("/tmp/m.csv")), base, "MeasuredSignals.csv"),
            PathBuf::from("/tmp/m.csv")
        );
    }

    #[test]
    fn level_values() {
        assert_eq!(parse_level(&LevelToml::Count(1)).unwrap(), Some(1));
        assert_eq!(parse_level(&LevelToml::Named("max".to_string())).unwrap(), None);
        assert_eq!(parse_level(&LevelToml::Named(" MAX ".to_string())).unwrap(), None);
        assert!(parse_level(&LevelToml::Named("deep".to_string())).is_err());
    }

    #[test]
    fn default_level_is_one() {
        let config = build_detect_config(&DetectToml::default()).unwrap();
        assert_eq!(config.level(), Some(1));
    }

    #[test]
    fn score_file_names_are_sanitized() {
        assert_eq!(
            scores_file_names(["Sensor1", "pulse a/b"]),
            vec!["Sensor1_scores.csv", "pulse_a_b_scores.csv"]
        );
    }

    #[test]
    fn colliding_score_file_names_get_positions() {
        let names = scores_file_names(["a b", "a_b", "x", "A_B", "a_b_1"]);
        assert_eq!(
            names,
            vec![
                "a_b_scores.csv",
                "a_b_1_scores.csv",
                "x_scores.csv",
                "A_B_3_scores.csv",
                "a_b_1_4_scores.csv",
            ]
        );
        let unique: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(unique.len(), names.len());
    }
}
