//! Coefficient thresholding rules.

use std::fmt;
use std::str::FromStr;

/// Rule applied to wavelet coefficients whose magnitude is compared with a
/// threshold `t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ThresholdMode {
    /// Zero coefficients with `|c| < t`, keep the rest unchanged.
    #[default]
    Hard,
    /// Shrink every coefficient towards zero: `sign(c) * max(|c| - t, 0)`.
    Soft,
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hard => write!(f, "hard"),
            Self::Soft => write!(f, "soft"),
        }
    }
}

impl FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hard" => Ok(Self::Hard),
            "soft" => Ok(Self::Soft),
            other => Err(format!("unknown threshold mode: {other:?}")),
        }
    }
}

/// Applies `mode` with threshold `value` to every coefficient in place.
pub fn threshold_in_place(coeffs: &mut [f64], value: f64, mode: ThresholdMode) {
    match mode {
        ThresholdMode::Hard => {
            for c in coeffs.iter_mut() {
                if c.abs() < value {
                    *c = 0.0;
                }
            }
        }
        ThresholdMode::Soft => {
            for c in coeffs.iter_mut() {
                let shrunk = (c.abs() - value).max(0.0);
                *c = shrunk.copysign(*c);
            }
        }
    }
}

/// Returns a thresholded copy of `coeffs`.
pub fn threshold(coeffs: &[f64], value: f64, mode: ThresholdMode) -> Vec<f64> {
    let mut out = coeffs.to_vec();
    threshold_in_place(&mut out, value, mode);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_keeps_values_at_threshold() {
        let out = threshold(&[-2.0, -0.5, 0.0, 0.99, 1.0, 3.0], 1.0, ThresholdMode::Hard);
        assert_eq!(out, vec![-2.0, 0.0, 0.0, 0.0, 1.0, 3.0]);
    }

    #[test]
    fn soft_shrinks_towards_zero() {
        let out = threshold(&[-2.0, -0.5, 0.5, 3.0], 1.0, ThresholdMode::Soft);
        assert_eq!(out, vec![-1.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn zero_threshold_is_identity_for_hard() {
        let data = [0.0, -1e-300, 5.0];
        assert_eq!(threshold(&data, 0.0, ThresholdMode::Hard), data.to_vec());
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("HARD".parse::<ThresholdMode>().unwrap(), ThresholdMode::Hard);
        assert_eq!("soft".parse::<ThresholdMode>().unwrap(), ThresholdMode::Soft);
        assert!("garrote".parse::<ThresholdMode>().is_err());
        assert_eq!(ThresholdMode::default(), ThresholdMode::Hard);
        assert_eq!(ThresholdMode::Soft.to_string(), "soft");
    }
}
