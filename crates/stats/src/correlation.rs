//! Pearson and Spearman correlation with Student's t significance tests.

use std::fmt;
use std::str::FromStr;

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::mean;
use crate::rank::average_ranks;

/// Alternative hypothesis for a one- or two-sided correlation test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Alternative {
    /// The correlation is non-zero.
    #[default]
    TwoSided,
    /// The correlation is negative.
    Less,
    /// The correlation is positive.
    Greater,
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoSided => write!(f, "two-sided"),
            Self::Less => write!(f, "less"),
            Self::Greater => write!(f, "greater"),
        }
    }
}

impl FromStr for Alternative {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-sided" | "two_sided" => Ok(Self::TwoSided),
            "less" => Ok(Self::Less),
            "greater" => Ok(Self::Greater),
            other => Err(format!("unknown alternative hypothesis: {other:?}")),
        }
    }
}

/// A correlation coefficient together with its p-value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationTest {
    pub coefficient: f64,
    pub p_value: f64,
}

/// Pearson correlation coefficient between two equal-length slices.
///
/// Returns `None` if the lengths differ, fewer than 2 pairs are given, or
/// either input has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Pearson correlation with a two-sided p-value.
///
/// The statistic `t = r * sqrt((n - 2) / (1 - r^2))` is compared with a
/// Student's t distribution on `n - 2` degrees of freedom. Returns `None`
/// for fewer than 3 pairs or a degenerate coefficient.
///
/// ```
/// use wavematch_stats::pearson;
///
/// let test = pearson(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 1.0, 4.0, 3.0, 5.0]).unwrap();
/// assert!((test.coefficient - 0.8).abs() < 1e-12);
/// assert!((test.p_value - 0.104_088).abs() < 1e-6);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> Option<CorrelationTest> {
    if x.len() < 3 {
        return None;
    }
    let r = pearson_correlation(x, y)?;
    let t = t_statistic(r, x.len(), 1.0 - r * r);
    let p_value = p_value(t, (x.len() - 2) as f64, Alternative::TwoSided)?;
    Some(CorrelationTest {
        coefficient: r,
        p_value,
    })
}

/// Spearman rank correlation with a p-value for `alternative`.
///
/// Ties receive average ranks. The t approximation uses
/// `t = rho * sqrt((n - 2) / ((rho + 1) * (1 - rho)))` on `n - 2` degrees of
/// freedom. Returns `None` when either input is constant or fewer than 3
/// pairs are given.
pub fn spearman(x: &[f64], y: &[f64], alternative: Alternative) -> Option<CorrelationTest> {
    if x.len() < 3 || x.len() != y.len() {
        return None;
    }
    let rho = pearson_correlation(&average_ranks(x), &average_ranks(y))?;
    let t = t_statistic(rho, x.len(), (rho + 1.0) * (1.0 - rho));
    let p_value = p_value(t, (x.len() - 2) as f64, alternative)?;
    Some(CorrelationTest {
        coefficient: rho,
        p_value,
    })
}

/// `coef * sqrt((n - 2) / denom)`, infinite with the sign of `coef` when the
/// denominator vanishes.
fn t_statistic(coef: f64, n: usize, denom: f64) -> f64 {
    if denom <= 0.0 {
        return f64::INFINITY.copysign(coef);
    }
    coef * ((n - 2) as f64 / denom).sqrt()
}

fn p_value(t: f64, df: f64, alternative: Alternative) -> Option<f64> {
    if t.is_nan() {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = match alternative {
        Alternative::TwoSided if t.is_infinite() => 0.0,
        Alternative::TwoSided => 2.0 * dist.sf(t.abs()),
        Alternative::Less if t.is_infinite() => {
            if t < 0.0 {
                0.0
            } else {
                1.0
            }
        }
        Alternative::Less => dist.cdf(t),
        Alternative::Greater if t.is_infinite() => {
            if t > 0.0 {
                0.0
            } else {
                1.0
            }
        }
        Alternative::Greater => dist.sf(t),
    };
    Some(p.clamp(0.0, 1.0))
}
