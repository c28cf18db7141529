//! Daubechies and Symlet scaling filters by spectral factorisation.
//!
//! The squared magnitude response of an order-`N` Daubechies filter is
//! `cos^2N(w/2) * P(sin^2(w/2))` with `P(y) = sum_k C(N-1+k, k) y^k`. Each
//! root `y_k` of `P` maps to a reciprocal pair of zeros `z, 1/z` in the
//! z-plane through `z + 1/z = 2 - 4 y_k`. Keeping the zero inside the unit
//! circle from every pair gives the extremal-phase filter (`dbN`); choosing
//! the combination with the flattest group delay gives the least-asymmetric
//! filter (`symN`).

use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex64;
use tracing::trace;

use crate::error::WaveletError;

const MAX_ITER: usize = 2000;
const ROOT_TOL: f64 = 1e-14;
const ACCEPT_TOL: f64 = 1e-8;
const REAL_ROOT_TOL: f64 = 1e-8;
const SPREAD_TIE_TOL: f64 = 1e-12;

/// Frequency grid for the group-delay criterion, as fractions of pi.
/// Stops short of pi, where the response has an order-N zero.
const GRID_POINTS: usize = 48;
const GRID_DIVISOR: f64 = 64.0;

/// Extremal-phase Daubechies scaling filter with `order` vanishing moments.
pub(crate) fn extremal_phase(order: u8) -> Result<Vec<f64>, WaveletError> {
    let groups = zero_groups(order)?;
    let zeros: Vec<Complex64> = groups.into_iter().flatten().collect();
    Ok(build_filter(order, &zeros))
}

/// Least-asymmetric (Symlet) scaling filter with `order` vanishing moments.
///
/// Every zero selection and its mirror image have the same group-delay
/// spread; the tie goes to the filter whose energy sits earlier in time.
pub(crate) fn least_asymmetric(order: u8) -> Result<Vec<f64>, WaveletError> {
    let groups = zero_groups(order)?;
    let n_groups = groups.len();

    let mut best: Option<(f64, f64, Vec<f64>)> = None;
    for mask in 0..(1_u32 << n_groups) {
        let zeros: Vec<Complex64> = groups
            .iter()
            .enumerate()
            .flat_map(|(i, group)| {
                let flip = (mask >> i) & 1 == 1;
                group
                    .iter()
                    .map(move |&z| if flip { z.inv() } else { z })
            })
            .collect();
        let filter = build_filter(order, &zeros);
        let spread = group_delay_spread(&filter);
        let centroid = energy_centroid(&filter);
        let better = match &best {
            Some((current, current_centroid, _)) => {
                spread < current - SPREAD_TIE_TOL
                    || ((spread - current).abs() <= SPREAD_TIE_TOL && centroid < *current_centroid)
            }
            None => true,
        };
        if better {
            best = Some((spread, centroid, filter));
        }
    }

    trace!(order, n_groups, "least-asymmetric filter selected");
    best.map(|(_, _, filter)| filter)
        .ok_or_else(|| WaveletError::FilterDerivation {
            family: format!("sym{order}"),
            reason: "no candidate filters".into(),
        })
}

/// Groups the inside-unit-circle zeros so that conjugate pairs stay together.
fn zero_groups(order: u8) -> Result<Vec<Vec<Complex64>>, WaveletError> {
    let n = usize::from(order);
    if n <= 1 {
        return Ok(Vec::new());
    }

    let coeffs: Vec<f64> = (0..n).map(|k| binomial(n - 1 + k, k)).collect();
    let roots = polynomial_roots(&coeffs).map_err(|reason| WaveletError::FilterDerivation {
        family: format!("db{order}"),
        reason,
    })?;

    let mut groups = Vec::with_capacity(n - 1);
    for y in roots {
        if y.im.abs() < REAL_ROOT_TOL {
            let b = 2.0 - 4.0 * y.re;
            let z = (b - (b * b - 4.0).sqrt()) / 2.0;
            groups.push(vec![Complex64::new(z, 0.0)]);
        } else if y.im > 0.0 {
            let b = Complex64::new(2.0, 0.0) - 4.0 * y;
            let disc = (b * b - 4.0).sqrt();
            let z1 = (b - disc) / 2.0;
            let z = if z1.norm() < 1.0 { z1 } else { (b + disc) / 2.0 };
            groups.push(vec![z, z.conj()]);
        }
    }

    let n_zeros: usize = groups.iter().map(Vec::len).sum();
    if n_zeros != n - 1 {
        return Err(WaveletError::FilterDerivation {
            family: format!("db{order}"),
            reason: format!("expected {} zeros, found {n_zeros}", n - 1),
        });
    }
    Ok(groups)
}

/// Expands `(1 + z)^order * prod(z - z_k)` and normalises the sum to `sqrt(2)`.
fn build_filter(order: u8, zeros: &[Complex64]) -> Vec<f64> {
    let mut poly = vec![Complex64::new(1.0, 0.0)];
    let one = Complex64::new(1.0, 0.0);
    for _ in 0..order {
        poly = poly_mul(&poly, &[one, one]);
    }
    for &z in zeros {
        poly = poly_mul(&poly, &[-z, one]);
    }
    let real: Vec<f64> = poly.iter().map(|c| c.re).collect();
    let sum: f64 = real.iter().sum();
    real.iter().map(|&h| h * SQRT_2 / sum).collect()
}

fn poly_mul(a: &[Complex64], b: &[Complex64]) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Variance of the group delay over the low-frequency grid.
fn group_delay_spread(filter: &[f64]) -> f64 {
    let delays: Vec<f64> = (0..GRID_POINTS)
        .map(|k| {
            let w = PI * k as f64 / GRID_DIVISOR;
            let mut response = Complex64::new(0.0, 0.0);
            let mut weighted = Complex64::new(0.0, 0.0);
            for (j, &h) in filter.iter().enumerate() {
                let phasor = Complex64::from_polar(1.0, -(j as f64) * w);
                response += h * phasor;
                weighted += (j as f64 * h) * phasor;
            }
            (weighted / response).re
        })
        .collect();
    let mean = delays.iter().sum::<f64>() / delays.len() as f64;
    delays.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / delays.len() as f64
}

fn energy_centroid(filter: &[f64]) -> f64 {
    filter
        .iter()
        .enumerate()
        .map(|(j, &h)| j as f64 * h * h)
        .sum()
}

fn binomial(n: usize, k: usize) -> f64 {
    (1..=k).fold(1.0, |acc, i| acc * (n - k + i) as f64 / i as f64)
}

/// Durand-Kerner simultaneous iteration. `coeffs` are in ascending order.
fn polynomial_roots(coeffs: &[f64]) -> Result<Vec<Complex64>, String> {
    let degree = coeffs.len() - 1;
    let lead = coeffs[degree];
    let monic: Vec<f64> = coeffs.iter().map(|c| c / lead).collect();
    let eval = |x: Complex64| {
        monic
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
    };

    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32)).collect();
    let mut last_step = f64::INFINITY;
    for _ in 0..MAX_ITER {
        last_step = 0.0;
        for i in 0..degree {
            let r = roots[i];
            let denom = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &s)| acc * (r - s));
            let delta = eval(r) / denom;
            roots[i] = r - delta;
            last_step = last_step.max(delta.norm() / r.norm().max(1.0));
        }
        if last_step < ROOT_TOL {
            return Ok(roots);
        }
    }
    if last_step < ACCEPT_TOL {
        Ok(roots)
    } else {
        Err(format!("root search did not converge (last step {last_step:e})"))
    }
}
