//! CDF 9/7 biorthogonal wavelet (`bior4.4`) via the lifting scheme.
//!
//! Four lifting steps followed by a diagonal scaling, with periodic boundary
//! handling. The scaling gives the lowpass branch a DC gain of `sqrt(2)`, the
//! same normalisation as the orthonormal families.

const ALPHA: f64 = -1.586_134_342_059_924;
const BETA: f64 = -0.052_980_118_572_961;
const GAMMA: f64 = 0.882_911_075_530_934;
const DELTA: f64 = 0.443_506_852_043_971;
const ZETA: f64 = 1.149_604_398_860_241_8;

/// One analysis level on an even-length input. Returns `(approx, detail)`.
pub(crate) fn forward(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    debug_assert!(x.len() % 2 == 0 && !x.is_empty());
    let mut s: Vec<f64> = x.iter().step_by(2).copied().collect();
    let mut d: Vec<f64> = x.iter().skip(1).step_by(2).copied().collect();

    predict(&mut d, &s, ALPHA);
    update(&mut s, &d, BETA);
    predict(&mut d, &s, GAMMA);
    update(&mut s, &d, DELTA);

    s.iter_mut().for_each(|v| *v *= ZETA);
    d.iter_mut().for_each(|v| *v /= ZETA);
    (s, d)
}

/// Inverse of [`forward`]; both bands must have the same length.
pub(crate) fn inverse(approx: &[f64], detail: &[f64]) -> Vec<f64> {
    debug_assert_eq!(approx.len(), detail.len());
    let mut s: Vec<f64> = approx.iter().map(|v| v / ZETA).collect();
    let mut d: Vec<f64> = detail.iter().map(|v| v * ZETA).collect();

    update(&mut s, &d, -DELTA);
    predict(&mut d, &s, -GAMMA);
    update(&mut s, &d, -BETA);
    predict(&mut d, &s, -ALPHA);

    let mut x = Vec::with_capacity(2 * s.len());
    for (even, odd) in s.into_iter().zip(d) {
        x.push(even);
        x.push(odd);
    }
    x
}

/// `d[k] += c * (s[k] + s[k+1])`, periodic in `s`.
fn predict(d: &mut [f64], s: &[f64], c: f64) {
    let m = s.len();
    for k in 0..m {
        d[k] += c * (s[k] + s[(k + 1) % m]);
    }
}

/// `s[k] += c * (d[k-1] + d[k])`, periodic in `d`.
fn update(s: &mut [f64], d: &[f64], c: f64) {
    let m = d.len();
    for k in 0..m {
        s[k] += c * (d[(k + m - 1) % m] + d[k]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_signal_has_no_detail() {
        let (s, d) = forward(&[3.0; 16]);
        for v in &s {
            assert_relative_eq!(*v, 3.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
        }
        for v in &d {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn linear_ramp_detail_vanishes_away_from_wrap() {
        let x: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let (_, d) = forward(&x);
        // The periodic wrap creates a jump at the end; the interior is exact.
        for v in &d[1..d.len() - 2] {
            assert!(v.abs() < 1e-9, "{v}");
        }
    }

    #[test]
    fn perfect_reconstruction() {
        let x: Vec<f64> = (0..24).map(|i| ((i * 7) % 11) as f64 - 4.5).collect();
        let (s, d) = forward(&x);
        let y = inverse(&s, &d);
        assert_eq!(y.len(), x.len());
        for (a, b) in x.iter().zip(y.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_sample_input() {
        let (s, d) = forward(&[1.0, -1.0]);
        assert_eq!(s.len(), 1);
        let y = inverse(&s, &d);
        assert_relative_eq!(y[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(y[1], -1.0, epsilon = 1e-12);
    }
}
