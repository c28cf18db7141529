//! Integration test: every supported family reconstructs its input exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wavematch_wavelet::{WaveletFamily, max_dwt_level, wavedec, waverec};

fn noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random::<f64>() * 2.0 - 1.0).collect()
}

#[test]
fn perfect_reconstruction_all_families_all_levels() {
    for family in WaveletFamily::all() {
        for n in [37_usize, 64, 101, 255] {
            let x = noise(n, n as u64);
            let max = max_dwt_level(n, &family);
            for level in 1..=max {
                let coeffs = wavedec(&x, family, level).unwrap();
                let y = waverec(&coeffs).unwrap();
                assert_eq!(y.len(), n);
                let err = x
                    .iter()
                    .zip(y.iter())
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0_f64, f64::max);
                assert!(err < 1e-9, "{family} n={n} level={level}: error {err}");
            }
        }
    }
}

#[test]
fn orthogonal_families_preserve_energy() {
    let x = noise(128, 7);
    let energy: f64 = x.iter().map(|v| v * v).sum();
    for family in WaveletFamily::all().into_iter().filter(|f| f.is_orthogonal()) {
        let coeffs = wavedec(&x, family, 1).unwrap();
        let band_energy: f64 = coeffs
            .approx()
            .iter()
            .chain(coeffs.detail(1).unwrap())
            .map(|v| v * v)
            .sum();
        assert!(
            (band_energy - energy).abs() < 1e-9 * energy,
            "{family}: {band_energy} vs {energy}"
        );
    }
}

#[test]
fn smooth_signal_has_small_fine_details() {
    let x: Vec<f64> = (0..256)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 64.0).sin())
        .collect();
    for name in ["db4", "sym8", "bior4.4"] {
        let family = WaveletFamily::from_name(name).unwrap();
        let coeffs = wavedec(&x, family, 1).unwrap();
        let max_detail = coeffs
            .detail(1)
            .unwrap()
            .iter()
            .map(|v| v.abs())
            .fold(0.0_f64, f64::max);
        assert!(max_detail < 1e-2, "{name}: {max_detail}");
    }
}
