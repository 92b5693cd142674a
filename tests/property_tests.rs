//! Property tests for the mixed-radix engine.
//!
//! Reproduce a failure: `PROPTEST_SEED=<seed> cargo test --test property_tests`

use mixfft::{FftDirection, MixedRadixFft, Normalization, TransformDescriptor, factorize, fftn};
use proptest::prelude::*;

fn max_err(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}

fn signal(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|n| {
        (
            prop::collection::vec(-1.0f64..1.0, n),
            prop::collection::vec(-1.0f64..1.0, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn factor_list_multiplies_back_and_mirrors(n in 2usize..2000) {
        let (factors, n_sq) = factorize(n);
        let m = factors.len();
        prop_assert_eq!(factors.iter().product::<usize>(), n);
        prop_assert!(2 * n_sq <= m);
        for i in 0..n_sq {
            prop_assert_eq!(factors[i], factors[m - 1 - i]);
        }

        let desc = TransformDescriptor::new(n, 1, 1).unwrap();
        prop_assert_eq!(desc.max_factor, factors.iter().copied().max().unwrap());
        prop_assert!(desc.max_permute >= 2 * n_sq + 2);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn complex_round_trip((x_re, x_im) in signal(700)) {
        let n = x_re.len();
        let mut fft = MixedRadixFft::with_len(n).unwrap();
        let mut re = x_re.clone();
        let mut im = x_im.clone();
        fft.forward(&mut re, &mut im).unwrap();
        fft.inverse(&mut re, &mut im).unwrap();
        re.iter_mut().chain(im.iter_mut()).for_each(|v| *v /= n as f64);
        prop_assert!(max_err(&re, &x_re) < 1e-11, "n = {}", n);
        prop_assert!(max_err(&im, &x_im) < 1e-11, "n = {}", n);
    }

    #[test]
    fn real_round_trip((even, odd) in signal(700)) {
        let n = even.len();
        let mut fft = MixedRadixFft::with_len(n).unwrap();
        let mut re = even.clone();
        let mut im = odd.clone();
        fft.real_forward(&mut re, &mut im).unwrap();
        fft.real_inverse(&mut re, &mut im).unwrap();
        prop_assert!(max_err(&re, &even) < 1e-11, "n = {}", n);
        prop_assert!(max_err(&im, &odd) < 1e-11, "n = {}", n);
    }

    #[test]
    fn segmented_equals_one_by_one(n in 2usize..64, spacing in 1usize..5, n_segments in 1usize..4) {
        let total = n * spacing * n_segments;
        let x_re: Vec<f64> = (0..total).map(|i| ((i * 7919) % 101) as f64 / 101.0 - 0.5).collect();
        let x_im: Vec<f64> = (0..total).map(|i| ((i * 104729) % 97) as f64 / 97.0 - 0.5).collect();

        let mut re = x_re.clone();
        let mut im = x_im.clone();
        MixedRadixFft::new(n, spacing, n_segments).unwrap().forward(&mut re, &mut im).unwrap();

        let mut single = MixedRadixFft::with_len(n).unwrap();
        for seg in 0..n_segments {
            for s in 0..spacing {
                let at = |k: usize| seg * n * spacing + k * spacing + s;
                let mut line_re: Vec<f64> = (0..n).map(|k| x_re[at(k)]).collect();
                let mut line_im: Vec<f64> = (0..n).map(|k| x_im[at(k)]).collect();
                single.forward(&mut line_re, &mut line_im).unwrap();
                for k in 0..n {
                    prop_assert!((re[at(k)] - line_re[k]).abs() < 1e-12);
                    prop_assert!((im[at(k)] - line_im[k]).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn fftn_round_trip(a in 1usize..12, b in 1usize..12, c in 1usize..12) {
        let dims = [a, b, c];
        let total = a * b * c;
        let x_re: Vec<f64> = (0..total).map(|i| (i as f64 * 0.37).sin()).collect();
        let x_im: Vec<f64> = (0..total).map(|i| (i as f64 * 0.11).cos()).collect();
        let mut re = x_re.clone();
        let mut im = x_im.clone();
        fftn(&dims, &mut re, &mut im, FftDirection::Forward, Normalization::BySqrtLength).unwrap();
        fftn(&dims, &mut re, &mut im, FftDirection::Inverse, Normalization::BySqrtLength).unwrap();
        prop_assert!(max_err(&re, &x_re) < 1e-12);
        prop_assert!(max_err(&im, &x_im) < 1e-12);
    }
}
