use std::io;

use crate::{debugln, return_Err};
use crate::fft::{FftDirection, MixedRadixFft};
use crate::utils::check_len;

/// * How the result of `fftn` is scaled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Leave the sums as they are
    #[default]
    Unscaled,

    /// Divide by the total number of elements
    ByLength,

    /// Divide by the square root of the total number of elements
    BySqrtLength,
}

impl Normalization {
    pub fn factor(self, total: usize) -> f64 {
        match self {
            Self::Unscaled => 1.0,
            Self::ByLength => 1.0 / total as f64,
            Self::BySqrtLength => 1.0 / (total as f64).sqrt(),
        }
    }
}

/// * In-place transform of a dense row-major array, the last axis being the contiguous one.
/// * Each axis gets its own engine: `spacing` is the product of the later axes, the earlier ones become segments.
pub fn fftn(dims: &[usize], re: &mut [f64], im: &mut [f64], direction: FftDirection, normalization: Normalization) -> Result<(), io::Error> {
    if dims.is_empty() {
        return_Err!(io::Error::new(io::ErrorKind::InvalidInput, "No dimensions given"));
    }
    let total = match dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)) {
        Some(0) => return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("Zero-length axis in {dims:?}"))),
        Some(total) => total,
        None => return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("Array shape {dims:?} overflows"))),
    };
    check_len("real", re.len(), total)?;
    check_len("imaginary", im.len(), total)?;

    let mut spacing = 1;
    for &ndim in dims.iter().rev() {
        if ndim > 1 {
            let nspan = ndim * spacing;
            debugln!("fftn: axis of {ndim} points, spacing {spacing}, {} segments", total / nspan);
            MixedRadixFft::new(ndim, spacing, total / nspan)?.transform(re, im, direction)?;
        }
        spacing *= ndim;
    }

    let scale = normalization.factor(total);
    if scale != 1.0 {
        re.iter_mut().chain(im.iter_mut()).for_each(|v| *v *= scale);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::f64::consts::TAU;

    fn naive_dft_2d(rows: usize, cols: usize, re: &[f64], im: &[f64], sign: f64) -> (Vec<f64>, Vec<f64>) {
        let mut out_re = vec![0.0; rows * cols];
        let mut out_im = vec![0.0; rows * cols];
        for kr in 0..rows {
            for kc in 0..cols {
                for r in 0..rows {
                    for c in 0..cols {
                        let a = sign * TAU * (((r * kr) % rows) as f64 / rows as f64 + ((c * kc) % cols) as f64 / cols as f64);
                        let (s, co) = a.sin_cos();
                        let at = r * cols + c;
                        out_re[kr * cols + kc] += re[at] * co - im[at] * s;
                        out_im[kr * cols + kc] += re[at] * s + im[at] * co;
                    }
                }
            }
        }
        (out_re, out_im)
    }

    fn random(n: usize) -> Vec<f64> {
        let mut rng = rand::rng();
        (0..n).map(|_| rng.random::<f64>() * 2.0 - 1.0).collect()
    }

    #[test]
    fn two_dimensional_matches_naive() {
        for (rows, cols) in [(4usize, 9usize), (12, 5), (7, 16), (36, 3)] {
            let x_re = random(rows * cols);
            let x_im = random(rows * cols);
            let (want_re, want_im) = naive_dft_2d(rows, cols, &x_re, &x_im, 1.0);
            let mut re = x_re.clone();
            let mut im = x_im.clone();
            fftn(&[rows, cols], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).unwrap();
            for i in 0..rows * cols {
                assert!((re[i] - want_re[i]).abs() < 1e-10, "{rows} x {cols}, element {i}");
                assert!((im[i] - want_im[i]).abs() < 1e-10, "{rows} x {cols}, element {i}");
            }
        }
    }

    #[test]
    fn three_dimensional_round_trip() {
        let dims = [3usize, 1, 10, 8];
        let total = 240;
        let x_re = random(total);
        let x_im = random(total);
        let mut re = x_re.clone();
        let mut im = x_im.clone();
        fftn(&dims, &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).unwrap();
        fftn(&dims, &mut re, &mut im, FftDirection::Inverse, Normalization::ByLength).unwrap();
        for i in 0..total {
            assert!((re[i] - x_re[i]).abs() < 1e-12);
            assert!((im[i] - x_im[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn unitary_scaling_keeps_energy() {
        let dims = [6usize, 6];
        let x_re = random(36);
        let x_im = random(36);
        let energy = |re: &[f64], im: &[f64]| re.iter().zip(im.iter()).map(|(a, b)| a * a + b * b).sum::<f64>();
        let before = energy(&x_re, &x_im);
        let mut re = x_re.clone();
        let mut im = x_im.clone();
        fftn(&dims, &mut re, &mut im, FftDirection::Forward, Normalization::BySqrtLength).unwrap();
        assert!((energy(&re, &im) - before).abs() < 1e-10 * before.max(1.0));
    }

    #[test]
    fn bad_shapes() {
        let mut re = vec![0.0; 6];
        let mut im = vec![0.0; 6];
        assert!(fftn(&[], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).is_err());
        assert!(fftn(&[2, 0], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).is_err());
        assert!(fftn(&[2, 4], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).is_err());
        assert!(fftn(&[usize::MAX, 2], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).is_err());
        assert!(fftn(&[2, 3], &mut re, &mut im, FftDirection::Forward, Normalization::Unscaled).is_ok());
    }
}
