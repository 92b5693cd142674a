use std::{
    io,
    f64::consts::PI,
    fmt::{self, Debug, Formatter},
};

use crate::{debugln, return_Err};
use crate::factor::TransformDescriptor;
use crate::kernel::{KernelScratch, KernelShape, kernel_stage};
use crate::permute::permute_stage;
use crate::utils::{Rotor, check_len, try_alloc_buffer};

/// * Which way the transform goes.
/// * `Forward` computes `X[k] = sum x[j] * exp(+2 * pi * i * j * k / N)`, `Inverse` flips the exponent. Neither one normalizes.
/// * The positive forward exponent is the classic Singleton convention, the spectra are the complex conjugates of the `exp(-...)` convention for real input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FftDirection {
    #[default]
    Forward,
    Inverse,
}

impl FftDirection {
    /// * Sign of the exponent of the roots of unity.
    pub fn exponent_sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Inverse => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}

/// * The in-place mixed-radix FFT engine.
/// * Owns its two working buffers, every transform call overwrites them, so calls take `&mut self`.
/// * One engine per thread, engines share nothing.
#[derive(Clone, PartialEq)]
pub struct MixedRadixFft {
    desc: TransformDescriptor,

    /// `4 * max_factor` values: pair sums, pair differences, root cosines, root sines
    work: Vec<f64>,

    /// `max_permute` entries for the permutation stage
    perm: Vec<isize>,
}

impl Debug for MixedRadixFft {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("MixedRadixFft")
        .field("desc", &self.desc)
        .field("work", &format_args!("[f64; {}]", self.work.len()))
        .field("perm", &format_args!("[isize; {}]", self.perm.len()))
        .finish()
    }
}

impl MixedRadixFft {
    /// * Build an engine for a dimension of `ndim` points, `spacing` elements apart, repeated over `n_segments` consecutive blocks.
    /// * Fails on a degenerate shape or when the working buffers can not be acquired.
    pub fn new(ndim: usize, spacing: usize, n_segments: usize) -> Result<Self, io::Error> {
        let desc = TransformDescriptor::new(ndim, spacing, n_segments)?;
        let work = try_alloc_buffer::<f64>(desc.max_factor * 4)?;
        let perm = try_alloc_buffer::<isize>(desc.max_permute)?;
        debugln!("MixedRadixFft: {} real and {} index scratch slots", work.len(), perm.len());
        Ok(Self {
            desc,
            work,
            perm,
        })
    }

    /// * A plain contiguous transform of `n` points.
    pub fn with_len(n: usize) -> Result<Self, io::Error> {
        Self::new(n, 1, 1)
    }

    pub fn descriptor(&self) -> &TransformDescriptor {
        &self.desc
    }

    /// * Points of the transformed dimension.
    pub fn len(&self) -> usize {
        self.desc.npts
    }

    /// * Elements a data array must hold.
    pub fn total_len(&self) -> usize {
        self.desc.ntot
    }

    /// * In-place complex transform of every segment and every interleaved channel.
    pub fn transform(&mut self, re: &mut [f64], im: &mut [f64], direction: FftDirection) -> Result<(), io::Error> {
        check_len("real", re.len(), self.desc.ntot)?;
        check_len("imaginary", im.len(), self.desc.ntot)?;
        if self.desc.is_trivial() {
            return Ok(());
        }

        let factors = self.desc.factors;
        let max_factor = self.desc.max_factor;
        let shape = KernelShape {
            ntot: self.desc.ntot,
            nspan: self.desc.nspan,
            spacing: self.desc.spacing(),
        };

        let mut scratch = KernelScratch::split(&mut self.work, max_factor);
        kernel_stage(re, im, shape, &factors, direction.exponent_sign(), &mut scratch);
        permute_stage(re, im, shape, &factors, self.desc.n_sq_facs, &mut self.perm, scratch.rtmp, scratch.itmp);
        Ok(())
    }

    pub fn forward(&mut self, re: &mut [f64], im: &mut [f64]) -> Result<(), io::Error> {
        self.transform(re, im, FftDirection::Forward)
    }

    /// * Unnormalized, divide by `len()` to get the input of `forward` back.
    pub fn inverse(&mut self, re: &mut [f64], im: &mut [f64]) -> Result<(), io::Error> {
        self.transform(re, im, FftDirection::Inverse)
    }

    fn check_real(&self, even: &[f64], odd: &[f64]) -> Result<(), io::Error> {
        if self.desc.ntot != self.desc.npts {
            return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("Real-sequence transforms need a contiguous single-segment engine, this one spans {} elements for {} points", self.desc.ntot, self.desc.npts)));
        }
        check_len("even-sample", even.len(), self.desc.npts)?;
        check_len("odd-sample", odd.len(), self.desc.npts)?;
        Ok(())
    }

    /// * Spectrum of the `2 * N` real samples `x[2j] = even[j]`, `x[2j + 1] = odd[j]`.
    /// * Bin `k` of `0..N` lands in `(even[k], odd[k])`. Bin 0 and the Nyquist bin `N` are both real, so the Nyquist value is packed into `odd[0]`.
    pub fn real_forward(&mut self, even: &mut [f64], odd: &mut [f64]) -> Result<(), io::Error> {
        self.check_real(even, odd)?;
        self.transform(even, odd, FftDirection::Forward)?;

        let n = self.desc.npts;
        let (re, im) = (even, odd);
        let z0r = re[0];
        let z0i = im[0];
        re[0] = z0r + z0i;
        im[0] = z0r - z0i;

        let mut rotor = Rotor::new(PI / n as f64);
        rotor.advance();
        for k in 1..=n / 2 {
            let j = n - k;
            let er = 0.5 * (re[k] + re[j]);
            let ei = 0.5 * (im[k] - im[j]);
            let or = 0.5 * (im[k] + im[j]);
            let oi = 0.5 * (re[j] - re[k]);
            let tr = rotor.c * or - rotor.s * oi;
            let ti = rotor.c * oi + rotor.s * or;
            re[k] = er + tr;
            im[k] = ei + ti;
            re[j] = er - tr;
            im[j] = ti - ei;
            rotor.advance();
        }
        Ok(())
    }

    /// * Undo `real_forward`, scaling included: the samples come back as they went in.
    /// * The Nyquist value must sit in `odd[0]`, just where `real_forward` put it.
    pub fn real_inverse(&mut self, even: &mut [f64], odd: &mut [f64]) -> Result<(), io::Error> {
        self.check_real(even, odd)?;

        let n = self.desc.npts;
        let re = &mut *even;
        let im = &mut *odd;
        let x0 = re[0];
        let xn = im[0];
        re[0] = 0.5 * (x0 + xn);
        im[0] = 0.5 * (x0 - xn);

        let mut rotor = Rotor::new(-PI / n as f64);
        rotor.advance();
        for k in 1..=n / 2 {
            let j = n - k;
            let er = 0.5 * (re[k] + re[j]);
            let ei = 0.5 * (im[k] - im[j]);
            let dr = 0.5 * (re[k] - re[j]);
            let di = 0.5 * (im[k] + im[j]);
            let or = rotor.c * dr - rotor.s * di;
            let oi = rotor.c * di + rotor.s * dr;
            re[k] = er - oi;
            im[k] = ei + or;
            re[j] = er + oi;
            im[j] = or - ei;
            rotor.advance();
        }

        self.transform(even, odd, FftDirection::Inverse)?;
        let scale = 1.0 / n as f64;
        even.iter_mut().chain(odd.iter_mut()).for_each(|v| *v *= scale);
        Ok(())
    }

    /// * `real_forward` with the Nyquist bin handed back instead of packed, `odd[0]` is left at zero.
    pub fn real_forward_split(&mut self, even: &mut [f64], odd: &mut [f64]) -> Result<f64, io::Error> {
        self.real_forward(even, odd)?;
        let nyquist = odd[0];
        odd[0] = 0.0;
        Ok(nyquist)
    }

    /// * `real_inverse` taking the Nyquist bin separately, whatever sits in `odd[0]` is ignored.
    pub fn real_inverse_split(&mut self, even: &mut [f64], odd: &mut [f64], nyquist: f64) -> Result<(), io::Error> {
        self.check_real(even, odd)?;
        odd[0] = nyquist;
        self.real_inverse(even, odd)
    }
}
