use std::f64::consts::TAU;

use crate::factor::FactorList;
use crate::utils::Rotor;

const SIN60: f64 = 0.86602540378443864676372317075294; // (std::f64::consts::PI / 3.0).sin();
const COS72: f64 = 0.30901699437494742410229341718282; // (std::f64::consts::TAU / 5.0).cos();
const SIN72: f64 = 0.95105651629515357211643933337938; // (std::f64::consts::TAU / 5.0).sin();
const COS144: f64 = -0.80901699437494742410229341718282; // (std::f64::consts::TAU * 2.0 / 5.0).cos();
const SIN144: f64 = 0.58778525229247312916870595463907; // (std::f64::consts::TAU * 2.0 / 5.0).sin();

/// * The shape one kernel run works on, everything counted in array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelShape {
    pub ntot: usize,
    pub nspan: usize,
    pub spacing: usize,
}

/// * Per-radix scratch carved out of the engine's real buffer.
/// * `rtmp`/`itmp` hold the pair sums and differences of one general butterfly, `cos`/`sin` hold the roots of unity of the current radix.
pub struct KernelScratch<'a> {
    pub rtmp: &'a mut [f64],
    pub itmp: &'a mut [f64],
    pub cos: &'a mut [f64],
    pub sin: &'a mut [f64],
}

impl<'a> KernelScratch<'a> {
    /// * `work` must hold `4 * max_factor` values.
    pub fn split(work: &'a mut [f64], max_factor: usize) -> Self {
        let (rtmp, rest) = work.split_at_mut(max_factor);
        let (itmp, rest) = rest.split_at_mut(max_factor);
        let (cos, rest) = rest.split_at_mut(max_factor);
        let sin = &mut rest[..max_factor];
        Self {
            rtmp,
            itmp,
            cos,
            sin,
        }
    }
}

/// * Decimation in frequency over every entry of `factors`, front to back.
/// * `sign` is the sign of the exponent, `1.0` for the forward transform.
/// * Leaves the spectrum in mixed-radix digit-reversed order, the permutation stage puts it right.
pub fn kernel_stage(re: &mut [f64], im: &mut [f64], shape: KernelShape, factors: &FactorList, sign: f64, scratch: &mut KernelScratch) {
    let KernelShape { ntot, nspan, spacing } = shape;
    let mut roots_for = 0;
    let mut ispan = nspan;

    for i in 0..factors.len() {
        let p = factors[i];
        let kspan = ispan / p;
        if p > 5 && p != roots_for {
            fill_roots(p, sign, &mut scratch.cos[..p], &mut scratch.sin[..p]);
            roots_for = p;
        }

        // offset u inside the sub-span is rotated by w^(k * u) on output k
        let mut rotor = Rotor::new(sign * TAU * spacing as f64 / ispan as f64);
        for u in 0..kspan / spacing {
            for s in 0..spacing {
                let mut base = u * spacing + s;
                while base < ntot {
                    match p {
                        2 => butterfly_2(re, im, base, kspan),
                        3 => butterfly_3(re, im, base, kspan, sign),
                        4 => butterfly_4(re, im, base, kspan, sign),
                        5 => butterfly_5(re, im, base, kspan, sign),
                        _ => butterfly_generic(re, im, base, kspan, p, scratch),
                    }
                    if u != 0 {
                        rotate(re, im, base, kspan, p, rotor.c, rotor.s);
                    }
                    base += ispan;
                }
            }
            rotor.advance();
        }

        ispan = kspan;
    }
}

/// * `cos[j] + i * sin[j]` = `exp(sign * 2 * pi * i * j / p)`, built by recurrence and mirrored.
fn fill_roots(p: usize, sign: f64, cos: &mut [f64], sin: &mut [f64]) {
    let arg = TAU / p as f64;
    let c1 = libm::cos(arg);
    let s1 = sign * libm::sin(arg);
    cos[0] = 1.0;
    sin[0] = 0.0;
    for j in 1..=p / 2 {
        cos[j] = cos[j - 1] * c1 - sin[j - 1] * s1;
        sin[j] = sin[j - 1] * c1 + cos[j - 1] * s1;
        cos[p - j] = cos[j];
        sin[p - j] = -sin[j];
    }
}

/// * Multiply output `k` of one butterfly by `(c + i * s)^k`.
#[inline(always)]
fn rotate(re: &mut [f64], im: &mut [f64], base: usize, kspan: usize, p: usize, c: f64, s: f64) {
    let mut wc = c;
    let mut ws = s;
    let mut k = base + kspan;
    for _ in 1..p {
        let ak = re[k];
        re[k] = wc * ak - ws * im[k];
        im[k] = ws * ak + wc * im[k];
        let t = wc * c - ws * s;
        ws = ws * c + wc * s;
        wc = t;
        k += kspan;
    }
}

#[inline(always)]
fn butterfly_2(re: &mut [f64], im: &mut [f64], k0: usize, kspan: usize) {
    let k1 = k0 + kspan;
    let ak = re[k1];
    let bk = im[k1];
    re[k1] = re[k0] - ak;
    im[k1] = im[k0] - bk;
    re[k0] += ak;
    im[k0] += bk;
}

#[inline(always)]
fn butterfly_3(re: &mut [f64], im: &mut [f64], k0: usize, kspan: usize, sign: f64) {
    let k1 = k0 + kspan;
    let k2 = k1 + kspan;
    let aj = re[k1] + re[k2];
    let bj = im[k1] + im[k2];
    let ak = re[k0] - 0.5 * aj;
    let bk = im[k0] - 0.5 * bj;
    re[k0] += aj;
    im[k0] += bj;
    let aj = (re[k1] - re[k2]) * SIN60 * sign;
    let bj = (im[k1] - im[k2]) * SIN60 * sign;
    re[k1] = ak - bj;
    im[k1] = bk + aj;
    re[k2] = ak + bj;
    im[k2] = bk - aj;
}

#[inline(always)]
fn butterfly_4(re: &mut [f64], im: &mut [f64], k0: usize, kspan: usize, sign: f64) {
    let k1 = k0 + kspan;
    let k2 = k1 + kspan;
    let k3 = k2 + kspan;
    let akp = re[k0] + re[k2];
    let akm = re[k0] - re[k2];
    let ajp = re[k1] + re[k3];
    let ajm = (re[k1] - re[k3]) * sign;
    let bkp = im[k0] + im[k2];
    let bkm = im[k0] - im[k2];
    let bjp = im[k1] + im[k3];
    let bjm = (im[k1] - im[k3]) * sign;
    re[k0] = akp + ajp;
    im[k0] = bkp + bjp;
    re[k2] = akp - ajp;
    im[k2] = bkp - bjp;
    re[k1] = akm - bjm;
    im[k1] = bkm + ajm;
    re[k3] = akm + bjm;
    im[k3] = bkm - ajm;
}

#[inline(always)]
fn butterfly_5(re: &mut [f64], im: &mut [f64], k0: usize, kspan: usize, sign: f64) {
    let s72 = SIN72 * sign;
    let s144 = SIN144 * sign;
    let k1 = k0 + kspan;
    let k2 = k1 + kspan;
    let k3 = k2 + kspan;
    let k4 = k3 + kspan;
    let akp = re[k1] + re[k4];
    let akm = re[k1] - re[k4];
    let bkp = im[k1] + im[k4];
    let bkm = im[k1] - im[k4];
    let ajp = re[k2] + re[k3];
    let ajm = re[k2] - re[k3];
    let bjp = im[k2] + im[k3];
    let bjm = im[k2] - im[k3];
    let aa = re[k0];
    let bb = im[k0];
    re[k0] = aa + akp + ajp;
    im[k0] = bb + bkp + bjp;

    let ak = akp * COS72 + ajp * COS144 + aa;
    let bk = bkp * COS72 + bjp * COS144 + bb;
    let aj = akm * s72 + ajm * s144;
    let bj = bkm * s72 + bjm * s144;
    re[k1] = ak - bj;
    re[k4] = ak + bj;
    im[k1] = bk + aj;
    im[k4] = bk - aj;

    let ak = akp * COS144 + ajp * COS72 + aa;
    let bk = bkp * COS144 + bjp * COS72 + bb;
    let aj = akm * s144 - ajm * s72;
    let bj = bkm * s144 - bjm * s72;
    re[k2] = ak - bj;
    re[k3] = ak + bj;
    im[k2] = bk + aj;
    im[k3] = bk - aj;
}

/// * Odd radix `p` by direct summation over the symmetric pairs `(m, p - m)`, `O(p^2)`.
fn butterfly_generic(re: &mut [f64], im: &mut [f64], k0: usize, kspan: usize, p: usize, scratch: &mut KernelScratch) {
    let h = (p - 1) / 2;
    let KernelScratch { rtmp, itmp, cos, sin } = scratch;
    let aa = re[k0];
    let bb = im[k0];
    let mut ak = aa;
    let mut bk = bb;
    for m in 1..=h {
        let k1 = k0 + m * kspan;
        let k2 = k0 + (p - m) * kspan;
        rtmp[m - 1] = re[k1] + re[k2];
        itmp[m - 1] = im[k1] + im[k2];
        rtmp[h + m - 1] = re[k1] - re[k2];
        itmp[h + m - 1] = im[k1] - im[k2];
        ak += rtmp[m - 1];
        bk += itmp[m - 1];
    }
    re[k0] = ak;
    im[k0] = bk;

    for j in 1..=h {
        let mut ak = aa;
        let mut bk = bb;
        let mut aj = 0.0;
        let mut bj = 0.0;
        let mut jj = 0;
        for m in 1..=h {
            jj += j;
            if jj >= p {
                jj -= p;
            }
            ak += rtmp[m - 1] * cos[jj];
            bk += itmp[m - 1] * cos[jj];
            aj += rtmp[h + m - 1] * sin[jj];
            bj += itmp[h + m - 1] * sin[jj];
        }
        let k1 = k0 + j * kspan;
        let k2 = k0 + (p - j) * kspan;
        re[k1] = ak - bj;
        im[k1] = bk + aj;
        re[k2] = ak + bj;
        im[k2] = bk - aj;
    }
}
