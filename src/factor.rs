use std::{
    io,
    fmt::{self, Debug, Formatter},
};

use copiablebuf::CopiableBuffer;

use crate::{debugln, format_array, return_Err};

/// * A `usize` has at most 64 prime factors and every entry of the list eats at least one of them.
pub const MAX_FACTORS: usize = 64;

pub type FactorList = CopiableBuffer<usize, MAX_FACTORS>;

/// * Split `npts` into the radix list the kernel walks through.
/// * Layout: square factors, then the square-free rest in trial order, then the square factors again in reverse.
/// * Returns the list and the number of square factors at its head.
pub fn factorize(npts: usize) -> (FactorList, usize) {
    let mut factors = FactorList::new();
    if npts <= 1 {
        return (factors, 0);
    }

    let mut k = npts;

    // 16 = 4 * 4, the radix-4 pass is the cheapest one we have
    while k % 16 == 0 {
        factors.push(4);
        k /= 16;
    }

    let mut j = 3;
    loop {
        while k % (j * j) == 0 {
            factors.push(j);
            k /= j * j;
        }
        j += 2;
        if past_root(j, k) {
            break;
        }
    }

    let n_sq_facs;
    if k <= 4 {
        n_sq_facs = factors.len();
        if k != 1 {
            factors.push(k);
        }
    } else {
        if k % 4 == 0 {
            factors.push(2);
            k /= 4;
        }
        n_sq_facs = factors.len();
        let mut j = 2;
        while k != 1 {
            if past_root(j, k) {
                // what is left has no divisor below its square root
                factors.push(k);
                break;
            }
            while k % j == 0 {
                factors.push(j);
                k /= j;
            }
            j = if j == 2 { 3 } else { j + 2 };
        }
    }

    for i in (0..n_sq_facs).rev() {
        let f = factors[i];
        factors.push(f);
    }

    (factors, n_sq_facs)
}

/// * `j * j > k` without overflowing near the top of `usize`.
#[inline(always)]
fn past_root(j: usize, k: usize) -> bool {
    j.checked_mul(j).map_or(true, |sq| sq > k)
}

/// * The index buffer serves two passes of the permutation stage.
/// * The square-factor pass keeps `2 * n_sq_facs` digit counters in it, the square-free pass keeps the place values of all but the last middle digit.
/// * Either way it grows with the number of factors, never with the length.
pub fn permute_buffer_len(factors: &FactorList, n_sq_facs: usize) -> usize {
    let n_facs = factors.len();
    let counters = n_sq_facs * 2 + 2;
    let places = n_facs.saturating_sub(n_sq_facs + 1);
    counters.max(places)
}

/// * Shape and factorization of one transform, fixed at construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TransformDescriptor {
    /// Points of the transformed dimension
    pub npts: usize,

    /// `npts * spacing`
    pub nspan: usize,

    /// `nspan * n_segments`
    pub ntot: usize,

    pub factors: FactorList,

    /// Square factors at the head of `factors`, mirrored at its tail
    pub n_sq_facs: usize,

    /// Largest radix, the real scratch holds `4 * max_factor` values
    pub max_factor: usize,

    /// Length of the index scratch
    pub max_permute: usize,
}

impl TransformDescriptor {
    pub fn new(ndim: usize, spacing: usize, n_segments: usize) -> Result<Self, io::Error> {
        let ntot = match ndim.checked_mul(spacing).and_then(|nspan| nspan.checked_mul(n_segments)) {
            Some(ntot) => ntot,
            None => return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("Transform shape overflows: ndim = {ndim}, spacing = {spacing}, n_segments = {n_segments}"))),
        };
        if ntot == 0 {
            return_Err!(io::Error::new(io::ErrorKind::InvalidInput, format!("Degenerate transform shape: ndim = {ndim}, spacing = {spacing}, n_segments = {n_segments}")));
        }

        let (factors, n_sq_facs) = factorize(ndim);
        let (max_factor, max_permute) = if ndim == 1 {
            (0, 0)
        } else {
            (
                factors.iter().copied().max().unwrap_or(0),
                permute_buffer_len(&factors, n_sq_facs),
            )
        };

        let ret = Self {
            npts: ndim,
            nspan: ndim * spacing,
            ntot,
            factors,
            n_sq_facs,
            max_factor,
            max_permute,
        };
        debugln!("{:?}", ret);
        Ok(ret)
    }

    pub fn spacing(&self) -> usize {
        self.nspan / self.npts
    }

    pub fn n_segments(&self) -> usize {
        self.ntot / self.nspan
    }

    pub fn n_facs(&self) -> usize {
        self.factors.len()
    }

    pub fn is_trivial(&self) -> bool {
        self.npts == 1
    }
}

impl Debug for TransformDescriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("TransformDescriptor")
        .field("npts", &self.npts)
        .field("nspan", &self.nspan)
        .field("ntot", &self.ntot)
        .field("factors", &format_args!("[{}]", format_array!(self.factors, ", ", "{}")))
        .field("n_sq_facs", &self.n_sq_facs)
        .field("max_factor", &self.max_factor)
        .field("max_permute", &self.max_permute)
        .finish()
    }
}
