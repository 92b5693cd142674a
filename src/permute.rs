use crate::debugln;
use crate::factor::{FactorList, MAX_FACTORS};
use crate::kernel::KernelShape;

/// * Put the kernel output back into natural order.
/// * After the kernel, digit position `(d_1 .. d_m)` (radix `f_1` most significant) holds bin `d_1 + d_2 * f_1 + d_3 * f_1 * f_2 + ..`, so the whole job is a digit reversal.
/// * The mirrored square factors turn the outer part of it into plain swaps, only the square-free middle needs cycles.
/// * `perm` needs `max_permute` entries, `rtmp`/`itmp` carry chunks during the cycle moves and may be of any non-zero length.
pub fn permute_stage(re: &mut [f64], im: &mut [f64], shape: KernelShape, factors: &FactorList, n_sq_facs: usize, perm: &mut [isize], rtmp: &mut [f64], itmp: &mut [f64]) {
    let n_facs = factors.len();
    if n_facs < 2 {
        return;
    }

    // weight of every digit position, in array elements
    let mut weights = [0usize; MAX_FACTORS];
    weights[n_facs - 1] = shape.spacing;
    for i in (0..n_facs - 1).rev() {
        weights[i] = weights[i + 1] * factors[i + 1];
    }

    let n_middle = n_facs - n_sq_facs * 2;
    let sq_product: usize = (0..n_sq_facs).map(|i| factors[i]).product();
    let middle_product: usize = (n_sq_facs..n_sq_facs + n_middle).map(|i| factors[i]).product();
    let chunk = shape.spacing * sq_product;

    if n_sq_facs > 0 {
        swap_square_digits(re, im, shape, factors, n_sq_facs, &weights[..n_facs], middle_product, chunk, perm);
    }
    if n_middle >= 2 {
        reverse_middle_digits(re, im, shape, factors, n_sq_facs, n_middle, middle_product, chunk, perm, rtmp, itmp);
    }
}

/// * Exchange digit `i` with digit `m - 1 - i` for every square factor at once.
/// * This is an involution, every pair is swapped exactly once from its lower end.
#[allow(clippy::too_many_arguments)]
fn swap_square_digits(re: &mut [f64], im: &mut [f64], shape: KernelShape, factors: &FactorList, n_sq_facs: usize, weights: &[usize], middle_product: usize, chunk: usize, digits: &mut [isize]) {
    let n_facs = weights.len();
    let q = n_sq_facs;

    // digits[i] is the front digit i, digits[q + i] its mirror at the tail
    let digits = &mut digits[..q * 2];
    digits.fill(0);
    let mut off = 0usize;
    let mut partner = 0usize;
    let mut swaps = 0usize;

    loop {
        if off < partner {
            for seg in (0..shape.ntot).step_by(shape.nspan) {
                for mid in 0..middle_product {
                    let row = seg + mid * chunk;
                    for s in row..row + shape.spacing {
                        re.swap(s + off, s + partner);
                        im.swap(s + off, s + partner);
                    }
                }
            }
            swaps += 1;
        }

        // odometer step
        let mut d = 0;
        loop {
            if d == q * 2 {
                debugln!("square digit pass: {swaps} digit pairs swapped");
                return;
            }
            let i = d % q;
            let (w_off, w_partner) = if d < q {
                (weights[i], weights[n_facs - 1 - i])
            } else {
                (weights[n_facs - 1 - i], weights[i])
            };
            digits[d] += 1;
            if (digits[d] as usize) < factors[i] {
                off += w_off;
                partner += w_partner;
                break;
            }
            let back = digits[d] as usize - 1;
            off -= back * w_off;
            partner -= back * w_partner;
            digits[d] = 0;
            d += 1;
        }
    }
}

/// * Reverse the square-free middle digits by following permutation cycles.
/// * The moved unit is a contiguous chunk of `spacing * product(square factors)` elements, carried through the scratch piece by piece.
/// * Sources are computed from the digits on the fly, each cycle is led by its smallest index, so no visited table is needed.
#[allow(clippy::too_many_arguments)]
fn reverse_middle_digits(re: &mut [f64], im: &mut [f64], shape: KernelShape, factors: &FactorList, n_sq_facs: usize, n_middle: usize, middle_product: usize, chunk: usize, perm: &mut [isize], rtmp: &mut [f64], itmp: &mut [f64]) {
    let last = n_sq_facs + n_middle - 1;

    // places[k] is the weight of middle digit k once the digits are reversed, the last digit weighs 1
    let places = &mut perm[..n_middle - 1];
    let mut place = 1usize;
    for i in (n_sq_facs..last).rev() {
        place *= factors[i + 1];
        places[i - n_sq_facs] = place as isize;
    }
    let places = &*places;

    // the middle index whose chunk belongs at middle index t
    let source_of = |t: usize| -> usize {
        let mut rest = t;
        let mut src = 0;
        for (k, i) in (n_sq_facs..last).enumerate() {
            let f = factors[i];
            src += (rest % f) * places[k] as usize;
            rest /= f;
        }
        src + rest
    };

    let block = chunk * middle_product;
    let piece = rtmp.len().min(itmp.len());
    let mut cycles = 0usize;

    for t0 in 1..middle_product {
        let mut t = source_of(t0);
        if t == t0 {
            continue;
        }
        while t > t0 {
            t = source_of(t);
        }
        if t < t0 {
            continue;
        }

        for base in (0..shape.ntot).step_by(block) {
            let mut o = 0;
            while o < chunk {
                let len = piece.min(chunk - o);
                let at = |t: usize| base + t * chunk + o;

                rtmp[..len].copy_from_slice(&re[at(t0)..at(t0) + len]);
                itmp[..len].copy_from_slice(&im[at(t0)..at(t0) + len]);
                let mut t = t0;
                loop {
                    let src = source_of(t);
                    if src == t0 {
                        re[at(t)..at(t) + len].copy_from_slice(&rtmp[..len]);
                        im[at(t)..at(t) + len].copy_from_slice(&itmp[..len]);
                        break;
                    }
                    re.copy_within(at(src)..at(src) + len, at(t));
                    im.copy_within(at(src)..at(src) + len, at(t));
                    t = src;
                }
                o += len;
            }
        }
        cycles += 1;
    }

    debugln!("square-free pass: {cycles} cycles over {middle_product} chunks of {chunk}");
}
