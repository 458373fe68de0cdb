//! Rounding, hint and norm helpers for Dilithium.
//!
//! Inputs are canonical residues in `[0, q)`. Signed low parts are returned
//! as `i32`; vector-level helpers store them back in canonical form so they
//! can take part in further ring arithmetic.

use super::polyvec::{Poly, PolyVec, PolyVecK, Rank};
use internal::constant_time::{ct_abs, ct_canonical, ct_center, ct_neg_mask};
use params::pqc::dilithium::{DILITHIUM_D, DILITHIUM_Q};
use params::DilithiumSchemeParams;

const Q: u32 = DILITHIUM_Q;
const Q_I32: i32 = DILITHIUM_Q as i32;

/// Splits `a` into `a1 * 2^d + a0` with `a0` in `(-2^(d-1), 2^(d-1)]`.
pub(crate) fn power2round(a: u32) -> (i32, u32) {
    let a1 = (a + (1 << (DILITHIUM_D - 1)) - 1) >> DILITHIUM_D;
    let a0 = a as i32 - (a1 << DILITHIUM_D) as i32;
    (a0, a1)
}

/// Splits `a` into `a1 * 2*gamma2 + a0` with `a0` in `(-gamma2, gamma2]`.
///
/// When `a - a0 = q - 1` the high part wraps to 0 and `a0` is decremented,
/// so `a1` always lies in `[0, (q-1)/(2*gamma2))`. Branch-free in `a`.
pub(crate) fn decompose<P: DilithiumSchemeParams>(a: u32) -> (i32, u32) {
    let mut a1 = ((a + 127) >> 7) as i32;
    if P::GAMMA2_PARAM == (Q - 1) / 32 {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    } else {
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }

    let mut a0 = a as i32 - a1 * 2 * P::GAMMA2_PARAM as i32;
    a0 -= (((Q_I32 - 1) / 2 - a0) >> 31) & Q_I32;
    (a0, a1 as u32)
}

/// Hint bit telling the verifier that the high bits moved.
pub(crate) fn make_hint<P: DilithiumSchemeParams>(a0: i32, a1: u32) -> u32 {
    let gamma2 = P::GAMMA2_PARAM as i32;
    ((a0 > gamma2) | (a0 < -gamma2) | ((a0 == -gamma2) & (a1 != 0))) as u32
}

/// High bits of `a`, corrected by one step in the direction of the low part
/// when `hint` is set.
pub(crate) fn use_hint<P: DilithiumSchemeParams>(a: u32, hint: u32) -> u32 {
    let (a0, a1) = decompose::<P>(a);
    if hint == 0 {
        return a1;
    }
    let m = (Q - 1) / (2 * P::GAMMA2_PARAM);
    if a0 > 0 {
        (a1 + 1) % m
    } else {
        (a1 + m - 1) % m
    }
}

/// True if any centered coefficient has absolute value `>= bound`.
///
/// Examines every coefficient without early exit.
pub(crate) fn poly_norm_exceeds(p: &Poly, bound: u32) -> bool {
    let limit = bound as i32 - 1;
    let mut fail = 0u32;
    for &c in p.coeffs.iter() {
        let abs = ct_abs(ct_center(c, Q)) as i32;
        fail |= ct_neg_mask(limit - abs);
    }
    fail != 0
}

pub(crate) fn vec_norm_exceeds<P, D>(v: &PolyVec<P, D>, bound: u32) -> bool {
    let mut fail = false;
    for p in v.polys.iter() {
        fail |= poly_norm_exceeds(p, bound);
    }
    fail
}

/// Returns `(t1, t0)` with `t0` stored canonically.
pub(crate) fn power2round_vec<P: DilithiumSchemeParams>(
    t: &PolyVecK<P>,
) -> (PolyVecK<P>, PolyVecK<P>) {
    let mut t1 = PolyVecK::<P>::zero();
    let mut t0 = PolyVecK::<P>::zero();
    for ((src, hi), lo) in t.polys.iter().zip(t1.polys.iter_mut()).zip(t0.polys.iter_mut()) {
        for i in 0..src.coeffs.len() {
            let (a0, a1) = power2round(src.coeffs[i]);
            hi.coeffs[i] = a1;
            lo.coeffs[i] = ct_canonical(a0, Q);
        }
    }
    (t1, t0)
}

/// Returns `(w1, w0)` with `w0` stored canonically.
pub(crate) fn decompose_vec<P: DilithiumSchemeParams, D: Rank>(
    w: &PolyVec<P, D>,
) -> (PolyVec<P, D>, PolyVec<P, D>) {
    let mut w1 = PolyVec::<P, D>::zero();
    let mut w0 = PolyVec::<P, D>::zero();
    for ((src, hi), lo) in w.polys.iter().zip(w1.polys.iter_mut()).zip(w0.polys.iter_mut()) {
        for i in 0..src.coeffs.len() {
            let (a0, a1) = decompose::<P>(src.coeffs[i]);
            hi.coeffs[i] = a1;
            lo.coeffs[i] = ct_canonical(a0, Q);
        }
    }
    (w1, w0)
}

/// Hint vector for canonical low parts `r0` against high parts `w1`,
/// together with its weight.
pub(crate) fn make_hint_vec<P: DilithiumSchemeParams>(
    r0: &PolyVecK<P>,
    w1: &PolyVecK<P>,
) -> (PolyVecK<P>, usize) {
    let mut hints = PolyVecK::<P>::zero();
    let mut weight = 0usize;
    for ((lo, hi), h) in r0.polys.iter().zip(w1.polys.iter()).zip(hints.polys.iter_mut()) {
        for i in 0..lo.coeffs.len() {
            let bit = make_hint::<P>(ct_center(lo.coeffs[i], Q), hi.coeffs[i]);
            h.coeffs[i] = bit;
            weight += bit as usize;
        }
    }
    (hints, weight)
}

pub(crate) fn use_hint_vec<P: DilithiumSchemeParams>(
    hints: &PolyVecK<P>,
    w: &PolyVecK<P>,
) -> PolyVecK<P> {
    let mut w1 = PolyVecK::<P>::zero();
    for ((h, src), out) in hints.polys.iter().zip(w.polys.iter()).zip(w1.polys.iter_mut()) {
        for i in 0..src.coeffs.len() {
            out.coeffs[i] = use_hint::<P>(src.coeffs[i], h.coeffs[i]);
        }
    }
    w1
}
