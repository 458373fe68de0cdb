//! Constant-time operations to prevent timing attacks
//!
//! The integer helpers below work on coefficients of a modulus below 2^31
//! and never branch on their inputs.

use subtle::ConstantTimeEq;

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise.
/// Runs in time that depends only on the lengths.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// All-ones mask if `x` is negative, zero otherwise
#[inline(always)]
pub const fn ct_neg_mask(x: i32) -> u32 {
    (x >> 31) as u32
}

/// One if `x` is non-zero, zero otherwise
#[inline(always)]
pub const fn ct_nonzero(x: u32) -> u32 {
    (x | x.wrapping_neg()) >> 31
}

/// Absolute value of a signed coefficient
#[inline(always)]
pub const fn ct_abs(x: i32) -> u32 {
    let m = x >> 31;
    ((x ^ m).wrapping_sub(m)) as u32
}

/// Subtracts `q` once if `a >= q`
///
/// Requires `a < 2q` and `q < 2^31`.
#[inline(always)]
pub const fn ct_reduce_once(a: u32, q: u32) -> u32 {
    let t = a.wrapping_sub(q);
    t.wrapping_add(q & ct_neg_mask(t as i32))
}

/// Maps a canonical residue in `[0, q)` to its centered representative
/// in `(-(q-1)/2, (q-1)/2]`
#[inline(always)]
pub const fn ct_center(a: u32, q: u32) -> i32 {
    let a = a as i32;
    let half = ((q - 1) / 2) as i32;
    a - ((q as i32) & ((half - a) >> 31))
}

/// Maps a signed value in `(-q, q)` to its canonical residue in `[0, q)`
#[inline(always)]
pub const fn ct_canonical(a: i32, q: u32) -> u32 {
    (a as u32).wrapping_add(q & ct_neg_mask(a))
}
