//! Little-endian bit packing of polynomial coefficients
//!
//! Coefficient `i` occupies bits `[i*b, (i+1)*b)` of the output, least
//! significant bit first.

use alloc::vec::Vec;

use super::params::Modulus;
use super::polynomial::Polynomial;
use crate::error::{validate, Result};

/// Packs polynomial coefficients into bytes
pub trait CoefficientPacker<M: Modulus> {
    /// Packs every coefficient using `bits_per_coeff` bits
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>>;
}

/// Unpacks bytes into polynomial coefficients
pub trait CoefficientUnpacker<M: Modulus> {
    /// Reads `N` coefficients of `bits_per_coeff` bits each
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>>;
}

/// Default implementation for coefficient serialization
pub struct DefaultCoefficientSerde;

/// Number of bytes needed to hold `n` coefficients of `bits_per_coeff` bits
pub const fn bytes_required(bits_per_coeff: usize, n: usize) -> usize {
    (bits_per_coeff * n + 7) / 8
}

fn check_width(bits_per_coeff: usize) -> Result<()> {
    validate::parameter(
        (1..=32).contains(&bits_per_coeff),
        "bits_per_coeff",
        "must be in range [1, 32]",
    )
}

/// Appends `values`, each truncated to `bits_per_coeff` bits, to `out`
pub fn pack_bits(values: &[u32], bits_per_coeff: usize, out: &mut Vec<u8>) -> Result<()> {
    check_width(bits_per_coeff)?;
    let mask = (u64::MAX >> (64 - bits_per_coeff)) as u32;
    out.reserve(bytes_required(bits_per_coeff, values.len()));

    let mut acc: u64 = 0;
    let mut acc_bits = 0usize;
    for &value in values {
        acc |= ((value & mask) as u64) << acc_bits;
        acc_bits += bits_per_coeff;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
    Ok(())
}

/// Fills `out` with `bits_per_coeff`-bit values read from `bytes`
///
/// `bytes` must be exactly as long as `out` requires.
pub fn unpack_bits(bytes: &[u8], bits_per_coeff: usize, out: &mut [u32]) -> Result<()> {
    check_width(bits_per_coeff)?;
    validate::length(
        "packed coefficients",
        bytes.len(),
        bytes_required(bits_per_coeff, out.len()),
    )?;
    let mask = u64::MAX >> (64 - bits_per_coeff);

    let mut acc: u64 = 0;
    let mut acc_bits = 0usize;
    let mut input = bytes.iter();
    for slot in out.iter_mut() {
        while acc_bits < bits_per_coeff {
            // Length was checked above
            let byte = input.next().copied().unwrap_or(0);
            acc |= (byte as u64) << acc_bits;
            acc_bits += 8;
        }
        *slot = (acc & mask) as u32;
        acc >>= bits_per_coeff;
        acc_bits -= bits_per_coeff;
    }
    Ok(())
}

impl<M: Modulus> CoefficientPacker<M> for DefaultCoefficientSerde {
    fn pack_coeffs(poly: &Polynomial<M>, bits_per_coeff: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        pack_bits(poly.as_coeffs_slice(), bits_per_coeff, &mut out)?;
        Ok(out)
    }
}

impl<M: Modulus> CoefficientUnpacker<M> for DefaultCoefficientSerde {
    fn unpack_coeffs(bytes: &[u8], bits_per_coeff: usize) -> Result<Polynomial<M>> {
        // Every representable value must already be canonical
        validate::parameter(
            bits_per_coeff < 32 && (1u64 << bits_per_coeff) <= M::Q as u64,
            "bits_per_coeff",
            "width admits values outside [0, Q)",
        )?;
        let mut poly = Polynomial::zero();
        unpack_bits(bytes, bits_per_coeff, poly.as_mut_coeffs_slice())?;
        Ok(poly)
    }
}
