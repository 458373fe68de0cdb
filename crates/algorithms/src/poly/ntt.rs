//! Number Theoretic Transform over negacyclic rings
//!
//! Complete radix-2 transform: Cooley-Tukey butterflies forward,
//! Gentleman-Sande butterflies inverse, twiddles taken from the
//! bit-reversed Montgomery table of the ring.
//!
//! Domain conventions:
//! - [`Polynomial::ntt_inplace`] maps standard coefficients to standard NTT
//!   values (twiddles carry the R factor that Montgomery reduction strips)
//! - [`Polynomial::pointwise_montgomery`] returns `a * b * R^-1`
//! - [`Polynomial::inv_ntt_tomont_inplace`] multiplies by an extra R, so a
//!   pointwise product followed by it yields the exact ring product
//! - [`Polynomial::from_ntt_inplace`] is the exact inverse of the forward
//!   transform

use pqsig_internal::constant_time::ct_reduce_once;

use super::params::NttModulus;
use super::polynomial::Polynomial;
use crate::error::{validate, Result};

/// Montgomery reduction: `a * R^-1 mod Q` for `a < Q * 2^32`
///
/// Output is canonical in `[0, Q)`.
#[inline(always)]
pub fn montgomery_reduce<M: NttModulus>(a: u64) -> u32 {
    let m = (a as u32).wrapping_mul(M::Q_INV_NEG);
    let t = ((a + m as u64 * M::Q as u64) >> 32) as u32;
    ct_reduce_once(t, M::Q)
}

/// Montgomery product `a * b * R^-1 mod Q` of two canonical residues
#[inline(always)]
pub fn montgomery_mul<M: NttModulus>(a: u32, b: u32) -> u32 {
    montgomery_reduce::<M>(a as u64 * b as u64)
}

/// Forward transform
pub trait NttOperator<M: NttModulus> {
    /// Transforms `poly` into the NTT domain in place
    fn ntt(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Inverse transform
pub trait InverseNttOperator<M: NttModulus> {
    /// Exact inverse of [`NttOperator::ntt`]
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()>;

    /// Inverse transform that leaves the result multiplied by R
    fn inv_ntt_tomont(poly: &mut Polynomial<M>) -> Result<()>;
}

/// Radix-2 butterfly network over the ring's twiddle table
pub struct CooleyTukeyNtt;

fn check_table<M: NttModulus>(poly: &Polynomial<M>) -> Result<()> {
    validate::parameter(
        M::ZETAS.len() == M::N && M::N.is_power_of_two(),
        "ZETAS",
        "twiddle table must hold N entries for a power-of-two N",
    )?;
    validate::length("polynomial coefficients", poly.coeffs.len(), M::N)
}

fn gentleman_sande<M: NttModulus>(a: &mut [u32]) {
    let n = M::N;
    let q = M::Q;
    let mut k = n;
    let mut len = 1;
    while len < n {
        let mut start = 0;
        while start < n {
            k -= 1;
            let zeta = q - M::ZETAS[k];
            for j in start..start + len {
                let t = a[j];
                let u = a[j + len];
                a[j] = ct_reduce_once(t + u, q);
                a[j + len] = montgomery_mul::<M>(zeta, ct_reduce_once(t + q - u, q));
            }
            start += 2 * len;
        }
        len <<= 1;
    }
}

impl<M: NttModulus> NttOperator<M> for CooleyTukeyNtt {
    fn ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_table(poly)?;
        let a = poly.as_mut_coeffs_slice();
        let n = M::N;
        let q = M::Q;
        let mut k = 0;
        let mut len = n / 2;
        while len > 0 {
            let mut start = 0;
            while start < n {
                k += 1;
                let zeta = M::ZETAS[k];
                for j in start..start + len {
                    let t = montgomery_mul::<M>(zeta, a[j + len]);
                    a[j + len] = ct_reduce_once(a[j] + q - t, q);
                    a[j] = ct_reduce_once(a[j] + t, q);
                }
                start += 2 * len;
            }
            len >>= 1;
        }
        Ok(())
    }
}

impl<M: NttModulus> InverseNttOperator<M> for CooleyTukeyNtt {
    fn inv_ntt(poly: &mut Polynomial<M>) -> Result<()> {
        check_table(poly)?;
        gentleman_sande::<M>(&mut poly.coeffs);
        for c in poly.coeffs.iter_mut() {
            *c = montgomery_mul::<M>(M::N_INV, *c);
        }
        Ok(())
    }

    fn inv_ntt_tomont(poly: &mut Polynomial<M>) -> Result<()> {
        check_table(poly)?;
        gentleman_sande::<M>(&mut poly.coeffs);
        for c in poly.coeffs.iter_mut() {
            *c = montgomery_mul::<M>(M::N_INV_TOMONT, *c);
        }
        Ok(())
    }
}

impl<M: NttModulus> Polynomial<M> {
    /// Forward transform in place
    pub fn ntt_inplace(&mut self) -> Result<()> {
        <CooleyTukeyNtt as NttOperator<M>>::ntt(self)
    }

    /// Exact inverse transform in place
    pub fn from_ntt_inplace(&mut self) -> Result<()> {
        <CooleyTukeyNtt as InverseNttOperator<M>>::inv_ntt(self)
    }

    /// Inverse transform in place, result multiplied by R
    pub fn inv_ntt_tomont_inplace(&mut self) -> Result<()> {
        <CooleyTukeyNtt as InverseNttOperator<M>>::inv_ntt_tomont(self)
    }

    /// Pointwise Montgomery product of two NTT-domain polynomials
    pub fn pointwise_montgomery(&self, other: &Self) -> Self {
        Self::from_fn(|i| montgomery_mul::<M>(self.coeffs[i], other.coeffs[i]))
    }

    /// Converts every coefficient into Montgomery form
    pub fn to_montgomery(&self) -> Self {
        Self::from_fn(|i| montgomery_mul::<M>(self.coeffs[i], M::MONT_R2))
    }

    /// Ring product through the transform
    pub fn ntt_mul(&self, other: &Self) -> Result<Self> {
        let mut a = self.clone();
        let mut b = other.clone();
        a.ntt_inplace()?;
        b.ntt_inplace()?;
        let mut c = a.pointwise_montgomery(&b);
        c.inv_ntt_tomont_inplace()?;
        Ok(c)
    }
}

#[cfg(test)]
mod tests;
