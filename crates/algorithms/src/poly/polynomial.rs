//! Polynomials over `Z_Q[X]/(X^N + 1)` with canonical coefficients

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use pqsig_internal::constant_time::ct_reduce_once;
use zeroize::Zeroize;

use super::params::Modulus;
use crate::error::{validate, Error, Result};

/// A polynomial in the ring `R_Q = Z_Q[X]/(X^N + 1)`
///
/// Every coefficient is held in `[0, Q)`. Arithmetic never branches on
/// coefficient values, so secret polynomials can flow through it.
pub struct Polynomial<M: Modulus> {
    /// Coefficients in standard representation, lowest degree first
    pub coeffs: Vec<u32>,
    _marker: PhantomData<M>,
}

// Manual impls keep the modulus marker free of trait bounds
impl<M: Modulus> Clone for Polynomial<M> {
    fn clone(&self) -> Self {
        Self {
            coeffs: self.coeffs.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M: Modulus> PartialEq for Polynomial<M> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl<M: Modulus> Eq for Polynomial<M> {}

impl<M: Modulus> fmt::Debug for Polynomial<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("q", &M::Q)
            .field("coeffs", &self.coeffs)
            .finish()
    }
}

impl<M: Modulus> Zeroize for Polynomial<M> {
    fn zeroize(&mut self) {
        self.coeffs.as_mut_slice().zeroize();
    }
}

impl<M: Modulus> Default for Polynomial<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<M: Modulus> Polynomial<M> {
    /// Creates a new polynomial with all coefficients set to zero
    pub fn zero() -> Self {
        Self {
            coeffs: vec![0; M::N],
            _marker: PhantomData,
        }
    }

    /// Creates a polynomial from a slice of canonical coefficients
    pub fn from_coeffs(coeffs: &[u32]) -> Result<Self> {
        validate::length("polynomial coefficients", coeffs.len(), M::N)?;
        validate::parameter(
            coeffs.iter().all(|&c| c < M::Q),
            "coeffs",
            "coefficient not reduced modulo Q",
        )?;
        Ok(Self {
            coeffs: coeffs.to_vec(),
            _marker: PhantomData,
        })
    }

    /// Builds a polynomial by evaluating `f` at every index
    ///
    /// `f` must return values in `[0, Q)`.
    pub fn from_fn(f: impl FnMut(usize) -> u32) -> Self {
        Self {
            coeffs: (0..M::N).map(f).collect(),
            _marker: PhantomData,
        }
    }

    /// Returns the polynomial degree bound N
    pub const fn degree() -> usize {
        M::N
    }

    /// Returns the coefficient modulus Q
    pub const fn modulus_q() -> u32 {
        M::Q
    }

    /// Returns a slice of the coefficients
    pub fn as_coeffs_slice(&self) -> &[u32] {
        &self.coeffs
    }

    /// Returns a mutable slice of the coefficients
    pub fn as_mut_coeffs_slice(&mut self) -> &mut [u32] {
        &mut self.coeffs
    }

    /// Coefficient-wise addition
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out += other;
        out
    }

    /// Coefficient-wise subtraction
    pub fn sub(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out -= other;
        out
    }

    /// Additive inverse
    pub fn neg(&self) -> Self {
        Self::from_fn(|i| ct_reduce_once(M::Q - self.coeffs[i], M::Q))
    }

    /// Multiplies every coefficient by `scalar`
    ///
    /// Uses the hardware remainder; call it on public data only.
    pub fn scalar_mul(&self, scalar: u32) -> Self {
        let q = M::Q as u64;
        let s = scalar as u64 % q;
        Self::from_fn(|i| (self.coeffs[i] as u64 * s % q) as u32)
    }

    /// Quadratic-time negacyclic product
    ///
    /// Reference multiplication for cross-checking the transform; public
    /// data only.
    pub fn schoolbook_mul(&self, other: &Self) -> Self {
        let n = M::N;
        let q = M::Q as u64;
        let mut acc = vec![0u64; n];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                let prod = a as u64 * b as u64 % q;
                let k = i + j;
                if k < n {
                    acc[k] = (acc[k] + prod) % q;
                } else {
                    // X^N = -1
                    acc[k - n] = (acc[k - n] + q - prod) % q;
                }
            }
        }
        Self::from_fn(|i| acc[i] as u32)
    }
}

impl<M: Modulus> AddAssign<&Polynomial<M>> for Polynomial<M> {
    fn add_assign(&mut self, other: &Polynomial<M>) {
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = ct_reduce_once(*a + b, M::Q);
        }
    }
}

impl<M: Modulus> SubAssign<&Polynomial<M>> for Polynomial<M> {
    fn sub_assign(&mut self, other: &Polynomial<M>) {
        for (a, &b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a = ct_reduce_once(*a + M::Q - b, M::Q);
        }
    }
}

impl<'a, M: Modulus> Add<&'a Polynomial<M>> for &'a Polynomial<M> {
    type Output = Polynomial<M>;

    fn add(self, other: &'a Polynomial<M>) -> Self::Output {
        Polynomial::add(self, other)
    }
}

impl<'a, M: Modulus> Sub<&'a Polynomial<M>> for &'a Polynomial<M> {
    type Output = Polynomial<M>;

    fn sub(self, other: &'a Polynomial<M>) -> Self::Output {
        Polynomial::sub(self, other)
    }
}

impl<M: Modulus> Neg for &Polynomial<M> {
    type Output = Polynomial<M>;

    fn neg(self) -> Self::Output {
        Polynomial::neg(self)
    }
}

impl<M: Modulus> TryFrom<&[u32]> for Polynomial<M> {
    type Error = Error;

    fn try_from(coeffs: &[u32]) -> Result<Self> {
        Self::from_coeffs(coeffs)
    }
}
