//! Polynomial vector types and operations specific to Dilithium.

use algorithms::poly::params::DilithiumRing;
use algorithms::poly::polynomial::Polynomial;
use algorithms::Result as AlgoResult;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{AddAssign, SubAssign};
use params::DilithiumSchemeParams;
use zeroize::Zeroize;

/// A polynomial of the Dilithium ring
pub(crate) type Poly = Polynomial<DilithiumRing>;

/// Vector length selector
pub(crate) trait Rank {
    fn len<P: DilithiumSchemeParams>() -> usize;
}

/// Length `l` (columns of A, s1, y, z)
pub(crate) struct RankL;

/// Length `k` (rows of A, s2, t, w, hints)
pub(crate) struct RankK;

impl Rank for RankL {
    fn len<P: DilithiumSchemeParams>() -> usize {
        P::L_DIM
    }
}

impl Rank for RankK {
    fn len<P: DilithiumSchemeParams>() -> usize {
        P::K_DIM
    }
}

/// A vector of ring polynomials whose length is fixed by the parameter set
pub(crate) struct PolyVec<P, D> {
    pub(crate) polys: Vec<Poly>,
    _marker: PhantomData<(P, D)>,
}

pub(crate) type PolyVecL<P> = PolyVec<P, RankL>;
pub(crate) type PolyVecK<P> = PolyVec<P, RankK>;

// Manual impls keep the marker types free of trait bounds
impl<P, D> Clone for PolyVec<P, D> {
    fn clone(&self) -> Self {
        Self {
            polys: self.polys.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P, D> PartialEq for PolyVec<P, D> {
    fn eq(&self, other: &Self) -> bool {
        self.polys == other.polys
    }
}

impl<P, D> Eq for PolyVec<P, D> {}

// Coefficients may be secret; only the shape is printed
impl<P, D> fmt::Debug for PolyVec<P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyVec")
            .field("len", &self.polys.len())
            .finish_non_exhaustive()
    }
}

impl<P, D> Zeroize for PolyVec<P, D> {
    fn zeroize(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.zeroize();
        }
    }
}

impl<P: DilithiumSchemeParams, D: Rank> PolyVec<P, D> {
    /// All-zero vector of the right length
    pub fn zero() -> Self {
        Self::from_polys(vec![Poly::zero(); D::len::<P>()])
    }

    pub fn from_polys(polys: Vec<Poly>) -> Self {
        debug_assert_eq!(polys.len(), D::len::<P>());
        Self {
            polys,
            _marker: PhantomData,
        }
    }

    pub fn ntt_inplace(&mut self) -> AlgoResult<()> {
        for p in self.polys.iter_mut() {
            p.ntt_inplace()?;
        }
        Ok(())
    }

    /// Inverse NTT of every entry, cancelling one pending Montgomery factor
    pub fn inv_ntt_tomont_inplace(&mut self) -> AlgoResult<()> {
        for p in self.polys.iter_mut() {
            p.inv_ntt_tomont_inplace()?;
        }
        Ok(())
    }

    /// Multiplies each entry by one NTT-domain polynomial (Montgomery product)
    pub fn pointwise_poly_montgomery(&self, poly_hat: &Poly) -> Self {
        Self::from_polys(
            self.polys
                .iter()
                .map(|p| p.pointwise_montgomery(poly_hat))
                .collect(),
        )
    }

    /// Multiplies every coefficient by 2^d
    ///
    /// Inputs must be below 2^(23-d) so the result stays below q.
    pub fn shift_left(&self, d: u32) -> Self {
        Self::from_polys(
            self.polys
                .iter()
                .map(|p| Poly::from_fn(|i| p.coeffs[i] << d))
                .collect(),
        )
    }
}

impl<P, D> AddAssign<&PolyVec<P, D>> for PolyVec<P, D> {
    fn add_assign(&mut self, other: &PolyVec<P, D>) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            *a += b;
        }
    }
}

impl<P, D> SubAssign<&PolyVec<P, D>> for PolyVec<P, D> {
    fn sub_assign(&mut self, other: &PolyVec<P, D>) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            *a -= b;
        }
    }
}

impl<P: DilithiumSchemeParams> PolyVecL<P> {
    /// Sum of pointwise Montgomery products; both inputs in NTT domain
    pub fn dot_montgomery(&self, other: &Self) -> Poly {
        let mut acc = Poly::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.pointwise_montgomery(b);
        }
        acc
    }
}

/// The public matrix A, held in NTT domain as expanded from rho
pub(crate) struct MatrixA<P> {
    pub(crate) rows: Vec<PolyVecL<P>>,
}

impl<P: DilithiumSchemeParams> MatrixA<P> {
    /// `A * v` for an NTT-domain vector; the result stays in NTT domain
    /// with one pending Montgomery factor
    pub fn mul_ntt(&self, v_hat: &PolyVecL<P>) -> PolyVecK<P> {
        PolyVecK::from_polys(self.rows.iter().map(|row| row.dot_montgomery(v_hat)).collect())
    }
}
