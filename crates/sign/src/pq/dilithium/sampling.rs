//! Deterministic expansion of seeds into Dilithium polynomials.
//!
//! Every sampler is a pure function of its seed and nonce. Nonces are
//! appended to the seed as 16-bit little-endian integers.

use super::polyvec::{MatrixA, Poly, PolyVec, PolyVecL, Rank};
use crate::error::{Error as SignError, Result};
use algorithms::poly::serialize::unpack_bits;
use algorithms::xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
use internal::constant_time::ct_canonical;
use params::pqc::dilithium::{DILITHIUM_N, DILITHIUM_Q};
use params::DilithiumSchemeParams;
use zeroize::Zeroizing;

/// Bytes squeezed per refill; any chunking yields the same stream
const BLOCK_BYTES: usize = 168;

/// Sequential reader over an XOF output stream
struct XofStream<X: ExtendableOutputFunction> {
    xof: X,
    block: Zeroizing<[u8; BLOCK_BYTES]>,
    pos: usize,
}

impl<X: ExtendableOutputFunction> XofStream<X> {
    fn new(seed: &[u8], nonce: Option<u16>) -> Result<Self> {
        let mut xof = X::new();
        xof.update(seed)?;
        if let Some(nonce) = nonce {
            xof.update(&nonce.to_le_bytes())?;
        }
        Ok(Self {
            xof,
            block: Zeroizing::new([0u8; BLOCK_BYTES]),
            pos: BLOCK_BYTES,
        })
    }

    fn next_byte(&mut self) -> Result<u8> {
        if self.pos == BLOCK_BYTES {
            self.xof.squeeze(self.block.as_mut_slice())?;
            self.pos = 0;
        }
        let byte = self.block[self.pos];
        self.pos += 1;
        Ok(byte)
    }
}

/// Uniform polynomial from SHAKE128(rho || nonce) by rejection on 23 bits
fn sample_uniform(rho: &[u8], nonce: u16) -> Result<Poly> {
    let mut stream = XofStream::<ShakeXof128>::new(rho, Some(nonce))?;
    let mut poly = Poly::zero();
    let mut ctr = 0;
    while ctr < DILITHIUM_N {
        let b0 = stream.next_byte()? as u32;
        let b1 = stream.next_byte()? as u32;
        let b2 = stream.next_byte()? as u32;
        let t = (b0 | (b1 << 8) | (b2 << 16)) & 0x7F_FFFF;
        if t < DILITHIUM_Q {
            poly.coeffs[ctr] = t;
            ctr += 1;
        }
    }
    Ok(poly)
}

/// Expands rho into the matrix A, interpreted directly in NTT domain.
///
/// Entry `(i, j)` uses nonce `(i << 8) + j`.
pub(crate) fn expand_matrix_a<P: DilithiumSchemeParams>(rho: &[u8]) -> Result<MatrixA<P>> {
    let mut rows = Vec::with_capacity(P::K_DIM);
    for i in 0..P::K_DIM {
        let mut polys = Vec::with_capacity(P::L_DIM);
        for j in 0..P::L_DIM {
            polys.push(sample_uniform(rho, ((i << 8) + j) as u16)?);
        }
        rows.push(PolyVecL::<P>::from_polys(polys));
    }
    Ok(MatrixA { rows })
}

/// Short polynomial with coefficients in `[-eta, eta]`, by half-byte rejection
fn sample_eta<P: DilithiumSchemeParams>(rho_prime: &[u8], nonce: u16) -> Result<Poly> {
    let eta = P::ETA_S1S2;
    if eta != 2 && eta != 4 {
        return Err(SignError::InvalidParameter(format!(
            "{}: unsupported eta {}",
            P::NAME,
            eta
        )));
    }
    let mut stream = XofStream::<ShakeXof256>::new(rho_prime, Some(nonce))?;
    let mut poly = Poly::zero();
    let mut ctr = 0;
    while ctr < DILITHIUM_N {
        let byte = stream.next_byte()? as u32;
        for t in [byte & 0x0F, byte >> 4] {
            if ctr == DILITHIUM_N {
                break;
            }
            let value = match eta {
                2 if t < 15 => Some(2 - (t - (205 * t >> 10) * 5) as i32),
                4 if t < 9 => Some(4 - t as i32),
                _ => None,
            };
            if let Some(v) = value {
                poly.coeffs[ctr] = ct_canonical(v, DILITHIUM_Q);
                ctr += 1;
            }
        }
    }
    Ok(poly)
}

/// Vector of short polynomials using nonces `first_nonce, first_nonce + 1, ...`
pub(crate) fn sample_eta_vec<P: DilithiumSchemeParams, D: Rank>(
    rho_prime: &[u8],
    first_nonce: u16,
) -> Result<PolyVec<P, D>> {
    let mut polys = Vec::with_capacity(D::len::<P>());
    for i in 0..D::len::<P>() {
        polys.push(sample_eta::<P>(rho_prime, first_nonce + i as u16)?);
    }
    Ok(PolyVec::from_polys(polys))
}

/// Masking vector y for attempt `kappa`, coefficients in `(-gamma1, gamma1]`
pub(crate) fn sample_mask<P: DilithiumSchemeParams>(
    rho_double_prime: &[u8],
    kappa: u16,
) -> Result<PolyVecL<P>> {
    let gamma1 = P::GAMMA1_PARAM as i32;
    let mut buf = Zeroizing::new(vec![0u8; P::POLY_Z_PACKED_BYTES]);
    let mut raw = Zeroizing::new(vec![0u32; DILITHIUM_N]);
    let mut polys = Vec::with_capacity(P::L_DIM);
    for i in 0..P::L_DIM {
        let nonce = (P::L_DIM as u16)
            .checked_mul(kappa)
            .and_then(|n| n.checked_add(i as u16))
            .ok_or_else(|| SignError::InternalFault {
                algorithm: P::NAME,
                details: "mask nonce overflow".into(),
            })?;
        ShakeXof256::derive_into(&[rho_double_prime, &nonce.to_le_bytes()[..]], &mut buf)?;
        unpack_bits(&buf, P::GAMMA1_BITS, &mut raw)?;
        polys.push(Poly::from_fn(|k| {
            ct_canonical(gamma1 - raw[k] as i32, DILITHIUM_Q)
        }));
    }
    Ok(PolyVecL::<P>::from_polys(polys))
}

/// Challenge polynomial with exactly tau coefficients in {-1, +1}
pub(crate) fn sample_in_ball<P: DilithiumSchemeParams>(c_tilde: &[u8]) -> Result<Poly> {
    let mut stream = XofStream::<ShakeXof256>::new(c_tilde, None)?;
    let mut signs = 0u64;
    for k in 0..8 {
        signs |= (stream.next_byte()? as u64) << (8 * k);
    }

    let mut c = Poly::zero();
    for i in (DILITHIUM_N - P::TAU_PARAM)..DILITHIUM_N {
        let b = loop {
            let b = stream.next_byte()? as usize;
            if b <= i {
                break b;
            }
        };
        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = if signs & 1 == 1 { DILITHIUM_Q - 1 } else { 1 };
        signs >>= 1;
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pq::dilithium::polyvec::{RankK, RankL};
    use internal::constant_time::ct_center;
    use params::{Dilithium2Params, Dilithium3Params, Dilithium5Params};

    const RHO: [u8; 32] = [7u8; 32];

    fn centered(p: &Poly) -> impl Iterator<Item = i32> + '_ {
        p.coeffs.iter().map(|&c| ct_center(c, DILITHIUM_Q))
    }

    #[test]
    fn test_uniform_known_prefix() {
        let a = expand_matrix_a::<Dilithium2Params>(&RHO).unwrap();
        assert_eq!(a.rows[0].polys[0].coeffs[..4], [124257, 4907961, 6382137, 6839428]);
        // Entry (1, 2) reads the stream of rho || 2 || 1
        assert_eq!(a.rows[1].polys[2].coeffs[..4], [2334021, 2913516, 2714529, 2014638]);
        assert!(a.rows.iter().all(|row| row
            .polys
            .iter()
            .all(|p| p.coeffs.iter().all(|&c| c < DILITHIUM_Q))));
    }

    #[test]
    fn test_matrix_is_deterministic_and_domain_separated() {
        let a = expand_matrix_a::<Dilithium3Params>(&RHO).unwrap();
        let b = expand_matrix_a::<Dilithium3Params>(&RHO).unwrap();
        assert_eq!(a.rows.len(), 6);
        for (ra, rb) in a.rows.iter().zip(b.rows.iter()) {
            assert_eq!(ra, rb);
        }
        assert_ne!(a.rows[0].polys[1], a.rows[1].polys[0]);

        // Same seed shape gives the same entries across categories
        let c = expand_matrix_a::<Dilithium5Params>(&RHO).unwrap();
        assert_eq!(a.rows[3].polys[4], c.rows[3].polys[4]);
    }

    #[test]
    fn test_eta_bounds() {
        let seed = [3u8; 64];
        let s1 = sample_eta_vec::<Dilithium2Params, RankL>(&seed, 0).unwrap();
        assert!(s1.polys.iter().all(|p| centered(p).all(|v| (-2..=2).contains(&v))));

        let s2 = sample_eta_vec::<Dilithium3Params, RankK>(&seed, 5).unwrap();
        assert!(s2.polys.iter().all(|p| centered(p).all(|v| (-4..=4).contains(&v))));
        // Every value of the range shows up
        for v in -4..=4 {
            assert!(centered(&s2.polys[0]).any(|x| x == v));
        }
    }

    #[test]
    fn test_eta_nonces_are_independent() {
        let seed = [9u8; 64];
        let s1 = sample_eta_vec::<Dilithium2Params, RankL>(&seed, 0).unwrap();
        let s2 = sample_eta_vec::<Dilithium2Params, RankK>(&seed, 4).unwrap();
        assert_ne!(s1.polys[0], s1.polys[1]);
        // s2 starts where s1 ends
        let shifted = sample_eta_vec::<Dilithium2Params, RankL>(&seed, 1).unwrap();
        assert_eq!(s1.polys[1], shifted.polys[0]);
        assert_eq!(sample_eta_vec::<Dilithium2Params, RankL>(&seed, 4).unwrap().polys[0], s2.polys[0]);
    }

    #[test]
    fn test_mask_range_and_nonce() {
        let seed = [5u8; 64];
        let gamma1 = Dilithium3Params::GAMMA1_PARAM as i32;
        let y0 = sample_mask::<Dilithium3Params>(&seed, 0).unwrap();
        let y1 = sample_mask::<Dilithium3Params>(&seed, 1).unwrap();
        assert_ne!(y0, y1);
        assert!(y0
            .polys
            .iter()
            .all(|p| centered(p).all(|v| v > -gamma1 && v <= gamma1)));
        assert_eq!(y0, sample_mask::<Dilithium3Params>(&seed, 0).unwrap());
    }

    #[test]
    fn test_challenge_weight() {
        for seed in 0u8..16 {
            let c_tilde = [seed; 32];
            let c = sample_in_ball::<Dilithium2Params>(&c_tilde).unwrap();
            let nonzero: Vec<i32> = centered(&c).filter(|&v| v != 0).collect();
            assert_eq!(nonzero.len(), Dilithium2Params::TAU_PARAM);
            assert!(nonzero.iter().all(|&v| v == 1 || v == -1));
            assert_eq!(c, sample_in_ball::<Dilithium2Params>(&c_tilde).unwrap());
        }
        let c5 = sample_in_ball::<Dilithium5Params>(&[1u8; 32]).unwrap();
        assert_eq!(centered(&c5).filter(|&v| v != 0).count(), 60);
    }

    #[test]
    fn test_eta_known_prefix() {
        let seed = [3u8; 64];
        let s1 = sample_eta_vec::<Dilithium2Params, RankL>(&seed, 0).unwrap();
        let head: Vec<i32> = centered(&s1.polys[0]).take(8).collect();
        assert_eq!(head, [-2, 0, 2, -2, -1, 0, 0, -1]);

        let s2 = sample_eta_vec::<Dilithium3Params, RankK>(&seed, 5).unwrap();
        let head: Vec<i32> = centered(&s2.polys[0]).take(8).collect();
        assert_eq!(head, [-1, -2, 2, 1, -1, 2, -4, 4]);
    }

    #[test]
    fn test_mask_known_prefix() {
        // Attempt 1 of a five-column set reads nonces 5 through 9
        let y = sample_mask::<Dilithium3Params>(&[5u8; 64], 1).unwrap();
        let head: Vec<i32> = centered(&y.polys[0]).take(4).collect();
        assert_eq!(head, [-328286, 241024, 394102, -504513]);
        let head: Vec<i32> = centered(&y.polys[4]).take(4).collect();
        assert_eq!(head, [38995, 14911, -448965, -108073]);
    }

    #[test]
    fn test_challenge_known_positions() {
        let c = sample_in_ball::<Dilithium2Params>(&[0u8; 32]).unwrap();
        let support: Vec<usize> = (0..DILITHIUM_N).filter(|&i| c.coeffs[i] != 0).collect();
        assert_eq!(
            support,
            [
                5, 17, 18, 23, 25, 29, 30, 34, 38, 48, 51, 54, 59, 67, 70, 79, 86, 87, 88, 98, 100,
                113, 114, 116, 127, 129, 141, 147, 173, 195, 213, 219, 231, 233, 236, 242, 244,
                248, 253
            ]
        );
        let negative: Vec<usize> = (0..DILITHIUM_N)
            .filter(|&i| c.coeffs[i] == DILITHIUM_Q - 1)
            .collect();
        assert_eq!(
            negative,
            [
                18, 25, 38, 48, 70, 79, 86, 87, 98, 100, 114, 116, 129, 173, 195, 213, 219, 242,
                244, 253
            ]
        );
    }
}
