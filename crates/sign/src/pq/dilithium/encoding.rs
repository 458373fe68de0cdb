//! Byte encodings of Dilithium keys and signatures.
//!
//! Layouts (all polynomial packings little-endian, least significant bit
//! first):
//!
//! - public key: `rho || t1` with 10 bits per coefficient
//! - secret key: `rho || K || tr || s1 || s2 || t0`, short polynomials
//!   stored as `eta - c`, t0 as `2^(d-1) - c` on 13 bits
//! - signature: `c_tilde || z || h`, z stored as `gamma1 - c`, h as omega
//!   index bytes followed by k cumulative counters
//!
//! Decoders validate lengths first and reject out-of-range or malformed
//! fields with [`SignError::Format`].

use super::polyvec::{Poly, PolyVec, PolyVecK, PolyVecL, Rank};
use crate::error::{Error as SignError, Result};
use algorithms::poly::serialize::{pack_bits, unpack_bits};
use internal::constant_time::{ct_canonical, ct_center, ct_neg_mask};
use params::pqc::dilithium::{DILITHIUM_D, DILITHIUM_N, DILITHIUM_Q, DILITHIUM_T1_BITS};
use params::DilithiumSchemeParams;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const T0_OFFSET: i32 = 1 << (DILITHIUM_D - 1);

/// Decoded secret key
pub(crate) struct SecretKeyParts<P> {
    pub rho: [u8; 32],
    pub key: [u8; 32],
    pub tr: [u8; 32],
    pub s1: PolyVecL<P>,
    pub s2: PolyVecK<P>,
    pub t0: PolyVecK<P>,
}

impl<P> Zeroize for SecretKeyParts<P> {
    fn zeroize(&mut self) {
        self.rho.zeroize();
        self.key.zeroize();
        self.tr.zeroize();
        self.s1.zeroize();
        self.s2.zeroize();
        self.t0.zeroize();
    }
}

impl<P> Drop for SecretKeyParts<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P> ZeroizeOnDrop for SecretKeyParts<P> {}

/// Decoded signature
pub(crate) struct SignatureParts<P: DilithiumSchemeParams> {
    pub c_tilde: [u8; 32],
    pub z: PolyVecL<P>,
    pub h: PolyVecK<P>,
}

/// Packs every coefficient after mapping it through `f`
fn pack_mapped<P, D>(
    v: &PolyVec<P, D>,
    bits: usize,
    out: &mut Vec<u8>,
    f: impl Fn(u32) -> u32,
) -> Result<()> {
    let mut mapped = Zeroizing::new(vec![0u32; DILITHIUM_N]);
    for poly in v.polys.iter() {
        for (m, &c) in mapped.iter_mut().zip(poly.coeffs.iter()) {
            *m = f(c);
        }
        pack_bits(&mapped, bits, out)?;
    }
    Ok(())
}

/// Unpacks `D::len` polynomials of `bits` bits each, mapping raw values through `f`
fn unpack_mapped<P: DilithiumSchemeParams, D: Rank>(
    bytes: &[u8],
    bits: usize,
    f: impl Fn(u32) -> u32,
) -> Result<PolyVec<P, D>> {
    let poly_bytes = DILITHIUM_N * bits / 8;
    let mut raw = Zeroizing::new(vec![0u32; DILITHIUM_N]);
    let mut polys = Vec::with_capacity(D::len::<P>());
    for chunk in bytes.chunks(poly_bytes) {
        unpack_bits(chunk, bits, &mut raw)?;
        polys.push(Poly::from_fn(|i| f(raw[i])));
    }
    if polys.len() != D::len::<P>() {
        return Err(SignError::Format(format!(
            "expected {} packed polynomials, found {}",
            D::len::<P>(),
            polys.len()
        )));
    }
    Ok(PolyVec::from_polys(polys))
}

/// Centered value of a canonical coefficient
fn signed(c: u32) -> i32 {
    ct_center(c, DILITHIUM_Q)
}

fn canonical(v: i32) -> u32 {
    ct_canonical(v, DILITHIUM_Q)
}

/// Short-vector decoding that rejects values outside `[-eta, eta]`
fn unpack_eta<P: DilithiumSchemeParams, D: Rank>(bytes: &[u8]) -> Result<PolyVec<P, D>> {
    let eta = P::ETA_S1S2 as i32;
    let mut raw_all = Zeroizing::new(vec![0u32; bytes.len() * 8 / P::ETA_BITS]);
    unpack_bits(bytes, P::ETA_BITS, &mut raw_all)?;
    let mut out_of_range = 0u32;
    for &raw in raw_all.iter() {
        out_of_range |= ct_neg_mask(2 * eta - raw as i32);
    }
    if out_of_range != 0 {
        return Err(SignError::Format(
            "secret coefficient outside [-eta, eta]".into(),
        ));
    }
    unpack_mapped::<P, D>(bytes, P::ETA_BITS, |raw| canonical(eta - raw as i32))
}

pub(crate) fn pack_public_key<P: DilithiumSchemeParams>(
    rho: &[u8; 32],
    t1: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    let mut pk = Vec::with_capacity(P::PUBLIC_KEY_BYTES);
    pk.extend_from_slice(rho);
    pack_mapped(t1, DILITHIUM_T1_BITS, &mut pk, |c| c)?;
    debug_assert_eq!(pk.len(), P::PUBLIC_KEY_BYTES);
    Ok(pk)
}

pub(crate) fn unpack_public_key<P: DilithiumSchemeParams>(
    pk: &[u8],
) -> Result<([u8; 32], PolyVecK<P>)> {
    if pk.len() != P::PUBLIC_KEY_BYTES {
        return Err(SignError::InvalidKeySize {
            expected: P::PUBLIC_KEY_BYTES,
            actual: pk.len(),
        });
    }
    let (rho_bytes, t1_bytes) = pk.split_at(P::SEED_RHO_BYTES);
    let mut rho = [0u8; 32];
    rho.copy_from_slice(rho_bytes);
    let t1 = unpack_mapped::<P, _>(t1_bytes, DILITHIUM_T1_BITS, |raw| raw)?;
    Ok((rho, t1))
}

pub(crate) fn pack_secret_key<P: DilithiumSchemeParams>(
    parts: &SecretKeyParts<P>,
) -> Result<Zeroizing<Vec<u8>>> {
    let eta = P::ETA_S1S2 as i32;
    let mut sk = Zeroizing::new(Vec::with_capacity(P::SECRET_KEY_BYTES));
    sk.extend_from_slice(&parts.rho);
    sk.extend_from_slice(&parts.key);
    sk.extend_from_slice(&parts.tr);
    pack_mapped(&parts.s1, P::ETA_BITS, &mut sk, |c| (eta - signed(c)) as u32)?;
    pack_mapped(&parts.s2, P::ETA_BITS, &mut sk, |c| (eta - signed(c)) as u32)?;
    pack_mapped(&parts.t0, DILITHIUM_D as usize, &mut sk, |c| {
        (T0_OFFSET - signed(c)) as u32
    })?;
    debug_assert_eq!(sk.len(), P::SECRET_KEY_BYTES);
    Ok(sk)
}

pub(crate) fn unpack_secret_key<P: DilithiumSchemeParams>(
    sk: &[u8],
) -> Result<SecretKeyParts<P>> {
    if sk.len() != P::SECRET_KEY_BYTES {
        return Err(SignError::InvalidKeySize {
            expected: P::SECRET_KEY_BYTES,
            actual: sk.len(),
        });
    }
    let (rho, rest) = sk.split_at(P::SEED_RHO_BYTES);
    let (key, rest) = rest.split_at(P::SEED_KEY_BYTES);
    let (tr, rest) = rest.split_at(P::HASH_TR_BYTES);
    let (s1_bytes, rest) = rest.split_at(P::L_DIM * P::POLY_ETA_PACKED_BYTES);
    let (s2_bytes, t0_bytes) = rest.split_at(P::K_DIM * P::POLY_ETA_PACKED_BYTES);

    let mut parts = SecretKeyParts {
        rho: [0u8; 32],
        key: [0u8; 32],
        tr: [0u8; 32],
        s1: unpack_eta::<P, _>(s1_bytes)?,
        s2: unpack_eta::<P, _>(s2_bytes)?,
        t0: unpack_mapped::<P, _>(t0_bytes, DILITHIUM_D as usize, |raw| {
            canonical(T0_OFFSET - raw as i32)
        })?,
    };
    parts.rho.copy_from_slice(rho);
    parts.key.copy_from_slice(key);
    parts.tr.copy_from_slice(tr);
    Ok(parts)
}

/// Packs `w1` for the challenge hash
pub(crate) fn pack_w1<P: DilithiumSchemeParams>(w1: &PolyVecK<P>) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(P::K_DIM * P::POLY_W1_PACKED_BYTES);
    pack_mapped(w1, P::W1_BITS, &mut out, |c| c)?;
    Ok(out)
}

pub(crate) fn pack_signature<P: DilithiumSchemeParams>(
    c_tilde: &[u8],
    z: &PolyVecL<P>,
    h: &PolyVecK<P>,
) -> Result<Vec<u8>> {
    let gamma1 = P::GAMMA1_PARAM as i32;
    let omega = P::OMEGA_PARAM as usize;
    let mut sig = Vec::with_capacity(P::SIGNATURE_SIZE);
    sig.extend_from_slice(c_tilde);
    pack_mapped(z, P::GAMMA1_BITS, &mut sig, |c| (gamma1 - signed(c)) as u32)?;

    let mut indices = vec![0u8; omega];
    let mut counters = vec![0u8; P::K_DIM];
    let mut k = 0usize;
    for (poly, counter) in h.polys.iter().zip(counters.iter_mut()) {
        for (j, &bit) in poly.coeffs.iter().enumerate() {
            if bit != 0 {
                if k == omega {
                    return Err(SignError::InternalFault {
                        algorithm: P::NAME,
                        details: "hint weight exceeds omega".into(),
                    });
                }
                indices[k] = j as u8;
                k += 1;
            }
        }
        *counter = k as u8;
    }
    sig.extend_from_slice(&indices);
    sig.extend_from_slice(&counters);
    debug_assert_eq!(sig.len(), P::SIGNATURE_SIZE);
    Ok(sig)
}

/// Decodes a signature; malformed hint sections are rejected.
pub(crate) fn unpack_signature<P: DilithiumSchemeParams>(
    sig: &[u8],
) -> Result<SignatureParts<P>> {
    if sig.len() != P::SIGNATURE_SIZE {
        return Err(SignError::InvalidSignatureSize {
            expected: P::SIGNATURE_SIZE,
            actual: sig.len(),
        });
    }
    let omega = P::OMEGA_PARAM as usize;
    let gamma1 = P::GAMMA1_PARAM as i32;
    let (c_bytes, rest) = sig.split_at(P::SEED_C_TILDE_BYTES);
    let (z_bytes, hint_bytes) = rest.split_at(P::L_DIM * P::POLY_Z_PACKED_BYTES);
    let (indices, counters) = hint_bytes.split_at(omega);

    let mut c_tilde = [0u8; 32];
    c_tilde.copy_from_slice(c_bytes);
    let z = unpack_mapped::<P, _>(z_bytes, P::GAMMA1_BITS, |raw| canonical(gamma1 - raw as i32))?;

    let mut h = PolyVecK::<P>::zero();
    let mut k = 0usize;
    for (poly, &counter) in h.polys.iter_mut().zip(counters.iter()) {
        let end = counter as usize;
        if end < k || end > omega {
            return Err(SignError::Format("hint counter out of order".into()));
        }
        for j in k..end {
            if j > k && indices[j] <= indices[j - 1] {
                return Err(SignError::Format(
                    "hint indices not strictly increasing".into(),
                ));
            }
            poly.coeffs[indices[j] as usize] = 1;
        }
        k = end;
    }
    if indices[k..].iter().any(|&b| b != 0) {
        return Err(SignError::Format("non-zero hint padding".into()));
    }

    Ok(SignatureParts { c_tilde, z, h })
}

#[cfg(test)]
mod tests {
    use super::*;
    use params::{Dilithium2Params, Dilithium3Params, Dilithium5Params};

    fn sample_vec<P: DilithiumSchemeParams, D: Rank>(bound: i32, salt: u32) -> PolyVec<P, D> {
        let span = (2 * bound + 1) as u32;
        let polys = (0..D::len::<P>())
            .map(|j| {
                Poly::from_fn(|i| {
                    let v = ((i as u32).wrapping_mul(2654435761) ^ (j as u32 + salt)) % span;
                    canonical(v as i32 - bound)
                })
            })
            .collect();
        PolyVec::from_polys(polys)
    }

    fn check_secret_key_roundtrip<P: DilithiumSchemeParams>() {
        let eta = P::ETA_S1S2 as i32;
        let parts = SecretKeyParts::<P> {
            rho: [1u8; 32],
            key: [2u8; 32],
            tr: [3u8; 32],
            s1: sample_vec(eta, 1),
            s2: sample_vec(eta, 2),
            // t0 ranges over (-2^12, 2^12]
            t0: sample_vec(4095, 3),
        };
        let sk = pack_secret_key(&parts).unwrap();
        assert_eq!(sk.len(), P::SECRET_KEY_BYTES);
        let back = unpack_secret_key::<P>(&sk).unwrap();
        assert_eq!(back.rho, parts.rho);
        assert_eq!(back.key, parts.key);
        assert_eq!(back.tr, parts.tr);
        assert_eq!(back.s1, parts.s1);
        assert_eq!(back.s2, parts.s2);
        assert_eq!(back.t0, parts.t0);
    }

    #[test]
    fn test_secret_key_roundtrip() {
        check_secret_key_roundtrip::<Dilithium2Params>();
        check_secret_key_roundtrip::<Dilithium3Params>();
        check_secret_key_roundtrip::<Dilithium5Params>();
    }

    #[test]
    fn test_secret_key_rejects_out_of_range_eta() {
        type P = Dilithium2Params;
        let parts = SecretKeyParts::<P> {
            rho: [0u8; 32],
            key: [0u8; 32],
            tr: [0u8; 32],
            s1: sample_vec(2, 4),
            s2: sample_vec(2, 5),
            t0: sample_vec(100, 6),
        };
        let mut sk = pack_secret_key(&parts).unwrap();
        // 3-bit field 7 decodes to 2 - 7 = -5
        sk[96] |= 0x07;
        assert!(matches!(unpack_secret_key::<P>(&sk), Err(SignError::Format(_))));
    }

    #[test]
    fn test_public_key_roundtrip_and_length() {
        type P = Dilithium3Params;
        let t1 = PolyVecK::<P>::from_polys(
            (0..6)
                .map(|j| Poly::from_fn(|i| ((i * 7 + j * 131) % 1024) as u32))
                .collect(),
        );
        let pk = pack_public_key(&[9u8; 32], &t1).unwrap();
        assert_eq!(pk.len(), 1952);
        let (rho, back) = unpack_public_key::<P>(&pk).unwrap();
        assert_eq!(rho, [9u8; 32]);
        assert_eq!(back, t1);

        assert!(matches!(
            unpack_public_key::<P>(&pk[1..]),
            Err(SignError::InvalidKeySize { expected: 1952, actual: 1951 })
        ));
    }

    fn sparse_hints<P: DilithiumSchemeParams>(positions: &[(usize, usize)]) -> PolyVecK<P> {
        let mut h = PolyVecK::<P>::zero();
        for &(row, idx) in positions {
            h.polys[row].coeffs[idx] = 1;
        }
        h
    }

    #[test]
    fn test_signature_roundtrip() {
        type P = Dilithium2Params;
        let gamma1 = P::GAMMA1_PARAM as i32;
        let z = sample_vec::<P, _>(gamma1 - P::BETA_PARAM as i32 - 1, 7);
        let h = sparse_hints::<P>(&[(0, 3), (0, 200), (2, 0), (3, 255)]);
        let sig = pack_signature(&[4u8; 32], &z, &h).unwrap();
        assert_eq!(sig.len(), 2420);

        let parts = unpack_signature::<P>(&sig).unwrap();
        assert_eq!(parts.c_tilde, [4u8; 32]);
        assert_eq!(parts.z, z);
        assert_eq!(parts.h, h);

        // Counters: rows end after 2, 2, 3, 4 hints
        let omega = P::OMEGA_PARAM as usize;
        let tail = &sig[sig.len() - 4..];
        assert_eq!(tail, &[2, 2, 3, 4]);
        assert_eq!(&sig[sig.len() - 4 - omega..sig.len() - omega], &[3, 200, 0, 255]);
    }

    #[test]
    fn test_signature_hint_checks() {
        type P = Dilithium2Params;
        let z = PolyVecL::<P>::zero();
        let h = sparse_hints::<P>(&[(0, 3), (0, 200), (1, 5)]);
        let sig = pack_signature(&[0u8; 32], &z, &h).unwrap();
        let omega = P::OMEGA_PARAM as usize;
        let hint_start = sig.len() - omega - P::K_DIM;
        let counter_start = sig.len() - P::K_DIM;

        // Decreasing counter
        let mut bad = sig.clone();
        bad[counter_start + 1] = 1;
        assert!(matches!(unpack_signature::<P>(&bad), Err(SignError::Format(_))));

        // Counter beyond omega
        let mut bad = sig.clone();
        bad[counter_start + 3] = omega as u8 + 1;
        assert!(matches!(unpack_signature::<P>(&bad), Err(SignError::Format(_))));

        // Indices not strictly increasing within a row
        let mut bad = sig.clone();
        bad[hint_start + 1] = 3;
        assert!(matches!(unpack_signature::<P>(&bad), Err(SignError::Format(_))));

        // Non-zero padding after the last hint
        let mut bad = sig.clone();
        bad[hint_start + 10] = 1;
        assert!(matches!(unpack_signature::<P>(&bad), Err(SignError::Format(_))));

        // Wrong length is a size error, not a format error
        assert!(matches!(
            unpack_signature::<P>(&sig[..sig.len() - 1]),
            Err(SignError::InvalidSignatureSize { expected: 2420, actual: 2419 })
        ));
    }

    #[test]
    fn test_w1_packing_widths() {
        let w1 = PolyVecK::<Dilithium2Params>::zero();
        assert_eq!(pack_w1(&w1).unwrap().len(), 4 * 192);
        let w1 = PolyVecK::<Dilithium5Params>::zero();
        assert_eq!(pack_w1(&w1).unwrap().len(), 8 * 128);
    }
}
