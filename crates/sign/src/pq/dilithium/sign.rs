//! Core implementation of Dilithium key generation, signing, and verification.
//!
//! Lattice-based signatures using Fiat-Shamir with Aborts; security rests on
//! Module-LWE and Module-SIS.
//!
//! Rejection conditions (each restarts with the next mask nonce):
//! - `||z||∞ >= γ1 - β`
//! - `||LowBits(w) - c·s2||∞ >= γ2 - β`
//! - `||c·t0||∞ >= γ2`
//! - more than ω hint bits
//!
//! Domains: A is sampled directly in NTT domain. Secret vectors are moved
//! into NTT domain once per call, every product goes through the pointwise
//! Montgomery multiply and returns via the tomont inverse.
//!
//! Internal module - use the public `Dilithium2/3/5` types or the
//! `category` boundary instead.

use super::arithmetic::{
    decompose_vec, make_hint_vec, power2round_vec, use_hint_vec, vec_norm_exceeds,
};
use super::encoding::{
    pack_public_key, pack_secret_key, pack_signature, pack_w1, unpack_public_key,
    unpack_secret_key, unpack_signature, SecretKeyParts,
};
use super::polyvec::{MatrixA, PolyVecK, PolyVecL, RankK, RankL};
use super::sampling::{expand_matrix_a, sample_eta_vec, sample_in_ball, sample_mask};

use crate::error::{Error as SignError, Result};
use algorithms::xof::{ExtendableOutputFunction, ShakeXof256};
use internal::constant_time::ct_eq;
use log::{debug, error};
use params::pqc::dilithium::DILITHIUM_D;
use params::DilithiumSchemeParams;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// tr = SHAKE256(pk), 32 bytes
fn hash_public_key(pk: &[u8]) -> Result<[u8; 32]> {
    let mut tr = [0u8; 32];
    ShakeXof256::derive_into(&[pk], &mut tr)?;
    Ok(tr)
}

/// μ = SHAKE256(tr || M), 64 bytes
fn message_representative(tr: &[u8], message: &[u8]) -> Result<[u8; 64]> {
    let mut mu = [0u8; 64];
    ShakeXof256::derive_into(&[tr, message], &mut mu)?;
    Ok(mu)
}

/// t = A·s1 + s2 split by Power2Round into `(t1, t0)`
fn compute_t<P: DilithiumSchemeParams>(
    a_hat: &MatrixA<P>,
    s1: &PolyVecL<P>,
    s2: &PolyVecK<P>,
) -> Result<(PolyVecK<P>, PolyVecK<P>)> {
    let mut s1_hat = Zeroizing::new(s1.clone());
    s1_hat.ntt_inplace()?;
    let mut t = Zeroizing::new(a_hat.mul_ntt(&s1_hat));
    t.inv_ntt_tomont_inplace()?;
    *t += s2;
    Ok(power2round_vec(&*t))
}

/// Key Generation from fresh randomness
///
/// The RNG is asked for a single 32-byte seed; failure surfaces as
/// `EntropyUnavailable`.
pub(crate) fn keypair_internal<P: DilithiumSchemeParams>(
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    let mut seed = Zeroizing::new([0u8; 32]);
    rng.try_fill_bytes(seed.as_mut_slice())
        .map_err(|e| SignError::EntropyUnavailable(e.to_string()))?;
    keypair_from_seed::<P>(seed.as_slice())
}

/// Deterministic Key Generation
///
/// (ρ || ρ' || K) = SHAKE256(ζ); A from ρ; s1, s2 from ρ'.
pub(crate) fn keypair_from_seed<P: DilithiumSchemeParams>(
    seed: &[u8],
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    if seed.len() != P::SEED_ZETA_BYTES {
        return Err(SignError::InvalidParameter(format!(
            "{} seed must be {} bytes, got {}",
            P::NAME,
            P::SEED_ZETA_BYTES,
            seed.len()
        )));
    }

    let mut expanded = Zeroizing::new([0u8; 128]);
    ShakeXof256::derive_into(&[seed], expanded.as_mut_slice())?;
    let (rho_bytes, rest) = expanded.split_at(P::SEED_RHO_BYTES);
    let (rho_prime, key_bytes) = rest.split_at(P::SEED_RHO_PRIME_BYTES);

    let mut rho = [0u8; 32];
    rho.copy_from_slice(rho_bytes);

    let a_hat = expand_matrix_a::<P>(&rho)?;
    let s1 = sample_eta_vec::<P, RankL>(rho_prime, 0)?;
    let s2 = sample_eta_vec::<P, RankK>(rho_prime, P::L_DIM as u16)?;
    let (t1, t0) = compute_t(&a_hat, &s1, &s2)?;

    let pk = pack_public_key(&rho, &t1)?;
    let tr = hash_public_key(&pk)?;

    let mut parts = SecretKeyParts {
        rho,
        key: [0u8; 32],
        tr,
        s1,
        s2,
        t0,
    };
    parts.key.copy_from_slice(key_bytes);
    let sk = pack_secret_key(&parts)?;

    debug!(
        "{}: key pair generated (pk {} bytes, sk {} bytes)",
        P::NAME,
        pk.len(),
        sk.len()
    );
    Ok((pk, sk))
}

/// Recomputes the public key held implicitly in a secret key
///
/// Fails with `Format` if the embedded `tr` does not hash the recomputed key.
pub(crate) fn public_key_from_secret<P: DilithiumSchemeParams>(sk: &[u8]) -> Result<Vec<u8>> {
    let parts = unpack_secret_key::<P>(sk)?;
    let a_hat = expand_matrix_a::<P>(&parts.rho)?;
    let (t1, t0) = compute_t(&a_hat, &parts.s1, &parts.s2)?;
    drop(Zeroizing::new(t0));

    let pk = pack_public_key(&parts.rho, &t1)?;
    if !ct_eq(hash_public_key(&pk)?, parts.tr) {
        return Err(SignError::Format(
            "secret key is inconsistent with its public key hash".into(),
        ));
    }
    Ok(pk)
}

/// Deterministic signing: ρ'' = SHAKE256(K || μ)
pub(crate) fn sign_internal<P: DilithiumSchemeParams>(
    message: &[u8],
    sk: &[u8],
) -> Result<Vec<u8>> {
    let parts = unpack_secret_key::<P>(sk)?;
    let mu = message_representative(&parts.tr, message)?;
    let mut rho_double_prime = Zeroizing::new([0u8; 64]);
    ShakeXof256::derive_into(&[&parts.key, &mu], rho_double_prime.as_mut_slice())?;
    sign_with_mask_seed(&parts, &mu, rho_double_prime.as_slice())
}

/// Randomized signing: ρ'' drawn from `rng`
pub(crate) fn sign_randomized<P: DilithiumSchemeParams>(
    message: &[u8],
    sk: &[u8],
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Vec<u8>> {
    let parts = unpack_secret_key::<P>(sk)?;
    let mu = message_representative(&parts.tr, message)?;
    let mut rho_double_prime = Zeroizing::new([0u8; 64]);
    rng.try_fill_bytes(rho_double_prime.as_mut_slice())
        .map_err(|e| SignError::EntropyUnavailable(e.to_string()))?;
    sign_with_mask_seed(&parts, &mu, rho_double_prime.as_slice())
}

fn sign_with_mask_seed<P: DilithiumSchemeParams>(
    parts: &SecretKeyParts<P>,
    mu: &[u8; 64],
    rho_double_prime: &[u8],
) -> Result<Vec<u8>> {
    let z_bound = P::GAMMA1_PARAM - P::BETA_PARAM;
    let r0_bound = P::GAMMA2_PARAM - P::BETA_PARAM;

    let a_hat = expand_matrix_a::<P>(&parts.rho)?;
    let mut s1_hat = Zeroizing::new(parts.s1.clone());
    s1_hat.ntt_inplace()?;
    let mut s2_hat = Zeroizing::new(parts.s2.clone());
    s2_hat.ntt_inplace()?;
    let mut t0_hat = Zeroizing::new(parts.t0.clone());
    t0_hat.ntt_inplace()?;

    for kappa in 0..P::MAX_SIGN_ABORTS {
        let y = Zeroizing::new(sample_mask::<P>(rho_double_prime, kappa)?);
        let mut y_hat = Zeroizing::new((*y).clone());
        y_hat.ntt_inplace()?;

        // w = A·y
        let mut w = Zeroizing::new(a_hat.mul_ntt(&y_hat));
        w.inv_ntt_tomont_inplace()?;
        let (w1, w0) = decompose_vec(&*w);
        let mut w0 = Zeroizing::new(w0);

        let mut c_tilde = [0u8; 32];
        ShakeXof256::derive_into(&[&mu[..], &pack_w1(&w1)?], &mut c_tilde)?;
        let mut c_hat = sample_in_ball::<P>(&c_tilde)?;
        c_hat.ntt_inplace()?;

        // z = y + c·s1
        let mut z = Zeroizing::new(s1_hat.pointwise_poly_montgomery(&c_hat));
        z.inv_ntt_tomont_inplace()?;
        *z += &*y;
        if vec_norm_exceeds(&*z, z_bound) {
            continue;
        }

        // r0 = LowBits(w) - c·s2
        let mut cs2 = Zeroizing::new(s2_hat.pointwise_poly_montgomery(&c_hat));
        cs2.inv_ntt_tomont_inplace()?;
        *w0 -= &*cs2;
        if vec_norm_exceeds(&*w0, r0_bound) {
            continue;
        }

        let mut ct0 = Zeroizing::new(t0_hat.pointwise_poly_montgomery(&c_hat));
        ct0.inv_ntt_tomont_inplace()?;
        if vec_norm_exceeds(&*ct0, P::GAMMA2_PARAM) {
            continue;
        }

        *w0 += &*ct0;
        let (h, weight) = make_hint_vec(&*w0, &w1);
        if weight > P::OMEGA_PARAM as usize {
            continue;
        }

        let sig = pack_signature(&c_tilde, &*z, &h)?;
        debug!(
            "{}: signature produced after {} attempt(s), {} hint bits",
            P::NAME,
            kappa + 1,
            weight
        );
        return Ok(sig);
    }

    error!(
        "{}: signing rejected {} consecutive attempts",
        P::NAME,
        P::MAX_SIGN_ABORTS
    );
    Err(SignError::InternalFault {
        algorithm: P::NAME,
        details: format!("no signature after {} attempts", P::MAX_SIGN_ABORTS),
    })
}

/// Verification
///
/// Length mismatches are errors; every other failure yields `Ok(false)`.
pub(crate) fn verify_internal<P: DilithiumSchemeParams>(
    message: &[u8],
    sig: &[u8],
    pk: &[u8],
) -> Result<bool> {
    if sig.len() != P::SIGNATURE_SIZE {
        return Err(SignError::InvalidSignatureSize {
            expected: P::SIGNATURE_SIZE,
            actual: sig.len(),
        });
    }
    let (rho, t1) = unpack_public_key::<P>(pk)?;

    let parts = match unpack_signature::<P>(sig) {
        Ok(parts) => parts,
        Err(SignError::Format(reason)) => {
            debug!("{}: malformed signature rejected: {}", P::NAME, reason);
            return Ok(false);
        }
        Err(e) => return Err(e),
    };
    if vec_norm_exceeds(&parts.z, P::GAMMA1_PARAM - P::BETA_PARAM) {
        debug!("{}: signature rejected, z out of range", P::NAME);
        return Ok(false);
    }

    let tr = hash_public_key(pk)?;
    let mu = message_representative(&tr, message)?;

    let a_hat = expand_matrix_a::<P>(&rho)?;
    let mut c_hat = sample_in_ball::<P>(&parts.c_tilde)?;
    c_hat.ntt_inplace()?;
    let mut z_hat = parts.z.clone();
    z_hat.ntt_inplace()?;
    let mut t1_hat = t1.shift_left(DILITHIUM_D);
    t1_hat.ntt_inplace()?;

    // w' = A·z - c·t1·2^d
    let mut w = a_hat.mul_ntt(&z_hat);
    w -= &t1_hat.pointwise_poly_montgomery(&c_hat);
    w.inv_ntt_tomont_inplace()?;
    let w1 = use_hint_vec(&parts.h, &w);

    let mut c_check = [0u8; 32];
    ShakeXof256::derive_into(&[&mu[..], &pack_w1(&w1)?], &mut c_check)?;
    let valid = ct_eq(c_check, parts.c_tilde);
    debug!("{}: verification {}", P::NAME, if valid { "accepted" } else { "rejected" });
    Ok(valid)
}
