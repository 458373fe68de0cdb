//! Byte-level Dilithium boundary selected by security category
//!
//! Each function matches on a [`SecurityCategory`] and forwards to the
//! generic protocol instantiated with the matching parameter marker.
//! Buffer lengths are checked here before any decoding takes place.

use super::sign;
use crate::error::{Error, Result};
use log::warn;
use params::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumSchemeParams, ParameterSet,
    SecurityCategory,
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Runs `$body` with `$p` bound to the parameter marker of `$category`
macro_rules! with_params {
    ($category:expr, $p:ident => $body:expr) => {
        match $category {
            SecurityCategory::Two => {
                type $p = Dilithium2Params;
                $body
            }
            SecurityCategory::Three => {
                type $p = Dilithium3Params;
                $body
            }
            SecurityCategory::Five => {
                type $p = Dilithium5Params;
                $body
            }
        }
    };
}

/// Static parameter record for `category`
pub fn parameters(category: SecurityCategory) -> &'static ParameterSet {
    category.parameters()
}

/// Parses a numeric level (2, 3, 5) or a name such as `"dilithium3"`
pub fn parse_category(selector: &str) -> Result<SecurityCategory> {
    Ok(selector.parse::<SecurityCategory>()?)
}

/// Packed public key size in bytes for `category`
pub fn public_key_length(category: SecurityCategory) -> usize {
    with_params!(category, P => P::PUBLIC_KEY_BYTES)
}

/// Packed secret key size in bytes for `category`
pub fn secret_key_length(category: SecurityCategory) -> usize {
    with_params!(category, P => P::SECRET_KEY_BYTES)
}

/// Signature size in bytes for `category`
pub fn signature_length(category: SecurityCategory) -> usize {
    with_params!(category, P => P::SIGNATURE_SIZE)
}

/// Generates a key pair from operating-system entropy
///
/// Returns `(public_key, secret_key)`; the secret key is cleared on drop.
#[cfg(feature = "std")]
pub fn keypair(category: SecurityCategory) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    keypair_with_rng(category, &mut rand::rngs::OsRng)
}

/// Generates a key pair from the caller's RNG, read exactly once
pub fn keypair_with_rng<R: RngCore + CryptoRng>(
    category: SecurityCategory,
    rng: &mut R,
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>)> {
    with_params!(category, P => sign::keypair_internal::<P>(rng))
}

/// Deterministic signature of `message` under `secret_key`
pub fn sign(category: SecurityCategory, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
    check_secret_key(category, secret_key)?;
    with_params!(category, P => sign::sign_internal::<P>(message, secret_key))
}

/// Signature of `message` with a mask seed drawn from `rng`
pub fn sign_randomized<R: RngCore + CryptoRng>(
    category: SecurityCategory,
    message: &[u8],
    secret_key: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    check_secret_key(category, secret_key)?;
    with_params!(category, P => sign::sign_randomized::<P>(message, secret_key, rng))
}

/// Checks `signature` over `message` against `public_key`
///
/// Length mismatches are errors, signature first. A well-formed signature
/// that does not match yields `Ok(false)`.
pub fn verify(
    category: SecurityCategory,
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<bool> {
    let expected = signature_length(category);
    if signature.len() != expected {
        warn!(
            "{}: signature length {} rejected, expected {}",
            category.name(),
            signature.len(),
            expected
        );
        return Err(Error::InvalidSignatureSize {
            expected,
            actual: signature.len(),
        });
    }
    let expected = public_key_length(category);
    if public_key.len() != expected {
        warn!(
            "{}: public key length {} rejected, expected {}",
            category.name(),
            public_key.len(),
            expected
        );
        return Err(Error::InvalidKeySize {
            expected,
            actual: public_key.len(),
        });
    }
    with_params!(category, P => sign::verify_internal::<P>(message, signature, public_key))
}

fn check_secret_key(category: SecurityCategory, secret_key: &[u8]) -> Result<()> {
    let expected = secret_key_length(category);
    if secret_key.len() != expected {
        warn!(
            "{}: secret key length {} rejected, expected {}",
            category.name(),
            secret_key.len(),
            expected
        );
        return Err(Error::InvalidKeySize {
            expected,
            actual: secret_key.len(),
        });
    }
    Ok(())
}
