//! Dilithium Digital Signature Algorithm (round 3.1)
//!
//! High-level implementations of Dilithium2, Dilithium3 and Dilithium5,
//! lattice-based signature schemes whose security rests on Module-LWE and
//! Module-SIS over `Z_q[X]/(X^256 + 1)`.
//!
//! One generic implementation, [`Dilithium<P>`], is instantiated with the
//! parameter markers from `pqsig-params`. Two surfaces sit on top of it:
//!
//! - the typed surface: [`Dilithium2`], [`Dilithium3`] and [`Dilithium5`]
//!   implement the `pqsig-api` signature traits
//! - the byte-level [`category`] boundary, dispatching on a runtime
//!   `SecurityCategory`
//!
//! Internal submodules:
//! - `polyvec`: length-checked polynomial vectors and the matrix A
//! - `arithmetic`: `Power2Round`, `Decompose`, `MakeHint`, `UseHint` and
//!   norm checks
//! - `sampling`: expansion of A, the short secrets, the mask y and the
//!   challenge c
//! - `encoding`: key and signature byte layouts
//! - `sign`: key generation, signing and verification

use crate::error::Error as SignError;
use api::{
    Error as ApiError, Result as ApiResult, Signature as SignatureTrait, SignatureDerive,
    SignatureSerialize,
};
use core::fmt;
use core::marker::PhantomData;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

mod arithmetic;
mod encoding;
mod polyvec;
mod sampling;
mod sign;

pub mod category;

pub use params::{
    Dilithium2Params, Dilithium3Params, Dilithium5Params, DilithiumSchemeParams, ParameterSet,
    SecurityCategory,
};

/// Dilithium Public Key.
///
/// Packed `(rho, t1)`: the 32-byte matrix seed followed by the high-order
/// bits of `t = A*s1 + s2`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DilithiumPublicKey(pub(crate) Vec<u8>);

/// Dilithium Secret Key.
///
/// Packed `(rho, K, tr, s1, s2, t0)`. Cleared on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DilithiumSecretKey(pub(crate) Vec<u8>);

impl fmt::Debug for DilithiumSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DilithiumSecretKey")
            .field(&format_args!("{} bytes", self.0.len()))
            .finish()
    }
}

impl PartialEq for DilithiumSecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for DilithiumSecretKey {}

/// Dilithium Signature Data.
///
/// Packed `(c_tilde, z, h)`: challenge seed, response vector and hint bits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DilithiumSignatureData(pub(crate) Vec<u8>);

impl AsRef<[u8]> for DilithiumPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for DilithiumSignatureData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A key buffer that fails to decode surfaces as `InvalidKey`
fn key_error(err: SignError) -> ApiError {
    match err {
        SignError::Format(message) => ApiError::InvalidKey {
            context: "key",
            message,
        },
        other => other.into(),
    }
}

/// Generic Dilithium signature scheme parameterized by `P`.
pub struct Dilithium<P: DilithiumSchemeParams> {
    _params: PhantomData<P>,
}

impl<P: DilithiumSchemeParams> Dilithium<P> {
    /// Signs with a fresh mask seed drawn from `rng`
    ///
    /// Signatures differ between calls but verify like deterministic ones.
    pub fn sign_randomized<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &DilithiumSecretKey,
        rng: &mut R,
    ) -> ApiResult<DilithiumSignatureData> {
        let sig = sign::sign_randomized::<P>(message, &secret_key.0, rng).map_err(key_error)?;
        Ok(DilithiumSignatureData(sig))
    }

    /// Runtime view of the parameter set
    pub fn parameters() -> &'static ParameterSet {
        P::CATEGORY.parameters()
    }
}

impl<P: DilithiumSchemeParams> SignatureTrait for Dilithium<P> {
    type PublicKey = DilithiumPublicKey;
    type SecretKey = DilithiumSecretKey;
    type SignatureData = DilithiumSignatureData;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        P::NAME
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (pk, sk) = sign::keypair_internal::<P>(rng)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk.to_vec())))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    /// Deterministic signing: the same key and message give the same bytes
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        let sig = sign::sign_internal::<P>(message, &secret_key.0).map_err(key_error)?;
        Ok(DilithiumSignatureData(sig))
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<bool> {
        Ok(sign::verify_internal::<P>(message, &signature.0, &public_key.0)?)
    }
}

impl<P: DilithiumSchemeParams> SignatureSerialize for Dilithium<P> {
    const PUBLIC_KEY_SIZE: usize = P::PUBLIC_KEY_BYTES;
    const SECRET_KEY_SIZE: usize = P::SECRET_KEY_BYTES;
    const SIGNATURE_SIZE: usize = P::SIGNATURE_SIZE;

    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8> {
        key.0.clone()
    }

    fn deserialize_public_key(bytes: &[u8]) -> ApiResult<Self::PublicKey> {
        encoding::unpack_public_key::<P>(bytes).map_err(key_error)?;
        Ok(DilithiumPublicKey(bytes.to_vec()))
    }

    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(key.0.clone())
    }

    fn deserialize_secret_key(bytes: &[u8]) -> ApiResult<Self::SecretKey> {
        encoding::unpack_secret_key::<P>(bytes).map_err(key_error)?;
        Ok(DilithiumSecretKey(bytes.to_vec()))
    }

    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8> {
        sig.0.clone()
    }

    fn deserialize_signature(bytes: &[u8]) -> ApiResult<Self::SignatureData> {
        api::error::validation::length("Dilithium signature", bytes.len(), P::SIGNATURE_SIZE)?;
        Ok(DilithiumSignatureData(bytes.to_vec()))
    }
}

impl<P: DilithiumSchemeParams> SignatureDerive for Dilithium<P> {
    const SEED_SIZE: usize = P::SEED_ZETA_BYTES;

    fn derive_keypair(seed: &[u8]) -> ApiResult<Self::KeyPair> {
        api::error::validation::length("Dilithium seed", seed.len(), P::SEED_ZETA_BYTES)?;
        let (pk, sk) = sign::keypair_from_seed::<P>(seed)?;
        Ok((DilithiumPublicKey(pk), DilithiumSecretKey(sk.to_vec())))
    }

    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        let pk = sign::public_key_from_secret::<P>(&secret_key.0).map_err(key_error)?;
        Ok(DilithiumPublicKey(pk))
    }
}

/// Dilithium at NIST security category 2
pub type Dilithium2 = Dilithium<Dilithium2Params>;
/// Dilithium at NIST security category 3
pub type Dilithium3 = Dilithium<Dilithium3Params>;
/// Dilithium at NIST security category 5
pub type Dilithium5 = Dilithium<Dilithium5Params>;
