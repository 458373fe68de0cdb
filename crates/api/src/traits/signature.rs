//! Digital signature traits for pqsig
//!
//! This module defines the traits that signature algorithms implement.
//! The design prioritizes security by not requiring mutable access to secret keys.

use crate::Result;
use alloc::vec::Vec;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// Core trait for digital signature algorithms
///
/// Secret keys are opaque types; byte access goes through
/// [`SignatureSerialize`] so that key material is not corrupted or exposed
/// by accident.
///
/// # Verification outcome
///
/// [`Signature::verify`] separates two situations that callers must be able
/// to tell apart:
///
/// - `Ok(false)`: the inputs are well formed but the signature does not
///   match the message and public key.
/// - `Err(_)`: an input has the wrong length for the algorithm, so no
///   verification was attempted.
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of public and secret keys)
    type KeyPair;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    ///
    /// The RNG is consulted exactly once per call. Its failure is reported,
    /// never papered over with another entropy source.
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<bool>;
}

/// Optional trait for signature algorithms that support key serialization
pub trait SignatureSerialize: Signature {
    /// Size of serialized public keys in bytes
    const PUBLIC_KEY_SIZE: usize;

    /// Size of serialized secret keys in bytes
    const SECRET_KEY_SIZE: usize;

    /// Size of serialized signatures in bytes
    const SIGNATURE_SIZE: usize;

    /// Export a public key to bytes
    fn serialize_public_key(key: &Self::PublicKey) -> Vec<u8>;

    /// Import a public key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length does not match `PUBLIC_KEY_SIZE`
    fn deserialize_public_key(bytes: &[u8]) -> Result<Self::PublicKey>;

    /// Export a secret key to bytes
    ///
    /// The `Zeroizing` wrapper clears the copy when it is dropped.
    fn serialize_secret_key(key: &Self::SecretKey) -> Zeroizing<Vec<u8>>;

    /// Import a secret key from bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or a field is out of range
    fn deserialize_secret_key(bytes: &[u8]) -> Result<Self::SecretKey>;

    /// Export a signature to bytes
    fn serialize_signature(sig: &Self::SignatureData) -> Vec<u8>;

    /// Import a signature from bytes
    ///
    /// Only the length is checked here; structural problems surface as a
    /// failed verification.
    fn deserialize_signature(bytes: &[u8]) -> Result<Self::SignatureData>;
}

/// Optional trait for signature algorithms that support key derivation
pub trait SignatureDerive: Signature {
    /// Seed size in bytes
    const SEED_SIZE: usize;

    /// Derive a key pair from seed material
    ///
    /// The same seed always yields the same key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed does not have exactly `SEED_SIZE` bytes
    fn derive_keypair(seed: &[u8]) -> Result<Self::KeyPair>;

    /// Derive the public key from a secret key
    ///
    /// # Errors
    ///
    /// Returns an error if the secret key is malformed
    fn derive_public_key(secret_key: &Self::SecretKey) -> Result<Self::PublicKey>;
}
