//! Dilithium Digital Signatures
//!
//! This crate implements the CRYSTALS-Dilithium lattice signature scheme
//! (round 3.1) at NIST security categories 2, 3 and 5.
//!
//! Two entry points are provided:
//! - typed schemes [`Dilithium2`], [`Dilithium3`] and [`Dilithium5`]
//!   implementing the `pqsig-api` signature traits
//! - the byte-level [`category`] boundary selected by a runtime
//!   [`SecurityCategory`]

pub mod error;
pub mod pq;

pub use error::{Error, Result};

// Re-exports from post-quantum schemes
pub use pq::dilithium;
pub use pq::dilithium::category;
pub use pq::dilithium::{
    DilithiumPublicKey, DilithiumSecretKey, DilithiumSignatureData, SecurityCategory,
};
pub use pq::{Dilithium2, Dilithium3, Dilithium5};
