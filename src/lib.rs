//! # pqsig
//!
//! CRYSTALS-Dilithium lattice signatures (round 3.1) for NIST security
//! categories 2, 3 and 5.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pqsig = "0.1"
//! ```
//!
//! ```no_run
//! use pqsig::prelude::*;
//!
//! let (pk, sk) = category::keypair(SecurityCategory::Three)?;
//! let sig = category::sign(SecurityCategory::Three, b"hello", &sk)?;
//! assert!(category::verify(SecurityCategory::Three, b"hello", &sig, &pk)?);
//! # Ok::<(), pqsig::sign::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): operating-system entropy for `category::keypair`
//! - `serde`: derives for `SecurityCategory`, `ParameterSet` and the typed
//!   key and signature wrappers
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - `pqsig-api`: signature traits and the shared API error
//! - `pqsig-params`: the parameter set registry
//! - `pqsig-algorithms`: ring arithmetic, NTT, bit packing and SHAKE
//! - `pqsig-sign`: Dilithium key generation, signing and verification

pub use pqsig_algorithms as algorithms;
pub use pqsig_api as api;
pub use pqsig_internal as internal;
pub use pqsig_params as params;
pub use pqsig_sign as sign;

pub use pqsig_sign::category;

/// Common imports for pqsig users
pub mod prelude {
    // Category-selected byte boundary
    pub use crate::sign::category;
    pub use crate::sign::{Error, Result};

    // Parameter registry
    pub use crate::params::{ParameterSet, SecurityCategory};

    // Typed schemes and their traits
    pub use crate::api::{Signature, SignatureDerive, SignatureSerialize};
    pub use crate::sign::{
        Dilithium2, Dilithium3, Dilithium5, DilithiumPublicKey, DilithiumSecretKey,
        DilithiumSignatureData,
    };
}
