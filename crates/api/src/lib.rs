//! Public API traits and types for pqsig
//!
//! This crate provides the public API surface shared by the pqsig crates:
//! the signature trait family and the error type every operation reports
//! through.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::{Signature, SignatureDerive, SignatureSerialize};

// Re-export trait modules for direct access
pub use traits::signature;
