//! Lattice arithmetic and extendable-output primitives
//!
//! This crate provides the building blocks the Dilithium implementation in
//! `pqsig-sign` is assembled from:
//!
//! - [`poly`]: polynomials over `Z_q[X]/(X^N + 1)` with branch-free modular
//!   arithmetic, a Montgomery-domain number-theoretic transform and
//!   little-endian coefficient packing
//! - [`xof`]: the SHAKE-128 and SHAKE-256 extendable output functions used
//!   for deterministic expansion
//!
//! Coefficients are kept canonical in `[0, Q)` after every operation.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Polynomial engine
pub mod poly;

// Extendable output functions
pub mod xof;
pub use xof::{ExtendableOutputFunction, ShakeXof128, ShakeXof256};
