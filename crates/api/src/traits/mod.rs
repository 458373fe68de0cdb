//! Trait definitions for signature algorithms

pub mod signature;

pub use signature::{Signature, SignatureDerive, SignatureSerialize};
