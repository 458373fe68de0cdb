//! Constant values for pqsig
//!
//! This crate is the parameter set registry: one immutable record per
//! supported Dilithium security category, exposed both as compile-time
//! trait constants and as runtime lookup values.

#![no_std]

// Post-quantum algorithm constants
pub mod pqc;

pub use pqc::dilithium::{
    DilithiumSchemeParams, Dilithium2Params, Dilithium3Params, Dilithium5Params,
    ParameterSet, SecurityCategory, UnknownCategory,
};
