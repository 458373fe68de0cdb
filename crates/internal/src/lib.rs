//! Internal utilities for pqsig
//!
//! Not part of the public API; shared by the arithmetic and signature crates.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
