//! Error handling for the public API

pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Re-export validation utilities under a descriptive name
pub use validate as validation;

#[cfg(feature = "std")]
impl std::error::Error for Error {}
