//! Error types for the signature crate

use params::UnknownCategory;
use thiserror::Error;

/// Errors that can occur during signature operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unknown category selector or otherwise unusable parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Key buffer has the wrong length for the parameter set
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Signature buffer has the wrong length for the parameter set
    #[error("Invalid signature size: expected {expected}, got {actual}")]
    InvalidSignatureSize { expected: usize, actual: usize },

    /// A decoded value is out of range or structurally malformed
    #[error("Format error: {0}")]
    Format(String),

    /// The random number generator failed during key generation
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// An invariant of the implementation did not hold
    #[error("{algorithm} internal fault: {details}")]
    InternalFault {
        algorithm: &'static str,
        details: String,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<UnknownCategory> for Error {
    fn from(err: UnknownCategory) -> Self {
        Error::InvalidParameter(err.to_string())
    }
}

// Convert from algorithms::error::Error
impl From<algorithms::Error> for Error {
    fn from(err: algorithms::Error) -> Self {
        use algorithms::Error as AlgoError;

        match err {
            AlgoError::Parameter { name, reason } => {
                Error::InvalidParameter(format!("{}: {}", name, reason))
            }
            AlgoError::Length {
                context,
                expected,
                actual,
            } => Error::Format(format!(
                "{}: expected {} bytes, got {}",
                context, expected, actual
            )),
            AlgoError::Processing { operation, details } => Error::InternalFault {
                algorithm: operation,
                details: details.to_string(),
            },
        }
    }
}

// Convert to api::Error
impl From<Error> for api::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidParameter(message) => api::Error::InvalidParameter {
                context: "sign",
                message,
            },
            Error::InvalidKeySize { expected, actual } => api::Error::InvalidLength {
                context: "key",
                expected,
                actual,
            },
            Error::InvalidSignatureSize { expected, actual } => api::Error::InvalidLength {
                context: "signature",
                expected,
                actual,
            },
            Error::Format(message) => api::Error::SerializationError {
                context: "decode",
                message,
            },
            Error::EntropyUnavailable(message) => api::Error::RandomGenerationError {
                context: "keypair",
                message,
            },
            Error::InternalFault { algorithm, details } => api::Error::Other {
                context: algorithm,
                message: details,
            },
        }
    }
}
