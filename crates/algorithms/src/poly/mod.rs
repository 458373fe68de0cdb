//! Generic Polynomial Engine
//!
//! Polynomial arithmetic over `Z_Q[X]/(X^N + 1)`, parameterised by a ring
//! marker implementing [`params::Modulus`] (and [`params::NttModulus`] for
//! transform-based multiplication).

pub mod ntt;
pub mod params;
pub mod polynomial;
pub mod serialize;

/// Prelude for easy importing of common polynomial types and traits.
pub mod prelude {
    pub use super::ntt::{
        montgomery_mul, montgomery_reduce, CooleyTukeyNtt, InverseNttOperator, NttOperator,
    };
    pub use super::params::{DilithiumRing, Modulus, NttModulus};
    pub use super::polynomial::Polynomial;
    pub use super::serialize::{
        bytes_required, CoefficientPacker, CoefficientUnpacker, DefaultCoefficientSerde,
    };
}
