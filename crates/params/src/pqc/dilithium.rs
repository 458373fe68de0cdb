//! Constants for the Dilithium digital signature algorithm
//!
//! Values follow the round-3.1 parameter sets. Each category is available as
//! a zero-sized marker implementing [`DilithiumSchemeParams`] (used to
//! monomorphise the protocol) and as a [`ParameterSet`] record reachable
//! from a [`SecurityCategory`] at runtime. The record is computed from the
//! trait constants, so the two views cannot drift apart.

use core::fmt;
use core::str::FromStr;

/// Dilithium polynomial degree
pub const DILITHIUM_N: usize = 256;

/// Dilithium modulus q = 2^23 - 2^13 + 1
pub const DILITHIUM_Q: u32 = 8380417;

/// Bits dropped from t by Power2Round
pub const DILITHIUM_D: u32 = 13;

/// Bits per packed t1 coefficient (bitlen(q - 1) - d)
pub const DILITHIUM_T1_BITS: usize = 10;

/// Common trait for Dilithium parameter sets
pub trait DilithiumSchemeParams: Send + Sync + 'static {
    /// Algorithm name
    const NAME: &'static str;
    /// Security category this set targets
    const CATEGORY: SecurityCategory;

    // Ring parameters
    /// Polynomial degree (always 256 for Dilithium)
    const N: usize = DILITHIUM_N;
    /// Prime modulus
    const Q: u32 = DILITHIUM_Q;
    /// Dropped bits parameter
    const D_PARAM: u32 = DILITHIUM_D;

    // Matrix dimensions
    /// Number of polynomials in s2 and t (rows in A)
    const K_DIM: usize;
    /// Number of polynomials in s1 and y (columns in A)
    const L_DIM: usize;

    // Norm bounds
    /// Bound for secret polynomials s1, s2
    const ETA_S1S2: u32;
    /// Bits per packed secret coefficient
    const ETA_BITS: usize;
    /// Range parameter for masking vector y
    const GAMMA1_PARAM: u32;
    /// Bits per packed z coefficient
    const GAMMA1_BITS: usize;
    /// Low-order rounding range
    const GAMMA2_PARAM: u32;
    /// Bits per packed w1 coefficient
    const W1_BITS: usize;
    /// Rejection margin, tau * eta
    const BETA_PARAM: u32;
    /// Maximum number of hint bits
    const OMEGA_PARAM: u32;
    /// Number of ±1 coefficients in challenge polynomial
    const TAU_PARAM: usize;

    // Byte sizes
    /// Public key size in bytes
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key size in bytes
    const SECRET_KEY_BYTES: usize;
    /// Signature size in bytes
    const SIGNATURE_SIZE: usize;

    // Seed sizes
    /// Seed size for matrix A generation
    const SEED_RHO_BYTES: usize = 32;
    /// Seed size for secret vector sampling
    const SEED_RHO_PRIME_BYTES: usize = 64;
    /// Signing key seed size
    const SEED_KEY_BYTES: usize = 32;
    /// Master seed size for key generation
    const SEED_ZETA_BYTES: usize = 32;
    /// Challenge seed size
    const SEED_C_TILDE_BYTES: usize = 32;
    /// Hash output size for tr = H(pk)
    const HASH_TR_BYTES: usize = 32;
    /// Message representative size
    const MU_BYTES: usize = 64;

    // Additional parameters
    /// Sanity ceiling on signing attempts
    const MAX_SIGN_ABORTS: u16 = 1000;

    // Packed polynomial sizes
    /// Bytes per packed t1 polynomial
    const POLY_T1_PACKED_BYTES: usize = Self::N * DILITHIUM_T1_BITS / 8;
    /// Bytes per packed t0 polynomial
    const POLY_T0_PACKED_BYTES: usize = Self::N * Self::D_PARAM as usize / 8;
    /// Bytes per packed s1/s2 polynomial
    const POLY_ETA_PACKED_BYTES: usize = Self::N * Self::ETA_BITS / 8;
    /// Bytes per packed z polynomial
    const POLY_Z_PACKED_BYTES: usize = Self::N * Self::GAMMA1_BITS / 8;
    /// Bytes per packed w1 polynomial
    const POLY_W1_PACKED_BYTES: usize = Self::N * Self::W1_BITS / 8;
}

/// Dilithium2 marker (NIST security category 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dilithium2Params;

impl DilithiumSchemeParams for Dilithium2Params {
    const NAME: &'static str = "Dilithium2";
    const CATEGORY: SecurityCategory = SecurityCategory::Two;
    const K_DIM: usize = 4;
    const L_DIM: usize = 4;
    const ETA_S1S2: u32 = 2;
    const ETA_BITS: usize = 3;
    const GAMMA1_PARAM: u32 = 1 << 17;
    const GAMMA1_BITS: usize = 18;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 88;
    const W1_BITS: usize = 6;
    const BETA_PARAM: u32 = 78;
    const OMEGA_PARAM: u32 = 80;
    const TAU_PARAM: usize = 39;
    const PUBLIC_KEY_BYTES: usize = 1312;
    const SECRET_KEY_BYTES: usize = 2528;
    const SIGNATURE_SIZE: usize = 2420;
}

/// Dilithium3 marker (NIST security category 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dilithium3Params;

impl DilithiumSchemeParams for Dilithium3Params {
    const NAME: &'static str = "Dilithium3";
    const CATEGORY: SecurityCategory = SecurityCategory::Three;
    const K_DIM: usize = 6;
    const L_DIM: usize = 5;
    const ETA_S1S2: u32 = 4;
    const ETA_BITS: usize = 4;
    const GAMMA1_PARAM: u32 = 1 << 19;
    const GAMMA1_BITS: usize = 20;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 32;
    const W1_BITS: usize = 4;
    const BETA_PARAM: u32 = 196;
    const OMEGA_PARAM: u32 = 55;
    const TAU_PARAM: usize = 49;
    const PUBLIC_KEY_BYTES: usize = 1952;
    const SECRET_KEY_BYTES: usize = 4000;
    const SIGNATURE_SIZE: usize = 3293;
}

/// Dilithium5 marker (NIST security category 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dilithium5Params;

impl DilithiumSchemeParams for Dilithium5Params {
    const NAME: &'static str = "Dilithium5";
    const CATEGORY: SecurityCategory = SecurityCategory::Five;
    const K_DIM: usize = 8;
    const L_DIM: usize = 7;
    const ETA_S1S2: u32 = 2;
    const ETA_BITS: usize = 3;
    const GAMMA1_PARAM: u32 = 1 << 19;
    const GAMMA1_BITS: usize = 20;
    const GAMMA2_PARAM: u32 = (DILITHIUM_Q - 1) / 32;
    const W1_BITS: usize = 4;
    const BETA_PARAM: u32 = 120;
    const OMEGA_PARAM: u32 = 75;
    const TAU_PARAM: usize = 60;
    const PUBLIC_KEY_BYTES: usize = 2592;
    const SECRET_KEY_BYTES: usize = 4864;
    const SIGNATURE_SIZE: usize = 4595;
}

/// Runtime view of one Dilithium parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterSet {
    /// Algorithm name
    pub name: &'static str,
    /// Security category
    pub category: SecurityCategory,
    /// Ring dimension
    pub n: usize,
    /// Modulus
    pub q: u32,
    /// Dropped bits in t
    pub d: u32,
    /// Rows in matrix A
    pub k: usize,
    /// Columns in matrix A
    pub l: usize,
    /// Secret coefficient bound
    pub eta: u32,
    /// Challenge weight
    pub tau: usize,
    /// Rejection margin
    pub beta: u32,
    /// Masking range
    pub gamma1: u32,
    /// Low-order rounding range
    pub gamma2: u32,
    /// Maximum number of hint bits
    pub omega: u32,
    /// Public key size in bytes
    pub public_key_size: usize,
    /// Secret key size in bytes
    pub secret_key_size: usize,
    /// Signature size in bytes
    pub signature_size: usize,
}

impl ParameterSet {
    /// Builds the record for the marker type `P`
    pub const fn of<P: DilithiumSchemeParams>() -> Self {
        Self {
            name: P::NAME,
            category: P::CATEGORY,
            n: P::N,
            q: P::Q,
            d: P::D_PARAM,
            k: P::K_DIM,
            l: P::L_DIM,
            eta: P::ETA_S1S2,
            tau: P::TAU_PARAM,
            beta: P::BETA_PARAM,
            gamma1: P::GAMMA1_PARAM,
            gamma2: P::GAMMA2_PARAM,
            omega: P::OMEGA_PARAM,
            public_key_size: P::PUBLIC_KEY_BYTES,
            secret_key_size: P::SECRET_KEY_BYTES,
            signature_size: P::SIGNATURE_SIZE,
        }
    }
}

/// Dilithium2 parameters (NIST security category 2)
pub const DILITHIUM2: ParameterSet = ParameterSet::of::<Dilithium2Params>();

/// Dilithium3 parameters (NIST security category 3)
pub const DILITHIUM3: ParameterSet = ParameterSet::of::<Dilithium3Params>();

/// Dilithium5 parameters (NIST security category 5)
pub const DILITHIUM5: ParameterSet = ParameterSet::of::<Dilithium5Params>();

/// Supported security categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum SecurityCategory {
    /// Category 2 (Dilithium2)
    Two,
    /// Category 3 (Dilithium3)
    Three,
    /// Category 5 (Dilithium5)
    Five,
}

impl SecurityCategory {
    /// Every supported category, weakest first
    pub const ALL: [SecurityCategory; 3] = [Self::Two, Self::Three, Self::Five];

    /// Numeric NIST level
    pub const fn level(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    /// Parameter record for this category
    pub const fn parameters(self) -> &'static ParameterSet {
        match self {
            Self::Two => &DILITHIUM2,
            Self::Three => &DILITHIUM3,
            Self::Five => &DILITHIUM5,
        }
    }

    /// Algorithm name, e.g. `"Dilithium3"`
    pub const fn name(self) -> &'static str {
        self.parameters().name
    }
}

impl fmt::Display for SecurityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SecurityCategory> for u8 {
    fn from(category: SecurityCategory) -> Self {
        category.level()
    }
}

impl TryFrom<u8> for SecurityCategory {
    type Error = UnknownCategory;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            _ => Err(UnknownCategory),
        }
    }
}

impl FromStr for SecurityCategory {
    type Err = UnknownCategory;

    /// Accepts a bare level (`"3"`) or an algorithm identifier
    /// (`"dilithium3"`, any ASCII case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const PREFIX: &str = "dilithium";
        let level = match s.get(..PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(PREFIX) => &s[PREFIX.len()..],
            _ => s,
        };
        match level {
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "5" => Ok(Self::Five),
            _ => Err(UnknownCategory),
        }
    }
}

/// Selector that names no supported category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategory;

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unsupported Dilithium security category")
    }
}
