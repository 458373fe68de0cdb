//! Polynomial ring parameters with NTT support

/// Basic trait defining the modulus and degree for a polynomial ring
pub trait Modulus {
    /// The primary modulus Q for coefficient arithmetic
    const Q: u32;

    /// The polynomial degree N (number of coefficients)
    const N: usize;
}

/// Extended trait for moduli admitting a complete negacyclic NTT
///
/// `Q` must be an odd prime below 2^31 with `2N | Q - 1`.
pub trait NttModulus: Modulus {
    /// Primitive 2N-th root of unity
    const ZETA: u32;

    /// Powers of `ZETA` in bit-reversed order, Montgomery form, length N
    const ZETAS: &'static [u32];

    /// Montgomery parameter R = 2^32 mod Q
    const MONT_R: u32;

    /// R^2 mod Q, converts a standard value into Montgomery form
    const MONT_R2: u32;

    /// -Q^-1 mod 2^32 for Montgomery reduction
    const Q_INV_NEG: u32;

    /// R / N mod Q: final scaling of the exact inverse transform
    const N_INV: u32;

    /// R^2 / N mod Q: final scaling of the inverse transform that leaves
    /// a factor R behind, cancelling one Montgomery pointwise product
    const N_INV_TOMONT: u32;
}

/// The Dilithium ring: q = 2^23 - 2^13 + 1, N = 256
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DilithiumRing;

const DILITHIUM_Q: u32 = 8380417;
const DILITHIUM_MONT_R: u32 = 4193792;

/// Twiddle factors for [`DilithiumRing`], computed at compile time
pub const DILITHIUM_ZETAS: [u32; 256] =
    bit_reversed_zetas::<256>(1753, DILITHIUM_Q, DILITHIUM_MONT_R);

impl Modulus for DilithiumRing {
    const Q: u32 = DILITHIUM_Q;
    const N: usize = 256;
}

impl NttModulus for DilithiumRing {
    const ZETA: u32 = 1753;
    const ZETAS: &'static [u32] = &DILITHIUM_ZETAS;
    const MONT_R: u32 = DILITHIUM_MONT_R;
    const MONT_R2: u32 = 2365951;
    const Q_INV_NEG: u32 = 0xFC7F_DFFF;
    const N_INV: u32 = 16382;
    const N_INV_TOMONT: u32 = 41978;
}

/// Modular exponentiation usable in constant contexts
pub const fn pow_mod(base: u32, mut exp: u32, q: u32) -> u32 {
    let q = q as u64;
    let mut base = base as u64 % q;
    let mut acc = 1u64;
    while exp != 0 {
        if exp & 1 == 1 {
            acc = acc * base % q;
        }
        base = base * base % q;
        exp >>= 1;
    }
    acc as u32
}

/// `table[i] = zeta^brv(i) * R mod q`, with `brv` reversing log2(LEN) bits
pub const fn bit_reversed_zetas<const LEN: usize>(zeta: u32, q: u32, mont_r: u32) -> [u32; LEN] {
    let bits = LEN.trailing_zeros();
    let mut table = [0u32; LEN];
    let mut i = 0;
    while i < LEN {
        let brv = (i as u32).reverse_bits() >> (32 - bits);
        let power = pow_mod(zeta, brv, q) as u64;
        table[i] = (power * mont_r as u64 % q as u64) as u32;
        i += 1;
    }
    table
}

/// Check if N is a power of 2
pub const fn is_power_of_two(n: usize) -> bool {
    n > 0 && (n & (n - 1)) == 0
}
