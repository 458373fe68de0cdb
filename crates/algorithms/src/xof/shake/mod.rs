//! SHAKE extendable output functions
//!
//! SHAKE-128 and SHAKE-256 as specified in FIPS PUB 202, backed by the
//! `sha3` crate's Keccak sponge. The wrapper adds the absorb/squeeze phase
//! tracking that [`ExtendableOutputFunction`] promises.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

use super::ExtendableOutputFunction;
use crate::error::{Error, Result};

/// Keccak sponge variants that can back a [`ShakeXof`]
pub trait ShakeVariant: Default + Update + ExtendableOutput {
    /// Security level in bits
    const SECURITY_LEVEL: usize;
    /// Sponge rate in bytes
    const RATE: usize;
    /// Algorithm name
    const NAME: &'static str;
}

impl ShakeVariant for Shake128 {
    const SECURITY_LEVEL: usize = 128;
    const RATE: usize = 168;
    const NAME: &'static str = "SHAKE-128";
}

impl ShakeVariant for Shake256 {
    const SECURITY_LEVEL: usize = 256;
    const RATE: usize = 136;
    const NAME: &'static str = "SHAKE-256";
}

enum Sponge<H: ShakeVariant> {
    Absorbing(H),
    Squeezing(H::Reader),
}

/// SHAKE extendable output function
pub struct ShakeXof<H: ShakeVariant> {
    sponge: Sponge<H>,
}

/// SHAKE-128 extendable output function
pub type ShakeXof128 = ShakeXof<Shake128>;

/// SHAKE-256 extendable output function
pub type ShakeXof256 = ShakeXof<Shake256>;

impl<H: ShakeVariant> ShakeXof<H> {
    /// Bytes produced per Keccak permutation
    pub const fn rate() -> usize {
        H::RATE
    }

    fn start_squeezing(&mut self) {
        let sponge = core::mem::replace(&mut self.sponge, Sponge::Absorbing(H::default()));
        self.sponge = match sponge {
            Sponge::Absorbing(hasher) => Sponge::Squeezing(hasher.finalize_xof()),
            squeezing => squeezing,
        };
    }
}

impl<H: ShakeVariant> ExtendableOutputFunction for ShakeXof<H> {
    fn new() -> Self {
        Self {
            sponge: Sponge::Absorbing(H::default()),
        }
    }

    fn update(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.sponge {
            Sponge::Absorbing(hasher) => {
                hasher.update(data);
                Ok(())
            }
            Sponge::Squeezing(_) => Err(Error::Processing {
                operation: H::NAME,
                details: "cannot absorb after squeezing",
            }),
        }
    }

    fn finalize(&mut self) -> Result<()> {
        self.start_squeezing();
        Ok(())
    }

    fn squeeze(&mut self, output: &mut [u8]) -> Result<()> {
        self.start_squeezing();
        if let Sponge::Squeezing(reader) = &mut self.sponge {
            reader.read(output);
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.sponge = Sponge::Absorbing(H::default());
        Ok(())
    }

    fn security_level() -> usize {
        H::SECURITY_LEVEL
    }
}
