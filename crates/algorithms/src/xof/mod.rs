//! Extendable Output Functions (XOF)
//!
//! XOFs produce output of arbitrary length. Every deterministic expansion in
//! the signature scheme (matrix, secret vectors, masks, challenges and the
//! message and key digests) goes through this interface.

use alloc::vec::Vec;

use crate::error::{validate, Result};

pub mod shake;

// Re-exports
pub use shake::{ShakeVariant, ShakeXof, ShakeXof128, ShakeXof256};

/// Trait for extendable output functions
pub trait ExtendableOutputFunction {
    /// Creates a new instance of the XOF
    fn new() -> Self;

    /// Absorbs more input; fails once output has been squeezed
    fn update(&mut self, data: &[u8]) -> Result<()>;

    /// Ends the absorbing phase
    fn finalize(&mut self) -> Result<()>;

    /// Squeezes output bytes into the provided buffer, finalizing first if needed
    fn squeeze(&mut self, output: &mut [u8]) -> Result<()>;

    /// Squeezes the specified number of output bytes into a new vector
    fn squeeze_into_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; len];
        self.squeeze(&mut out)?;
        Ok(out)
    }

    /// Resets the XOF to its initial absorbing state
    fn reset(&mut self) -> Result<()>;

    /// Returns the security level in bits
    fn security_level() -> usize;

    /// Convenience method to generate output in a single call
    fn generate(data: &[u8], len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        validate::parameter(len > 0, "output_length", "XOF output length must be greater than 0")?;

        let mut xof = Self::new();
        xof.update(data)?;
        xof.squeeze_into_vec(len)
    }

    /// Absorbs each input in order and fills `output`
    fn derive_into(inputs: &[&[u8]], output: &mut [u8]) -> Result<()>
    where
        Self: Sized,
    {
        let mut xof = Self::new();
        for input in inputs {
            xof.update(input)?;
        }
        xof.squeeze(output)
    }
}
