//! Fletcher-32 checksums
//!
//! This is the byte oriented variant: each input byte is added to the
//! first sum and both sums are reduced modulo 0xFFFF.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::Checksum;
//! use checksum_tapestry::fletcher32::Fletcher32;
//!
//! let mut fletcher = Fletcher32::default();
//! fletcher.update(b"abcde");
//! assert_eq!(fletcher.value(), 0x05C301EF);
//! ```
use core::default::Default;

use crate::{
    modular::{ChecksumEngine, ModularParams},
    Checksum, Result,
};

/// Constants for Fletcher-32
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fletcher32Params;

impl ModularParams for Fletcher32Params {
    const NAME: &'static str = "Fletcher-32";
    const MODULUS: u32 = 0xFFFF;
    const WIDTH: u32 = 16;
    const NMAX: usize = 5552;
    const SHORT: usize = 16;
    const UNROLL: usize = 16;
}

/// The data structure used for the Fletcher-32 checksum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fletcher32 {
    engine: ChecksumEngine<Fletcher32Params>,
}

impl Fletcher32 {
    /// Compute the checksum of a whole buffer, starting from zero
    pub fn compute(&mut self, data: &[u8]) -> u32 {
        self.engine.reset();
        self.engine.update(data);

        self.value()
    }

    /// Add a single byte, returning the new checksum
    pub fn update_byte(&mut self, data: u8) -> u32 {
        self.engine.update_byte(data);

        self.value()
    }

    /// Current checksum value
    pub fn value(&self) -> u32 {
        self.engine.value()
    }
}

impl Default for Fletcher32 {
    fn default() -> Fletcher32 {
        Fletcher32 {
            engine: ChecksumEngine::new(0, 0),
        }
    }
}

impl Checksum for Fletcher32 {
    fn name(&self) -> &'static str {
        Fletcher32Params::NAME
    }

    fn update(&mut self, data: &[u8]) {
        self.engine.update(data);
    }

    fn finalize(&self) -> Result<Vec<u8>> {
        Ok(self.engine.to_be_bytes())
    }

    fn reset(&mut self) {
        self.engine.reset();
    }
}
