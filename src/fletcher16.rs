//! Fletcher-16 checksums
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::fletcher16::Fletcher16;
//!
//! let expected: u16 = 0xC8F0;
//! let string = "abcde";
//! let data = string.as_bytes();
//! let mut fletcher = Fletcher16::default();
//!
//! let result: u16 = fletcher.compute(data);
//!
//! assert_eq!(result, expected);
//! ```
use core::default::Default;

use crate::{
    modular::{ChecksumEngine, ModularParams},
    Checksum, Result,
};

/// Constants for Fletcher-16
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fletcher16Params;

impl ModularParams for Fletcher16Params {
    const NAME: &'static str = "Fletcher-16";
    const MODULUS: u32 = 0xFF;
    const WIDTH: u32 = 8;
    const NMAX: usize = 22;
    const SHORT: usize = 11;
    const UNROLL: usize = 11;
}

/// The data structure used for the Fletcher-16 checksum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fletcher16 {
    engine: ChecksumEngine<Fletcher16Params>,
}

impl Fletcher16 {
    /// Compute the checksum of a whole buffer, starting from zero
    pub fn compute(&mut self, data: &[u8]) -> u16 {
        self.engine.reset();
        self.engine.update(data);

        self.value()
    }

    /// Add a single byte, returning the new checksum
    pub fn update_byte(&mut self, data: u8) -> u16 {
        self.engine.update_byte(data);

        self.value()
    }

    /// Current checksum value
    pub fn value(&self) -> u16 {
        // Both sums are below 0xFF so the packed value fits
        self.engine.value() as u16
    }
}

impl Default for Fletcher16 {
    fn default() -> Fletcher16 {
        Fletcher16 {
            engine: ChecksumEngine::new(0, 0),
        }
    }
}

impl Checksum for Fletcher16 {
    fn name(&self) -> &'static str {
        Fletcher16Params::NAME
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

#[cfg(test)]
mod tests {
    use super::Fletcher16;
    use crate::Checksum;

    /// "abcde" -> 51440 (0xC8F0)
    /// From Wikipedia: https://en.wikipedia.org/w/index.php?title=Fletcher%27s_checksum&action=edit&section=17
    /// Also validated against Dr. Dobb's implementation:
    /// https://www.drdobbs.com/article/print?articleId=184408761&siteSectionName=database
    #[test]
    fn fletcher16_test_one_works() {
        let expected: u16 = 0xC8F0;
        let mut fletcher = Fletcher16::default();

        let result = fletcher.compute(b"abcde");

        assert_eq!(result, expected);
    }

    /// "abcdef" -> 8279 (0x2057)
    #[test]
    fn fletcher16_test_two_works() {
        let expected: u16 = 0x2057;
        let mut fletcher = Fletcher16::default();

        let result = fletcher.compute(b"abcdef");

        assert_eq!(result, expected);
    }

    /// A test case that wraps past 0xFFFF
    /// Verified against Dr. Dobb's implementation:
    /// https://www.drdobbs.com/article/print?articleId=184408761&siteSectionName=database
    #[test]
    fn fletcher16_16_bit_wrap() {
        let expected: u16 = 0xA587;
        let data: [u8; 400] = [0xA8; 400];

        let mut fletcher = Fletcher16::default();

        let result = fletcher.compute(&data);

        assert_eq!(result, expected);
    }

    #[test]
    fn fletcher16_byte_by_byte_matches_buffer() {
        let data = b"It's a tiny change to the code and not completely disgusting. - Bob Manchek";
        let mut bytewise = Fletcher16::default();
        for &byte in data.iter() {
            bytewise.update_byte(byte);
        }

        let mut buffered = Fletcher16::default();
        buffered.update(data);

        assert_eq!(bytewise.value(), 0xEF83);
        assert_eq!(buffered.value(), 0xEF83);
    }

    #[test]
    fn fletcher16_end_is_four_hex_digits() {
        let mut fletcher = Fletcher16::default();
        assert_eq!(fletcher.end().unwrap(), "0000");

        fletcher.update(b"abcde");
        assert_eq!(fletcher.end().unwrap(), "c8f0");
    }

    #[test]
    fn fletcher16_reset_with_default_works() {
        let expected: u16 = 0xC8F0;
        let mut fletcher = Fletcher16::default();

        let result = fletcher.compute(b"abcde");
        assert_eq!(result, expected);

        fletcher.reset();
        fletcher.update(b"abcde");
        assert_eq!(fletcher.value(), expected);
    }
}
