//! Adler-32 checksums
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::Checksum;
//! use checksum_tapestry::adler32::Adler32;
//!
//! let expected: u32 = 0xE4801A6A;
//! let string = "It's a tiny change to the code and not completely disgusting. - Bob Manchek";
//! let data = string.as_bytes();
//! let mut adler32 = Adler32::default();
//! let result = adler32.compute(data);
//! assert_eq!(result, expected);
//! ```
use core::default::Default;

use crate::{
    modular::{ChecksumEngine, ModularParams},
    Checksum, Result,
};

/// Constants for Adler-32
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adler32Params;

impl ModularParams for Adler32Params {
    const NAME: &'static str = "Adler-32";
    /// Largest prime below 2^16
    const MODULUS: u32 = 65521;
    const WIDTH: u32 = 16;
    const NMAX: usize = 5552;
    const SHORT: usize = 16;
    const UNROLL: usize = 16;
}

/// The data structure used for the Adler-32 checksums
/// Stores the initial value and running state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32 {
    engine: ChecksumEngine<Adler32Params>,
}

impl Adler32 {
    /// Create a new Adler32 checksum with a starting value.
    ///
    /// The low 16 bits seed the byte sum and the high 16 bits seed
    /// the sum of sums, the same layout as the checksum itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_tapestry::adler32::Adler32;
    ///
    /// let expected: u32 = 0x25AE5855;
    /// let string = "123456789";
    /// let data = string.as_bytes();
    /// let mut adler32 = Adler32::new(0x12345678);
    /// let result = adler32.compute(data);
    ///
    /// assert_eq!(result, expected);
    /// ```
    pub fn new(initial: u32) -> Adler32 {
        Adler32 {
            engine: ChecksumEngine::new(initial & 0xFFFF, initial >> 16),
        }
    }

    /// Compute an adler32 checksum over a whole buffer
    ///
    /// Every call to compute resets the state to the initial value
    /// first, so calling it twice with the same data yields the same
    /// result.
    pub fn compute(&mut self, data: &[u8]) -> u32 {
        self.engine.reset();
        self.engine.update(data);

        self.value()
    }

    /// Perform a rolling update on the checksum with a single byte,
    /// returning the new checksum.
    ///
    /// From Wikipedia
    /// The formula used is:
    /// `A = 1 + data[0] + data[1] + ... + data[n] (mod 65521)`
    pub fn update_byte(&mut self, data: u8) -> u32 {
        self.engine.update_byte(data);

        self.value()
    }

    /// Current checksum value
    pub fn value(&self) -> u32 {
        self.engine.value()
    }

    /// One-shot checksum of a buffer
    pub fn data(data: &[u8]) -> u32 {
        let mut adler32 = Adler32::default();
        adler32.compute(data)
    }
}

impl Default for Adler32 {
    fn default() -> Adler32 {
        Adler32::new(0x00000001)
    }
}

impl Checksum for Adler32 {
    fn name(&self) -> &'static str {
        Adler32Params::NAME
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
    use super::Adler32;
    use crate::Checksum;

    /// Test against Python 3 zlib module output
    #[test]
    fn test_python3_zlib_result() {
        let expected: u32 = 0x91e01de;
        let string = "123456789";
        let data = string.as_bytes();

        let mut adler32 = Adler32::default();

        let result = adler32.compute(data);
        assert_eq!(result, expected);
    }

    /// This test data is from the Go hash package
    #[test]
    fn byte_string_works() {
        let expected: u32 = 0xe4801a6a;
        let string = "It's a tiny change to the code and not completely disgusting. - Bob Manchek";
        let data = string.as_bytes();

        let mut adler32 = Adler32::default();

        let result = adler32.compute(data);
        assert_eq!(result, expected);
    }

    #[test]
    fn wikipedia_works() {
        assert_eq!(Adler32::data(b"Wikipedia"), 0x11E60398);
    }

    /// Test that two rolling updates work
    /// This test data is from the Go hash package
    #[test]
    fn rolling_update_two_updates_works() {
        let mut adler32 = Adler32::default();

        let result = adler32.update_byte(b'a');
        assert_eq!(result, 0x00620062);

        let result = adler32.update_byte(b'b');
        assert_eq!(result, 0x012600c4);
    }

    #[test]
    fn split_update_matches_single_update() {
        let mut single = Adler32::default();
        single.update(b"abc");

        let mut split = Adler32::default();
        split.update(b"ab");
        split.update(b"c");

        assert_eq!(single.value(), 0x024D0127);
        assert_eq!(split.value(), 0x024D0127);
        assert_eq!(split.finalize().unwrap(), vec![0x02, 0x4D, 0x01, 0x27]);
    }

    #[test]
    fn empty_input_is_initial_value() {
        let mut adler32 = Adler32::default();
        adler32.update(&[]);
        assert_eq!(adler32.end().unwrap(), "00000001");
    }

    #[test]
    fn large_buffer_matches_zlib() {
        let data = vec![b'x'; 100_000];
        assert_eq!(Adler32::data(&data), 0x7e2a25ba);
    }

    /// Test an Adler-32 created with new with a 16-bit initial value
    /// Verified against Python zlib
    #[test]
    fn test_new_with_16_bit() {
        let expected: u32 = 0xACE91411;

        let mut adler32 = Adler32::new(0x1234);
        let result = adler32.compute(b"123456789");

        assert_eq!(result, expected);
    }

    /// Test reset with a checksum created with new with a 32-bit
    /// initial value
    #[test]
    fn test_reset_with_new_with_32_bit() {
        let expected: u32 = 0x25AE5855;

        let mut adler32 = Adler32::new(0x12345678);
        adler32.update(b"123456789");
        assert_eq!(adler32.value(), expected);

        // Test after resetting
        adler32.reset();
        adler32.update(b"123456789");

        assert_eq!(adler32.value(), expected);
    }
}
