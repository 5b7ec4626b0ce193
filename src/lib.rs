//! crate for various checksum algorithms
//!
//! This crate provides an API and set of implementations that can be
//! used to compute checksums, CRCs, cryptographic digests and fuzzy
//! hashes over streams of bytes, the way a disk image preservation
//! tool needs them: incrementally, one buffer at a time, without ever
//! holding the whole image in memory.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::Checksum;
//! use checksum_tapestry::adler32::Adler32;
//!
//! let mut adler32 = Adler32::default();
//! adler32.update(b"Wiki");
//! adler32.update(b"pedia");
//! assert_eq!(adler32.end().unwrap(), "11e60398");
//! ```
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod adler32;
pub mod crc;
pub mod crc_table;
pub mod digest;
pub mod error;
pub mod fletcher16;
pub mod fletcher32;
pub mod io;
pub mod modular;
pub mod multi;
pub mod spamsum;

pub use error::{ChecksumError, Result};

/// Checksum trait all checksum algorithms should implement
///
/// There are multiple uses of the term check or checksum.  The term
/// in this context is a computation of a error-detecting code or
/// digest for a set of data.  The Checksum trait provides an
/// interface for algorithms that consume data incrementally and can
/// report their result at any point.
///
/// Finalization never consumes or changes the state: calling
/// [`Checksum::finalize`] or [`Checksum::end`] twice returns the same
/// value, and more data can be added afterwards.
pub trait Checksum {
    /// Name of the algorithm, e.g. "Adler-32"
    fn name(&self) -> &'static str;

    /// Add a buffer of bytes to the checksum
    ///
    /// # Examples
    ///
    /// ```
    /// use checksum_tapestry::Checksum;
    /// use checksum_tapestry::adler32::Adler32;
    ///
    /// let mut one = Adler32::default();
    /// one.update(b"abc");
    ///
    /// let mut two = Adler32::default();
    /// two.update(b"ab");
    /// two.update(b"c");
    ///
    /// assert_eq!(one.finalize().unwrap(), two.finalize().unwrap());
    /// ```
    fn update(&mut self, data: &[u8]);

    /// Return the checksum as big-endian bytes
    ///
    /// Algorithms without a fixed-width binary representation return
    /// [`ChecksumError::Unsupported`].
    fn finalize(&self) -> Result<Vec<u8>>;

    /// Return the checksum as a string
    ///
    /// This is the lowercase hexadecimal form of [`Checksum::finalize`]
    /// unless the algorithm defines its own textual representation.
    fn end(&self) -> Result<String> {
        Ok(hex::encode(self.finalize()?))
    }

    /// Reset the checksum to the original state.
    /// This resets the checksum to the state it was in when it was
    /// created.
    /// If it was created with non-default parameters, those should be
    /// preserved.
    fn reset(&mut self);
}
