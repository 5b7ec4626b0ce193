//! Cryptographic digests
//!
//! MD5, SHA-1, SHA-2 and RIPEMD-160 wrapped in the [`Checksum`]
//! interface so they can be driven like any other engine.  The hashing
//! itself is done by the RustCrypto implementations.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::Checksum;
//! use checksum_tapestry::digest::Sha256;
//!
//! let mut sha256 = Sha256::default();
//! sha256.update(b"a");
//! sha256.update(b"bc");
//! assert_eq!(
//!     sha256.end().unwrap(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
use core::fmt::{Debug, Formatter};

use digest::Digest;

use crate::{Checksum, Result};

/// A RustCrypto digest with a display name
pub trait NamedDigest: Digest + Clone + Default + Send {
    /// Name of the algorithm
    const NAME: &'static str;
}

impl NamedDigest for md5::Md5 {
    const NAME: &'static str = "MD5";
}

impl NamedDigest for sha1::Sha1 {
    const NAME: &'static str = "SHA1";
}

impl NamedDigest for sha2::Sha256 {
    const NAME: &'static str = "SHA256";
}

impl NamedDigest for sha2::Sha384 {
    const NAME: &'static str = "SHA384";
}

impl NamedDigest for sha2::Sha512 {
    const NAME: &'static str = "SHA512";
}

impl NamedDigest for ripemd::Ripemd160 {
    const NAME: &'static str = "RIPEMD160";
}

/// Incremental cryptographic hash
#[derive(Clone, Default)]
pub struct CryptoHash<D: NamedDigest> {
    hasher: D,
}

/// MD5
pub type Md5 = CryptoHash<md5::Md5>;
/// SHA-1
pub type Sha1 = CryptoHash<sha1::Sha1>;
/// SHA-256
pub type Sha256 = CryptoHash<sha2::Sha256>;
/// SHA-384
pub type Sha384 = CryptoHash<sha2::Sha384>;
/// SHA-512
pub type Sha512 = CryptoHash<sha2::Sha512>;
/// RIPEMD-160
pub type Ripemd160 = CryptoHash<ripemd::Ripemd160>;

impl<D: NamedDigest> CryptoHash<D> {
    /// Create a new hash
    pub fn new() -> Self {
        CryptoHash { hasher: D::new() }
    }

    /// One-shot digest of a buffer
    pub fn data(data: &[u8]) -> Vec<u8> {
        D::digest(data).to_vec()
    }

    /// Length of the digest in bytes
    pub fn output_size() -> usize {
        <D as Digest>::output_size()
    }
}

impl<D: NamedDigest> Debug for CryptoHash<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CryptoHash")
            .field("algorithm", &D::NAME)
            .finish()
    }
}

impl<D: NamedDigest> Checksum for CryptoHash<D> {
    fn name(&self) -> &'static str {
        D::NAME
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    /// Finalizes a copy of the state, the hash itself keeps going
    fn finalize(&self) -> Result<Vec<u8>> {
        Ok(self.hasher.clone().finalize().to_vec())
    }

    fn reset(&mut self) {
        self.hasher = D::new();
    }
}

#[cfg(test)]
mod tests {
    use super::{Md5, Ripemd160, Sha1, Sha256, Sha384, Sha512};
    use crate::Checksum;

    fn hex_of<C: Checksum + Default>(data: &[u8]) -> String {
        let mut checksum = C::default();
        checksum.update(data);
        checksum.end().unwrap()
    }

    #[test]
    fn empty_vectors() {
        assert_eq!(hex_of::<Md5>(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            hex_of::<Sha1>(b""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            hex_of::<Sha256>(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex_of::<Ripemd160>(b""),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn abc_vectors() {
        assert_eq!(hex_of::<Md5>(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            hex_of::<Sha1>(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hex_of::<Sha384>(b"abc"),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
        );
        assert_eq!(
            hex_of::<Sha512>(b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(
            hex_of::<Ripemd160>(b"abc"),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn finalize_twice_is_stable() {
        let mut md5 = Md5::new();
        md5.update(b"abc");
        assert_eq!(md5.finalize().unwrap(), md5.finalize().unwrap());
        assert_eq!(md5.finalize().unwrap(), Md5::data(b"abc"));
    }

    #[test]
    fn reset_forgets_input() {
        let mut sha1 = Sha1::new();
        sha1.update(b"not empty");
        sha1.reset();
        assert_eq!(sha1.end().unwrap(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn names_and_sizes() {
        assert_eq!(Sha256::new().name(), "SHA256");
        assert_eq!(Sha512::output_size(), 64);
        assert_eq!(Ripemd160::output_size(), 20);
        assert_eq!(format!("{:?}", Md5::new()), "CryptoHash { algorithm: \"MD5\" }");
    }
}
