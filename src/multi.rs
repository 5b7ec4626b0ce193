//! Run several checksums over the same stream
//!
//! Imaging tools usually want a handful of checksums of the same
//! media, and reading it once is much cheaper than reading it once per
//! algorithm.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::multi::{Algorithm, MultiChecksum};
//!
//! let mut multi = MultiChecksum::new(&[Algorithm::Adler32, Algorithm::Crc32]);
//! multi.update(b"123456789");
//!
//! let results = multi.end().unwrap();
//! assert_eq!(results[0], (Algorithm::Adler32, "091e01de".to_string()));
//! assert_eq!(results[1], (Algorithm::Crc32, "cbf43926".to_string()));
//! ```
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use std::path::Path;

use log::{debug, trace};

use crate::{
    adler32::Adler32,
    crc::{CRC16, CRC32, CRC64},
    digest::{Md5, Ripemd160, Sha1, Sha256, Sha384, Sha512},
    fletcher16::Fletcher16,
    fletcher32::Fletcher32,
    io::hash_reader,
    spamsum::SpamSum,
    Checksum, ChecksumError, Result,
};

/// Every algorithm the crate implements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Adler-32
    Adler32,
    /// Fletcher-16
    Fletcher16,
    /// Fletcher-32
    Fletcher32,
    /// CRC-16/IBM
    Crc16,
    /// CRC-32/ISO-HDLC
    Crc32,
    /// CRC-64/ECMA
    Crc64,
    /// MD5
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// RIPEMD-160
    Ripemd160,
    /// SpamSum fuzzy hash
    SpamSum,
}

impl Algorithm {
    /// All algorithms, in display order
    pub const ALL: [Algorithm; 13] = [
        Algorithm::Adler32,
        Algorithm::Fletcher16,
        Algorithm::Fletcher32,
        Algorithm::Crc16,
        Algorithm::Crc32,
        Algorithm::Crc64,
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Ripemd160,
        Algorithm::SpamSum,
    ];

    /// Short lowercase name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Adler32 => "adler32",
            Algorithm::Fletcher16 => "fletcher16",
            Algorithm::Fletcher32 => "fletcher32",
            Algorithm::Crc16 => "crc16",
            Algorithm::Crc32 => "crc32",
            Algorithm::Crc64 => "crc64",
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Ripemd160 => "ripemd160",
            Algorithm::SpamSum => "spamsum",
        }
    }

    /// Create a fresh engine for this algorithm
    pub fn checksum(&self) -> Box<dyn Checksum + Send> {
        match self {
            Algorithm::Adler32 => Box::new(Adler32::default()),
            Algorithm::Fletcher16 => Box::new(Fletcher16::default()),
            Algorithm::Fletcher32 => Box::new(Fletcher32::default()),
            Algorithm::Crc16 => Box::new(CRC16::default()),
            Algorithm::Crc32 => Box::new(CRC32::default()),
            Algorithm::Crc64 => Box::new(CRC64::default()),
            Algorithm::Md5 => Box::new(Md5::default()),
            Algorithm::Sha1 => Box::new(Sha1::default()),
            Algorithm::Sha256 => Box::new(Sha256::default()),
            Algorithm::Sha384 => Box::new(Sha384::default()),
            Algorithm::Sha512 => Box::new(Sha512::default()),
            Algorithm::Ripemd160 => Box::new(Ripemd160::default()),
            Algorithm::SpamSum => Box::new(SpamSum::default()),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "");

        Algorithm::ALL
            .iter()
            .find(|algorithm| algorithm.as_str() == wanted)
            .copied()
            .ok_or_else(|| ChecksumError::UnknownAlgorithm(s.to_string()))
    }
}

/// A set of checksums fed from one stream
pub struct MultiChecksum {
    checksums: Vec<(Algorithm, Box<dyn Checksum + Send>)>,
}

impl MultiChecksum {
    /// Create one engine per algorithm, ignoring repeats
    pub fn new(algorithms: &[Algorithm]) -> MultiChecksum {
        let mut checksums: Vec<(Algorithm, Box<dyn Checksum + Send>)> =
            Vec::with_capacity(algorithms.len());

        for &algorithm in algorithms {
            if checksums.iter().any(|(existing, _)| *existing == algorithm) {
                continue;
            }
            trace!("multi: enabling {}", algorithm);
            checksums.push((algorithm, algorithm.checksum()));
        }

        MultiChecksum { checksums }
    }

    /// Algorithms in the set, in the order results are reported
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.checksums.iter().map(|(algorithm, _)| *algorithm).collect()
    }

    /// Feed a buffer to every checksum
    pub fn update(&mut self, data: &[u8]) {
        for (_, checksum) in self.checksums.iter_mut() {
            checksum.update(data);
        }
    }

    /// String results of every checksum
    pub fn end(&self) -> Result<Vec<(Algorithm, String)>> {
        self.checksums
            .iter()
            .map(|(algorithm, checksum)| Ok((*algorithm, checksum.end()?)))
            .collect()
    }

    /// Start every checksum over
    pub fn reset(&mut self) {
        for (_, checksum) in self.checksums.iter_mut() {
            checksum.reset();
        }
    }

    /// Hash a whole file with every algorithm in the set
    pub fn file<P: AsRef<Path>>(
        algorithms: &[Algorithm],
        path: P,
    ) -> Result<Vec<(Algorithm, String)>> {
        let path = path.as_ref();
        let mut multi = MultiChecksum::new(algorithms);

        let file = std::fs::File::open(path)?;
        let total = hash_reader(&mut multi, file)?;
        debug!(
            "multi: hashed {} bytes of {} with {} algorithms",
            total,
            path.display(),
            multi.checksums.len()
        );

        multi.end()
    }
}

impl Checksum for MultiChecksum {
    fn name(&self) -> &'static str {
        "multi"
    }

    fn update(&mut self, data: &[u8]) {
        MultiChecksum::update(self, data);
    }

    /// The binary results of every checksum, concatenated
    fn finalize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        for (_, checksum) in self.checksums.iter() {
            bytes.extend(checksum.finalize()?);
        }
        Ok(bytes)
    }

    fn reset(&mut self) {
        MultiChecksum::reset(self);
    }
}
