//! SpamSum context triggered piecewise hashes
//!
//! SpamSum (the algorithm behind ssdeep) splits the input into pieces
//! at points chosen by a rolling hash over the content itself, then
//! emits one character per piece.  Inserting or deleting a few bytes
//! only changes the characters of the pieces touched, so similar
//! inputs get similar digests.
//!
//! The digest has the form `blocksize:digest1:digest2`, where `digest2`
//! is computed with twice the block size of `digest1`.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::Checksum;
//! use checksum_tapestry::spamsum::SpamSum;
//!
//! let mut spamsum = SpamSum::default();
//! spamsum.update(b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(spamsum.end().unwrap(), "3:FJKKIUKact:FHIGi");
//!
//! // There is no binary form of a fuzzy hash
//! assert!(spamsum.finalize().is_err());
//! ```
use std::path::Path;

use crate::{io::hash_reader, Checksum, ChecksumError, Result};

pub mod ladder;
pub mod rolling;

use ladder::{b64, block_size, BlockHash, BlockHashLadder, NUM_BLOCKHASHES, SPAMSUM_LENGTH};
use rolling::RollingHash;

/// Longest digest string that can be produced
pub const FUZZY_MAX_RESULT: usize = 2 * SPAMSUM_LENGTH + 20;

const NAME: &str = "SpamSum";

/// A SpamSum hashing session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpamSum {
    roll: RollingHash,
    ladder: BlockHashLadder,
    total_size: u64,
}

impl SpamSum {
    /// Create a new session
    pub fn new() -> SpamSum {
        SpamSum::default()
    }

    /// Number of bytes hashed so far
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// The block hash ladder, for inspection
    pub fn ladder(&self) -> &BlockHashLadder {
        &self.ladder
    }

    /// One-shot digest of a buffer
    pub fn data(data: &[u8]) -> Result<String> {
        let mut spamsum = SpamSum::new();
        spamsum.update(data);
        spamsum.digest()
    }

    /// One-shot digest of a file
    pub fn file<P: AsRef<Path>>(path: P) -> Result<String> {
        let mut spamsum = SpamSum::new();
        let file = std::fs::File::open(path)?;
        hash_reader(&mut spamsum, file)?;
        spamsum.digest()
    }

    /// Produce the `blocksize:digest1:digest2` string
    ///
    /// Fails with [`ChecksumError::Overflow`] when the input is too
    /// large for the biggest block size.
    pub fn digest(&self) -> Result<String> {
        let ladder = &self.ladder;
        let sum = self.roll.sum();
        let mut bi = ladder.start();

        // A retired rung must not be one the estimate below would pick
        debug_assert!(
            bi == 0 || block_size(bi) / 2 * (SPAMSUM_LENGTH as u64) < self.total_size
        );

        // Initial block size guess
        while block_size(bi) * (SPAMSUM_LENGTH as u64) < self.total_size {
            bi += 1;
            if bi >= NUM_BLOCKHASHES {
                return Err(ChecksumError::Overflow {
                    algorithm: NAME,
                    total_size: self.total_size,
                });
            }
        }

        // Adapt the guess to the digests actually produced
        while bi >= ladder.end() {
            bi -= 1;
        }
        while bi > ladder.start() && ladder.rung(bi).len() < SPAMSUM_LENGTH / 2 {
            bi -= 1;
        }
        debug_assert!(bi == 0 || ladder.rung(bi).len() >= SPAMSUM_LENGTH / 2);

        let mut result = String::with_capacity(FUZZY_MAX_RESULT);
        result.push_str(&block_size(bi).to_string());
        result.push(':');

        let rung = ladder.rung(bi);
        push_digest(&mut result, rung.digest());
        if sum != 0 {
            push_tail(&mut result, b64(rung.h()), rung.len());
        } else if let Some(c) = rung.pending() {
            push_tail(&mut result, c, rung.len());
        }

        result.push(':');

        if bi + 1 < ladder.end() {
            let next = ladder.rung(bi + 1);
            let part = truncated(next);
            push_digest(&mut result, part);
            if sum != 0 {
                push_tail(&mut result, b64(next.half_h()), part.len());
            } else if let Some(c) = next.half_digest() {
                push_tail(&mut result, c, part.len());
            }
        } else if sum != 0 {
            // Only the very first rung (nothing emitted yet) or the
            // last possible one can lack a successor
            debug_assert!(bi == 0 || bi == NUM_BLOCKHASHES - 1);
            let h = if bi == 0 {
                rung.h()
            } else {
                ladder.last_h().unwrap_or(rung.h())
            };
            result.push(b64(h) as char);
        }

        assert!(
            result.len() < FUZZY_MAX_RESULT,
            "spamsum digest exceeds {} characters",
            FUZZY_MAX_RESULT
        );

        Ok(result)
    }
}

/// The second digest is cut to half the length, its last character
/// coming from the half hash
fn truncated(rung: &BlockHash) -> &[u8] {
    let digest = rung.digest();
    &digest[..digest.len().min(SPAMSUM_LENGTH / 2 - 1)]
}

fn push_digest(result: &mut String, digest: &[u8]) {
    result.extend(digest.iter().map(|&c| c as char));
}

/// Append the trailing character of a digest of `len` characters,
/// unless it would make a run of four identical characters
fn push_tail(result: &mut String, c: u8, len: usize) {
    let bytes = result.as_bytes();
    let n = bytes.len();

    if len < 3 || bytes[n - 3..].iter().any(|&prev| prev != c) {
        result.push(c as char);
    }
}

impl Checksum for SpamSum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn update(&mut self, data: &[u8]) {
        self.total_size = self.total_size.saturating_add(data.len() as u64);

        for &byte in data {
            self.roll.roll(byte);
            self.ladder.update(byte, self.roll.sum(), self.total_size);
        }
    }

    fn finalize(&self) -> Result<Vec<u8>> {
        Err(ChecksumError::Unsupported { algorithm: NAME })
    }

    fn end(&self) -> Result<String> {
        self.digest()
    }

    fn reset(&mut self) {
        *self = SpamSum::new();
    }
}
