//! The ladder of block hashes, one rung per block size
//!
//! Rung `i` cuts the input into pieces with the block size `3 << i`
//! and emits one base64 character per piece.  Rungs are created lazily
//! (a rung is forked as soon as the one below it emits its first
//! character) and the finest rung is dropped once a coarser one is
//! known to be a better fit for the amount of input seen.
use log::trace;

/// Maximum number of rungs
pub const NUM_BLOCKHASHES: usize = 31;

/// Maximum length of a rung's digest
pub const SPAMSUM_LENGTH: usize = 64;

/// Block size of the first rung
pub const MIN_BLOCKSIZE: u64 = 3;

/// FNV-1 32-bit prime
pub const HASH_PRIME: u32 = 0x01000193;

/// Starting value of every piece hash
pub const HASH_INIT: u32 = 0x28021967;

pub(crate) const B64: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Block size of the rung at `index`
#[inline]
pub fn block_size(index: usize) -> u64 {
    MIN_BLOCKSIZE << index
}

/// Map a piece hash to its digest character
#[inline]
pub(crate) fn b64(h: u32) -> u8 {
    B64[(h % 64) as usize]
}

#[inline]
fn sum_hash(byte: u8, h: u32) -> u32 {
    h.wrapping_mul(HASH_PRIME) ^ byte as u32
}

/// One rung of the ladder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHash {
    h: u32,
    half_h: u32,
    /// `digest[len]` holds a pending character once the digest is
    /// full, zero otherwise
    digest: [u8; SPAMSUM_LENGTH],
    half_digest: u8,
    len: usize,
}

impl BlockHash {
    fn new() -> BlockHash {
        BlockHash {
            h: HASH_INIT,
            half_h: HASH_INIT,
            digest: [0; SPAMSUM_LENGTH],
            half_digest: 0,
            len: 0,
        }
    }

    /// Start a new rung that shares the current piece with `self`
    fn fork(&self) -> BlockHash {
        BlockHash {
            h: self.h,
            half_h: self.half_h,
            ..BlockHash::new()
        }
    }

    /// Hash of the piece in progress
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Hash of the piece in progress for the half length digest
    pub fn half_h(&self) -> u32 {
        self.half_h
    }

    /// Characters emitted so far
    pub fn digest(&self) -> &[u8] {
        &self.digest[..self.len]
    }

    /// Number of characters emitted so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// No characters emitted yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Character computed at the last reset point of a full digest
    pub fn pending(&self) -> Option<u8> {
        match self.digest.get(self.len) {
            Some(&c) if c != 0 => Some(c),
            _ => None,
        }
    }

    /// Last character of the half length digest, if one was emitted
    /// after it stopped growing
    pub fn half_digest(&self) -> Option<u8> {
        if self.half_digest != 0 {
            Some(self.half_digest)
        } else {
            None
        }
    }

    #[inline]
    fn hash(&mut self, byte: u8) {
        self.h = sum_hash(byte, self.h);
        self.half_h = sum_hash(byte, self.half_h);
    }

    /// Emit a character at a reset point, returning false when the
    /// digest is already full
    fn emit(&mut self) -> bool {
        self.digest[self.len] = b64(self.h);
        self.half_digest = b64(self.half_h);

        if self.len < SPAMSUM_LENGTH - 1 {
            // Only start a new piece when there is room for its
            // character, otherwise the tail pieces merge into one
            self.len += 1;
            self.digest[self.len] = 0;
            self.h = HASH_INIT;

            if self.len < SPAMSUM_LENGTH / 2 {
                self.half_h = HASH_INIT;
                self.half_digest = 0;
            }
            true
        } else {
            false
        }
    }
}

/// Block hashes for every block size still in the running
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHashLadder {
    rungs: Vec<BlockHash>,
    start: usize,
    /// Hash of the rung that would follow the last one, once all
    /// rungs are in use
    last_h: Option<u32>,
}

impl Default for BlockHashLadder {
    fn default() -> Self {
        BlockHashLadder::new()
    }
}

impl BlockHashLadder {
    /// Create a ladder with only the finest rung
    pub fn new() -> BlockHashLadder {
        let mut rungs = Vec::with_capacity(NUM_BLOCKHASHES);
        rungs.push(BlockHash::new());

        BlockHashLadder {
            rungs,
            start: 0,
            last_h: None,
        }
    }

    /// Index of the finest active rung
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the index of the coarsest rung
    pub fn end(&self) -> usize {
        self.rungs.len()
    }

    /// The rung at `index`
    ///
    /// # Panics
    ///
    /// When `index` is not below [`BlockHashLadder::end`]
    pub fn rung(&self, index: usize) -> &BlockHash {
        &self.rungs[index]
    }

    /// Hash of the rung past the last one, tracked once every rung
    /// exists
    pub fn last_h(&self) -> Option<u32> {
        self.last_h
    }

    /// Feed one byte to every active rung
    ///
    /// `rolling_sum` is the rolling hash after this byte and
    /// `total_size` the number of bytes the caller has committed to
    /// hashing so far.
    pub fn update(&mut self, byte: u8, rolling_sum: u32, total_size: u64) {
        for rung in &mut self.rungs[self.start..] {
            rung.hash(byte);
        }
        if let Some(h) = self.last_h.as_mut() {
            *h = sum_hash(byte, *h);
        }

        // The end moves when a rung forks, so it is read every pass
        let mut i = self.start;
        while i < self.rungs.len() {
            let bs = block_size(i);
            // A reset point for a block size is also one for every
            // smaller block size, so the first miss ends the scan
            if rolling_sum as u64 % bs != bs - 1 {
                break;
            }

            if self.rungs[i].is_empty() {
                self.try_fork();
            }

            if !self.rungs[i].emit() {
                self.try_reduce(total_size);
            }

            i += 1;
        }
    }

    /// Add a coarser rung after the last one
    fn try_fork(&mut self) {
        debug_assert!(!self.rungs.is_empty());

        let last = self.rungs[self.rungs.len() - 1];
        if self.rungs.len() < NUM_BLOCKHASHES {
            trace!("spamsum: fork block size {}", block_size(self.rungs.len()));
            self.rungs.push(last.fork());
        } else if self.last_h.is_none() {
            trace!("spamsum: all block sizes in use");
            self.last_h = Some(last.h);
        }
    }

    /// Drop the finest rung once it can no longer be selected
    fn try_reduce(&mut self, total_size: u64) {
        assert!(self.start < self.rungs.len());

        // Need at least two working rungs
        if self.rungs.len() - self.start < 2 {
            return;
        }
        // The initial block size estimate would still pick this rung
        if block_size(self.start) * SPAMSUM_LENGTH as u64 >= total_size {
            return;
        }
        // The estimate adjustment could still fall back to this rung
        if self.rungs[self.start + 1].len() < SPAMSUM_LENGTH / 2 {
            return;
        }

        trace!("spamsum: retire block size {}", block_size(self.start));
        self.start += 1;
    }
}
