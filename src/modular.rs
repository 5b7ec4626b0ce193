//! Shared engine for the modular (two running sums) checksums
//!
//! Adler-32, Fletcher-16 and Fletcher-32 all keep two sums, `sum1`
//! (the sum of the data bytes) and `sum2` (the sum of every
//! intermediate `sum1`), both reduced by a modulus.  They only differ
//! by their modulus, how wide each sum is in the packed result and how
//! long a run of bytes can be before the accumulators risk overflowing.
//!
//! The engine processes long buffers in chunks of `NMAX` bytes and only
//! reduces once per chunk.  Results are identical to the textbook
//! per-byte definition:
//!
//! ```text
//! sum1 = (sum1 + byte) % M
//! sum2 = (sum2 + sum1) % M
//! ```
use core::fmt::Debug;
use core::marker::PhantomData;

/// Per-algorithm constants for a [`ChecksumEngine`]
pub trait ModularParams: Copy + Debug + Default {
    /// Name of the algorithm
    const NAME: &'static str;
    /// Modulus applied to both sums
    const MODULUS: u32;
    /// Number of bits each sum occupies in the packed value
    const WIDTH: u32;
    /// Largest run of bytes that can be summed before a reduction
    /// is needed to keep `sum2` inside a `u32`
    const NMAX: usize;
    /// Buffers shorter than this take the naive path
    const SHORT: usize;
    /// Group size of the inner loop on the NMAX path
    const UNROLL: usize;
}

/// Two running sums bounded by a modulus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChecksumEngine<P: ModularParams> {
    sum1: u32,
    sum2: u32,
    initial: (u32, u32),
    params: PhantomData<P>,
}

impl<P: ModularParams> ChecksumEngine<P> {
    /// Create an engine starting from the given sums
    ///
    /// The sums are reduced by the modulus first, so any value is a
    /// valid starting point.
    pub fn new(sum1: u32, sum2: u32) -> Self {
        let initial = (sum1 % P::MODULUS, sum2 % P::MODULUS);

        ChecksumEngine {
            sum1: initial.0,
            sum2: initial.1,
            initial,
            params: PhantomData,
        }
    }

    /// Current value of the two sums
    pub fn sums(&self) -> (u32, u32) {
        (self.sum1, self.sum2)
    }

    /// Packed value: `(sum2 << WIDTH) | sum1`
    pub fn value(&self) -> u32 {
        (self.sum2 << P::WIDTH) | self.sum1
    }

    /// Packed value as big-endian bytes, `2 * WIDTH` bits long
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let bytes = self.value().to_be_bytes();
        let len = (P::WIDTH / 4) as usize;

        bytes[bytes.len() - len..].to_vec()
    }

    /// Fold one byte into the sums
    #[inline]
    pub fn update_byte(&mut self, byte: u8) {
        let m = P::MODULUS;

        // Both sums are below the modulus, one byte can't carry either
        // of them more than one modulus past it.
        self.sum1 += byte as u32;
        if self.sum1 >= m {
            self.sum1 -= m;
        }
        self.sum2 += self.sum1;
        if self.sum2 >= m {
            self.sum2 -= m;
        }
    }

    /// Fold a buffer into the sums
    pub fn update(&mut self, data: &[u8]) {
        let m = P::MODULUS;

        match data.len() {
            0 => {}
            1 => self.update_byte(data[0]),
            len if len < P::SHORT => {
                let (mut sum1, mut sum2) = (self.sum1, self.sum2);
                for &byte in data {
                    sum1 += byte as u32;
                    sum2 += sum1;
                }

                self.sum1 = if m > (P::SHORT as u32) * 0xFF {
                    if sum1 >= m {
                        sum1 - m
                    } else {
                        sum1
                    }
                } else {
                    sum1 % m
                };
                self.sum2 = sum2 % m;
            }
            _ => {
                let (mut sum1, mut sum2) = (self.sum1, self.sum2);

                let mut blocks = data.chunks_exact(P::NMAX);
                for block in &mut blocks {
                    for group in block.chunks_exact(P::UNROLL) {
                        fold(&mut sum1, &mut sum2, group);
                    }
                    sum1 %= m;
                    sum2 %= m;
                }

                let tail = blocks.remainder();
                if !tail.is_empty() {
                    let mut groups = tail.chunks_exact(P::UNROLL);
                    for group in &mut groups {
                        fold(&mut sum1, &mut sum2, group);
                    }
                    fold(&mut sum1, &mut sum2, groups.remainder());
                    sum1 %= m;
                    sum2 %= m;
                }

                self.sum1 = sum1;
                self.sum2 = sum2;
            }
        }
    }

    /// Restore the sums the engine was created with
    pub fn reset(&mut self) {
        self.sum1 = self.initial.0;
        self.sum2 = self.initial.1;
    }
}

#[inline(always)]
fn fold(sum1: &mut u32, sum2: &mut u32, bytes: &[u8]) {
    for &byte in bytes {
        *sum1 += byte as u32;
        *sum2 += *sum1;
    }
}
