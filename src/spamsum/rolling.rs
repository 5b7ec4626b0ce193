//! The rolling hash that decides where SpamSum pieces end
//!
//! It looks at the last seven bytes only, so the same content produces
//! the same reset points wherever it sits in the input.

/// Number of bytes the rolling hash looks at
pub const ROLLING_WINDOW: usize = 7;

/// Left shift applied to `h3` for each byte
const H3_LSHIFT: u32 = 5;

/// Rolling hash over a window of [`ROLLING_WINDOW`] bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollingHash {
    window: [u8; ROLLING_WINDOW],
    /// Sum of the bytes in the window
    h1: u32,
    /// Sum of the bytes in the window, the newest weighted by the
    /// window size and the oldest by one
    h2: u32,
    /// Shift and xor of every byte seen, older bytes fall off the top
    h3: u32,
    /// Next slot of the window to overwrite
    n: usize,
}

impl RollingHash {
    /// Create a rolling hash with an all zero window
    pub fn new() -> RollingHash {
        RollingHash::default()
    }

    /// Push a byte into the window, evicting the oldest one
    #[inline]
    pub fn roll(&mut self, byte: u8) {
        let byte = byte as u32;

        self.h2 = self.h2.wrapping_sub(self.h1);
        self.h2 = self.h2.wrapping_add(ROLLING_WINDOW as u32 * byte);

        self.h1 = self.h1.wrapping_add(byte);
        self.h1 = self.h1.wrapping_sub(self.window[self.n] as u32);

        self.window[self.n] = byte as u8;
        self.n += 1;
        if self.n == ROLLING_WINDOW {
            self.n = 0;
        }

        self.h3 = (self.h3 << H3_LSHIFT) ^ byte;
    }

    /// Current value of the hash
    #[inline]
    pub fn sum(&self) -> u32 {
        self.h1.wrapping_add(self.h2).wrapping_add(self.h3)
    }
}
