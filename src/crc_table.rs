//! CRC lookup table generation
//!
//! Tables are generated bit-at-a-time from the polynomial.  A table
//! belongs to the CRC instance that built it; nothing here is cached
//! globally.
use crate::crc::{BitOrder, Width};

/// Compute the table entry for one byte value without a table
///
/// For LSB-first (reflected) polynomials the value is shifted right
/// eight times, xoring in the polynomial whenever the low bit is set.
/// MSB-first polynomials do the mirror image, starting with the byte
/// in the top eight bits of the register.
pub fn crc_entry<W: Width>(poly: W, bit_order: BitOrder, index: u8) -> W {
    match bit_order {
        BitOrder::LSBFirst => {
            let mut crc = W::from_byte(index);
            for _ in 0..8 {
                crc = if (crc & W::ONE) == W::ONE {
                    (crc >> 1) ^ poly
                } else {
                    crc >> 1
                };
            }
            crc
        }
        BitOrder::MSBFirst => {
            let top = W::ONE << (W::BITS - 1);
            let mut crc = W::from_byte(index) << (W::BITS - 8);
            for _ in 0..8 {
                crc = if (crc & top) == top {
                    (crc << 1) ^ poly
                } else {
                    crc << 1
                };
            }
            crc
        }
    }
}

/// Build the 256 entry lookup table for a polynomial
pub fn build_table<W: Width>(poly: W, bit_order: BitOrder) -> [W; 256] {
    let mut table = [W::default(); 256];

    for (i, entry) in table.iter_mut().enumerate() {
        *entry = crc_entry(poly, bit_order, i as u8);
    }

    table
}
