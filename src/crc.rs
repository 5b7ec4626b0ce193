//! CRC checksums
//!
//! A table driven CRC over 16, 32 or 64 bit registers.  Each CRC owns
//! its lookup table, built once from the polynomial when the CRC is
//! created.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::crc::{CRCConfiguration, CRC};
//! use checksum_tapestry::Checksum;
//!
//! let expected: u32 = 0xCBF43926;
//! let string = "123456789";
//! let data = string.as_bytes();
//! let mut crc32 = CRC::<u32>::new(CRCConfiguration::<u32>::ISO);
//!
//! let result: u32 = crc32.compute(data);
//! assert_eq!(result, expected);
//! assert_eq!(crc32.end().unwrap(), "cbf43926");
//! ```
#![warn(missing_docs)]
#![warn(unsafe_code)]

use core::default::Default;

use core::fmt::{Debug, Error, Formatter, UpperHex};
use core::ops::{BitAnd, BitXor, Shl, Shr};

use crate::{crc_table::build_table, Checksum, Result};

/// We create a trait type here that lets us perform operations on
/// different width groups.
/// This is the pattern used in the crc-catalog crate.
pub trait Width:
    Sized
    + Copy
    + Default
    + Eq
    + Debug
    + UpperHex
    + BitAnd<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Number of bits in the register
    const BITS: u32;
    /// The value one, used to test the low bit
    const ONE: Self;

    /// Widen a byte into the register type
    fn from_byte(byte: u8) -> Self;
    /// The lowest eight bits of the register
    fn low_byte(self) -> u8;
    /// The register as big-endian bytes
    fn to_be_vec(self) -> Vec<u8>;
}

macro_rules! impl_width {
    ($($ty:ty),*) => {
        $(
            impl Width for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ONE: Self = 1;

                #[inline]
                fn from_byte(byte: u8) -> Self {
                    byte as $ty
                }

                #[inline]
                fn low_byte(self) -> u8 {
                    self as u8
                }

                fn to_be_vec(self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }
            }
        )*
    };
}

impl_width!(u16, u32, u64);

/// Order bits are fed into the register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant bit first, the register shifts left
    MSBFirst,
    /// Least significant bit first (reflected), the register shifts
    /// right and the polynomial is given bit-reversed
    LSBFirst,
}

/// Parameters of a CRC algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CRCConfiguration<BITWIDTH: Width> {
    /// Name of the algorithm
    pub name: &'static str,

    /// Bit order the polynomial and register use
    pub bit_order: BitOrder,

    /// The polynomial, in the encoding `bit_order` expects.
    /// Reflected polynomials are given reversed, e.g. 0xEDB88320 for
    /// the ISO-HDLC polynomial 0x04C11DB7.
    pub poly: BITWIDTH,

    /// Starting value of the register
    pub seed: BITWIDTH,

    /// Value xored into the register to produce the result
    pub xor_out: BITWIDTH,
}

impl<BITWIDTH: Width> CRCConfiguration<BITWIDTH> {
    /// Create a configuration whose result is the register xored with
    /// the seed
    pub const fn new(
        name: &'static str,
        bit_order: BitOrder,
        poly: BITWIDTH,
        seed: BITWIDTH,
    ) -> CRCConfiguration<BITWIDTH> {
        CRCConfiguration {
            name,
            bit_order,
            poly,
            seed,
            xor_out: seed,
        }
    }

    /// Use a final xor value different from the seed
    pub fn with_xor_out(mut self, xor_out: BITWIDTH) -> CRCConfiguration<BITWIDTH> {
        self.xor_out = xor_out;
        self
    }
}

impl CRCConfiguration<u16> {
    /// CRC-16/ARC, the IBM polynomial
    pub const IBM: CRCConfiguration<u16> =
        CRCConfiguration::new("CRC-16/IBM", BitOrder::LSBFirst, 0xA001, 0x0000);

    /// CRC-16/KERMIT, the reflected CCITT polynomial
    pub const CCITT: CRCConfiguration<u16> =
        CRCConfiguration::new("CRC-16/CCITT", BitOrder::LSBFirst, 0x8408, 0x0000);

    /// CRC-16/XMODEM, the CCITT polynomial fed MSB first
    pub const XMODEM: CRCConfiguration<u16> =
        CRCConfiguration::new("CRC-16/XMODEM", BitOrder::MSBFirst, 0x1021, 0x0000);

    /// CRC-16/CCITT-FALSE (IBM-3740)
    pub const CCITT_FALSE: CRCConfiguration<u16> = CRCConfiguration {
        name: "CRC-16/CCITT-FALSE",
        bit_order: BitOrder::MSBFirst,
        poly: 0x1021,
        seed: 0xFFFF,
        xor_out: 0x0000,
    };
}

impl CRCConfiguration<u32> {
    /// CRC-32/ISO-HDLC, as used by zlib, PNG and Ethernet
    pub const ISO: CRCConfiguration<u32> =
        CRCConfiguration::new("CRC-32/ISO-HDLC", BitOrder::LSBFirst, 0xEDB88320, 0xFFFFFFFF);

    /// CRC-32C (Castagnoli), as used by iSCSI
    pub const CASTAGNOLI: CRCConfiguration<u32> =
        CRCConfiguration::new("CRC-32C", BitOrder::LSBFirst, 0x82F63B78, 0xFFFFFFFF);
}

impl CRCConfiguration<u64> {
    /// CRC-64/XZ, the reflected ECMA-182 polynomial
    pub const ECMA: CRCConfiguration<u64> = CRCConfiguration::new(
        "CRC-64/ECMA",
        BitOrder::LSBFirst,
        0xC96C5795D7870F42,
        0xFFFFFFFFFFFFFFFF,
    );
}

/// The CRC structure
#[derive(Clone)]
pub struct CRC<BITWIDTH: Width> {
    configuration: CRCConfiguration<BITWIDTH>,
    /// The pre-computed values to speed up computing the CRC
    table: [BITWIDTH; 256],

    /// state of the CRC for rolling checksums
    crc: BITWIDTH,
}

/// CRC with a 16-bit register
pub type CRC16 = CRC<u16>;
/// CRC with a 32-bit register
pub type CRC32 = CRC<u32>;
/// CRC with a 64-bit register
pub type CRC64 = CRC<u64>;

impl<BITWIDTH: Width> Debug for CRC<BITWIDTH> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), Error> {
        let width = (BITWIDTH::BITS / 4) as usize;

        write!(f, "configuration: {:?}", self.configuration)?;
        writeln!(f, ", crc: 0x{:0width$X}", self.crc, width = width)?;

        writeln!(f, "table:")?;
        for (i, entry) in self.table.iter().enumerate() {
            write!(f, "0x{:0width$X}, ", entry, width = width)?;
            if ((i + 1) % 8) == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<BITWIDTH: Width> CRC<BITWIDTH> {
    /// Create a CRC from a configuration, building its lookup table
    pub fn new(configuration: CRCConfiguration<BITWIDTH>) -> Self {
        let table = build_table(configuration.poly, configuration.bit_order);

        CRC {
            configuration,
            table,
            crc: configuration.seed,
        }
    }

    /// The configuration this CRC was built with
    pub fn configuration(&self) -> &CRCConfiguration<BITWIDTH> {
        &self.configuration
    }

    /// The lookup table
    pub fn table(&self) -> &[BITWIDTH; 256] {
        &self.table
    }

    /// Raw register, before the final xor
    pub fn state(&self) -> BITWIDTH {
        self.crc
    }

    /// The CRC of everything seen so far
    ///
    /// This doesn't modify the register, so it can be called any
    /// number of times and updating can continue afterwards.
    pub fn value(&self) -> BITWIDTH {
        self.crc ^ self.configuration.xor_out
    }

    /// Add a single byte, returning the raw register
    #[inline]
    pub fn update_byte(&mut self, data: u8) -> BITWIDTH {
        self.crc = match self.configuration.bit_order {
            BitOrder::LSBFirst => {
                let index = self.crc.low_byte() ^ data;
                (self.crc >> 8) ^ self.table[index as usize]
            }
            BitOrder::MSBFirst => {
                let index = (self.crc >> (BITWIDTH::BITS - 8)).low_byte() ^ data;
                (self.crc << 8) ^ self.table[index as usize]
            }
        };

        self.crc
    }

    /// Compute the CRC of a whole buffer
    ///
    /// Every call to compute resets the register to the seed first.
    pub fn compute(&mut self, data: &[u8]) -> BITWIDTH {
        self.crc = self.configuration.seed;
        Checksum::update(self, data);

        self.value()
    }

    /// One-shot CRC of a buffer
    pub fn data(configuration: CRCConfiguration<BITWIDTH>, data: &[u8]) -> BITWIDTH {
        CRC::new(configuration).compute(data)
    }
}

impl Default for CRC<u16> {
    fn default() -> Self {
        CRC::new(CRCConfiguration::<u16>::IBM)
    }
}

impl Default for CRC<u32> {
    fn default() -> Self {
        CRC::new(CRCConfiguration::<u32>::ISO)
    }
}

impl Default for CRC<u64> {
    fn default() -> Self {
        CRC::new(CRCConfiguration::<u64>::ECMA)
    }
}

impl<BITWIDTH: Width> Checksum for CRC<BITWIDTH> {
    fn name(&self) -> &'static str {
        self.configuration.name
    }

    fn update(&mut self, data: &[u8]) {
        for byte in data {
            self.update_byte(*byte);
        }
    }

    fn finalize(&self) -> Result<Vec<u8>> {
        Ok(self.value().to_be_vec())
    }

    fn reset(&mut self) {
        self.crc = self.configuration.seed;
    }
}
