//! One-shot helpers for buffers, readers and files
//!
//! Everything here goes through [`Checksum::update`], so hashing a file
//! gives exactly the same result as hashing its contents in memory.
//!
//! # Examples
//!
//! ```
//! use checksum_tapestry::crc::CRC32;
//! use checksum_tapestry::io::hash_data;
//!
//! let (hex, bytes) = hash_data::<CRC32>(b"123456789").unwrap();
//! assert_eq!(hex, "cbf43926");
//! assert_eq!(bytes, vec![0xCB, 0xF4, 0x39, 0x26]);
//! ```
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use log::debug;

use crate::{Checksum, Result};

/// Size of the chunks files are read in
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Feed everything a reader produces into a checksum
///
/// Returns the number of bytes read.
pub fn hash_reader<C, R>(checksum: &mut C, mut reader: R) -> Result<u64>
where
    C: Checksum + ?Sized,
    R: Read,
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        checksum.update(&buffer[..bytes_read]);
        total += bytes_read as u64;
    }

    Ok(total)
}

/// Hash a file with a fresh checksum, returning the checksum state
fn hash_path<C: Checksum + Default>(path: &Path) -> Result<C> {
    let mut checksum = C::default();
    debug!("{}: hashing {}", checksum.name(), path.display());

    let file = File::open(path)?;
    let total = hash_reader(&mut checksum, file)?;

    debug!("{}: hashed {} bytes of {}", checksum.name(), total, path.display());
    Ok(checksum)
}

/// Checksum of a whole file as big-endian bytes
pub fn hash_file<C, P>(path: P) -> Result<Vec<u8>>
where
    C: Checksum + Default,
    P: AsRef<Path>,
{
    hash_path::<C>(path.as_ref())?.finalize()
}

/// Checksum of a whole file as a hex string and big-endian bytes
pub fn hash_file_hex<C, P>(path: P) -> Result<(String, Vec<u8>)>
where
    C: Checksum + Default,
    P: AsRef<Path>,
{
    let checksum = hash_path::<C>(path.as_ref())?;
    Ok((checksum.end()?, checksum.finalize()?))
}

/// Checksum of a buffer as a hex string and big-endian bytes
pub fn hash_data<C: Checksum + Default>(data: &[u8]) -> Result<(String, Vec<u8>)> {
    let mut checksum = C::default();
    checksum.update(data);

    Ok((checksum.end()?, checksum.finalize()?))
}
