//! Error types shared by every engine in the crate
use thiserror::Error;

/// Errors produced while computing or reporting a checksum
#[derive(Error, Debug)]
pub enum ChecksumError {
    /// The algorithm has no representation for the requested output
    #[error("{algorithm} does not support binary finalization")]
    Unsupported {
        /// Name of the algorithm
        algorithm: &'static str,
    },

    /// The input grew past the range the algorithm can represent
    #[error("{algorithm} cannot hash {total_size} bytes: input exceeds the supported range")]
    Overflow {
        /// Name of the algorithm
        algorithm: &'static str,
        /// Number of bytes seen when the overflow was detected
        total_size: u64,
    },

    /// An algorithm name that doesn't match any known algorithm
    #[error("Unknown checksum algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ChecksumError>;
