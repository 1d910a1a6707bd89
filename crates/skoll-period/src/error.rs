//! Error types for period decoding.

use thiserror::Error;

/// Errors that can occur while decoding measurement counts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// A measured bitstring is not a binary string of the expected width.
    #[error("Malformed bitstring {bitstring:?}: expected {width} binary digits")]
    MalformedBitstring {
        /// The offending bitstring.
        bitstring: String,
        /// Expected width in bits.
        width: u32,
    },

    /// The counting register width is outside the usable range.
    #[error("Counting register width {0} is outside 1..=63")]
    InvalidWidth(u32),

    /// The modulus must be at least 2.
    #[error("Modulus {0} is too small: must be at least 2")]
    InvalidModulus(u64),
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
