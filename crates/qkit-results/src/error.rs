//! Error types for result decoding.

use thiserror::Error;

/// Errors that can occur while decoding an outcome table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// A wired classical bit lies beyond the end of an outcome.
    #[error("outcome '{outcome}' has {width} bits, cannot read bit {position}")]
    OutcomeTooShort {
        /// The raw outcome string.
        outcome: String,
        /// Number of bits after removing separators.
        width: usize,
        /// Little-endian position that was requested.
        position: usize,
    },

    /// An outcome contains something other than `0`, `1` or a separator.
    #[error("outcome '{outcome}' contains invalid bit character {found:?}")]
    InvalidBit {
        /// The raw outcome string.
        outcome: String,
        /// The offending character.
        found: char,
    },

    /// A `0x`-prefixed outcome is not valid hexadecimal.
    #[error("outcome '{outcome}' is not a valid hexadecimal value")]
    InvalidHex {
        /// The raw outcome string.
        outcome: String,
    },

    /// Invalid decoder configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
