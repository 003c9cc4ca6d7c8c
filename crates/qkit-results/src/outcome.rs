//! Normalizing raw outcome keys into dense bitstrings.

use std::borrow::Cow;

use crate::config::DecoderConfig;
use crate::error::{DecodeError, DecodeResult};

/// A separator-free outcome whose characters are all `0` or `1`.
#[derive(Debug)]
pub(crate) struct DenseOutcome<'a> {
    raw: &'a str,
    bits: Cow<'a, str>,
}

impl<'a> DenseOutcome<'a> {
    /// Strip separators, expanding `0x`-prefixed hexadecimal keys to binary
    /// left-padded to `width`.
    pub(crate) fn parse(raw: &'a str, config: &DecoderConfig, width: usize) -> DecodeResult<Self> {
        let bits = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => Cow::Owned(hex_to_bin(raw, hex, width)?),
            None if raw.chars().any(|c| config.is_separator(c)) => {
                Cow::Owned(raw.chars().filter(|&c| !config.is_separator(c)).collect())
            }
            None => Cow::Borrowed(raw),
        };

        if let Some(found) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(DecodeError::InvalidBit {
                outcome: raw.to_string(),
                found,
            });
        }
        Ok(Self { raw, bits })
    }

    /// Bit at little-endian `position` (0 is the rightmost character).
    pub(crate) fn bit(&self, position: usize) -> DecodeResult<char> {
        let bytes = self.bits.as_bytes();
        if position >= bytes.len() {
            return Err(DecodeError::OutcomeTooShort {
                outcome: self.raw.to_string(),
                width: bytes.len(),
                position,
            });
        }
        Ok(char::from(bytes[bytes.len() - 1 - position]))
    }
}

fn hex_to_bin(raw: &str, hex: &str, width: usize) -> DecodeResult<String> {
    let invalid = || DecodeError::InvalidHex {
        outcome: raw.to_string(),
    };
    if hex.is_empty() {
        return Err(invalid());
    }

    let mut bits = String::with_capacity(hex.len() * 4);
    for c in hex.chars() {
        let nibble = c.to_digit(16).ok_or_else(invalid)?;
        bits.push_str(&format!("{nibble:04b}"));
    }

    let significant = bits.trim_start_matches('0');
    Ok(format!("{significant:0>width$}"))
}
