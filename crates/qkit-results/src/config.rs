//! Decoder configuration.
//!
//! Values can be built in code or parsed from YAML:
//!
//! ```yaml
//! placeholder: "x"
//! separators: [" ", "_"]
//! ```
//!
//! Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// Options for [`MeasurementDecoder`](crate::MeasurementDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Character written for unmeasured qubits in combined output.
    #[serde(default = "default_placeholder")]
    pub placeholder: char,

    /// Characters stripped from outcomes before reading bits.
    #[serde(default = "default_separators")]
    pub separators: Vec<char>,
}

fn default_placeholder() -> char {
    '-'
}

fn default_separators() -> Vec<char> {
    vec![' ', '_']
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            separators: default_separators(),
        }
    }
}

impl DecoderConfig {
    /// Parse a configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> DecodeResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| DecodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the placeholder character.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Check that the configuration cannot be confused with bit values.
    pub fn validate(&self) -> DecodeResult<()> {
        if matches!(self.placeholder, '0' | '1') {
            return Err(DecodeError::Config(format!(
                "placeholder {:?} collides with a bit value",
                self.placeholder
            )));
        }
        if let Some(sep) = self.separators.iter().find(|c| matches!(c, '0' | '1')) {
            return Err(DecodeError::Config(format!(
                "separator {sep:?} collides with a bit value"
            )));
        }
        Ok(())
    }

    pub(crate) fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }
}
