//! qkit measurement decoding
//!
//! Turns raw outcome tables reported by a simulator into per-qubit
//! distributions, following each qubit's last measurement through the
//! circuit's classical registers.
//!
//! # Core Components
//!
//! - **Counts**: [`Counts`] maps raw outcome bitstrings to frequencies
//! - **Layout**: [`ClbitLayout`] places every classical bit in the outcome
//! - **Wiring**: [`MeasurementWiring`] records which bit each qubit was last measured into
//! - **Decoding**: [`MeasurementDecoder`] produces per-qubit [`BitCounts`] or
//!   combined per-qubit bitstrings
//!
//! # Example
//!
//! ```rust
//! use qkit_ir::{Circuit, ClbitId, QubitId};
//! use qkit_results::{BitCounts, Counts, KeyMode, QubitKey, decode_by_qubit, decode_combined};
//!
//! let mut circuit = Circuit::with_size("flip", 3, 2);
//! circuit.x(QubitId(0)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! let counts = Counts::from_pairs([("01", 1024)]);
//!
//! let per_qubit = decode_by_qubit(&counts, &circuit, KeyMode::Index).unwrap();
//! assert_eq!(per_qubit[&QubitKey::Index(0)], BitCounts::new(0, 1024));
//!
//! let combined = decode_combined(&counts, &circuit).unwrap();
//! assert_eq!(combined.get("10-"), 1024);
//! ```

pub mod config;
pub mod counts;
pub mod decode;
pub mod error;
pub mod layout;
mod outcome;
pub mod wiring;

pub use config::DecoderConfig;
pub use counts::Counts;
pub use decode::{
    BitCounts, KeyMode, MeasurementDecoder, QubitDistribution, QubitKey, decode_by_qubit,
    decode_combined,
};
pub use error::{DecodeError, DecodeResult};
pub use layout::ClbitLayout;
pub use wiring::MeasurementWiring;
