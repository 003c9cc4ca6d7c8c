//! Decoding outcome tables into per-qubit distributions.

use std::collections::BTreeMap;
use std::fmt;

use qkit_ir::{Circuit, Qubit};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::config::DecoderConfig;
use crate::counts::Counts;
use crate::error::DecodeResult;
use crate::layout::ClbitLayout;
use crate::outcome::DenseOutcome;
use crate::wiring::MeasurementWiring;

/// Frequencies of `0` and `1` for one qubit.
///
/// Serializes as `{"0": zeros, "1": ones}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitCounts {
    /// Shots in which the qubit read `0`.
    #[serde(rename = "0")]
    pub zeros: u64,
    /// Shots in which the qubit read `1`.
    #[serde(rename = "1")]
    pub ones: u64,
}

impl BitCounts {
    /// Create bit counts.
    pub fn new(zeros: u64, ones: u64) -> Self {
        Self { zeros, ones }
    }

    /// Total shots recorded, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.zeros.saturating_add(self.ones)
    }

    fn record(&mut self, bit: char, count: u64) {
        let tally = if bit == '1' {
            &mut self.ones
        } else {
            &mut self.zeros
        };
        *tally = tally.saturating_add(count);
    }
}

/// How decoded qubits are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    /// Key by declaration index.
    #[default]
    Index,
    /// Key by qubit handle.
    Handle,
}

/// Key of a decoded qubit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QubitKey {
    /// Declaration index of the qubit.
    Index(usize),
    /// The qubit handle.
    Handle(Qubit),
}

impl fmt::Display for QubitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitKey::Index(i) => write!(f, "{i}"),
            QubitKey::Handle(q) => write!(f, "{q}"),
        }
    }
}

impl Serialize for QubitKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<usize> for QubitKey {
    fn from(index: usize) -> Self {
        QubitKey::Index(index)
    }
}

impl From<Qubit> for QubitKey {
    fn from(qubit: Qubit) -> Self {
        QubitKey::Handle(qubit)
    }
}

/// Per-qubit decoded distribution.
pub type QubitDistribution = BTreeMap<QubitKey, BitCounts>;

/// Decodes outcome tables for one circuit.
///
/// The register layout and measurement wiring are computed once at
/// construction and reused for every outcome.
#[derive(Debug, Clone)]
pub struct MeasurementDecoder<'c> {
    circuit: &'c Circuit,
    layout: ClbitLayout,
    wiring: MeasurementWiring,
    config: DecoderConfig,
}

impl<'c> MeasurementDecoder<'c> {
    /// Create a decoder with the default configuration.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self::build(circuit, DecoderConfig::default())
    }

    /// Create a decoder with a custom configuration.
    ///
    /// Fails with [`DecodeError::Config`](crate::DecodeError::Config) if the
    /// placeholder or a separator could be mistaken for a bit.
    pub fn with_config(circuit: &'c Circuit, config: DecoderConfig) -> DecodeResult<Self> {
        config.validate()?;
        Ok(Self::build(circuit, config))
    }

    fn build(circuit: &'c Circuit, config: DecoderConfig) -> Self {
        let layout = ClbitLayout::new(circuit);
        let wiring = MeasurementWiring::new(circuit, &layout);
        debug!(
            "Decoder for '{}': {} of {} qubits measured, outcome width {}",
            circuit.name(),
            wiring.num_measured(),
            wiring.num_qubits(),
            layout.width()
        );
        Self {
            circuit,
            layout,
            wiring,
            config,
        }
    }

    /// The classical register layout.
    pub fn layout(&self) -> &ClbitLayout {
        &self.layout
    }

    /// The measurement wiring.
    pub fn wiring(&self) -> &MeasurementWiring {
        &self.wiring
    }

    /// Per-qubit `0`/`1` frequencies.
    ///
    /// Every measured qubit accumulates the count of every outcome, so each
    /// reported [`BitCounts::total`] equals the table's total shots.
    /// Unmeasured qubits are absent.
    #[instrument(level = "debug", skip(self, counts), fields(outcomes = counts.len()))]
    pub fn by_qubit(&self, counts: &Counts, keys: KeyMode) -> DecodeResult<QubitDistribution> {
        let mut decoded = QubitDistribution::new();
        for (raw, count) in counts.iter() {
            let outcome = DenseOutcome::parse(raw, &self.config, self.layout.width())?;
            for (qubit, position) in self.wiring.iter() {
                let bit = outcome.bit(position)?;
                decoded
                    .entry(self.key(qubit, keys))
                    .or_default()
                    .record(bit, count);
            }
        }
        Ok(decoded)
    }

    /// Combined per-qubit bitstrings.
    ///
    /// Character `i` of each key is the bit read for qubit `i`, or the
    /// placeholder if qubit `i` is unmeasured. Outcomes that collapse to
    /// the same key are summed.
    #[instrument(level = "debug", skip(self, counts), fields(outcomes = counts.len()))]
    pub fn combined(&self, counts: &Counts) -> DecodeResult<Counts> {
        let mut decoded = Counts::new();
        for (raw, count) in counts.iter() {
            let outcome = DenseOutcome::parse(raw, &self.config, self.layout.width())?;
            let key = (0..self.wiring.num_qubits())
                .map(|q| match self.wiring.get(q) {
                    Some(position) => outcome.bit(position),
                    None => Ok(self.config.placeholder),
                })
                .collect::<DecodeResult<String>>()?;
            decoded.insert(key, count);
        }
        Ok(decoded)
    }

    fn key(&self, qubit: usize, keys: KeyMode) -> QubitKey {
        match keys {
            KeyMode::Index => QubitKey::Index(qubit),
            KeyMode::Handle => QubitKey::Handle(self.circuit.qubits()[qubit].clone()),
        }
    }
}

/// Decode an outcome table into per-qubit `0`/`1` frequencies.
pub fn decode_by_qubit(
    counts: &Counts,
    circuit: &Circuit,
    keys: KeyMode,
) -> DecodeResult<QubitDistribution> {
    MeasurementDecoder::new(circuit).by_qubit(counts, keys)
}

/// Decode an outcome table into combined per-qubit bitstrings.
pub fn decode_combined(counts: &Counts, circuit: &Circuit) -> DecodeResult<Counts> {
    MeasurementDecoder::new(circuit).combined(counts)
}
