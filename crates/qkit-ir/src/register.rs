//! Named bit registers.

use serde::{Deserialize, Serialize};

use crate::qubit::{ClbitId, QubitId};

/// A named, ordered group of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Register name.
    pub name: String,
    /// Member qubits, index 0 first.
    pub bits: Vec<QubitId>,
}

/// A named, ordered, contiguous group of classical bits.
///
/// In a raw outcome string each register forms one space-delimited group,
/// written highest index first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Member bits, index 0 first.
    pub bits: Vec<ClbitId>,
}

impl QuantumRegister {
    /// Number of qubits in the register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl ClassicalRegister {
    /// Number of bits in the register.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the register holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
