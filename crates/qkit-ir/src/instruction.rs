//! Operations and the instruction entries that bind them to bits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// An operation with a declared operand arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A quantum gate.
    Gate(Gate),
    /// Measure one qubit into one classical bit.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier across a fixed number of qubits.
    Barrier {
        /// Number of qubits the barrier spans.
        num_qubits: usize,
    },
    /// Delay instruction.
    Delay {
        /// Duration in device-specific units.
        duration: u64,
    },
}

impl Operation {
    /// Get the name of the operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate(g) => g.name(),
            Operation::Measure => "measure",
            Operation::Reset => "reset",
            Operation::Barrier { .. } => "barrier",
            Operation::Delay { .. } => "delay",
        }
    }

    /// Number of qubit operands the operation requires.
    pub fn num_qubits(&self) -> usize {
        match self {
            Operation::Gate(g) => g.num_qubits(),
            Operation::Measure | Operation::Reset | Operation::Delay { .. } => 1,
            Operation::Barrier { num_qubits } => *num_qubits,
        }
    }

    /// Number of classical bit operands the operation requires.
    pub fn num_clbits(&self) -> usize {
        match self {
            Operation::Gate(g) => g.num_clbits(),
            Operation::Measure => 1,
            Operation::Reset | Operation::Barrier { .. } | Operation::Delay { .. } => 0,
        }
    }

    /// Check that this value is a usable operation.
    pub fn validate(&self) -> IrResult<()> {
        match self {
            Operation::Gate(g) => g.validate(),
            Operation::Barrier { num_qubits: 0 } => Err(IrError::InvalidOperand {
                reason: "barrier must span at least one qubit".into(),
            }),
            _ => Ok(()),
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Operation::Measure)
    }

}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Gate(gate)
    }
}

impl From<StandardGate> for Operation {
    fn from(gate: StandardGate) -> Self {
        Operation::Gate(gate.into())
    }
}

/// An operation bound to concrete bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub operation: Operation,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create an instruction from an operation and its operands.
    pub fn new(
        operation: impl Into<Operation>,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> Self {
        Self {
            operation: operation.into(),
            qubits: qubits.into_iter().collect(),
            clbits: clbits.into_iter().collect(),
        }
    }

    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::new(Operation::Gate(gate.into()), qubits, [])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self::new(Operation::Measure, [qubit], [clbit])
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let qubits: Vec<_> = qubits.into_iter().collect();
        Self::new(
            Operation::Barrier {
                num_qubits: qubits.len(),
            },
            qubits,
            [],
        )
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        self.operation.name()
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        self.operation.is_measure()
    }
}
