//! Error types for the IR crate.

use std::fmt;

use thiserror::Error;

/// Which bit collection an operand refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitKind {
    /// A quantum bit.
    Qubit,
    /// A classical bit.
    Clbit,
}

impl fmt::Display for BitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitKind::Qubit => f.write_str("qubit"),
            BitKind::Clbit => f.write_str("clbit"),
        }
    }
}

/// Errors that can occur when building or splicing circuits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The supplied operation is not a usable operation.
    #[error("specified operation is not a valid operation: {reason}")]
    InvalidOperand {
        /// Why the operation was rejected.
        reason: String,
    },

    /// Insertion index is past the end of the instruction list.
    #[error("index {index} is larger than the current number of instructions ({len})")]
    IndexOutOfRange {
        /// Requested insertion index.
        index: usize,
        /// Number of instructions in the circuit.
        len: usize,
    },

    /// Operand counts do not match the operation's declared arity.
    #[error(
        "operation '{operation}' requires {expected_qubits} qubits and {expected_clbits} clbits, \
         got {got_qubits} qubits and {got_clbits} clbits"
    )]
    ArityMismatch {
        /// Name of the operation.
        operation: String,
        /// Declared qubit count.
        expected_qubits: usize,
        /// Supplied qubit count.
        got_qubits: usize,
        /// Declared classical bit count.
        expected_clbits: usize,
        /// Supplied classical bit count.
        got_clbits: usize,
    },

    /// A bit handle is not declared in the circuit.
    #[error("{kind} {operand} is not a part of the circuit, try adding it first")]
    UnboundOperand {
        /// Display form of the offending handle.
        operand: String,
        /// Bit collection that was searched.
        kind: BitKind,
    },

    /// Integer shorthand used where only handles are accepted.
    #[error("{kind} operands must be handles, got integer index {index}")]
    UnsupportedOperandForm {
        /// The integer that was supplied.
        index: usize,
        /// Bit collection the operand was meant for.
        kind: BitKind,
    },

    /// Integer qubit shorthand outside the declared qubits.
    #[error("qubit index {index} out of range for circuit with {num_qubits} qubits")]
    QubitIndexOutOfRange {
        /// The integer that was supplied.
        index: usize,
        /// Number of declared qubits.
        num_qubits: usize,
    },

    /// The same bit appears twice in one operation.
    #[error("duplicate operand {operand} in operation '{operation}'")]
    DuplicateOperand {
        /// Display form of the repeated bit.
        operand: String,
        /// Name of the operation.
        operation: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
