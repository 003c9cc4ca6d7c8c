//! qkit circuit model
//!
//! This crate provides a backend-independent model of a quantum circuit:
//! declared qubits and classical bits, named registers, and an ordered list
//! of instruction entries. It carries no gate semantics, only names, operand
//! arity and angle parameters.
//!
//! # Core Components
//!
//! - **Bits**: [`Qubit`] and [`Clbit`] handles (both [`Bit`]), addressed by [`QubitId`] and [`ClbitId`]
//! - **Registers**: [`QuantumRegister`], [`ClassicalRegister`]
//! - **Operations**: [`Operation`] with declared qubit/clbit arity, built from
//!   [`StandardGate`] or [`CustomGate`]
//! - **Instructions**: [`Instruction`] binding an operation to concrete bits
//! - **Circuit**: [`Circuit`] builder API
//! - **Splicing**: [`insert`] places an operation at any index, resolving
//!   [`Operand`]s against the circuit's declared bits
//!
//! # Example: Splicing into a Bell circuit
//!
//! ```rust
//! use qkit_ir::{Circuit, Operand, StandardGate, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! // Copy mode leaves `circuit` untouched
//! let flipped = circuit
//!     .inserted(StandardGate::X, &[Operand::Index(1)], &[], 2)
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 3);
//! assert_eq!(flipped.len(), 4);
//! assert_eq!(flipped.instructions()[2].name(), "x");
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod insert;
pub mod instruction;
pub mod qubit;
pub mod register;

pub use circuit::Circuit;
pub use error::{BitKind, IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use insert::{ClbitOperand, Operand, QubitOperand, SpliceTarget, Spliced, insert};
pub use instruction::{Instruction, Operation};
pub use qubit::{Bit, Clbit, ClbitId, Qubit, QubitId};
pub use register::{ClassicalRegister, QuantumRegister};
