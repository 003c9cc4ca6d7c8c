//! Splicing operations into a circuit's instruction list.
//!
//! [`insert`] places an operation at an arbitrary position. Operands are
//! given as [`Operand`]s: either handles already declared by the circuit, or
//! (for qubits only) positional indices into the declared qubits.
//!
//! Checks run in a fixed order, and the first failing one is reported:
//!
//! 1. the operation itself ([`IrError::InvalidOperand`])
//! 2. the insertion index ([`IrError::IndexOutOfRange`])
//! 3. operand counts ([`IrError::ArityMismatch`])
//! 4. qubit operands ([`IrError::UnboundOperand`], [`IrError::QubitIndexOutOfRange`])
//! 5. classical bit operands ([`IrError::UnboundOperand`],
//!    [`IrError::UnsupportedOperandForm`])
//!
//! Nothing is mutated unless every check passes.
//!
//! # Example
//!
//! ```rust
//! use qkit_ir::{Circuit, Operand, Operation, StandardGate, QubitId, ClbitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2, 1);
//! circuit.h(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! let q1 = circuit.qubits()[1].clone();
//! let c0 = circuit.clbits()[0].clone();
//! circuit
//!     .insert(Operation::Measure, &[q1.into()], &[c0.into()], 1)
//!     .unwrap();
//! circuit
//!     .insert(StandardGate::X, &[Operand::Index(1)], &[], 0)
//!     .unwrap();
//!
//! let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
//! assert_eq!(names, ["x", "h", "measure", "measure"]);
//! ```

use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{BitKind, IrError, IrResult};
use crate::instruction::{Instruction, Operation};
use crate::qubit::{Bit, Clbit, ClbitId, Qubit, QubitId};

/// A reference to a bit: a declared handle or a positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand<H> {
    /// A handle that must already be declared in the circuit.
    Handle(H),
    /// Position in the circuit's declared qubits.
    Index(usize),
}

/// Qubit operand.
pub type QubitOperand = Operand<Qubit>;

/// Classical bit operand. Only [`Operand::Handle`] is accepted.
pub type ClbitOperand = Operand<Clbit>;

impl<I> From<Bit<I>> for Operand<Bit<I>> {
    fn from(bit: Bit<I>) -> Self {
        Operand::Handle(bit)
    }
}

impl<I: Clone> From<&Bit<I>> for Operand<Bit<I>> {
    fn from(bit: &Bit<I>) -> Self {
        Operand::Handle(bit.clone())
    }
}

impl<H> From<usize> for Operand<H> {
    fn from(index: usize) -> Self {
        Operand::Index(index)
    }
}

/// Where a splice is applied.
#[derive(Debug)]
pub enum SpliceTarget<'a> {
    /// Mutate the given circuit.
    InPlace(&'a mut Circuit),
    /// Leave the given circuit untouched and splice into a clone.
    Copy(&'a Circuit),
}

/// The circuit a splice was applied to.
#[derive(Debug)]
pub enum Spliced<'a> {
    /// The caller's circuit, mutated in place.
    Borrowed(&'a mut Circuit),
    /// A modified clone.
    Owned(Circuit),
}

impl Spliced<'_> {
    /// Take the result as an owned circuit, cloning if it was spliced in place.
    pub fn into_owned(self) -> Circuit {
        match self {
            Spliced::Borrowed(c) => c.clone(),
            Spliced::Owned(c) => c,
        }
    }
}

impl Deref for Spliced<'_> {
    type Target = Circuit;

    fn deref(&self) -> &Circuit {
        match self {
            Spliced::Borrowed(c) => c,
            Spliced::Owned(c) => c,
        }
    }
}

impl DerefMut for Spliced<'_> {
    fn deref_mut(&mut self) -> &mut Circuit {
        match self {
            Spliced::Borrowed(c) => c,
            Spliced::Owned(c) => c,
        }
    }
}

/// Insert `operation` at `index` of the target circuit's instruction list.
///
/// Entries at `index` and after move one position back. `index` may equal
/// the current length, which appends.
pub fn insert<'a>(
    target: SpliceTarget<'a>,
    operation: impl Into<Operation>,
    qubits: &[QubitOperand],
    clbits: &[ClbitOperand],
    index: usize,
) -> IrResult<Spliced<'a>> {
    let mut spliced = match target {
        SpliceTarget::InPlace(circuit) => Spliced::Borrowed(circuit),
        SpliceTarget::Copy(circuit) => Spliced::Owned(circuit.clone()),
    };
    splice(&mut spliced, operation.into(), qubits, clbits, index)?;
    Ok(spliced)
}

#[instrument(level = "debug", skip(circuit, operation, qubits, clbits))]
fn splice(
    circuit: &mut Circuit,
    operation: Operation,
    qubits: &[QubitOperand],
    clbits: &[ClbitOperand],
    index: usize,
) -> IrResult<()> {
    let instruction = prepare(circuit, operation, qubits, clbits, index)?;
    let name = instruction.name().to_string();
    circuit.instructions_mut().insert(index, instruction);
    debug!("Spliced '{}' at {}, {} instructions", name, index, circuit.len());
    Ok(())
}

fn prepare(
    circuit: &Circuit,
    operation: Operation,
    qubits: &[QubitOperand],
    clbits: &[ClbitOperand],
    index: usize,
) -> IrResult<Instruction> {
    operation.validate()?;

    if index > circuit.len() {
        return Err(IrError::IndexOutOfRange {
            index,
            len: circuit.len(),
        });
    }

    if qubits.len() != operation.num_qubits() || clbits.len() != operation.num_clbits() {
        return Err(IrError::ArityMismatch {
            operation: operation.name().to_string(),
            expected_qubits: operation.num_qubits(),
            got_qubits: qubits.len(),
            expected_clbits: operation.num_clbits(),
            got_clbits: clbits.len(),
        });
    }

    let qubits = qubits
        .iter()
        .map(|q| resolve_qubit(circuit, q))
        .collect::<IrResult<Vec<_>>>()?;
    let clbits = clbits
        .iter()
        .map(|c| resolve_clbit(circuit, c))
        .collect::<IrResult<Vec<_>>>()?;

    Ok(Instruction {
        operation,
        qubits,
        clbits,
    })
}

fn resolve_qubit(circuit: &Circuit, operand: &QubitOperand) -> IrResult<QubitId> {
    match operand {
        Operand::Handle(qubit) => {
            if circuit.qubits().contains(qubit) {
                Ok(qubit.id)
            } else {
                Err(IrError::UnboundOperand {
                    operand: qubit.to_string(),
                    kind: BitKind::Qubit,
                })
            }
        }
        Operand::Index(i) => circuit
            .qubits()
            .get(*i)
            .map(|q| q.id)
            .ok_or(IrError::QubitIndexOutOfRange {
                index: *i,
                num_qubits: circuit.num_qubits(),
            }),
    }
}

fn resolve_clbit(circuit: &Circuit, operand: &ClbitOperand) -> IrResult<ClbitId> {
    match operand {
        Operand::Handle(clbit) => {
            if circuit.clbits().contains(clbit) {
                Ok(clbit.id)
            } else {
                Err(IrError::UnboundOperand {
                    operand: clbit.to_string(),
                    kind: BitKind::Clbit,
                })
            }
        }
        Operand::Index(i) => Err(IrError::UnsupportedOperandForm {
            index: *i,
            kind: BitKind::Clbit,
        }),
    }
}

impl Circuit {
    /// Splice `operation` into this circuit at `index`.
    ///
    /// See [`insert`] for the checks performed.
    pub fn insert(
        &mut self,
        operation: impl Into<Operation>,
        qubits: &[QubitOperand],
        clbits: &[ClbitOperand],
        index: usize,
    ) -> IrResult<&mut Self> {
        splice(self, operation.into(), qubits, clbits, index)?;
        Ok(self)
    }

    /// Return a copy of this circuit with `operation` spliced in at `index`.
    pub fn inserted(
        &self,
        operation: impl Into<Operation>,
        qubits: &[QubitOperand],
        clbits: &[ClbitOperand],
        index: usize,
    ) -> IrResult<Circuit> {
        insert(SpliceTarget::Copy(self), operation, qubits, clbits, index).map(Spliced::into_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;
    use std::f64::consts::PI;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn prepare_circuit() -> Circuit {
        let mut circuit = Circuit::with_size("test", 3, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(2))
            .unwrap()
            .ccx(QubitId(1), QubitId(2), QubitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(0))
            .unwrap();
        circuit
    }

    #[test]
    fn test_resolve_qubit_index() {
        let circuit = prepare_circuit();
        assert_eq!(resolve_qubit(&circuit, &Operand::Index(2)), Ok(QubitId(2)));
        assert_eq!(
            resolve_qubit(&circuit, &Operand::Index(3)),
            Err(IrError::QubitIndexOutOfRange {
                index: 3,
                num_qubits: 3
            })
        );
    }

    #[test]
    fn test_resolve_clbit_rejects_index() {
        let circuit = prepare_circuit();
        assert_eq!(
            resolve_clbit(&circuit, &Operand::Index(0)),
            Err(IrError::UnsupportedOperandForm {
                index: 0,
                kind: BitKind::Clbit
            })
        );
    }

    #[test]
    fn test_insert_in_place_returns_borrowed() {
        let mut circuit = prepare_circuit();
        let spliced = insert(
            SpliceTarget::InPlace(&mut circuit),
            StandardGate::R(PI / 2.0, PI / 4.0),
            &[Operand::Index(0)],
            &[],
            4,
        )
        .unwrap();
        assert!(matches!(spliced, Spliced::Borrowed(_)));
        assert_eq!(spliced.len(), 5);
        assert_eq!(circuit.instructions()[4].name(), "r");
    }

    #[test]
    fn test_insert_copy_returns_owned() {
        let circuit = prepare_circuit();
        let spliced = insert(
            SpliceTarget::Copy(&circuit),
            Operation::Reset,
            &[Operand::Index(1)],
            &[],
            0,
        )
        .unwrap();
        assert!(matches!(spliced, Spliced::Owned(_)));
        assert_eq!(spliced.instructions()[0].name(), "reset");
        assert_eq!(circuit.len(), 4);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_splice_event_reports_resulting_length() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let mut circuit = prepare_circuit();
        tracing::subscriber::with_default(subscriber, || {
            circuit
                .insert(StandardGate::X, &[Operand::Index(0)], &[], 1)
                .unwrap();
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Spliced 'x' at 1, 5 instructions"), "{logs}");
    }

    #[test]
    fn test_invalid_operation_reported_before_index() {
        let mut circuit = prepare_circuit();
        let err = circuit
            .insert(Operation::Barrier { num_qubits: 0 }, &[], &[], 99)
            .unwrap_err();
        assert!(matches!(err, IrError::InvalidOperand { .. }));
    }
}
