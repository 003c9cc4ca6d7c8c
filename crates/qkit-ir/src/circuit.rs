//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{BitKind, IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, Operation};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};
use crate::register::{ClassicalRegister, QuantumRegister};

/// A quantum circuit: declared bits, registers and an ordered instruction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in declaration order.
    qubits: Vec<Qubit>,
    /// Classical bits in declaration order.
    clbits: Vec<Clbit>,
    /// Quantum registers in declaration order.
    qregs: Vec<QuantumRegister>,
    /// Classical registers in declaration order.
    cregs: Vec<ClassicalRegister>,
    /// Ordered instruction entries.
    data: Vec<Instruction>,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
    /// Counter for generating classical bit IDs.
    next_clbit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            data: vec![],
            next_qubit_id: 0,
            next_clbit_id: 0,
        }
    }

    /// Create a circuit with a quantum register `q` and a classical register `c`.
    ///
    /// A register of size zero is not declared.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.next_qubit_id += 1;
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        self.qregs.push(QuantumRegister {
            name,
            bits: ids.clone(),
        });
        ids
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(self.next_clbit_id);
            self.next_clbit_id += 1;
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        self.cregs.push(ClassicalRegister {
            name,
            bits: ids.clone(),
        });
        ids
    }

    /// Append an instruction after checking its arity and operands.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.data.push(instruction);
        Ok(self)
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let op = &instruction.operation;
        op.validate()?;

        if instruction.qubits.len() != op.num_qubits()
            || instruction.clbits.len() != op.num_clbits()
        {
            return Err(IrError::ArityMismatch {
                operation: op.name().to_string(),
                expected_qubits: op.num_qubits(),
                got_qubits: instruction.qubits.len(),
                expected_clbits: op.num_clbits(),
                got_clbits: instruction.clbits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &q in &instruction.qubits {
            if self.qubit(q).is_none() {
                return Err(IrError::UnboundOperand {
                    operand: q.to_string(),
                    kind: BitKind::Qubit,
                });
            }
            if !seen.insert(q) {
                return Err(IrError::DuplicateOperand {
                    operand: q.to_string(),
                    operation: op.name().to_string(),
                });
            }
        }
        for &c in &instruction.clbits {
            if self.clbit(c).is_none() {
                return Err(IrError::UnboundOperand {
                    operand: c.to_string(),
                    kind: BitKind::Clbit,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::H, [qubit]))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::X, [qubit]))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Y, [qubit]))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Z, [qubit]))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::S, [qubit]))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::T, [qubit]))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::SX, [qubit]))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Rx(theta), [qubit]))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Ry(theta), [qubit]))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Rz(theta), [qubit]))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::P(theta), [qubit]))
    }

    /// Apply R(θ, φ) rotation gate.
    pub fn r(&mut self, theta: f64, phi: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::R(theta, phi), [qubit]))
    }

    /// Apply universal U gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(
            StandardGate::U(theta, phi, lambda),
            [qubit],
        ))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::CX, [control, target]))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::CZ, [control, target]))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::Swap, [q1, q2]))
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::ISwap, [q1, q2]))
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.append(Instruction::measure(qubit, clbit))
    }

    /// Measure every qubit into a fresh classical register `meas`.
    ///
    /// A barrier over all qubits precedes the measurements and qubit `i` is
    /// measured into `meas[i]`.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.qubits.is_empty() {
            return Ok(self);
        }
        self.barrier_all()?;

        let size = u32::try_from(self.qubits.len()).map_err(|_| IrError::InvalidOperand {
            reason: "too many qubits for a single measurement register".into(),
        })?;
        let clbits = self.add_creg("meas", size);
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        for (q, c) in qubits.into_iter().zip(clbits) {
            self.measure(q, c)?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::new(Operation::Reset, [qubit], []))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.append(Instruction::barrier(qubits))
    }

    /// Apply a delay to a qubit.
    pub fn delay(&mut self, qubit: QubitId, duration: u64) -> IrResult<&mut Self> {
        self.append(Instruction::new(Operation::Delay { duration }, [qubit], []))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the declared qubits.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the declared classical bits.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Get the quantum registers.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Get the classical registers.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Get the instruction list.
    pub fn instructions(&self) -> &[Instruction] {
        &self.data
    }

    pub(crate) fn instructions_mut(&mut self) -> &mut Vec<Instruction> {
        &mut self.data
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the qubit handle for `id`.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.iter().find(|q| q.id == id)
    }

    /// Get the classical bit handle for `id`.
    pub fn clbit(&self, id: ClbitId) -> Option<&Clbit> {
        self.clbits.iter().find(|c| c.id == id)
    }

    /// Declaration-order position of a qubit.
    pub fn qubit_index(&self, id: QubitId) -> Option<usize> {
        self.qubits.iter().position(|q| q.id == id)
    }

    /// Iterate over instructions whose operation has the given name.
    pub fn find_instructions<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Instruction)> + 'a {
        self.data
            .iter()
            .enumerate()
            .filter(move |(_, inst)| inst.name() == name)
    }
}
