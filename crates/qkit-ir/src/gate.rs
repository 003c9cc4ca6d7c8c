//! Quantum gate types.
//!
//! Gates carry a name, an operand arity and their angle parameters. No
//! unitary semantics are modeled.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Standard gates with well-known names and arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Rotation by θ around the cos(φ)X + sin(φ)Y axis.
    R(f64, f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::SX => "sx",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::R(_, _) => "r",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::T
            | StandardGate::SX
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::R(_, _)
            | StandardGate::U(_, _, _) => 1,

            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::ISwap => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Get the angle parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(a)
            | StandardGate::Ry(a)
            | StandardGate::Rz(a)
            | StandardGate::P(a) => vec![a],
            StandardGate::R(theta, phi) => vec![theta, phi],
            StandardGate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => vec![],
        }
    }
}

/// A user-defined gate, known only by name and arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: usize,
    /// The number of classical bits it writes.
    #[serde(default)]
    pub num_clbits: usize,
    /// Angle parameters of the gate.
    #[serde(default)]
    pub params: Vec<f64>,
}

impl CustomGate {
    /// Create a new custom gate acting on `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits: 0,
            params: vec![],
        }
    }

    /// Set the number of classical bits the gate writes.
    #[must_use]
    pub fn with_clbits(mut self, num_clbits: usize) -> Self {
        self.num_clbits = num_clbits;
        self
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

/// A gate placed by an instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
        }
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match &self.kind {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        match &self.kind {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        match &self.kind {
            GateKind::Standard(_) => 0,
            GateKind::Custom(g) => g.num_clbits,
        }
    }

    /// Check that the gate can be placed in a circuit.
    ///
    /// Custom gates need a non-empty name without whitespace and at least one
    /// operand. Every angle must be finite.
    pub fn validate(&self) -> IrResult<()> {
        let params = match &self.kind {
            GateKind::Standard(g) => g.params(),
            GateKind::Custom(g) => {
                if g.name.is_empty() || g.name.chars().any(char::is_whitespace) {
                    return Err(IrError::InvalidOperand {
                        reason: format!("custom gate name {:?} is not an identifier", g.name),
                    });
                }
                if g.num_qubits + g.num_clbits == 0 {
                    return Err(IrError::InvalidOperand {
                        reason: format!("custom gate '{}' has no operands", g.name),
                    });
                }
                g.params.clone()
            }
        };

        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(IrError::InvalidOperand {
                reason: format!("gate '{}' has non-finite parameter {bad}", self.name()),
            });
        }
        Ok(())
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}
