//! Which outcome position each qubit's measurement lands in.

use qkit_ir::Circuit;
use tracing::warn;

use crate::layout::ClbitLayout;

/// Per-qubit measurement wiring.
///
/// Slot `i` holds the outcome position written by the last measurement of
/// the qubit at declaration index `i`, or `None` if that qubit is never
/// measured into a registered classical bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementWiring {
    slots: Vec<Option<usize>>,
}

impl MeasurementWiring {
    /// Scan the circuit's measurements in instruction order.
    pub fn new(circuit: &Circuit, layout: &ClbitLayout) -> Self {
        let mut slots = vec![None; circuit.num_qubits()];

        for inst in circuit.instructions().iter().filter(|i| i.is_measure()) {
            for (&qubit, &clbit) in inst.qubits.iter().zip(&inst.clbits) {
                let Some(index) = circuit.qubit_index(qubit) else {
                    warn!("Measurement on undeclared qubit {qubit} ignored");
                    continue;
                };
                let position = layout.position(clbit);
                if position.is_none() {
                    warn!("Qubit {qubit} measured into {clbit}, which is in no register");
                }
                slots[index] = position;
            }
        }

        Self { slots }
    }

    /// Outcome position for the qubit at `index`.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.slots.get(index).copied().flatten()
    }

    /// Iterate over `(qubit index, outcome position)` for measured qubits.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(q, slot)| slot.map(|pos| (q, pos)))
    }

    /// Number of declared qubits.
    pub fn num_qubits(&self) -> usize {
        self.slots.len()
    }

    /// Number of qubits with a measurement.
    pub fn num_measured(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
