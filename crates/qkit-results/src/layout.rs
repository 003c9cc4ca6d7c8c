//! Classical register layout inside outcome bitstrings.
//!
//! Each classical bit gets a little-endian *position*: the sum of the
//! lengths of all registers declared before its register, plus its index
//! inside that register. Position 0 is the rightmost character of an
//! outcome once separators are removed.
//!
//! For registers `cr1[1]`, `cr2[2]`, `cr3[3]` the outcome reads
//! `"cr3[2] cr3[1] cr3[0] cr2[1] cr2[0] cr1[0]"` (spaces between
//! registers), so the registers start at positions 0, 1 and 3.

use qkit_ir::{Circuit, ClassicalRegister, ClbitId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Lookup from classical bit to its position in an outcome bitstring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClbitLayout {
    positions: FxHashMap<ClbitId, usize>,
    registers: Vec<Vec<ClbitId>>,
    width: usize,
}

impl ClbitLayout {
    /// Build the layout for a circuit's classical registers.
    pub fn new(circuit: &Circuit) -> Self {
        Self::from_registers(circuit.cregs())
    }

    /// Build the layout from registers in declaration order.
    ///
    /// Empty registers occupy no positions. A bit listed in several
    /// registers takes its position from the last one.
    pub fn from_registers(cregs: &[ClassicalRegister]) -> Self {
        let mut positions = FxHashMap::default();
        let mut offset = 0;
        for creg in cregs {
            for (i, &clbit) in creg.bits.iter().enumerate() {
                positions.insert(clbit, offset + i);
            }
            offset += creg.len();
        }

        Self {
            positions,
            registers: cregs.iter().map(|r| r.bits.clone()).collect(),
            width: offset,
        }
    }

    /// Position of `clbit`, or `None` if it belongs to no register.
    pub fn position(&self, clbit: ClbitId) -> Option<usize> {
        self.positions.get(&clbit).copied()
    }

    /// Total number of bits in an outcome.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Render an outcome string with the given bits set to `1`.
    ///
    /// The result uses the simulator format: registers separated by a
    /// space, last-declared register first, highest bit first.
    pub fn encode(&self, ones: impl IntoIterator<Item = ClbitId>) -> String {
        let ones: FxHashSet<ClbitId> = ones.into_iter().collect();
        self.registers
            .iter()
            .rev()
            .filter(|bits| !bits.is_empty())
            .map(|bits| {
                bits.iter()
                    .rev()
                    .map(|c| if ones.contains(c) { '1' } else { '0' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
