//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::instruction::{Instruction, InstructionKind};

/// Standard gates with known semantics.
///
/// The set is deliberately small: identity, bit-flip, the superposition
/// rotation, phase rotations, controlled variants, and swap are everything
/// the period-finding pipeline emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate (bit flip).
    X,
    /// Hadamard gate.
    H,
    /// Phase gate with angle in radians.
    P(f64),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Multi-controlled X gate with the given number of control qubits.
    ///
    /// Operands are the controls followed by the target. `MCX(1)` is
    /// semantically CX; builders emit CX directly for that case.
    MCX(u32),
    /// Controlled phase gate with angle in radians.
    CP(f64),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::MCX(_) => "mcx",
            StandardGate::CP(_) => "cp",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I | StandardGate::X | StandardGate::H | StandardGate::P(_) => 1,
            StandardGate::CX | StandardGate::CP(_) | StandardGate::Swap => 2,
            StandardGate::MCX(controls) => controls + 1,
        }
    }

    /// Get the inverse of this gate.
    ///
    /// X, H, CX and Swap are self-inverse; phase gates negate their angle.
    pub fn inverse(&self) -> Self {
        match self {
            StandardGate::P(theta) => StandardGate::P(-theta),
            StandardGate::CP(theta) => StandardGate::CP(-theta),
            other => other.clone(),
        }
    }
}

/// A named, immutable sub-circuit usable as a single gate.
///
/// Sub-instructions address gate-local qubit indices `0..num_qubits`; they
/// are remapped to circuit qubits when the composite is applied. A composite
/// never contains measurements or barriers; only gate instructions survive
/// conversion from a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGate {
    /// Display name of the gate.
    name: String,
    /// The number of qubits it operates on.
    num_qubits: u32,
    /// Ordered sub-instructions over local qubit indices.
    instructions: Vec<Instruction>,
}

impl CompositeGate {
    /// Create a composite gate from an ordered instruction sequence.
    ///
    /// Callers are expected to have validated sub-instruction operands
    /// against `num_qubits`; [`crate::Circuit::into_gate`] is the checked
    /// entry point.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions,
        }
    }

    /// Get the display name of the gate.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the ordered sub-instructions.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the structural inverse: sub-gates inverted, order reversed.
    pub fn inverse(&self) -> Self {
        let instructions = self
            .instructions
            .iter()
            .rev()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(gate) => Instruction {
                    kind: InstructionKind::Gate(gate.inverse()),
                    qubits: inst.qubits.clone(),
                    clbits: inst.clbits.clone(),
                },
                _ => inst.clone(),
            })
            .collect();

        Self {
            name: format!("{}†", self.name),
            num_qubits: self.num_qubits,
            instructions,
        }
    }
}

/// A quantum gate, either standard or composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A synthesized composite gate.
    Composite(CompositeGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Composite(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Composite(g) => g.num_qubits(),
        }
    }

    /// Get the inverse of this gate.
    pub fn inverse(&self) -> Self {
        match self {
            Gate::Standard(g) => Gate::Standard(g.inverse()),
            Gate::Composite(g) => Gate::Composite(g.inverse()),
        }
    }

    /// Get the composite gate if this is one.
    pub fn as_composite(&self) -> Option<&CompositeGate> {
        match self {
            Gate::Composite(g) => Some(g),
            Gate::Standard(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CompositeGate> for Gate {
    fn from(gate: CompositeGate) -> Self {
        Gate::Composite(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CP(PI).num_qubits(), 2);
        assert_eq!(StandardGate::Swap.name(), "swap");
    }

    #[test]
    fn test_standard_gate_inverse() {
        assert_eq!(StandardGate::X.inverse(), StandardGate::X);
        assert_eq!(StandardGate::H.inverse(), StandardGate::H);
        assert_eq!(StandardGate::P(PI / 4.0).inverse(), StandardGate::P(-PI / 4.0));
        assert_eq!(StandardGate::CP(-PI).inverse(), StandardGate::CP(PI));
    }

    #[test]
    fn test_composite_inverse_reverses_order() {
        let instructions = vec![
            Instruction::single_qubit_gate(StandardGate::H, QubitId(0)),
            Instruction::single_qubit_gate(StandardGate::P(PI / 2.0), QubitId(0)),
        ];
        let gate = CompositeGate::from_parts("frag", 1, instructions);
        let inv = gate.inverse();

        assert_eq!(inv.name(), "frag†");
        assert_eq!(
            inv.instructions()[0].as_gate(),
            Some(&Gate::Standard(StandardGate::P(-PI / 2.0)))
        );
        assert_eq!(
            inv.instructions()[1].as_gate(),
            Some(&Gate::Standard(StandardGate::H))
        );
    }
}
