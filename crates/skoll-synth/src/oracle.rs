//! Reversible permutation oracle synthesis.

use rustc_hash::FxHashSet;
use skoll_ir::{Circuit, CompositeGate, QubitId};
use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::table::TransitionTable;

/// Synthesize a controlled permutation oracle from a transition table.
///
/// The returned gate spans `1 + w` qubits: qubit 0 is the control, qubits
/// `1..=w` form the work register with the most significant pattern bit on
/// qubit 1. For every table entry, when the control is active and the work
/// register holds the input pattern, the gate maps it to the output pattern;
/// with the control inactive the work register is untouched. Behavior on
/// patterns outside the table's domain is unspecified.
///
/// The table is decomposed into cycles, each cycle into transpositions, and
/// each transposition into the mechanical detect → transform → undo shape:
///
/// 1. *detect* — negate every work qubit whose pattern bit is 0 among the
///    positions where the two swapped patterns agree, so both patterns (and
///    only they, see below) present all-ones on those qubits;
/// 2. *transform* — a multi-controlled bit-flip, gated on the control qubit
///    and the detection qubits, onto every position where the two patterns
///    differ;
/// 3. *undo* — reapply the negations from step 1.
///
/// Gating only on the agreeing positions keeps the detection stable while
/// the differing bits flip. The price is that a third domain pattern could
/// coincide with a transposition on all agreeing positions and be corrupted;
/// synthesis checks for this and fails fast with
/// [`SynthError::AmbiguousDetection`] instead of producing a wrong circuit.
///
/// An empty table synthesizes to an identity gate rather than failing.
pub fn permutation_oracle(
    table: &TransitionTable,
    name: impl Into<String>,
) -> SynthResult<CompositeGate> {
    let name = name.into();
    let width = table.width();
    let mut circuit = Circuit::with_size(&name, 1 + width, 0);

    let mut emitted = false;
    for (u, v) in transpositions(table) {
        emit_transposition(&mut circuit, table, u, v)?;
        emitted = true;
    }
    if !emitted {
        circuit.id(QubitId(0))?;
    }

    debug!(
        name,
        entries = table.len(),
        ops = circuit.num_ops(),
        "synthesized permutation oracle"
    );
    Ok(circuit.into_gate(name)?)
}

/// Decompose the table into an ordered transposition sequence.
///
/// Cycles are discovered from entries in insertion order; a cycle
/// `s0 → s1 → … → sm (→ s0)` becomes the transpositions
/// `(s0 s1), (s0 s2), …, (s0 sm)` applied in that circuit order, which
/// composes to exactly the cycle. Identity entries contribute nothing.
fn transpositions(table: &TransitionTable) -> Vec<(u64, u64)> {
    let mut visited = FxHashSet::default();
    let mut pairs = vec![];

    for (start, _) in table.iter() {
        if !visited.insert(start) {
            continue;
        }
        let mut cur = start;
        while let Some(next) = table.lookup(cur) {
            if next == start {
                break;
            }
            if !visited.insert(next) {
                break;
            }
            pairs.push((start, next));
            cur = next;
        }
    }

    pairs
}

/// Emit one transposition in detect → transform → undo form.
fn emit_transposition(
    circuit: &mut Circuit,
    table: &TransitionTable,
    u: u64,
    v: u64,
) -> SynthResult<()> {
    let width = table.width();
    let mask = if width >= 64 { u64::MAX } else { (1 << width) - 1 };
    let diff = u ^ v;
    let agree = !diff & mask;

    // A pattern matching u on every agreeing position would trigger the
    // multi-controlled flips below; only u and v may do so.
    for z in table.domain() {
        if z != u && z != v && (z ^ u) & agree == 0 {
            return Err(SynthError::AmbiguousDetection {
                first: u,
                second: v,
                clash: z,
            });
        }
    }

    // Work qubit i holds pattern bit (width - 1 - i): MSB first.
    let qubit = |i: u32| QubitId(i + 1);
    let bit = |pattern: u64, i: u32| (pattern >> (width - 1 - i)) & 1;

    let detect: Vec<u32> = (0..width).filter(|&i| bit(agree, i) == 1).collect();

    for &i in &detect {
        if bit(u, i) == 0 {
            circuit.x(qubit(i))?;
        }
    }
    for i in 0..width {
        if bit(diff, i) == 1 {
            let controls = std::iter::once(QubitId(0)).chain(detect.iter().map(|&d| qubit(d)));
            circuit.mcx(controls, qubit(i))?;
        }
    }
    for &i in &detect {
        if bit(u, i) == 0 {
            circuit.x(qubit(i))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skoll_ir::{Gate, Instruction, InstructionKind, StandardGate};

    /// Apply an X/CX/MCX-only composite to a classical basis state.
    ///
    /// Returns the work pattern after tracing every bit-flip through the
    /// gate with the given control-qubit value.
    fn trace_oracle(gate: &CompositeGate, control: bool, work: u64) -> u64 {
        let width = gate.num_qubits() - 1;
        let mut bits = vec![false; gate.num_qubits() as usize];
        bits[0] = control;
        for i in 0..width {
            bits[(i + 1) as usize] = (work >> (width - 1 - i)) & 1 == 1;
        }

        for inst in gate.instructions() {
            apply_classical(inst, &mut bits);
        }

        assert_eq!(bits[0], control, "oracle must not touch the control qubit");

        let mut result = 0u64;
        for i in 0..width {
            if bits[(i + 1) as usize] {
                result |= 1 << (width - 1 - i);
            }
        }
        result
    }

    fn apply_classical(inst: &Instruction, bits: &mut [bool]) {
        let InstructionKind::Gate(gate) = &inst.kind else {
            return;
        };
        match gate {
            Gate::Standard(StandardGate::X) => {
                let q = inst.qubits[0].0 as usize;
                bits[q] = !bits[q];
            }
            Gate::Standard(StandardGate::CX) | Gate::Standard(StandardGate::MCX(_)) => {
                let (target, controls) = inst.qubits.split_last().unwrap();
                if controls.iter().all(|c| bits[c.0 as usize]) {
                    bits[target.0 as usize] = !bits[target.0 as usize];
                }
            }
            Gate::Standard(StandardGate::I) => {}
            other => panic!("oracle emitted unexpected gate: {}", other.name()),
        }
    }

    #[test]
    fn test_oracle_maps_table_entries() {
        let table = TransitionTable::modular_multiplication(43, 77, 7).unwrap();
        let gate = permutation_oracle(&table, "43 mod 77").unwrap();

        assert_eq!(gate.num_qubits(), 8);
        assert_eq!(trace_oracle(&gate, true, 1), 43);
        assert_eq!(trace_oracle(&gate, true, 43), 1);
    }

    #[test]
    fn test_oracle_identity_when_control_inactive() {
        let table = TransitionTable::modular_multiplication(43, 77, 7).unwrap();
        let gate = permutation_oracle(&table, "43 mod 77").unwrap();

        assert_eq!(trace_oracle(&gate, false, 1), 1);
        assert_eq!(trace_oracle(&gate, false, 43), 43);
    }

    #[test]
    fn test_empty_table_yields_identity_gate() {
        let table = TransitionTable::new(3);
        let gate = permutation_oracle(&table, "noop").unwrap();

        assert_eq!(gate.num_qubits(), 4);
        assert_eq!(gate.instructions().len(), 1);
        assert_eq!(gate.instructions()[0].name(), "id");
    }

    #[test]
    fn test_identity_table_yields_identity_gate() {
        let mut table = TransitionTable::new(4);
        table.insert(3, 3).unwrap();
        table.insert(5, 5).unwrap();
        let gate = permutation_oracle(&table, "noop").unwrap();

        assert_eq!(gate.instructions().len(), 1);
        assert_eq!(gate.instructions()[0].name(), "id");
    }

    #[test]
    fn test_oracle_longer_orbit() {
        let table = TransitionTable::modular_multiplication(7, 15, 4).unwrap();
        let gate = permutation_oracle(&table, "7 mod 15").unwrap();

        for (input, output) in table.iter() {
            assert_eq!(trace_oracle(&gate, true, input), output);
            assert_eq!(trace_oracle(&gate, false, input), input);
        }
    }

    #[test]
    fn test_ambiguous_detection_rejected() {
        // The transposition 0011 ↔ 0101 agrees on the outer bits only, and
        // 0001 coincides with it there, so a sound gate cannot be built.
        let mut table = TransitionTable::new(4);
        table.insert(0b0011, 0b0101).unwrap();
        table.insert(0b0001, 0b1000).unwrap();

        let err = permutation_oracle(&table, "clash").unwrap_err();
        assert!(matches!(err, SynthError::AmbiguousDetection { .. }));
    }
}
