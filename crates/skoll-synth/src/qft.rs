//! Quantum Fourier transform circuit fragments.

use std::f64::consts::PI;

use skoll_ir::{Circuit, CompositeGate, QubitId};

use crate::error::SynthResult;

/// Build the inverse quantum Fourier transform over `n` qubits.
///
/// Structure and signs are exact requirements for phase estimation: first
/// pairwise swaps reverse the qubit order, then for each qubit `j` every
/// earlier qubit `m < j` contributes a controlled-phase rotation of angle
/// `−π / 2^(j−m)` before the Hadamard mixing rotation on `j`.
pub fn inverse_qft(n: u32) -> SynthResult<CompositeGate> {
    let mut circuit = Circuit::with_size("qft_dg", n, 0);

    for k in 0..n / 2 {
        circuit.swap(QubitId(k), QubitId(n - 1 - k))?;
    }
    for j in 0..n {
        for m in 0..j {
            circuit.cp(-PI / (1u64 << (j - m)) as f64, QubitId(m), QubitId(j))?;
        }
        circuit.h(QubitId(j))?;
    }

    Ok(circuit.into_gate("qft†")?)
}

/// Build the forward quantum Fourier transform over `n` qubits.
///
/// Emitted as the exact structural inverse of [`inverse_qft`]: same gates,
/// reversed order, negated phase angles. Composing the two is the identity.
pub fn qft(n: u32) -> SynthResult<CompositeGate> {
    let mut circuit = Circuit::with_size("qft", n, 0);

    for j in (0..n).rev() {
        circuit.h(QubitId(j))?;
        for m in (0..j).rev() {
            circuit.cp(PI / (1u64 << (j - m)) as f64, QubitId(m), QubitId(j))?;
        }
    }
    for k in (0..n / 2).rev() {
        circuit.swap(QubitId(k), QubitId(n - 1 - k))?;
    }

    Ok(circuit.into_gate("qft")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_qft_single_qubit_is_mixing_only() {
        let gate = inverse_qft(1).unwrap();
        assert_eq!(gate.instructions().len(), 1);
        assert_eq!(gate.instructions()[0].name(), "h");
    }

    #[test]
    fn test_inverse_qft_gate_counts() {
        // n qubits: floor(n/2) swaps, n(n-1)/2 controlled phases, n mixers.
        for n in [2u32, 3, 4, 5] {
            let gate = inverse_qft(n).unwrap();
            let expected = n / 2 + n * (n - 1) / 2 + n;
            assert_eq!(gate.instructions().len(), expected as usize);
        }
    }

    #[test]
    fn test_inverse_qft_angle_signs() {
        let gate = inverse_qft(3).unwrap();
        for inst in gate.instructions() {
            if let Some(skoll_ir::Gate::Standard(skoll_ir::StandardGate::CP(theta))) =
                inst.as_gate()
            {
                assert!(*theta < 0.0, "inverse transform must rotate negatively");
            }
        }
    }

    #[test]
    fn test_forward_is_structural_inverse() {
        for n in [1u32, 2, 3, 4] {
            let forward = qft(n).unwrap();
            let inverse = inverse_qft(n).unwrap();
            assert_eq!(forward.instructions(), inverse.inverse().instructions());
        }
    }
}
