//! Phase-estimation circuit assembly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use skoll_ir::Circuit;

use crate::error::{SynthError, SynthResult};
use crate::modexp::controlled_modexp;
use crate::qft::inverse_qft;

/// The number of bits needed to hold residues of a modulus.
pub fn work_bits_for(modulus: u64) -> u32 {
    64 - modulus.saturating_sub(1).leading_zeros().min(63)
}

/// Parameters of one period-finding phase estimation.
///
/// The circuit structure is fully determined by these four integers; no
/// randomness enters until execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEstimation {
    /// The base whose multiplicative order is sought.
    pub base: u64,
    /// The modulus (the number being factored).
    pub modulus: u64,
    /// Counting-register width: phase precision in bits.
    pub counting_bits: u32,
    /// Work-register width, at least `ceil(log2(modulus))`.
    pub work_bits: u32,
}

impl PhaseEstimation {
    /// Create parameters with the work register sized to the modulus.
    pub fn new(base: u64, modulus: u64, counting_bits: u32) -> Self {
        Self {
            base,
            modulus,
            counting_bits,
            work_bits: work_bits_for(modulus),
        }
    }

    /// Override the work-register width.
    #[must_use]
    pub fn with_work_bits(mut self, work_bits: u32) -> Self {
        self.work_bits = work_bits;
        self
    }

    /// Assemble the complete phase-estimation circuit.
    ///
    /// Layout: qubits `0..P` are the counting register, qubits `P..P+w` the
    /// work register (MSB first). The sequence is fixed: uniform
    /// superposition on the counting register, work register prepared in
    /// basis state 1, one controlled modular-exponentiation gate per
    /// counting qubit, the inverse Fourier transform on the counting
    /// register, and a measurement of every counting qubit into the
    /// classical register `c`.
    pub fn build(&self) -> SynthResult<Circuit> {
        if self.counting_bits == 0 {
            return Err(SynthError::EmptyCountingRegister);
        }

        let p = self.counting_bits;
        let w = self.work_bits;
        let mut circuit = Circuit::new(format!("shor_{}", self.modulus));
        let counting = circuit.add_qreg("count", p);
        let work = circuit.add_qreg("work", w);
        let creg = circuit.add_creg("c", p);

        for &q in &counting {
            circuit.h(q)?;
        }
        // Work register starts in basis state 1: flip the low-order bit,
        // which sits on the highest-index work qubit (MSB first).
        circuit.x(work[w as usize - 1])?;

        for i in 0..p {
            let gate = controlled_modexp(self.base, self.modulus, w, i)?;
            let operands = std::iter::once(counting[i as usize]).chain(work.iter().copied());
            circuit.gate(gate, operands)?;
        }

        circuit.gate(inverse_qft(p)?, counting.iter().copied())?;

        for i in 0..p as usize {
            circuit.measure(counting[i], creg[i])?;
        }

        debug!(
            base = self.base,
            modulus = self.modulus,
            counting_bits = p,
            work_bits = w,
            ops = circuit.num_ops(),
            "assembled phase-estimation circuit"
        );
        Ok(circuit)
    }
}
