//! Controlled modular-exponentiation gates for phase estimation.

use skoll_ir::CompositeGate;
use tracing::debug;

use crate::error::SynthResult;
use crate::oracle::permutation_oracle;
use crate::table::TransitionTable;

/// Build the controlled gate for `x → a^(2^exponent)·x mod N`.
///
/// The exponent-`i` permutation is derived by squaring the base
/// multiplication table `i` times, so each counting qubit gets its own
/// correct power rather than a copy of the base gate. For a base whose
/// multiplicative order is 2, every squaring collapses to the identity and
/// the higher gates become no-ops.
///
/// The returned composite spans one control qubit plus `width` work qubits
/// and is named after the modular power it implements, e.g. `43^4 mod 77`.
pub fn controlled_modexp(
    base: u64,
    modulus: u64,
    width: u32,
    exponent: u32,
) -> SynthResult<CompositeGate> {
    let table = TransitionTable::modular_multiplication(base, modulus, width)?.pow(exponent)?;

    let power = 1u128 << exponent;
    let name = format!("{base}^{power} mod {modulus}");
    debug!(base, modulus, exponent, entries = table.len(), "building modexp gate");

    permutation_oracle(&table, name)
}
