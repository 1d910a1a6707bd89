//! Skoll Circuit Synthesis
//!
//! This crate turns the number-theoretic description of one Shor
//! period-finding run into a concrete [`skoll_ir::Circuit`]:
//!
//! - **Transition tables**: [`TransitionTable`] captures the reversible
//!   permutation a modular multiplication induces on work-register basis
//!   states, with well-formedness enforced at construction.
//! - **Oracle synthesis**: [`permutation_oracle`] mechanically compiles a
//!   table into a controlled composite gate (detect → transform → undo).
//! - **Modular exponentiation**: [`controlled_modexp`] derives the
//!   exponent-specific permutation by repeated squaring and wraps it in a
//!   named gate, one per counting qubit.
//! - **Fourier stages**: [`inverse_qft`] / [`qft`] with the exact angle
//!   signs and orderings phase estimation requires.
//! - **Assembly**: [`PhaseEstimation`] composes superposition preparation,
//!   the controlled gates, the inverse transform, and the measurements into
//!   one deterministic circuit.
//!
//! # Example
//!
//! ```rust
//! use skoll_synth::PhaseEstimation;
//!
//! // Factor 77 with base 43 and 4 counting qubits.
//! let circuit = PhaseEstimation::new(43, 77, 4).build().unwrap();
//! assert_eq!(circuit.num_qubits(), 11);
//! assert_eq!(circuit.num_clbits(), 4);
//! ```
//!
//! Synthesis is pure: every function is a deterministic map from integers
//! and tables to gates, with no shared state between calls.

pub mod assembler;
pub mod error;
pub mod modexp;
pub mod oracle;
pub mod qft;
pub mod table;

pub use assembler::{PhaseEstimation, work_bits_for};
pub use error::{SynthError, SynthResult};
pub use modexp::controlled_modexp;
pub use oracle::permutation_oracle;
pub use qft::{inverse_qft, qft};
pub use table::TransitionTable;
