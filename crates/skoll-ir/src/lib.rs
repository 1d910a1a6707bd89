//! Skoll Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing the quantum
//! circuits the Skoll period-finding stack synthesizes. Circuits are ordered
//! instruction sequences over fixed-width registers: the stack builds each
//! circuit exactly once, hands it to an execution backend, and never rewrites
//! it, so no graph representation is needed.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, CX, CP, Swap) and
//!   [`CompositeGate`] for synthesized named sub-circuits
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building a Small Circuit
//!
//! ```rust
//! use skoll_ir::{Circuit, ClbitId, QubitId};
//! use std::f64::consts::PI;
//!
//! let mut circuit = Circuit::with_size("phase_kick", 2, 1);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cp(-PI / 2.0, QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 3);
//! ```
//!
//! # Example: Composite Gates
//!
//! A measurement-free circuit can be frozen into an immutable named gate and
//! applied to another circuit's qubits:
//!
//! ```rust
//! use skoll_ir::{Circuit, QubitId};
//!
//! let mut inner = Circuit::with_size("inner", 2, 0);
//! inner.x(QubitId(0)).unwrap();
//! inner.cx(QubitId(0), QubitId(1)).unwrap();
//! let gate = inner.into_gate("bitflip_pair").unwrap();
//!
//! let mut outer = Circuit::with_size("outer", 4, 0);
//! outer.gate(gate, [QubitId(2), QubitId(3)]).unwrap();
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
