//! Skoll Hardware Abstraction Layer
//!
//! A unified interface between the circuit-synthesis core and whatever
//! actually executes circuits: local replay, a simulator, or a remote
//! quantum service. The core hands a [`skoll_ir::Circuit`] plus a shot
//! count across this boundary and receives a [`Counts`] map back; the
//! decoder assumes that outcome set is complete and final.
//!
//! # Overview
//!
//! - A common [`Backend`] trait for job submission and management
//! - [`Capabilities`] describing what a backend can run
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use skoll_hal::Backend;
//! use skoll_adapter_replay::ReplayBackend;
//! use skoll_synth::PhaseEstimation;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = PhaseEstimation::new(43, 77, 4).build()?;
//!
//!     let backend = ReplayBackend::ideal_period_two(4, 11, 7);
//!     let job_id = backend.submit(&circuit, 4096).await?;
//!     let result = backend.wait(&job_id).await?;
//!
//!     for (bitstring, count) in result.counts.iter() {
//!         println!("{bitstring}: {count}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
