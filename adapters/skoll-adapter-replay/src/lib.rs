//! Replay backend for Skoll.
//!
//! Serves configured measurement distributions through the full
//! [`skoll_hal::Backend`] job lifecycle. Useful for decoder tests and
//! demos that need device-shaped results without a device.
//!
//! # Example
//!
//! ```ignore
//! use skoll_adapter_replay::ReplayBackend;
//! use skoll_hal::Backend;
//!
//! let backend = ReplayBackend::ideal_period_two(4, 11, 7);
//! let job_id = backend.submit(&circuit, 4096).await?;
//! let result = backend.wait(&job_id).await?;
//! ```

mod backend;

pub use backend::ReplayBackend;
