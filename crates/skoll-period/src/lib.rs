//! Skoll period extraction.
//!
//! The classical tail of Shor's algorithm: take the measurement counts of
//! a phase-estimation run and recover period candidates and factor
//! guesses. Outcomes are ranked by probability, each bitstring is read as
//! a phase `decimal / 2^P`, the phase is snapped to the nearest fraction
//! with denominator at most the modulus, and even-period candidates yield
//! the guesses `gcd(a^(r/2) ± 1, N)`.
//!
//! # Example
//!
//! ```
//! use skoll_hal::Counts;
//! use skoll_period::{PeriodVerdict, decode};
//!
//! let mut counts = Counts::new();
//! counts.insert("0000", 2048);
//! counts.insert("1000", 2048);
//!
//! let report = decode(&counts, 43, 77, 4, 10).unwrap();
//! assert_eq!(report.factors(), vec![7, 11]);
//! ```

pub mod decode;
pub mod error;
pub mod fraction;

pub use decode::{Candidate, DecodeReport, PeriodVerdict, decode};
pub use error::{DecodeError, DecodeResult};
pub use fraction::{Fraction, gcd, mod_pow};
