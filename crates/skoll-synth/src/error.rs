//! Error types for the synthesis crate.

use thiserror::Error;

/// Errors that can occur during table construction or circuit synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// A basis pattern does not fit in the declared register width.
    #[error("Pattern {value:#b} does not fit in {width} bits")]
    PatternTooWide {
        /// The offending pattern.
        value: u64,
        /// The declared register width.
        width: u32,
    },

    /// Two entries share the same input pattern.
    #[error("Duplicate input pattern {0:#b} in transition table")]
    DuplicateInput(u64),

    /// Two entries share the same output pattern; the table would not be
    /// injective on its domain.
    #[error("Duplicate output pattern {0:#b} in transition table")]
    DuplicateOutput(u64),

    /// The work register cannot hold residues of the modulus.
    #[error("Register width {width} too small for modulus {modulus}")]
    WidthTooSmall {
        /// The modulus residues must fit under.
        modulus: u64,
        /// The declared register width.
        width: u32,
    },

    /// The base is unusable for modular multiplication.
    #[error("Base {base} is invalid for modulus {modulus}: {reason}")]
    InvalidBase {
        /// The base value.
        base: u64,
        /// The modulus.
        modulus: u64,
        /// Why the base was rejected.
        reason: String,
    },

    /// Pattern detection for one transposition would also trigger on an
    /// unrelated domain pattern, so the synthesized gate would corrupt it.
    #[error(
        "Detection for transposition {first:#b} ↔ {second:#b} also matches domain pattern {clash:#b}"
    )]
    AmbiguousDetection {
        /// One endpoint of the transposition.
        first: u64,
        /// The other endpoint.
        second: u64,
        /// The domain pattern that would falsely trigger.
        clash: u64,
    },

    /// Table composition hit a pattern with no defined image.
    #[error("Pattern {0:#b} has no image in the transition table")]
    OutsideDomain(u64),

    /// The counting register must contain at least one qubit.
    #[error("Counting register must have at least one qubit")]
    EmptyCountingRegister,

    /// An IR-level construction error.
    #[error(transparent)]
    Ir(#[from] skoll_ir::IrError),
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
