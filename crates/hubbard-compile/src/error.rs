//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during compilation and unitary evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] hubbard_ir::IrError),

    /// Parameter vector length does not match the circuit's free symbols.
    #[error("Expected {expected} parameters, got {got}")]
    ParameterCount {
        /// Number of free symbols.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Instruction has no unitary (measure, reset).
    #[error("Instruction '{0}' is not unitary")]
    NonUnitaryInstruction(String),

    /// Gate without a known matrix.
    #[error("Gate '{0}' has no matrix representation")]
    UnsupportedGate(String),

    /// A parameter expression could not be evaluated.
    #[error("Parameter expression '{0}' could not be evaluated")]
    UnboundParameter(String),

    /// Diagonal synthesis was given a non-diagonal unitary.
    #[error("Circuit unitary is not diagonal")]
    NotDiagonal,

    /// Matrix dimensions disagree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Required dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },

    /// Pass execution failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Pass name.
        name: String,
        /// Failure description.
        reason: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
