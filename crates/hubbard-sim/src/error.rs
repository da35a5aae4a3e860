//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by operator construction and evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but circuit only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target circuit.
        n_qubits: u32,
    },

    /// A Pauli label contains a character outside `IXYZ`.
    #[error("Invalid character '{ch}' in Pauli label \"{label}\"")]
    InvalidLabel {
        /// The offending label.
        label: String,
        /// The offending character.
        ch: char,
    },

    /// Labels of one operator have different lengths.
    #[error("Pauli label has length {got}, expected {expected}")]
    LabelLengthMismatch {
        /// Length of the first label.
        expected: usize,
        /// Length of the offending label.
        got: usize,
    },

    /// Label and coefficient sequences differ in length.
    #[error("Got {labels} Pauli labels but {coeffs} coefficients")]
    CoefficientCountMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of coefficients.
        coeffs: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] hubbard_ir::IrError),

    /// reps must be ≥ 1.
    #[error("reps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Product-formula order must be 1 or even.
    #[error("Suzuki order must be 1 or a positive even number, got {0}")]
    InvalidOrder(u32),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
