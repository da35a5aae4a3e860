//! Error types for the chem crate.

use thiserror::Error;

/// Errors produced while building UCCSD generators and their evolutions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChemError {
    /// Spin-orbital count must be even (one up and one down per spatial orbital).
    #[error("The total number of spin-orbitals should be even, got {0}")]
    OddSpinOrbitals(u32),

    /// More occupied spatial orbitals than exist.
    #[error("{n_electrons} electrons do not fit in {n_qubits} spin-orbitals")]
    TooManyElectrons {
        /// Number of electrons.
        n_electrons: u32,
        /// Number of spin-orbitals.
        n_qubits: u32,
    },

    /// Packed amplitude vector has the wrong length.
    #[error("Expected {expected} packed amplitudes, got {got}")]
    AmplitudeCount {
        /// Required length.
        expected: usize,
        /// Provided length.
        got: usize,
    },

    /// Unknown Trotterization mode string.
    #[error("Invalid trotter_mode '{0}'. Must be either \"suzuki\" or \"lie\"")]
    InvalidTrotterMode(String),

    /// A transformed term acts on a qubit outside the register.
    #[error("Qubit operator acts on qubit {index} but only {n_qubits} qubits are available")]
    QubitOutOfRange {
        /// The offending qubit index.
        index: u32,
        /// Register width.
        n_qubits: u32,
    },

    /// Operator or evolution-gate construction failed.
    #[error("Simulation error: {0}")]
    Sim(#[from] hubbard_sim::SimError),
}

/// Result type for chem operations.
pub type ChemResult<T> = Result<T, ChemError>;
