//! Pauli-sum operators and their time-evolution circuits.
//!
//! Converts a sum-of-Paulis operator into a `hubbard_ir::Circuit` that
//! approximates `exp(-i H t)` using Lie-Trotter or Suzuki-Trotter product
//! formulas.
//!
//! # Quick start
//!
//! ```rust
//! use hubbard_sim::{EvolutionSynthesis, Hamiltonian, PauliEvolutionGate};
//!
//! let h = Hamiltonian::from_labels(&["ZZ", "XI", "IX"], &[-1.0, -0.5, -0.5]).unwrap();
//! let gate = PauliEvolutionGate::new(h, 1.0, EvolutionSynthesis::suzuki_trotter(2));
//! let circuit = gate.definition().unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod error;
pub mod evolution;
pub mod hamiltonian;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use evolution::PauliEvolutionGate;
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use trotter::EvolutionSynthesis;
