//! UCCSD singlet generators mapped to qubit evolutions.
//!
//! The pipeline is
//!
//! 1. [`uccsd_singlet_generator`] builds the fermionic `T − T†` from packed
//!    amplitudes,
//! 2. a [`FermionTransform`] such as [`jordan_wigner`] or [`bravyi_kitaev`]
//!    maps it to a [`QubitOperator`],
//! 3. [`singlet_evolution`] keeps the imaginary coefficients and wraps them
//!    in a [`hubbard_sim::PauliEvolutionGate`] for unit time.
//!
//! # Example
//!
//! ```rust
//! use hubbard_chem::{SingletEvolution, bravyi_kitaev};
//!
//! let builder = SingletEvolution::new(4, 2)
//!     .with_transform(&bravyi_kitaev)
//!     .with_trotter_mode("lie");
//! let amps = vec![0.05; builder.paramsize().unwrap()];
//! let circuit = builder.build(&amps).unwrap().definition().unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! ```

pub mod error;
pub mod evolution;
pub mod fermion;
pub mod qubit_operator;
pub mod transforms;
pub mod uccsd;

pub use error::{ChemError, ChemResult};
pub use evolution::{SingletEvolution, TrotterMode, singlet_evolution, singlet_terms};
pub use fermion::{EQ_TOLERANCE, FermionOperator, FermionTerm, Ladder};
pub use qubit_operator::{QubitOperator, pauli_product};
pub use transforms::{FermionTransform, bravyi_kitaev, bravyi_kitaev_with, jordan_wigner};
pub use uccsd::{uccsd_singlet_generator, uccsd_singlet_paramsize};
pub use uccsd::uccsd_singlet_paramsize as singlet_paramsize;
