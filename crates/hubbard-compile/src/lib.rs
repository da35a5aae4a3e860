//! Hubbard compilation framework.
//!
//! This crate evaluates circuit unitaries (with parameter gradients), runs
//! pass pipelines over circuit DAGs, and synthesizes general diagonal gates
//! into CX/Rz circuits.
//!
//! # Architecture
//!
//! ```text
//! Circuit with pauliz gates
//!       │
//!       ▼  replace_pauliz (one Compiler session per gate)
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (target unitary, typed extras)
//! └─────────────┘
//!       │
//!       ├── WalshDiagonalSynthesis
//!       └── ScanningGateRemoval
//!       │
//!       ▼
//! Circuit with CX/Rz in place of each pauliz
//! ```
//!
//! # Example
//!
//! ```rust
//! use hubbard_compile::{CircuitUnitary, replace_pauliz};
//! use hubbard_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("diag", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit
//!     .pauli_z([0.0, 0.1, -0.4, 0.25], &[QubitId(0), QubitId(1)])
//!     .unwrap();
//!
//! let replaced = replace_pauliz(&circuit).unwrap();
//! assert!(replaced.operations().all(|op| !op.is_pauli_z()));
//!
//! let before = circuit.get_unitary(&[]).unwrap();
//! let after = replaced.get_unitary(&[]).unwrap();
//! assert!(before.approx_eq(&after, 1e-8));
//! ```
//!
//! # Cost functions
//!
//! [`DiagonalCost`] and [`HilbertSchmidtCost`] compare a parameterized
//! circuit with a target unitary; both are differentiable through
//! [`CircuitUnitary::get_unitary_and_grad`].

pub mod compiler;
pub mod cost;
pub mod diagonal;
pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;
pub mod unitary;

pub use compiler::Compiler;
pub use cost::{
    CostFunction, CostFunctionGenerator, DiagonalCost, DiagonalCostGenerator,
    DifferentiableCostFunction, HilbertSchmidtCost, HilbertSchmidtCostGenerator,
};
pub use diagonal::replace_pauliz;
pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::{Pass, PassKind};
pub use passes::{RemovedGates, ScanningGateRemoval, WalshDiagonalSynthesis};
pub use property::PropertySet;
pub use unitary::{
    CircuitUnitary, UnitaryMatrix, diagonal_distance, gate_gradient, gate_unitary,
    hilbert_schmidt_distance,
};
