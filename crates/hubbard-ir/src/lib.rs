//! Hubbard circuit intermediate representation
//!
//! Core data structures for the circuits produced by UCCSD evolution and
//! consumed by diagonal synthesis.
//!
//! # Overview
//!
//! Circuits are stored as a DAG of wires internally. The high-level
//! [`Circuit`] API appends operations in order and hands them back in the
//! same order, which is what parameter numbering, printing and splicing
//! (see [`Circuit::append_circuit`]) rely on.
//!
//! # Core Components
//!
//! - **Wires**: [`QubitId`], [`ClbitId`]; a location is a `&[QubitId]`
//! - **Gates**: [`StandardGate`] (including the general diagonal
//!   [`StandardGate::PauliZ`]) and [`CustomGate`]
//! - **Parameters**: [`ParameterExpression`] with evaluation and derivatives
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] builder API
//! - **Printing**: [`printing::print_circuit`] for plain-text listings
//!
//! # Example: A diagonal gate
//!
//! ```rust
//! use hubbard_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("diag", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit
//!     .pauli_z([0.0, 0.1, 0.2, 0.3], &[QubitId(0), QubitId(1)])
//!     .unwrap();
//!
//! assert_eq!(circuit.num_operations(), 2);
//! assert!(circuit.operations().nth(1).unwrap().is_pauli_z());
//! ```
//!
//! # Example: Parameterized Circuit
//!
//! ```rust
//! use hubbard_ir::{Circuit, QubitId, ParameterExpression};
//!
//! let mut circuit = Circuit::with_size("variational", 1, 0);
//! let theta = ParameterExpression::symbol("theta");
//! circuit.rx(theta.clone(), QubitId(0)).unwrap();
//!
//! assert_eq!(circuit.parameter_names(), vec!["theta".to_string()]);
//! assert_eq!(theta.as_f64(), None);
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod printing;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterBindings, ParameterExpression};
pub use printing::{format_circuit, format_operation, print_circuit, write_circuit};
pub use qubit::{ClbitId, QubitId, location};
