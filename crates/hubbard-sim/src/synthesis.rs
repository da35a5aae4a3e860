//! Pauli-string exponentiation.
//!
//! Implements the standard gate synthesis for
//!
//!   exp(-i · coeff · t · P)
//!
//! where P is a tensor product of Pauli operators, using the circuit identity:
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!   Z → identity
//!
//! Gate count per term: 2·(k-1) CX + 2·k basis gates + 1 Rz,
//! where k = number of non-identity qubits.

use hubbard_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{HamiltonianTerm, PauliOp};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// `n_qubits` is the total width of the circuit (used for bounds checking
/// only; the circuit must already have been allocated with that many qubits).
///
/// An identity string contributes only the global phase `-coeff · t`.
pub fn append_exp_pauli(
    circuit: &mut Circuit,
    term: &HamiltonianTerm,
    t: f64,
    n_qubits: u32,
) -> SimResult<()> {
    let ops = term.pauli.ops();
    let Some(&(last, _)) = ops.last() else {
        circuit.add_global_phase(-term.coeff * t);
        return Ok(());
    };

    for &(q, _) in ops {
        if q >= n_qubits {
            return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
        }
    }

    // Rz(θ) implements exp(-i θ/2 Z).
    let theta = 2.0 * term.coeff * t;

    basis_change(circuit, ops, false)?;

    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();
    cnot_ladder(circuit, &qubits)?;

    circuit.rz(theta, QubitId(last))?;

    cnot_ladder_reverse(circuit, &qubits)?;
    basis_change(circuit, ops, true)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rotate each factor into the Z basis, or back when `undo` is set.
///
///   X → H            (undo: H)
///   Y → Sdg · H      (undo: H · S)
fn basis_change(circuit: &mut Circuit, ops: &[(u32, PauliOp)], undo: bool) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                circuit.h(qid)?;
            }
            (PauliOp::Y, false) => {
                circuit.sdg(qid)?.h(qid)?;
            }
            (PauliOp::Y, true) => {
                circuit.h(qid)?.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// CX(q[0],q[1]), CX(q[1],q[2]), …: collects the parity onto the last qubit.
fn cnot_ladder(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2) {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

fn cnot_ladder_reverse(circuit: &mut Circuit, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2).rev() {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}
