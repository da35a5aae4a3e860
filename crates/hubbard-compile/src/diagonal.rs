//! Substitution of general diagonal gates by synthesized circuits.

use hubbard_ir::Circuit;
use tracing::debug;

use crate::compiler::Compiler;
use crate::error::CompileResult;
use crate::manager::PassManager;
use crate::passes::{ScanningGateRemoval, WalshDiagonalSynthesis};

/// Passes applied to each isolated `pauliz` operation.
fn diagonal_passes() -> PassManager {
    PassManager::new()
        .with_pass(WalshDiagonalSynthesis::new())
        .with_pass(ScanningGateRemoval::default())
}

/// Rebuild `circuit` with every `pauliz` gate replaced by an equivalent
/// CX/Rz circuit.
///
/// Operations keep their input order and every other operation is copied
/// unchanged. Each `pauliz` is compiled on its own, in a fresh session, and
/// spliced back at its original location.
#[allow(clippy::cast_possible_truncation)]
pub fn replace_pauliz(circuit: &Circuit) -> CompileResult<Circuit> {
    let mut rebuilt = Circuit::with_size(
        circuit.name(),
        circuit.num_qubits() as u32,
        circuit.num_clbits() as u32,
    );
    rebuilt.add_global_phase(circuit.global_phase());

    let mut replaced = 0;
    for op in circuit.operations() {
        if op.is_pauli_z() {
            let diagonal = Circuit::from_operation(op)?;
            let mut compiler = Compiler::new();
            let synthesized = compiler.compile(diagonal, &diagonal_passes())?;
            rebuilt.append_circuit(&synthesized, &op.qubits)?;
            replaced += 1;
        } else {
            rebuilt.append(op.clone())?;
        }
    }

    debug!("Replaced {} pauliz gates", replaced);
    Ok(rebuilt)
}
