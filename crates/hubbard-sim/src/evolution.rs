//! Time-evolution gate over a Pauli sum.

use hubbard_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimResult;
use crate::hamiltonian::Hamiltonian;
use crate::synthesis::append_exp_pauli;
use crate::trotter::EvolutionSynthesis;

/// The gate `exp(-i · time · H)`, together with the product formula used to
/// decompose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliEvolutionGate {
    operator: Hamiltonian,
    time: f64,
    synthesis: EvolutionSynthesis,
}

impl PauliEvolutionGate {
    /// Create the gate. Nothing is validated until [`Self::definition`].
    pub fn new(operator: Hamiltonian, time: f64, synthesis: EvolutionSynthesis) -> Self {
        Self {
            operator,
            time,
            synthesis,
        }
    }

    /// The evolved operator.
    pub fn operator(&self) -> &Hamiltonian {
        &self.operator
    }

    /// Evolution time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The product formula.
    pub fn synthesis(&self) -> EvolutionSynthesis {
        self.synthesis
    }

    /// Gate width, taken from the operator.
    pub fn num_qubits(&self) -> u32 {
        self.operator.num_qubits()
    }

    /// Gate name.
    pub fn name(&self) -> &'static str {
        "PauliEvolution"
    }

    /// Decompose into a circuit of basis changes, CNOT ladders and `Rz`.
    ///
    /// An operator without terms yields an empty circuit of the operator
    /// width.
    pub fn definition(&self) -> SimResult<Circuit> {
        let n_qubits = self.num_qubits();
        let schedule = self
            .synthesis
            .schedule(self.operator.n_terms(), self.time)?;

        debug!(
            n_terms = self.operator.n_terms(),
            n_steps = schedule.len(),
            n_qubits,
            synthesis = ?self.synthesis,
            "synthesising Pauli evolution circuit"
        );

        let mut circuit = Circuit::with_size(self.name(), n_qubits, 0);
        let terms = self.operator.terms();
        for (k, dt) in schedule {
            append_exp_pauli(&mut circuit, &terms[k], dt, n_qubits)?;
        }
        Ok(circuit)
    }
}
