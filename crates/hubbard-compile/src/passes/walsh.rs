//! Diagonal-unitary synthesis through the Walsh-Hadamard transform.
//!
//! A diagonal unitary `diag(e^{iφ(x)})` on `n` qubits factors as
//! `e^{i a_0} · Π_{k≠0} exp(i a_k Z_k)`, where `Z_k` is the Z-string
//! selected by the bits of `k` and `a = WHT(φ) / 2^n`. Each factor is a
//! parity ladder of CX gates, one `Rz(−2a_k)` and the ladder undone.

use hubbard_ir::{Circuit, CircuitDag, QubitId};
use tracing::debug;

use super::EPSILON;
use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::CircuitUnitary;

/// Off-diagonal entries above this magnitude reject the input.
const DIAGONAL_TOLERANCE: f64 = 1e-8;

/// Replace a circuit with a diagonal unitary by its Walsh synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalshDiagonalSynthesis;

impl WalshDiagonalSynthesis {
    /// Create a new Walsh synthesis pass.
    pub fn new() -> Self {
        Self
    }
}

/// In-place fast Walsh-Hadamard transform (unnormalized).
fn fwht(values: &mut [f64]) {
    let mut h = 1;
    while h < values.len() {
        for block in (0..values.len()).step_by(2 * h) {
            for i in block..block + h {
                let (a, b) = (values[i], values[i + h]);
                values[i] = a + b;
                values[i + h] = a - b;
            }
        }
        h *= 2;
    }
}

/// Walsh coefficients `a_k` of the phase function `φ`.
#[allow(clippy::cast_precision_loss)]
pub fn walsh_coefficients(phases: &[f64]) -> Vec<f64> {
    let mut a = phases.to_vec();
    fwht(&mut a);
    let n = a.len() as f64;
    a.iter_mut().for_each(|v| *v /= n);
    a
}

/// Qubits whose Z appears in string `k`, ascending.
#[allow(clippy::cast_possible_truncation)]
fn support(k: usize, num_qubits: usize) -> Vec<QubitId> {
    (0..num_qubits)
        .filter(|&j| (k >> (num_qubits - 1 - j)) & 1 == 1)
        .map(|j| QubitId(j as u32))
        .collect()
}

/// Circuit implementing `e^{iφ(x)}` on `num_qubits` qubits.
#[allow(clippy::cast_possible_truncation)]
pub fn synthesize_phases(phases: &[f64], num_qubits: usize) -> CompileResult<Circuit> {
    let coefficients = walsh_coefficients(phases);
    let mut circuit = Circuit::with_size("walsh", num_qubits as u32, 0);

    for (k, &a) in coefficients.iter().enumerate().skip(1) {
        if a.abs() <= EPSILON {
            continue;
        }
        let qubits = support(k, num_qubits);
        let Some((&target, _)) = qubits.split_last() else {
            continue;
        };
        for pair in qubits.windows(2) {
            circuit.cx(pair[0], pair[1])?;
        }
        circuit.rz(-2.0 * a, target)?;
        for pair in qubits.windows(2).rev() {
            circuit.cx(pair[0], pair[1])?;
        }
    }
    circuit.add_global_phase(coefficients.first().copied().unwrap_or(0.0));
    Ok(circuit)
}

impl Pass for WalshDiagonalSynthesis {
    fn name(&self) -> &'static str {
        "walsh_diagonal_synthesis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Synthesis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let unitary = dag.get_unitary(&[])?;
        if !unitary.is_diagonal(DIAGONAL_TOLERANCE) {
            return Err(CompileError::NotDiagonal);
        }

        let phases: Vec<f64> = unitary.diagonal().iter().map(|z| z.arg()).collect();
        let circuit = synthesize_phases(&phases, dag.num_qubits())?;
        debug!(
            "Walsh synthesis of {} qubits: {} ops",
            dag.num_qubits(),
            circuit.num_operations()
        );

        *dag = circuit.into_dag();
        properties.target = Some(unitary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fwht_round_trip() {
        let phases = [0.1, -0.4, 0.7, 0.25];
        let a = walsh_coefficients(&phases);
        // φ(x) = Σ_k a_k (−1)^{popcount(k & x)}
        for (x, &phi) in phases.iter().enumerate() {
            let rebuilt: f64 = a
                .iter()
                .enumerate()
                .map(|(k, v)| if (k & x).count_ones() % 2 == 0 { *v } else { -*v })
                .sum();
            assert!((rebuilt - phi).abs() < 1e-12);
        }
    }

    #[test]
    fn test_support_is_big_endian() {
        assert_eq!(support(0b100, 3), vec![QubitId(0)]);
        assert_eq!(support(0b011, 3), vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_synthesis_reproduces_unitary() {
        let mut c = Circuit::with_size("diag", 3, 0);
        c.pauli_z(
            [0.3, 0.1, -0.2, 0.05, 0.4, -0.6, 0.0, 0.15],
            &[QubitId(0), QubitId(1), QubitId(2)],
        )
        .unwrap();
        let expected = c.get_unitary(&[]).unwrap();

        let mut dag = c.into_dag();
        let mut props = PropertySet::new();
        WalshDiagonalSynthesis::new().run(&mut dag, &mut props).unwrap();

        let got = dag.get_unitary(&[]).unwrap();
        assert!(got.approx_eq(&expected, 1e-9));
        assert!(props.target.is_some());
        assert!(dag.topological_ops().all(|(_, op)| matches!(op.name(), "cx" | "rz")));
    }

    #[test]
    fn test_non_diagonal_is_rejected() {
        let mut c = Circuit::with_size("h", 1, 0);
        c.h(QubitId(0)).unwrap();
        let mut dag = c.into_dag();
        let result = WalshDiagonalSynthesis::new().run(&mut dag, &mut PropertySet::new());
        assert!(matches!(result, Err(CompileError::NotDiagonal)));
    }
}
