//! Greedy gate removal under a unitary-distance budget.

use hubbard_ir::{CircuitDag, NodeIndex};
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::{CircuitUnitary, hilbert_schmidt_distance};

/// Number of gates removed by the last [`ScanningGateRemoval`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedGates(pub usize);

/// Try removing each gate in turn and keep every removal whose result
/// stays within `success_threshold` of the target unitary.
///
/// The target is [`PropertySet::target`] when a previous pass set it, and
/// the input circuit's unitary otherwise. The output's global phase is
/// adjusted so its unitary matches the target, not just up to phase.
#[derive(Debug, Clone, Copy)]
pub struct ScanningGateRemoval {
    /// Largest accepted Hilbert-Schmidt distance to the target.
    pub success_threshold: f64,
    /// Scan from the first operation (`true`) or the last.
    pub start_from_left: bool,
}

impl Default for ScanningGateRemoval {
    fn default() -> Self {
        Self {
            success_threshold: 1e-8,
            start_from_left: true,
        }
    }
}

impl ScanningGateRemoval {
    /// Create a pass with a custom threshold, scanning from the left.
    pub fn new(success_threshold: f64) -> Self {
        Self {
            success_threshold,
            ..Self::default()
        }
    }

    /// Scan from the last operation instead.
    #[must_use]
    pub fn from_right(mut self) -> Self {
        self.start_from_left = false;
        self
    }
}

impl Pass for ScanningGateRemoval {
    fn name(&self) -> &'static str {
        "scanning_gate_removal"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let target = match &properties.target {
            Some(target) => target.clone(),
            None => dag.get_unitary(&[])?,
        };
        let mut current = dag.clone();
        // Node indices in the original topological order; `None` once removed.
        let mut nodes: Vec<Option<NodeIndex>> =
            current.topological_ops().map(|(node, _)| Some(node)).collect();
        let total = nodes.len();

        let order: Vec<usize> = if self.start_from_left {
            (0..total).collect()
        } else {
            (0..total).rev().collect()
        };

        for idx in order {
            let Some(node) = nodes[idx] else { continue };
            let mut candidate = current.clone();
            let last = NodeIndex::new(candidate.graph().node_count() - 1);
            let op = candidate.remove_op(node)?;
            let distance = hilbert_schmidt_distance(&target, &candidate.get_unitary(&[])?)?;
            if distance > self.success_threshold {
                continue;
            }
            trace!("Removed {} (distance {:.3e})", op, distance);
            current = candidate;
            nodes[idx] = None;
            // remove_op moved the last node into the freed slot.
            for other in nodes.iter_mut().flatten() {
                if *other == last {
                    *other = node;
                }
            }
        }

        // Align the global phase with the target: U' · e^{i arg Tr(U'† T)} ≈ T.
        let overlap: Complex64 = current.get_unitary(&[])?.inner(&target)?;
        current.set_global_phase(current.global_phase() + overlap.arg());

        let removed = nodes.iter().filter(|n| n.is_none()).count();
        debug!("Scanning removed {} of {} operations", removed, total);
        properties.insert(RemovedGates(removed));

        *dag = current;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubbard_ir::{Circuit, ClbitId, QubitId};

    #[test]
    fn test_removes_trivial_gates() {
        let mut c = Circuit::with_size("redundant", 2, 0);
        c.cx(QubitId(0), QubitId(1)).unwrap();
        c.rz(0.0, QubitId(0)).unwrap();
        c.rz(0.4, QubitId(1)).unwrap();
        c.rz(2.0 * std::f64::consts::PI, QubitId(1)).unwrap();
        let expected = c.get_unitary(&[]).unwrap();

        let mut dag = c.into_dag();
        let mut props = PropertySet::new();
        ScanningGateRemoval::default().run(&mut dag, &mut props).unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(props.get::<RemovedGates>(), Some(&RemovedGates(2)));
        assert!(dag.get_unitary(&[]).unwrap().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn test_single_removals_only() {
        // Z · Z cancels as a pair, but neither Z can go on its own.
        let mut c = Circuit::with_size("phases", 1, 0);
        c.z(QubitId(0)).unwrap();
        c.t(QubitId(0)).unwrap();
        c.p(0.0, QubitId(0)).unwrap();
        c.z(QubitId(0)).unwrap();
        let expected = c.get_unitary(&[]).unwrap();

        let mut dag = c.into_dag();
        ScanningGateRemoval::default()
            .from_right()
            .run(&mut dag, &mut PropertySet::new())
            .unwrap();

        assert_eq!(dag.num_ops(), 3);
        assert!(dag.get_unitary(&[]).unwrap().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn test_global_phase_is_restored() {
        // Rz(2π) = −I: removable up to phase, and the phase must be fixed.
        let mut c = Circuit::with_size("rz2pi", 1, 0);
        c.rz(2.0 * std::f64::consts::PI, QubitId(0)).unwrap();
        let expected = c.get_unitary(&[]).unwrap();

        let mut dag = c.into_dag();
        ScanningGateRemoval::default()
            .run(&mut dag, &mut PropertySet::new())
            .unwrap();

        assert_eq!(dag.num_ops(), 0);
        assert!(dag.get_unitary(&[]).unwrap().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn test_removal_keeps_dag_wiring() {
        // Removals in the middle of the graph shuffle node indices.
        let mut c = Circuit::with_size("wiring", 3, 1);
        c.h(QubitId(0)).unwrap();
        c.rz(0.0, QubitId(1)).unwrap();
        c.cx(QubitId(0), QubitId(2)).unwrap();
        c.p(0.0, QubitId(2)).unwrap();
        c.rx(0.3, QubitId(1)).unwrap();
        c.rz(0.0, QubitId(0)).unwrap();
        c.cx(QubitId(1), QubitId(2)).unwrap();
        let expected = c.get_unitary(&[]).unwrap();

        let mut dag = c.into_dag();
        let mut props = PropertySet::new();
        ScanningGateRemoval::default().run(&mut dag, &mut props).unwrap();

        dag.verify_integrity().unwrap();
        assert_eq!(dag.num_ops(), 4);
        assert_eq!(dag.num_qubits(), 3);
        assert_eq!(dag.clbits(), vec![ClbitId(0)]);
        assert_eq!(props.get::<RemovedGates>(), Some(&RemovedGates(3)));
        assert!(dag.get_unitary(&[]).unwrap().approx_eq(&expected, 1e-9));
    }
}
