//! Global-phase-insensitive distance to a target unitary.

use hubbard_ir::Circuit;

use super::{CostFunction, CostFunctionGenerator, DifferentiableCostFunction};
use crate::error::CompileResult;
use crate::unitary::{CircuitUnitary, UnitaryMatrix, hilbert_schmidt_distance};

/// `1 − |Tr(T† U(θ))| / N`.
#[derive(Debug, Clone, Copy)]
pub struct HilbertSchmidtCost<'a> {
    circuit: &'a Circuit,
    target: &'a UnitaryMatrix,
}

impl<'a> HilbertSchmidtCost<'a> {
    /// Borrow a circuit and its target.
    pub fn new(circuit: &'a Circuit, target: &'a UnitaryMatrix) -> Self {
        Self { circuit, target }
    }
}

impl CostFunction for HilbertSchmidtCost<'_> {
    fn get_cost(&self, params: &[f64]) -> CompileResult<f64> {
        hilbert_schmidt_distance(self.target, &self.circuit.get_unitary(params)?)
    }
}

impl DifferentiableCostFunction for HilbertSchmidtCost<'_> {
    /// `−Re(conj(t) · Tr(T† ∂U)) / (|t| N)` with `t = Tr(T† U)`; zero where
    /// `t` vanishes.
    #[allow(clippy::cast_precision_loss)]
    fn get_grad(&self, params: &[f64]) -> CompileResult<Vec<f64>> {
        let (unitary, jacobian) = self.circuit.get_unitary_and_grad(params)?;
        let t = self.target.inner(&unitary)?;
        let n = unitary.dim() as f64;
        if t.norm() == 0.0 {
            return Ok(vec![0.0; jacobian.len()]);
        }
        jacobian
            .iter()
            .map(|dj| {
                let dt = self.target.inner(dj)?;
                Ok(-(t.conj() * dt).re / (t.norm() * n))
            })
            .collect()
    }
}

/// Produces [`HilbertSchmidtCost`] functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HilbertSchmidtCostGenerator;

impl CostFunctionGenerator for HilbertSchmidtCostGenerator {
    fn gen_cost<'a>(
        &self,
        circuit: &'a Circuit,
        target: &'a UnitaryMatrix,
    ) -> Box<dyn DifferentiableCostFunction + 'a> {
        Box::new(HilbertSchmidtCost::new(circuit, target))
    }
}
