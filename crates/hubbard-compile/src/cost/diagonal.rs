//! Distance from being correctable by a diagonal unitary.

use hubbard_ir::Circuit;

use super::{CostFunction, CostFunctionGenerator, DifferentiableCostFunction};
use crate::error::CompileResult;
use crate::unitary::{CircuitUnitary, UnitaryMatrix, diagonal_distance};

/// Cost that is zero when the circuit equals the target up to a diagonal
/// factor, i.e. `U(θ) · T†` is diagonal.
///
/// The gradient is that of the infidelity `1 − |⟨T, U(θ)⟩|²`, not of
/// [`CostFunction::get_cost`]; [`Self::infidelity_and_grad`] exposes the
/// pair.
#[derive(Debug, Clone, Copy)]
pub struct DiagonalCost<'a> {
    circuit: &'a Circuit,
    target: &'a UnitaryMatrix,
}

impl<'a> DiagonalCost<'a> {
    /// Borrow a circuit and its target.
    pub fn new(circuit: &'a Circuit, target: &'a UnitaryMatrix) -> Self {
        Self { circuit, target }
    }

    /// The circuit being evaluated.
    pub fn circuit(&self) -> &'a Circuit {
        self.circuit
    }

    /// The target unitary.
    pub fn target(&self) -> &'a UnitaryMatrix {
        self.target
    }

    /// `1 − |d|²` with `d = ⟨T, U(θ)⟩`, and its gradient
    /// `−2(Re d · Re⟨T, ∂U⟩ + Im d · Im⟨T, ∂U⟩)`.
    pub fn infidelity_and_grad(&self, params: &[f64]) -> CompileResult<(f64, Vec<f64>)> {
        let (unitary, jacobian) = self.circuit.get_unitary_and_grad(params)?;
        let d = self.target.inner(&unitary)?;
        let infidelity = 1.0 - d.norm_sqr();
        let grad = jacobian
            .iter()
            .map(|dj| {
                let dd = self.target.inner(dj)?;
                Ok(-2.0 * (d.re * dd.re + d.im * dd.im))
            })
            .collect::<CompileResult<Vec<f64>>>()?;
        Ok((infidelity, grad))
    }
}

impl CostFunction for DiagonalCost<'_> {
    fn get_cost(&self, params: &[f64]) -> CompileResult<f64> {
        let remainder = self
            .circuit
            .get_unitary(params)?
            .dot(&self.target.dagger())?;
        Ok(diagonal_distance(&remainder))
    }
}

impl DifferentiableCostFunction for DiagonalCost<'_> {
    fn get_grad(&self, params: &[f64]) -> CompileResult<Vec<f64>> {
        Ok(self.infidelity_and_grad(params)?.1)
    }
}

/// Produces [`DiagonalCost`] functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagonalCostGenerator;

impl CostFunctionGenerator for DiagonalCostGenerator {
    fn gen_cost<'a>(
        &self,
        circuit: &'a Circuit,
        target: &'a UnitaryMatrix,
    ) -> Box<dyn DifferentiableCostFunction + 'a> {
        Box::new(DiagonalCost::new(circuit, target))
    }
}
