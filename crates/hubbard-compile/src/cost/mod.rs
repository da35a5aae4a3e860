//! Cost functions over parameterized circuits.
//!
//! A cost function borrows a circuit and a target unitary and maps a
//! parameter vector (bound to the circuit's symbols in first-appearance
//! order) to a real cost. Generators produce configured cost functions for
//! a circuit/target pair.

pub mod diagonal;
pub mod hilbert_schmidt;

pub use diagonal::{DiagonalCost, DiagonalCostGenerator};
pub use hilbert_schmidt::{HilbertSchmidtCost, HilbertSchmidtCostGenerator};

use hubbard_ir::Circuit;

use crate::error::CompileResult;
use crate::unitary::UnitaryMatrix;

/// A map from circuit parameters to a real cost.
pub trait CostFunction {
    /// The cost at `params`.
    fn get_cost(&self, params: &[f64]) -> CompileResult<f64>;
}

/// A cost function with an analytic gradient.
pub trait DifferentiableCostFunction: CostFunction {
    /// Gradient with respect to each parameter.
    fn get_grad(&self, params: &[f64]) -> CompileResult<Vec<f64>>;

    /// Cost and gradient together.
    fn get_cost_and_grad(&self, params: &[f64]) -> CompileResult<(f64, Vec<f64>)> {
        Ok((self.get_cost(params)?, self.get_grad(params)?))
    }
}

/// Factory for cost functions.
pub trait CostFunctionGenerator {
    /// A cost function comparing `circuit` against `target`.
    fn gen_cost<'a>(
        &self,
        circuit: &'a Circuit,
        target: &'a UnitaryMatrix,
    ) -> Box<dyn DifferentiableCostFunction + 'a>;
}
