//! Tests for the diagonal and Hilbert-Schmidt cost functions.

use hubbard_compile::{
    CircuitUnitary, CostFunction, CostFunctionGenerator, DiagonalCost, DiagonalCostGenerator,
    DifferentiableCostFunction, HilbertSchmidtCostGenerator, UnitaryMatrix,
};
use hubbard_ir::{Circuit, QubitId};
use num_complex::Complex64;
use proptest::prelude::*;

fn ansatz() -> Circuit {
    let mut c = Circuit::with_size("ansatz", 2, 0);
    c.ry("a", QubitId(0)).unwrap();
    c.rx("b", QubitId(1)).unwrap();
    c.cx(QubitId(0), QubitId(1)).unwrap();
    c.rzz("c", QubitId(0), QubitId(1)).unwrap();
    c.ry("a", QubitId(1)).unwrap();
    c
}

fn phases(angles: &[f64]) -> UnitaryMatrix {
    let entries: Vec<Complex64> = angles
        .iter()
        .map(|&a| Complex64::from_polar(1.0, a))
        .collect();
    UnitaryMatrix::from_diagonal(&entries).unwrap()
}

// ---------------------------------------------------------------------------
// Diagonal equivalence
// ---------------------------------------------------------------------------

#[test]
fn diagonal_cost_vanishes_on_diagonal_equivalent_target() {
    let circuit = ansatz();
    let params = [0.4, -1.1, 0.7];
    let u = circuit.get_unitary(&params).unwrap();
    let target = phases(&[0.2, 1.3, -0.8, 2.1]).dot(&u).unwrap();

    let cost = DiagonalCostGenerator.gen_cost(&circuit, &target);
    assert!(cost.get_cost(&params).unwrap() < 1e-10);
}

#[test]
fn diagonal_cost_is_positive_otherwise() {
    let circuit = ansatz();
    let target = ansatz().get_unitary(&[0.4, -1.1, 0.7]).unwrap();
    let cost = DiagonalCost::new(&circuit, &target);
    assert!(cost.get_cost(&[1.5, 0.3, -0.2]).unwrap() > 1e-3);
}

#[test]
fn hilbert_schmidt_is_phase_blind_but_not_diagonal_blind() {
    let circuit = ansatz();
    let params = [0.4, -1.1, 0.7];
    let u = circuit.get_unitary(&params).unwrap();

    let mut shifted = u.clone();
    shifted.scale(Complex64::from_polar(1.0, 0.9));
    let cost = HilbertSchmidtCostGenerator.gen_cost(&circuit, &shifted);
    assert!(cost.get_cost(&params).unwrap() < 1e-10);

    let relative = phases(&[0.0, 1.0, 0.0, 1.0]).dot(&u).unwrap();
    let cost = HilbertSchmidtCostGenerator.gen_cost(&circuit, &relative);
    assert!(cost.get_cost(&params).unwrap() > 1e-3);
}

#[test]
fn wrong_parameter_count_is_an_error() {
    let circuit = ansatz();
    let target = UnitaryMatrix::identity(2);
    let cost = DiagonalCostGenerator.gen_cost(&circuit, &target);
    assert!(cost.get_cost(&[0.1]).is_err());
    assert!(cost.get_grad(&[0.1, 0.2, 0.3, 0.4]).is_err());
}

// ---------------------------------------------------------------------------
// Gradients
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn diagonal_gradient_matches_infidelity(
        params in prop::collection::vec(-2.0_f64..2.0, 3),
        shift in prop::collection::vec(-1.0_f64..1.0, 3),
    ) {
        let circuit = ansatz();
        let moved: Vec<f64> = params.iter().zip(&shift).map(|(p, s)| p + s).collect();
        let target = circuit.get_unitary(&moved).unwrap();
        let cost = DiagonalCost::new(&circuit, &target);

        let grad = cost.get_grad(&params).unwrap();
        prop_assert_eq!(grad.len(), 3);

        let h = 1e-6;
        for k in 0..3 {
            let mut plus = params.clone();
            let mut minus = params.clone();
            plus[k] += h;
            minus[k] -= h;
            let fd = (cost.infidelity_and_grad(&plus).unwrap().0
                - cost.infidelity_and_grad(&minus).unwrap().0)
                / (2.0 * h);
            prop_assert!((fd - grad[k]).abs() < 1e-5, "k={} fd={} grad={}", k, fd, grad[k]);
        }
    }
}
