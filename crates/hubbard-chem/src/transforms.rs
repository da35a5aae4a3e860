//! Fermion-to-qubit mappings.
//!
//! Both mappings expand every ladder operator into a two-term Pauli sum,
//! multiply those sums term by term starting from `coeff · I`, and add the
//! products with cancellation below [`EQ_TOLERANCE`](crate::EQ_TOLERANCE).

use std::collections::BTreeSet;

use hubbard_sim::{PauliOp, PauliString};
use num_complex::Complex64;
use tracing::warn;

use crate::fermion::{FermionOperator, Ladder};
use crate::qubit_operator::QubitOperator;

/// A fermion-to-qubit mapping usable by [`singlet_evolution`](crate::singlet_evolution).
pub type FermionTransform = dyn Fn(&FermionOperator) -> QubitOperator;

/// Apply `ladder_op` to each term and sum the products.
fn map_terms(
    op: &FermionOperator,
    ladder_op: impl Fn(u32, Ladder) -> QubitOperator,
) -> QubitOperator {
    let mut out = QubitOperator::zero();
    for (ops, coeff) in op.terms() {
        let mut product = QubitOperator::identity(*coeff);
        for &(mode, action) in ops {
            product = &product * &ladder_op(mode, action);
        }
        out += &product;
    }
    out
}

// ---------------------------------------------------------------------------
// Jordan-Wigner
// ---------------------------------------------------------------------------

/// Jordan-Wigner mapping.
///
/// `a†_p ↦ ½ Z_{<p} X_p − ½i Z_{<p} Y_p` and
/// `a_p ↦ ½ Z_{<p} X_p + ½i Z_{<p} Y_p`.
pub fn jordan_wigner(op: &FermionOperator) -> QubitOperator {
    map_terms(op, jw_ladder)
}

fn jw_ladder(mode: u32, action: Ladder) -> QubitOperator {
    let z_string = (0..mode).map(|q| (q, PauliOp::Z));
    let x = PauliString::from_ops(z_string.clone().chain([(mode, PauliOp::X)]));
    let y = PauliString::from_ops(z_string.chain([(mode, PauliOp::Y)]));
    let y_coeff = match action {
        Ladder::Create => Complex64::new(0.0, -0.5),
        Ladder::Annihilate => Complex64::new(0.0, 0.5),
    };
    QubitOperator::term(x, 0.5) + QubitOperator::term(y, y_coeff)
}

// ---------------------------------------------------------------------------
// Bravyi-Kitaev
// ---------------------------------------------------------------------------

/// Bravyi-Kitaev mapping on `op.num_modes()` qubits.
pub fn bravyi_kitaev(op: &FermionOperator) -> QubitOperator {
    bravyi_kitaev_on(op, op.num_modes())
}

/// Bravyi-Kitaev mapping on a fixed register width.
///
/// A width smaller than the operator's mode count is enlarged to fit.
pub fn bravyi_kitaev_with(n_qubits: u32) -> impl Fn(&FermionOperator) -> QubitOperator {
    move |op| {
        let modes = op.num_modes();
        if modes > n_qubits {
            warn!(
                "Bravyi-Kitaev width {} is smaller than {} modes; using {}",
                n_qubits, modes, modes
            );
        }
        bravyi_kitaev_on(op, n_qubits.max(modes))
    }
}

fn bravyi_kitaev_on(op: &FermionOperator, n_qubits: u32) -> QubitOperator {
    map_terms(op, |mode, action| bk_ladder(mode, action, n_qubits))
}

fn bk_ladder(mode: u32, action: Ladder, n_qubits: u32) -> QubitOperator {
    let update = update_set(mode, n_qubits);
    let occupation = occupation_set(mode);
    let parity = match mode {
        0 => BTreeSet::new(),
        m => parity_set(m - 1),
    };

    let majorana_sum = PauliString::from_ops(
        update
            .iter()
            .map(|&q| (q, PauliOp::X))
            .chain(parity.iter().map(|&q| (q, PauliOp::Z))),
    );
    let majorana_diff = PauliString::from_ops(
        std::iter::once((mode, PauliOp::Y))
            .chain(update.iter().filter(|&&q| q != mode).map(|&q| (q, PauliOp::X)))
            .chain(
                parity
                    .symmetric_difference(&occupation)
                    .filter(|&&q| q != mode)
                    .map(|&q| (q, PauliOp::Z)),
            ),
    );

    let sum = QubitOperator::term(majorana_sum, 0.5);
    let diff = QubitOperator::term(majorana_diff, Complex64::new(0.0, -0.5));
    match action {
        Ladder::Create => sum + diff,
        Ladder::Annihilate => sum - diff,
    }
}

/// Qubits storing a sum that includes mode `index`.
fn update_set(index: u32, n_qubits: u32) -> BTreeSet<u32> {
    let mut set = BTreeSet::new();
    let mut i = index + 1;
    while i <= n_qubits {
        set.insert(i - 1);
        i += i & i.wrapping_neg();
    }
    set
}

/// Qubits whose parity gives the occupation of mode `index`.
fn occupation_set(index: u32) -> BTreeSet<u32> {
    let mut set = BTreeSet::new();
    let mut i = index + 1;
    set.insert(i - 1);
    let parent = i & (i - 1);
    i -= 1;
    while i != parent {
        set.insert(i - 1);
        i &= i - 1;
    }
    set
}

/// Qubits whose parity gives the parity of modes `0..=index`.
fn parity_set(index: u32) -> BTreeSet<u32> {
    let mut set = BTreeSet::new();
    let mut i = index + 1;
    while i > 0 {
        set.insert(i - 1);
        i &= i - 1;
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(v: &[u32]) -> BTreeSet<u32> {
        v.iter().copied().collect()
    }

    #[test]
    fn test_fenwick_sets() {
        assert_eq!(update_set(0, 8), set(&[0, 1, 3, 7]));
        assert_eq!(update_set(4, 8), set(&[4, 5, 7]));
        assert_eq!(update_set(3, 3), set(&[]));
        assert_eq!(occupation_set(0), set(&[0]));
        assert_eq!(occupation_set(3), set(&[1, 2, 3]));
        assert_eq!(occupation_set(5), set(&[4, 5]));
        assert_eq!(parity_set(2), set(&[1, 2]));
        assert_eq!(parity_set(6), set(&[3, 5, 6]));
    }

    #[test]
    fn test_jw_number_operator() {
        let n1 = FermionOperator::term([(1, Ladder::Create), (1, Ladder::Annihilate)], 1.0);
        let q = jordan_wigner(&n1);
        assert_eq!(q.len(), 2);
        let id = q.coefficient(&PauliString::identity()).unwrap();
        let z1 = q.coefficient(&PauliString::zz([1])).unwrap();
        assert!((id - Complex64::new(0.5, 0.0)).norm() < 1e-12);
        assert!((z1 - Complex64::new(-0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_bk_number_operator() {
        let n1 = FermionOperator::term([(1, Ladder::Create), (1, Ladder::Annihilate)], 1.0);
        let q = bravyi_kitaev(&n1);
        assert_eq!(q.len(), 2);
        let id = q.coefficient(&PauliString::identity()).unwrap();
        let zz = q.coefficient(&PauliString::zz([0, 1])).unwrap();
        assert!((id - Complex64::new(0.5, 0.0)).norm() < 1e-12);
        assert!((zz - Complex64::new(-0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_bk_wider_register_is_not_narrowed() {
        let n0 = FermionOperator::term([(3, Ladder::Create), (3, Ladder::Annihilate)], 1.0);
        let narrow = bravyi_kitaev_with(2)(&n0);
        assert_eq!(narrow, bravyi_kitaev(&n0));
    }

    #[test]
    fn test_hermitian_hopping_is_real() {
        let hop = {
            let mut op = FermionOperator::term([(2, Ladder::Create), (0, Ladder::Annihilate)], 1.0);
            op += FermionOperator::term([(0, Ladder::Create), (2, Ladder::Annihilate)], 1.0);
            op
        };
        for q in [jordan_wigner(&hop), bravyi_kitaev(&hop)] {
            assert!(!q.is_empty());
            for (_, c) in q.terms() {
                assert!(c.im.abs() < 1e-12);
            }
        }
    }
}
