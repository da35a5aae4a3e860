//! Fermionic ladder-operator sums.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use num_complex::Complex64;

/// Coefficients whose magnitude falls below this after a sum are dropped.
pub const EQ_TOLERANCE: f64 = 1e-8;

/// Creation or annihilation. Ordered `Annihilate < Create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ladder {
    /// Annihilation operator a_p.
    Annihilate,
    /// Creation operator a†_p.
    Create,
}

/// An ordered product of ladder operators, e.g. `a†_3 a_1`.
pub type FermionTerm = Vec<(u32, Ladder)>;

/// A sum of ladder-operator products with complex coefficients.
///
/// Products are stored exactly as written (no normal ordering).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FermionOperator {
    terms: BTreeMap<FermionTerm, Complex64>,
}

impl FermionOperator {
    /// The zero operator.
    pub fn zero() -> Self {
        Self::default()
    }

    /// `coeff · 1`.
    pub fn identity(coeff: impl Into<Complex64>) -> Self {
        Self::term(Vec::new(), coeff)
    }

    /// A single product with a coefficient.
    pub fn term(ops: impl IntoIterator<Item = (u32, Ladder)>, coeff: impl Into<Complex64>) -> Self {
        let mut op = Self::zero();
        op.add_term(ops.into_iter().collect(), coeff.into());
        op
    }

    /// Add `coeff` to the coefficient of `ops`, dropping the term if the sum
    /// is below [`EQ_TOLERANCE`].
    pub fn add_term(&mut self, ops: FermionTerm, coeff: Complex64) {
        let sum = self.terms.get(&ops).copied().unwrap_or_default() + coeff;
        if sum.norm() < EQ_TOLERANCE {
            self.terms.remove(&ops);
        } else {
            self.terms.insert(ops, sum);
        }
    }

    /// Terms in key order.
    pub fn terms(&self) -> impl Iterator<Item = (&FermionTerm, &Complex64)> {
        self.terms.iter()
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True for the zero operator.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// One more than the highest mode index, or 0 when no mode appears.
    pub fn num_modes(&self) -> u32 {
        self.terms
            .keys()
            .flat_map(|t| t.iter().map(|(p, _)| *p))
            .max()
            .map_or(0, |p| p + 1)
    }
}

impl AddAssign<FermionOperator> for FermionOperator {
    fn add_assign(&mut self, rhs: FermionOperator) {
        for (ops, coeff) in rhs.terms {
            self.add_term(ops, coeff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_cancels_below_tolerance() {
        let mut op = FermionOperator::term([(1, Ladder::Create), (0, Ladder::Annihilate)], 0.5);
        op += FermionOperator::term([(1, Ladder::Create), (0, Ladder::Annihilate)], -0.5);
        assert!(op.is_empty());
    }

    #[test]
    fn test_zero_coefficient_is_not_stored() {
        let op = FermionOperator::term([(2, Ladder::Create)], 0.0);
        assert!(op.is_empty());
        assert_eq!(op.num_modes(), 0);
    }

    #[test]
    fn test_num_modes() {
        let mut op = FermionOperator::identity(1.0);
        op += FermionOperator::term([(5, Ladder::Create), (2, Ladder::Annihilate)], 1.0);
        assert_eq!(op.len(), 2);
        assert_eq!(op.num_modes(), 6);
    }
}
