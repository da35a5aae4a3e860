//! Pauli-string sums with complex coefficients.
//!
//! Products follow the Pauli algebra `XY = iZ`, `YZ = iX`, `ZX = iY` (and
//! `−i` for the reversed orders). Iteration is in sorted [`PauliString`]
//! order, which compares `(qubit, op)` pairs lexicographically.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use hubbard_sim::{PauliOp, PauliString};
use num_complex::Complex64;

use crate::fermion::EQ_TOLERANCE;

/// A sum of Pauli strings with complex coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QubitOperator {
    terms: BTreeMap<PauliString, Complex64>,
}

impl QubitOperator {
    /// The zero operator.
    pub fn zero() -> Self {
        Self::default()
    }

    /// `coeff · I`.
    pub fn identity(coeff: impl Into<Complex64>) -> Self {
        Self::term(PauliString::identity(), coeff)
    }

    /// A single weighted Pauli string.
    pub fn term(pauli: PauliString, coeff: impl Into<Complex64>) -> Self {
        let mut op = Self::zero();
        op.add_term(pauli, coeff.into());
        op
    }

    /// Add `coeff` to the coefficient of `pauli`, dropping the term if the
    /// sum is below [`EQ_TOLERANCE`].
    pub fn add_term(&mut self, pauli: PauliString, coeff: Complex64) {
        let sum = self.terms.get(&pauli).copied().unwrap_or_default() + coeff;
        if sum.norm() < EQ_TOLERANCE {
            self.terms.remove(&pauli);
        } else {
            self.terms.insert(pauli, sum);
        }
    }

    /// Terms in sorted key order.
    pub fn terms(&self) -> impl Iterator<Item = (&PauliString, &Complex64)> {
        self.terms.iter()
    }

    /// Coefficient of `pauli`, if present.
    pub fn coefficient(&self, pauli: &PauliString) -> Option<Complex64> {
        self.terms.get(pauli).copied()
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True for the zero operator.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiply every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: impl Into<Complex64>) -> Self {
        let factor = factor.into();
        self.map_coefficients(|c| c * factor)
    }

    /// A new operator with `f` applied to every coefficient.
    ///
    /// Terms are copied as-is; zeros produced by `f` are kept until
    /// [`Self::compress`].
    #[must_use]
    pub fn map_coefficients(&self, f: impl Fn(Complex64) -> Complex64) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(p, c)| (p.clone(), f(*c)))
                .collect(),
        }
    }

    /// Drop terms with `|c| <= abs_tol` and zero out negligible real or
    /// imaginary parts of the rest.
    pub fn compress(&mut self, abs_tol: f64) {
        self.terms.retain(|_, c| c.norm() > abs_tol);
        for c in self.terms.values_mut() {
            if c.im.abs() <= abs_tol {
                c.im = 0.0;
            } else if c.re.abs() <= abs_tol {
                c.re = 0.0;
            }
        }
    }
}

/// Product of two single-qubit Paulis as `(phase, result)`.
fn multiply_ops(a: PauliOp, b: PauliOp) -> (Complex64, PauliOp) {
    let i = Complex64::i();
    match (a, b) {
        (PauliOp::I, op) | (op, PauliOp::I) => (Complex64::new(1.0, 0.0), op),
        (x, y) if x == y => (Complex64::new(1.0, 0.0), PauliOp::I),
        (PauliOp::X, PauliOp::Y) => (i, PauliOp::Z),
        (PauliOp::Y, PauliOp::Z) => (i, PauliOp::X),
        (PauliOp::Z, PauliOp::X) => (i, PauliOp::Y),
        (PauliOp::Y, PauliOp::X) => (-i, PauliOp::Z),
        (PauliOp::Z, PauliOp::Y) => (-i, PauliOp::X),
        (PauliOp::X, PauliOp::Z) => (-i, PauliOp::Y),
        // Equal pairs are handled above.
        _ => (Complex64::new(1.0, 0.0), PauliOp::I),
    }
}

/// Product of two Pauli strings as `(phase, result)`.
pub fn pauli_product(a: &PauliString, b: &PauliString) -> (Complex64, PauliString) {
    let mut phase = Complex64::new(1.0, 0.0);
    let mut ops = Vec::with_capacity(a.ops().len() + b.ops().len());
    let (mut ia, mut ib) = (a.ops().iter().peekable(), b.ops().iter().peekable());

    loop {
        match (ia.peek(), ib.peek()) {
            (Some(&&(qa, pa)), Some(&&(qb, pb))) => {
                if qa == qb {
                    let (p, op) = multiply_ops(pa, pb);
                    phase *= p;
                    ops.push((qa, op));
                    ia.next();
                    ib.next();
                } else if qa < qb {
                    ops.push((qa, pa));
                    ia.next();
                } else {
                    ops.push((qb, pb));
                    ib.next();
                }
            }
            (Some(&&entry), None) => {
                ops.push(entry);
                ia.next();
            }
            (None, Some(&&entry)) => {
                ops.push(entry);
                ib.next();
            }
            (None, None) => break,
        }
    }

    (phase, PauliString::from_ops(ops))
}

impl AddAssign<&QubitOperator> for QubitOperator {
    fn add_assign(&mut self, rhs: &QubitOperator) {
        for (p, c) in &rhs.terms {
            self.add_term(p.clone(), *c);
        }
    }
}

impl SubAssign<&QubitOperator> for QubitOperator {
    fn sub_assign(&mut self, rhs: &QubitOperator) {
        for (p, c) in &rhs.terms {
            self.add_term(p.clone(), -*c);
        }
    }
}

impl Add for QubitOperator {
    type Output = QubitOperator;

    fn add(mut self, rhs: QubitOperator) -> QubitOperator {
        self += &rhs;
        self
    }
}

impl Sub for QubitOperator {
    type Output = QubitOperator;

    fn sub(mut self, rhs: QubitOperator) -> QubitOperator {
        self -= &rhs;
        self
    }
}

impl Mul for &QubitOperator {
    type Output = QubitOperator;

    /// Products accumulate without dropping small sums.
    fn mul(self, rhs: &QubitOperator) -> QubitOperator {
        let mut terms: BTreeMap<PauliString, Complex64> = BTreeMap::new();
        for (pa, ca) in &self.terms {
            for (pb, cb) in &rhs.terms {
                let (phase, p) = pauli_product(pa, pb);
                *terms.entry(p).or_default() += phase * ca * cb;
            }
        }
        QubitOperator { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(q: u32, op: PauliOp) -> PauliString {
        PauliString::from_ops([(q, op)])
    }

    #[test]
    fn test_pauli_algebra() {
        let (phase, p) = pauli_product(&single(0, PauliOp::X), &single(0, PauliOp::Y));
        assert_eq!(phase, Complex64::i());
        assert_eq!(p, single(0, PauliOp::Z));

        let (phase, p) = pauli_product(&single(0, PauliOp::Z), &single(0, PauliOp::Y));
        assert_eq!(phase, -Complex64::i());
        assert_eq!(p, single(0, PauliOp::X));

        let (phase, p) = pauli_product(&single(1, PauliOp::Y), &single(1, PauliOp::Y));
        assert_eq!(phase, Complex64::new(1.0, 0.0));
        assert!(p.is_identity());
    }

    #[test]
    fn test_disjoint_product_merges() {
        let a = PauliString::from_ops([(0, PauliOp::X), (3, PauliOp::Z)]);
        let b = PauliString::from_ops([(1, PauliOp::Y), (3, PauliOp::X)]);
        let (phase, p) = pauli_product(&a, &b);
        // Z·X = iY on qubit 3.
        assert_eq!(phase, Complex64::i());
        assert_eq!(
            p.ops(),
            &[(0, PauliOp::X), (1, PauliOp::Y), (3, PauliOp::Y)]
        );
    }

    #[test]
    fn test_mul_keeps_zero_sums_until_compress() {
        // (X + iY)(X - iY) = 2 + 2Z; the cross terms cancel in the identity.
        let x = QubitOperator::term(single(0, PauliOp::X), 1.0);
        let y = QubitOperator::term(single(0, PauliOp::Y), Complex64::i());
        let plus = x.clone() + y.clone();
        let minus = x - y;
        let mut prod = &plus * &minus;
        assert_eq!(
            prod.coefficient(&PauliString::identity()),
            Some(Complex64::new(2.0, 0.0))
        );
        assert_eq!(
            prod.coefficient(&single(0, PauliOp::Z)),
            Some(Complex64::new(2.0, 0.0))
        );
        prod.compress(1e-8);
        assert_eq!(prod.len(), 2);
    }

    #[test]
    fn test_compress_zeroes_small_parts() {
        let mut op = QubitOperator::term(single(0, PauliOp::Z), Complex64::new(1e-12, 0.5));
        op.add_term(single(1, PauliOp::Z), Complex64::new(1e-10, 0.0));
        op.compress(1e-8);
        assert_eq!(op.len(), 1);
        assert_eq!(
            op.coefficient(&single(0, PauliOp::Z)),
            Some(Complex64::new(0.0, 0.5))
        );
    }

    #[test]
    fn test_map_coefficients_does_not_alias() {
        let op = QubitOperator::term(single(0, PauliOp::X), Complex64::new(0.3, 0.7));
        let imag = op.map_coefficients(|c| Complex64::new(c.im, 0.0));
        assert_eq!(op.coefficient(&single(0, PauliOp::X)), Some(Complex64::new(0.3, 0.7)));
        assert_eq!(imag.coefficient(&single(0, PauliOp::X)), Some(Complex64::new(0.7, 0.0)));
        assert_eq!(op.scale(2.0).coefficient(&single(0, PauliOp::X)), Some(Complex64::new(0.6, 1.4)));
    }
}
