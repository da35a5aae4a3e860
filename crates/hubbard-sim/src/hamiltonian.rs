//! Weighted Pauli sums.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! Pauli labels are little-endian: the rightmost character of `"XIZ"` acts
//! on qubit 0, so that label is `X₂ Z₀`.
//!
//! # Example
//!
//! ```rust
//! use hubbard_sim::hamiltonian::{Hamiltonian, PauliOp};
//!
//! let h = Hamiltonian::from_labels(&["XIZ", "IYI"], &[0.5, -1.0]).unwrap();
//! assert_eq!(h.n_terms(), 2);
//! assert_eq!(h.num_qubits(), 3);
//! assert_eq!(h.terms()[0].pauli.ops(), &[(0, PauliOp::Z), (2, PauliOp::X)]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator.
///
/// Ordered `I < X < Y < Z`, which is the order of their label letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The label letter.
    pub fn label(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// Parse a label letter.
    pub fn from_label(ch: char) -> Option<Self> {
        match ch {
            'I' => Some(PauliOp::I),
            'X' => Some(PauliOp::X),
            'Y' => Some(PauliOp::Y),
            'Z' => Some(PauliOp::Z),
            _ => None,
        }
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with identity factors
/// omitted. The derived ordering compares these pairs lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// The identity string.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    /// Callers must not repeat a qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Parse a little-endian label such as `"XIZ"`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_label(label: &str) -> SimResult<Self> {
        let chars: Vec<char> = label.chars().collect();
        let n = chars.len();
        let mut ops = Vec::new();
        for (pos, &ch) in chars.iter().enumerate() {
            let op = PauliOp::from_label(ch).ok_or_else(|| SimError::InvalidLabel {
                label: label.to_string(),
                ch,
            })?;
            ops.push(((n - 1 - pos) as u32, op));
        }
        Ok(Self::from_ops(ops))
    }

    /// Render as an `n_qubits`-character little-endian label.
    pub fn to_label(&self, n_qubits: u32) -> SimResult<String> {
        let mut chars = vec!['I'; n_qubits as usize];
        for &(q, op) in &self.ops {
            if q >= n_qubits {
                return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
            }
            chars[(n_qubits - 1 - q) as usize] = op.label();
        }
        Ok(chars.into_iter().collect())
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }
}

/// A sum-of-Pauli-strings operator.
///
/// Terms keep their insertion order; product formulas apply them in that
/// order. The width is either fixed explicitly (labels always fix it) or
/// inferred from the highest qubit referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
    num_qubits: Option<u32>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self {
            terms,
            num_qubits: None,
        }
    }

    /// Build from parallel label and coefficient sequences.
    ///
    /// All labels must have the same length, which becomes the operator
    /// width.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_labels<S: AsRef<str>>(labels: &[S], coeffs: &[f64]) -> SimResult<Self> {
        if labels.len() != coeffs.len() {
            return Err(SimError::CoefficientCountMismatch {
                labels: labels.len(),
                coeffs: coeffs.len(),
            });
        }
        let width = labels.first().map(|l| l.as_ref().chars().count());
        let mut terms = Vec::with_capacity(labels.len());
        for (label, &coeff) in labels.iter().zip(coeffs) {
            let label = label.as_ref();
            let len = label.chars().count();
            match width {
                Some(expected) if len != expected => {
                    return Err(SimError::LabelLengthMismatch { expected, got: len });
                }
                _ => {}
            }
            terms.push(HamiltonianTerm::new(coeff, PauliString::from_label(label)?));
        }
        Ok(Self {
            terms,
            num_qubits: width.map(|w| w as u32),
        })
    }

    /// Fix the operator width.
    #[must_use]
    pub fn with_num_qubits(mut self, n: u32) -> Self {
        self.num_qubits = Some(n);
        self
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// The minimum number of qubits required to represent this operator.
    ///
    /// Returns 0 if the operator is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Operator width: the explicit width if set, else [`Self::min_qubits`].
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits.unwrap_or_else(|| self.min_qubits())
    }

    /// Little-endian labels of every term, at the operator width.
    pub fn labels(&self) -> SimResult<Vec<String>> {
        let n = self.num_qubits();
        self.terms.iter().map(|t| t.pauli.to_label(n)).collect()
    }

    /// Coefficients of every term, in term order.
    pub fn coeffs(&self) -> Vec<f64> {
        self.terms.iter().map(|t| t.coeff).collect()
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_label_is_little_endian() {
        let p = PauliString::from_label("XIZ").unwrap();
        assert_eq!(p.ops(), &[(0, PauliOp::Z), (2, PauliOp::X)]);
        assert_eq!(p.to_label(3).unwrap(), "XIZ");
        assert_eq!(p.to_label(5).unwrap(), "IIXIZ");
    }

    #[test]
    fn test_to_label_out_of_range() {
        let p = PauliString::from_ops([(4, PauliOp::Y)]);
        assert!(matches!(
            p.to_label(3),
            Err(SimError::QubitOutOfRange {
                qubit: 4,
                n_qubits: 3
            })
        ));
    }

    #[test]
    fn test_ordering_is_lexicographic_on_pairs() {
        let a = PauliString::from_ops([(0, PauliOp::X)]);
        let b = PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Z)]);
        let c = PauliString::from_ops([(0, PauliOp::Y)]);
        let d = PauliString::from_ops([(1, PauliOp::X)]);
        let mut v = vec![d.clone(), c.clone(), b.clone(), a.clone(), PauliString::identity()];
        v.sort();
        assert_eq!(v, vec![PauliString::identity(), a, b, c, d]);
    }

    proptest! {
        #[test]
        fn label_round_trip(label in "[IXYZ]{1,12}") {
            let p = PauliString::from_label(&label).unwrap();
            #[allow(clippy::cast_possible_truncation)]
            let n = label.len() as u32;
            prop_assert_eq!(p.to_label(n).unwrap(), label);
        }
    }
}
