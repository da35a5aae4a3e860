//! Dense unitaries of gates and circuits, with parameter gradients.
//!
//! Matrices are big-endian: qubit 0 is the most significant bit of a
//! basis-state index, and a gate's first listed qubit is the most
//! significant bit of its local index. Circuit parameters bind the
//! circuit's symbol names in first-appearance order.

use hubbard_ir::{
    Circuit, CircuitDag, GateKind, Instruction, InstructionKind, ParameterBindings,
    ParameterExpression, StandardGate,
};
use ndarray::{Array2, array};
use num_complex::Complex64;

use crate::error::{CompileError, CompileResult};

/// Tolerance for treating a matrix entry as zero.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// ---------------------------------------------------------------------------
// UnitaryMatrix
// ---------------------------------------------------------------------------

/// A square `2^n × 2^n` complex matrix.
///
/// Also used for gradient matrices, which share the shape but are not
/// unitary.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    data: Array2<Complex64>,
    num_qubits: u32,
}

impl UnitaryMatrix {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: u32) -> Self {
        Self {
            data: Array2::eye(1usize << num_qubits),
            num_qubits,
        }
    }

    /// The all-zero matrix on `num_qubits` qubits.
    pub fn zeros(num_qubits: u32) -> Self {
        let dim = 1usize << num_qubits;
        Self {
            data: Array2::zeros((dim, dim)),
            num_qubits,
        }
    }

    /// Wrap a square array whose side is a power of two.
    pub fn from_array(data: Array2<Complex64>) -> CompileResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(CompileError::DimensionMismatch {
                expected: rows,
                got: cols,
            });
        }
        if !rows.is_power_of_two() {
            return Err(CompileError::DimensionMismatch {
                expected: rows.next_power_of_two(),
                got: rows,
            });
        }
        Ok(Self {
            data,
            num_qubits: rows.trailing_zeros(),
        })
    }

    /// A diagonal matrix with the given entries.
    pub fn from_diagonal(entries: &[Complex64]) -> CompileResult<Self> {
        let diag = ndarray::Array1::from(entries.to_vec());
        Self::from_array(Array2::from_diag(&diag))
    }

    /// Side length `2^n`.
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Underlying array.
    pub fn data(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[[row, col]]
    }

    /// The diagonal entries.
    pub fn diagonal(&self) -> Vec<Complex64> {
        self.data.diag().to_vec()
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            data: self.data.t().mapv(|z| z.conj()),
            num_qubits: self.num_qubits,
        }
    }

    /// Matrix product `self · other`.
    pub fn dot(&self, other: &Self) -> CompileResult<Self> {
        self.check_dim(other)?;
        Ok(Self {
            data: self.data.dot(&other.data),
            num_qubits: self.num_qubits,
        })
    }

    /// Frobenius inner product `Σ conj(self_ij) · other_ij`, i.e.
    /// `Tr(self† · other)`.
    pub fn inner(&self, other: &Self) -> CompileResult<Complex64> {
        self.check_dim(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Trace.
    pub fn trace(&self) -> Complex64 {
        self.data.diag().iter().sum()
    }

    /// True if every off-diagonal entry has magnitude at most `tol`.
    pub fn is_diagonal(&self, tol: f64) -> bool {
        self.data
            .indexed_iter()
            .all(|((r, c), z)| r == c || z.norm() <= tol)
    }

    /// Entrywise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&mut self, factor: Complex64) {
        self.data.mapv_inplace(|z| z * factor);
    }

    fn check_dim(&self, other: &Self) -> CompileResult<()> {
        if self.dim() != other.dim() {
            return Err(CompileError::DimensionMismatch {
                expected: self.dim(),
                got: other.dim(),
            });
        }
        Ok(())
    }

    /// Row (or column) offsets of a gate's local basis states within the
    /// full index space.
    fn offsets(&self, qubits: &[usize]) -> Vec<usize> {
        let n = self.num_qubits as usize;
        let k = qubits.len();
        (0..1usize << k)
            .map(|m| {
                qubits.iter().enumerate().fold(0, |acc, (j, &q)| {
                    acc | (((m >> (k - 1 - j)) & 1) << (n - 1 - q))
                })
            })
            .collect()
    }

    /// `self ← G · self` with `gate` acting on `qubits`.
    fn apply_left(&mut self, gate: &Array2<Complex64>, qubits: &[usize]) {
        let offsets = self.offsets(qubits);
        let mask = offsets.last().copied().unwrap_or(0);
        let dim = self.dim();
        let mut buf = vec![ZERO; offsets.len()];
        for base in (0..dim).filter(|b| b & mask == 0) {
            for col in 0..dim {
                for (v, &off) in buf.iter_mut().zip(&offsets) {
                    *v = self.data[[base | off, col]];
                }
                for (m, &off) in offsets.iter().enumerate() {
                    self.data[[base | off, col]] =
                        buf.iter().enumerate().map(|(mp, v)| gate[[m, mp]] * v).sum();
                }
            }
        }
    }

    /// `self ← self · G` with `gate` acting on `qubits`.
    fn apply_right(&mut self, gate: &Array2<Complex64>, qubits: &[usize]) {
        let offsets = self.offsets(qubits);
        let mask = offsets.last().copied().unwrap_or(0);
        let dim = self.dim();
        let mut buf = vec![ZERO; offsets.len()];
        for base in (0..dim).filter(|b| b & mask == 0) {
            for row in 0..dim {
                for (v, &off) in buf.iter_mut().zip(&offsets) {
                    *v = self.data[[row, base | off]];
                }
                for (m, &off) in offsets.iter().enumerate() {
                    self.data[[row, base | off]] =
                        buf.iter().enumerate().map(|(mp, v)| v * gate[[mp, m]]).sum();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Gate matrices
// ---------------------------------------------------------------------------

fn pauli_x() -> Array2<Complex64> {
    array![[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Array2<Complex64> {
    array![[ZERO, -I], [I, ZERO]]
}

fn pauli_z() -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ra, ca) = a.dim();
    let (rb, cb) = b.dim();
    Array2::from_shape_fn((ra * rb, ca * cb), |(r, c)| {
        a[[r / rb, c / cb]] * b[[r % rb, c % cb]]
    })
}

/// `exp(−iθ/2 · P)` for a Pauli product `P` with `P² = I`.
fn pauli_rotation(p: &Array2<Complex64>, theta: f64) -> Array2<Complex64> {
    let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    Array2::eye(p.nrows()).mapv(|z: Complex64| z * c) + p.mapv(|z| z * Complex64::new(0.0, -s))
}

/// `d/dθ exp(−iθ/2 · P) = −i/2 · P · exp(−iθ/2 · P)`.
fn pauli_rotation_derivative(p: &Array2<Complex64>, theta: f64) -> Array2<Complex64> {
    p.dot(&pauli_rotation(p, theta))
        .mapv(|z| z * Complex64::new(0.0, -0.5))
}

/// `blockdiag(upper, lower)` for two 2×2 blocks.
fn block_diag(upper: &Array2<Complex64>, lower: &Array2<Complex64>) -> Array2<Complex64> {
    let mut out = Array2::zeros((4, 4));
    for r in 0..2 {
        for c in 0..2 {
            out[[r, c]] = upper[[r, c]];
            out[[r + 2, c + 2]] = lower[[r, c]];
        }
    }
    out
}

fn controlled(u: &Array2<Complex64>) -> Array2<Complex64> {
    block_diag(&Array2::eye(2), u)
}

fn controlled_derivative(du: &Array2<Complex64>) -> Array2<Complex64> {
    block_diag(&Array2::zeros((2, 2)), du)
}

fn permutation(perm: &[usize]) -> Array2<Complex64> {
    let mut out = Array2::zeros((perm.len(), perm.len()));
    for (col, &row) in perm.iter().enumerate() {
        out[[row, col]] = ONE;
    }
    out
}

fn phase(angle: f64) -> Complex64 {
    Complex64::from_polar(1.0, angle)
}

/// Phase angle of every diagonal entry of a `PauliZ` gate.
fn pauli_z_angles(values: &[f64], num_qubits: u32) -> Vec<f64> {
    (0..1usize << num_qubits)
        .map(|x| {
            values
                .iter()
                .enumerate()
                .map(|(k, theta)| parity_sign(k & x) * theta)
                .sum::<f64>()
        })
        .collect()
}

fn parity_sign(bits: usize) -> f64 {
    if bits.count_ones() % 2 == 0 { 1.0 } else { -1.0 }
}

fn check_values(gate: &StandardGate, values: &[f64]) -> CompileResult<()> {
    if values.len() != gate.num_params() {
        return Err(CompileError::ParameterCount {
            expected: gate.num_params(),
            got: values.len(),
        });
    }
    Ok(())
}

fn matrix(gate: &StandardGate, values: &[f64]) -> CompileResult<Array2<Complex64>> {
    check_values(gate, values)?;
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let v = |i: usize| values[i];
    let m = match gate {
        StandardGate::I => Array2::eye(2),
        StandardGate::X => pauli_x(),
        StandardGate::Y => pauli_y(),
        StandardGate::Z => pauli_z(),
        StandardGate::H => array![
            [Complex64::new(h, 0.0), Complex64::new(h, 0.0)],
            [Complex64::new(h, 0.0), Complex64::new(-h, 0.0)]
        ],
        StandardGate::S => array![[ONE, ZERO], [ZERO, I]],
        StandardGate::Sdg => array![[ONE, ZERO], [ZERO, -I]],
        StandardGate::T => array![[ONE, ZERO], [ZERO, phase(std::f64::consts::FRAC_PI_4)]],
        StandardGate::Tdg => array![[ONE, ZERO], [ZERO, phase(-std::f64::consts::FRAC_PI_4)]],
        StandardGate::SX => {
            let (a, b) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
            array![[a, b], [b, a]]
        }
        StandardGate::SXdg => {
            let (a, b) = (Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5));
            array![[a, b], [b, a]]
        }
        StandardGate::Rx(_) => pauli_rotation(&pauli_x(), v(0)),
        StandardGate::Ry(_) => pauli_rotation(&pauli_y(), v(0)),
        StandardGate::Rz(_) => pauli_rotation(&pauli_z(), v(0)),
        StandardGate::P(_) => array![[ONE, ZERO], [ZERO, phase(v(0))]],
        StandardGate::U(..) => {
            let (theta, phi, lambda) = (v(0), v(1), v(2));
            let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
            array![
                [Complex64::new(c, 0.0), -phase(lambda) * s],
                [phase(phi) * s, phase(phi + lambda) * c]
            ]
        }
        StandardGate::PRX(..) => {
            let (theta, phi) = (v(0), v(1));
            let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
            array![
                [Complex64::new(c, 0.0), -I * phase(-phi) * s],
                [-I * phase(phi) * s, Complex64::new(c, 0.0)]
            ]
        }
        StandardGate::CX => controlled(&pauli_x()),
        StandardGate::CY => controlled(&pauli_y()),
        StandardGate::CZ => controlled(&pauli_z()),
        StandardGate::CH => controlled(&matrix(&StandardGate::H, &[])?),
        StandardGate::Swap => permutation(&[0, 2, 1, 3]),
        StandardGate::ISwap => array![
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, I, ZERO],
            [ZERO, I, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE]
        ],
        StandardGate::CRx(_) => controlled(&pauli_rotation(&pauli_x(), v(0))),
        StandardGate::CRy(_) => controlled(&pauli_rotation(&pauli_y(), v(0))),
        StandardGate::CRz(_) => controlled(&pauli_rotation(&pauli_z(), v(0))),
        StandardGate::CP(_) => controlled(&array![[ONE, ZERO], [ZERO, phase(v(0))]]),
        StandardGate::RXX(_) => pauli_rotation(&kron(&pauli_x(), &pauli_x()), v(0)),
        StandardGate::RYY(_) => pauli_rotation(&kron(&pauli_y(), &pauli_y()), v(0)),
        StandardGate::RZZ(_) => pauli_rotation(&kron(&pauli_z(), &pauli_z()), v(0)),
        StandardGate::CCX => permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
        StandardGate::CSwap => permutation(&[0, 1, 2, 3, 4, 6, 5, 7]),
        StandardGate::PauliZ { num_qubits, .. } => {
            let entries: Vec<Complex64> = pauli_z_angles(values, *num_qubits)
                .into_iter()
                .map(phase)
                .collect();
            Array2::from_diag(&ndarray::Array1::from(entries))
        }
    };
    Ok(m)
}

fn derivatives(gate: &StandardGate, values: &[f64]) -> CompileResult<Vec<Array2<Complex64>>> {
    check_values(gate, values)?;
    let v = |i: usize| values[i];
    let d = match gate {
        StandardGate::Rx(_) => vec![pauli_rotation_derivative(&pauli_x(), v(0))],
        StandardGate::Ry(_) => vec![pauli_rotation_derivative(&pauli_y(), v(0))],
        StandardGate::Rz(_) => vec![pauli_rotation_derivative(&pauli_z(), v(0))],
        StandardGate::P(_) => vec![array![[ZERO, ZERO], [ZERO, I * phase(v(0))]]],
        StandardGate::U(..) => {
            let (theta, phi, lambda) = (v(0), v(1), v(2));
            let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
            vec![
                array![
                    [Complex64::new(-s / 2.0, 0.0), -phase(lambda) * (c / 2.0)],
                    [phase(phi) * (c / 2.0), -phase(phi + lambda) * (s / 2.0)]
                ],
                array![
                    [ZERO, ZERO],
                    [I * phase(phi) * s, I * phase(phi + lambda) * c]
                ],
                array![
                    [ZERO, -I * phase(lambda) * s],
                    [ZERO, I * phase(phi + lambda) * c]
                ],
            ]
        }
        StandardGate::PRX(..) => {
            let (theta, phi) = (v(0), v(1));
            let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
            vec![
                array![
                    [Complex64::new(-s / 2.0, 0.0), -I * phase(-phi) * (c / 2.0)],
                    [-I * phase(phi) * (c / 2.0), Complex64::new(-s / 2.0, 0.0)]
                ],
                array![[ZERO, -phase(-phi) * s], [phase(phi) * s, ZERO]],
            ]
        }
        StandardGate::CRx(_) => vec![controlled_derivative(&pauli_rotation_derivative(
            &pauli_x(),
            v(0),
        ))],
        StandardGate::CRy(_) => vec![controlled_derivative(&pauli_rotation_derivative(
            &pauli_y(),
            v(0),
        ))],
        StandardGate::CRz(_) => vec![controlled_derivative(&pauli_rotation_derivative(
            &pauli_z(),
            v(0),
        ))],
        StandardGate::CP(_) => vec![controlled_derivative(&array![
            [ZERO, ZERO],
            [ZERO, I * phase(v(0))]
        ])],
        StandardGate::RXX(_) => vec![pauli_rotation_derivative(
            &kron(&pauli_x(), &pauli_x()),
            v(0),
        )],
        StandardGate::RYY(_) => vec![pauli_rotation_derivative(
            &kron(&pauli_y(), &pauli_y()),
            v(0),
        )],
        StandardGate::RZZ(_) => vec![pauli_rotation_derivative(
            &kron(&pauli_z(), &pauli_z()),
            v(0),
        )],
        StandardGate::PauliZ { num_qubits, .. } => {
            let entries: Vec<Complex64> = pauli_z_angles(values, *num_qubits)
                .into_iter()
                .map(phase)
                .collect();
            (0..values.len())
                .map(|k| {
                    let diag: Vec<Complex64> = entries
                        .iter()
                        .enumerate()
                        .map(|(x, e)| I * parity_sign(k & x) * e)
                        .collect();
                    Array2::from_diag(&ndarray::Array1::from(diag))
                })
                .collect()
        }
        _ => Vec::new(),
    };
    Ok(d)
}

/// Unitary of a standard gate at the given parameter values.
///
/// `values` must hold one number per parameter slot.
pub fn gate_unitary(gate: &StandardGate, values: &[f64]) -> CompileResult<UnitaryMatrix> {
    Ok(UnitaryMatrix {
        data: matrix(gate, values)?,
        num_qubits: gate.num_qubits(),
    })
}

/// Partial derivatives of a gate's unitary, one matrix per parameter slot.
pub fn gate_gradient(gate: &StandardGate, values: &[f64]) -> CompileResult<Vec<UnitaryMatrix>> {
    let num_qubits = gate.num_qubits();
    Ok(derivatives(gate, values)?
        .into_iter()
        .map(|data| UnitaryMatrix { data, num_qubits })
        .collect())
}

// ---------------------------------------------------------------------------
// Circuit evaluation
// ---------------------------------------------------------------------------

/// Types that evaluate to a unitary given values for their free symbols.
pub trait CircuitUnitary {
    /// The unitary with `params` bound to the symbol names in
    /// first-appearance order.
    fn get_unitary(&self, params: &[f64]) -> CompileResult<UnitaryMatrix>;

    /// The unitary and its derivative with respect to each symbol.
    fn get_unitary_and_grad(
        &self,
        params: &[f64],
    ) -> CompileResult<(UnitaryMatrix, Vec<UnitaryMatrix>)>;
}

impl CircuitUnitary for Circuit {
    fn get_unitary(&self, params: &[f64]) -> CompileResult<UnitaryMatrix> {
        let ops: Vec<&Instruction> = self.operations().collect();
        Ok(evaluate(&ops, self.num_qubits(), self.global_phase(), params, false)?.0)
    }

    fn get_unitary_and_grad(
        &self,
        params: &[f64],
    ) -> CompileResult<(UnitaryMatrix, Vec<UnitaryMatrix>)> {
        let ops: Vec<&Instruction> = self.operations().collect();
        evaluate(&ops, self.num_qubits(), self.global_phase(), params, true)
    }
}

impl CircuitUnitary for CircuitDag {
    fn get_unitary(&self, params: &[f64]) -> CompileResult<UnitaryMatrix> {
        let ops: Vec<&Instruction> = self.topological_ops().map(|(_, op)| op).collect();
        Ok(evaluate(&ops, self.num_qubits(), self.global_phase(), params, false)?.0)
    }

    fn get_unitary_and_grad(
        &self,
        params: &[f64],
    ) -> CompileResult<(UnitaryMatrix, Vec<UnitaryMatrix>)> {
        let ops: Vec<&Instruction> = self.topological_ops().map(|(_, op)| op).collect();
        evaluate(&ops, self.num_qubits(), self.global_phase(), params, true)
    }
}

/// An operation reduced to matrices on its wires.
struct ResolvedOp {
    qubits: Vec<usize>,
    matrix: Array2<Complex64>,
    /// Per slot: derivative matrix and `(symbol, ∂slot/∂symbol)` pairs.
    slots: Vec<(Array2<Complex64>, Vec<(usize, f64)>)>,
}

fn symbol_order(ops: &[&Instruction]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for op in ops {
        for p in op.params() {
            for name in p.symbols() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
    }
    names
}

fn eval_expr(expr: &ParameterExpression, bindings: &ParameterBindings) -> CompileResult<f64> {
    expr.evaluate(bindings)
        .ok_or_else(|| CompileError::UnboundParameter(expr.to_string()))
}

fn resolve(
    op: &Instruction,
    names: &[String],
    bindings: &ParameterBindings,
    with_grad: bool,
) -> CompileResult<Option<ResolvedOp>> {
    let gate = match &op.kind {
        InstructionKind::Gate(gate) => gate,
        InstructionKind::Measure | InstructionKind::Reset => {
            return Err(CompileError::NonUnitaryInstruction(op.name().to_string()));
        }
        InstructionKind::Barrier | InstructionKind::Delay { .. } => return Ok(None),
    };
    let qubits: Vec<usize> = op.qubits.iter().map(|q| q.index()).collect();

    match &gate.kind {
        GateKind::Standard(standard) => {
            let exprs = standard.parameters();
            let values = exprs
                .iter()
                .map(|e| eval_expr(e, bindings))
                .collect::<CompileResult<Vec<f64>>>()?;
            let matrix = matrix(standard, &values)?;

            let mut slots = Vec::new();
            if with_grad {
                for (expr, d) in exprs.iter().zip(derivatives(standard, &values)?) {
                    let mut chain = Vec::new();
                    for name in expr.symbols() {
                        let coeff = expr
                            .derivative(&name, bindings)
                            .ok_or_else(|| CompileError::UnboundParameter(expr.to_string()))?;
                        if let Some(k) = names.iter().position(|n| *n == name) {
                            chain.push((k, coeff));
                        }
                    }
                    if !chain.is_empty() {
                        slots.push((d, chain));
                    }
                }
            }
            Ok(Some(ResolvedOp {
                qubits,
                matrix,
                slots,
            }))
        }
        GateKind::Custom(custom) => {
            let Some(entries) = &custom.matrix else {
                return Err(CompileError::UnsupportedGate(custom.name.clone()));
            };
            let dim = 1usize << custom.num_qubits;
            let matrix = Array2::from_shape_vec((dim, dim), entries.clone()).map_err(|_| {
                CompileError::DimensionMismatch {
                    expected: dim * dim,
                    got: entries.len(),
                }
            })?;
            Ok(Some(ResolvedOp {
                qubits,
                matrix,
                slots: Vec::new(),
            }))
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn evaluate(
    ops: &[&Instruction],
    num_qubits: usize,
    global_phase: f64,
    params: &[f64],
    with_grad: bool,
) -> CompileResult<(UnitaryMatrix, Vec<UnitaryMatrix>)> {
    let names = symbol_order(ops);
    if params.len() != names.len() {
        return Err(CompileError::ParameterCount {
            expected: names.len(),
            got: params.len(),
        });
    }
    let bindings: ParameterBindings = names.iter().cloned().zip(params.iter().copied()).collect();

    let mut resolved = Vec::with_capacity(ops.len());
    for op in ops {
        if let Some(r) = resolve(op, &names, &bindings, with_grad)? {
            resolved.push(r);
        }
    }

    let n = num_qubits as u32;
    let global = phase(global_phase);

    if !with_grad {
        let mut u = UnitaryMatrix::identity(n);
        for r in &resolved {
            u.apply_left(&r.matrix, &r.qubits);
        }
        u.scale(global);
        return Ok((u, Vec::new()));
    }

    // prefixes[i] is the product of every op before i.
    let mut prefixes = Vec::with_capacity(resolved.len() + 1);
    prefixes.push(UnitaryMatrix::identity(n));
    for r in &resolved {
        let mut next = prefixes[prefixes.len() - 1].clone();
        next.apply_left(&r.matrix, &r.qubits);
        prefixes.push(next);
    }

    let mut grads = vec![UnitaryMatrix::zeros(n); names.len()];
    let mut suffix = UnitaryMatrix::identity(n);
    for (i, r) in resolved.iter().enumerate().rev() {
        for (d, chain) in &r.slots {
            let mut inner = prefixes[i].clone();
            inner.apply_left(d, &r.qubits);
            let term = suffix.data.dot(&inner.data);
            for &(k, coeff) in chain {
                grads[k].data.scaled_add(Complex64::new(coeff, 0.0), &term);
            }
        }
        suffix.apply_right(&r.matrix, &r.qubits);
    }

    let mut u = prefixes.pop().unwrap_or_else(|| UnitaryMatrix::identity(n));
    u.scale(global);
    for g in &mut grads {
        g.scale(global);
    }
    Ok((u, grads))
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

/// `max(0, 1 − Σ_i |R_ii| / N)`: zero exactly when `R` is diagonal up to
/// phases on each entry.
#[allow(clippy::cast_precision_loss)]
pub fn diagonal_distance(remainder: &UnitaryMatrix) -> f64 {
    let n = remainder.dim() as f64;
    let diag: f64 = remainder.data.diag().iter().map(|z| z.norm()).sum();
    (1.0 - diag / n).max(0.0)
}

/// `max(0, 1 − |Tr(a† b)| / N)`: zero when `a` and `b` agree up to a global
/// phase.
#[allow(clippy::cast_precision_loss)]
pub fn hilbert_schmidt_distance(a: &UnitaryMatrix, b: &UnitaryMatrix) -> CompileResult<f64> {
    let n = a.dim() as f64;
    Ok((1.0 - a.inner(b)?.norm() / n).max(0.0))
}
