//! High-level circuit builder API.

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit over the dense wires `0..num_qubits`.
///
/// Thin builder around a [`CircuitDag`]. Operations are kept in the order
/// they were appended, which is also the order [`Circuit::operations`]
/// returns and the order in which parameters are numbered.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit with no wires.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// A circuit holding only `op`, relocated onto fresh wires `0..k`.
    ///
    /// The op's `i`-th qubit becomes qubit `i` of the new circuit; classical
    /// bits are renumbered the same way.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_operation(op: &Instruction) -> IrResult<Self> {
        let mut circuit = Self::with_size(
            op.name().to_string(),
            op.qubits.len() as u32,
            op.clbits.len() as u32,
        );
        let mut local = op.clone();
        local.qubits = (0..op.qubits.len() as u32).map(QubitId).collect();
        local.clbits = (0..op.clbits.len() as u32).map(ClbitId).collect();
        circuit.dag.apply(local)?;
        Ok(circuit)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        self.dag.add_qubit(id);
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        self.dag.add_clbit(id);
        id
    }

    /// Return a copy of this circuit under a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn apply_1q(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(gate, qubit))?;
        Ok(self)
    }

    fn apply_2q(&mut self, gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(gate, q1, q2))?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Tdg, qubit)
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::SX, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rz(theta.into()), qubit)
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::P(theta.into()), qubit)
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_1q(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            qubit,
        )
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CX, control, target)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CY, control, target)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CZ, control, target)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::Swap, q1, q2)
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CRz(theta.into()), control, target)
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CP(theta.into()), control, target)
    }

    /// Apply RXX (XX rotation) gate.
    pub fn rxx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::RXX(theta.into()), q1, q2)
    }

    /// Apply RYY (YY rotation) gate.
    pub fn ryy(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::RYY(theta.into()), q1, q2)
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::RZZ(theta.into()), q1, q2)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply a general diagonal `pauliz` gate on `qubits`.
    ///
    /// `params` holds one angle per Z-string, so its length must be
    /// `2^qubits.len()`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn pauli_z<P: Into<ParameterExpression>>(
        &mut self,
        params: impl IntoIterator<Item = P>,
        qubits: &[QubitId],
    ) -> IrResult<&mut Self> {
        let params = params.into_iter().map(Into::into).collect();
        let gate = StandardGate::pauli_z(qubits.len() as u32, params)?;
        self.dag.apply(Instruction::gate(gate, qubits.iter().copied()))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Append a gate at `location`.
    pub fn append_gate(
        &mut self,
        gate: impl Into<Gate>,
        location: &[QubitId],
    ) -> IrResult<&mut Self> {
        self.gate(gate, location.iter().copied())
    }

    /// Append a prebuilt instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    /// Splice `other` onto this circuit, mapping its qubit `i` to
    /// `location[i]`.
    ///
    /// The sub-circuit's global phase is added to this circuit's. Classical
    /// bits are carried over by index.
    pub fn append_circuit(&mut self, other: &Circuit, location: &[QubitId]) -> IrResult<&mut Self> {
        if location.len() != other.num_qubits() {
            return Err(IrError::LocationMismatch {
                width: other.num_qubits(),
                got: location.len(),
            });
        }
        for op in other.operations() {
            self.dag.apply(op.remapped(location))?;
        }
        self.add_global_phase(other.global_phase());
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Operations in circuit order.
    pub fn operations(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// Number of operations.
    pub fn num_operations(&self) -> usize {
        self.dag.num_ops()
    }

    /// Distinct symbol names in the order they first appear.
    ///
    /// Parameter vectors passed to unitary and cost evaluation bind these
    /// names positionally.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for op in self.operations() {
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

    /// Number of free parameters.
    pub fn num_params(&self) -> usize {
        self.parameter_names().len()
    }

    /// Global phase, in radians.
    pub fn global_phase(&self) -> f64 {
        self.dag.global_phase()
    }

    /// Add `phase` to the global phase.
    pub fn add_global_phase(&mut self, phase: f64) {
        let current = self.dag.global_phase();
        self.dag.set_global_phase(current + phase);
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Get a mutable reference to the underlying DAG.
    pub fn dag_mut(&mut self) -> &mut CircuitDag {
        &mut self.dag
    }

    /// Consume the circuit and return the DAG.
    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    /// Create a circuit from a DAG.
    ///
    /// Wire counts are taken from the DAG; its wires are expected to be the
    /// dense ranges `0..n`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_dag(dag: CircuitDag) -> Self {
        Self {
            name: "circuit".into(),
            num_qubits: dag.num_qubits() as u32,
            num_clbits: dag.num_clbits() as u32,
            dag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::location;
    use std::f64::consts::PI;

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_operations(), 0);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_parameter_names_first_appearance() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.rx(PI / 2.0, QubitId(0)).unwrap();
        circuit
            .rz(ParameterExpression::symbol("b"), QubitId(1))
            .unwrap();
        circuit
            .ry(
                ParameterExpression::symbol("a") * ParameterExpression::symbol("b"),
                QubitId(0),
            )
            .unwrap();

        assert_eq!(circuit.parameter_names(), vec!["b", "a"]);
        assert_eq!(circuit.num_params(), 2);
    }

    #[test]
    fn test_pauli_z_builder() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit
            .pauli_z([0.0, 0.1, 0.2, 0.3], &location([2, 0]))
            .unwrap();
        let op = circuit.operations().next().unwrap();
        assert!(op.is_pauli_z());
        assert_eq!(op.qubits, location([2, 0]));

        let err = circuit.pauli_z([0.0, 0.1], &location([0, 1])).unwrap_err();
        assert!(matches!(err, IrError::ParamCountMismatch { .. }));
    }

    #[test]
    fn test_from_operation_relocates() {
        let inst = Instruction::two_qubit_gate(StandardGate::CZ, QubitId(4), QubitId(1));
        let circuit = Circuit::from_operation(&inst).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        let op = circuit.operations().next().unwrap();
        assert_eq!(op.qubits, location([0, 1]));
        assert_eq!(op.kind, inst.kind);
    }

    #[test]
    fn test_append_circuit_maps_location_and_phase() {
        let mut sub = Circuit::with_size("sub", 2, 0);
        sub.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        sub.add_global_phase(0.5);

        let mut host = Circuit::with_size("host", 3, 0);
        host.add_global_phase(0.25);
        host.append_circuit(&sub, &location([2, 0])).unwrap();

        let ops: Vec<String> = host.operations().map(ToString::to_string).collect();
        assert_eq!(ops, vec!["h@(2)", "cx@(2, 0)"]);
        assert!((host.global_phase() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_append_circuit_width_mismatch() {
        let sub = Circuit::with_size("sub", 2, 0);
        let mut host = Circuit::with_size("host", 3, 0);
        let err = host.append_circuit(&sub, &location([0])).unwrap_err();
        assert!(matches!(err, IrError::LocationMismatch { width: 2, got: 1 }));
    }

    #[test]
    fn test_from_dag_round_trip() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(1)).unwrap();
        let rebuilt = Circuit::from_dag(circuit.clone().into_dag());
        assert_eq!(rebuilt.num_qubits(), 2);
        assert_eq!(rebuilt.num_operations(), 1);
    }
}
