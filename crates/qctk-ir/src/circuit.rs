//! High-level circuit builder API.

use rustc_hash::FxHashMap;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{Qubit, QubitId};
use crate::stats::CircuitStats;

/// A quantum circuit.
///
/// This provides a high-level API for building quantum circuits,
/// with convenient methods for common gates and operations.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Lookup from wire labels to qubit ids.
    labels: FxHashMap<String, QubitId>,
    /// The underlying DAG representation.
    dag: CircuitDag,
    /// Counter for generating qubit IDs.
    next_qubit_id: u32,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            labels: FxHashMap::default(),
            dag: CircuitDag::new(),
            next_qubit_id: 0,
        }
    }

    /// Create a circuit with a given number of unlabelled qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    fn push_qubit(&mut self, qubit: Qubit) -> QubitId {
        let id = qubit.id;
        self.qubits.push(qubit);
        self.dag.add_qubit(id);
        id
    }

    /// Add a single unlabelled qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.push_qubit(Qubit::new(id))
    }

    /// Add a qubit addressed by a wire name. Names must be unique.
    pub fn add_named_qubit(&mut self, name: impl Into<String>) -> IrResult<QubitId> {
        let name = name.into();
        if self.labels.contains_key(&name) {
            return Err(IrError::DuplicateName(name));
        }
        let id = QubitId(self.next_qubit_id);
        self.next_qubit_id += 1;
        self.labels.insert(name.clone(), id);
        Ok(self.push_qubit(Qubit::named(id, name)))
    }

    /// Add a quantum register with multiple qubits. Register names must be
    /// unique.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<QubitId>> {
        let name = name.into();
        if self.qubits.iter().any(|q| q.register.as_deref() == Some(&name)) {
            return Err(IrError::DuplicateName(name));
        }
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.next_qubit_id);
            self.next_qubit_id += 1;
            self.labels.insert(format!("{name}[{i}]"), id);
            ids.push(self.push_qubit(Qubit::with_register(id, &name, i)));
        }
        Ok(ids)
    }

    /// Find a qubit by wire name or `reg[idx]` label.
    pub fn qubit_by_name(&self, name: &str) -> Option<QubitId> {
        self.labels.get(name).copied()
    }

    /// Look up qubit metadata.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.iter().find(|q| q.id == id)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Z, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Tdg, [qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CZ, [q1, q2])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::Swap, [q1, q2])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CCX, [c1, c2, target])
    }

    /// Apply doubly-controlled Z gate.
    pub fn ccz(&mut self, q1: QubitId, q2: QubitId, q3: QubitId) -> IrResult<&mut Self> {
        self.gate(StandardGate::CCZ, [q1, q2, q3])
    }

    /// Apply an X gate controlled on every qubit in `controls`.
    ///
    /// Zero, one and two controls produce X, CX and CCX respectively.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        let gate = StandardGate::controlled_x(u32::try_from(controls.len()).unwrap_or(u32::MAX));
        self.gate(gate, controls.iter().copied().chain([target]))
    }

    /// Apply a gate to the given qubits.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply a barrier.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Append an arbitrary instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(instruction)?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of operations, barriers included.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get the circuit T-depth.
    pub fn t_depth(&self) -> usize {
        self.dag.t_depth()
    }

    /// Instructions in topological order.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.dag.instructions()
    }

    /// Compute gate counts, depth and T-depth.
    pub fn stats(&self) -> CircuitStats {
        CircuitStats::from_circuit(self)
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

    /// Create an unlabelled circuit from a DAG.
    pub fn from_dag(dag: CircuitDag) -> Self {
        let qubits: Vec<_> = dag.qubits().map(Qubit::new).collect();
        let next_qubit_id = qubits.iter().map(|q| q.id.0 + 1).max().unwrap_or(0);

        Self {
            name: "circuit".into(),
            qubits,
            labels: FxHashMap::default(),
            dag,
            next_qubit_id,
        }
    }

    /// Replace the DAG, keeping name and qubit labels.
    ///
    /// The new DAG must be defined over the same qubits.
    pub fn with_dag(&self, dag: CircuitDag) -> IrResult<Self> {
        if let Some(q) = dag.qubits().find(|&q| self.qubit(q).is_none()) {
            return Err(IrError::QubitNotFound {
                qubit: q,
                gate_name: None,
            });
        }
        if dag.num_qubits() != self.qubits.len() {
            return Err(IrError::InvalidDag(format!(
                "DAG has {} qubits, circuit has {}",
                dag.num_qubits(),
                self.qubits.len()
            )));
        }
        Ok(Self {
            name: self.name.clone(),
            qubits: self.qubits.clone(),
            labels: self.labels.clone(),
            dag,
            next_qubit_id: self.next_qubit_id,
        })
    }

    /// Build a circuit on `num_qubits` unlabelled qubits from instructions.
    pub fn from_instructions(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::with_size(name, num_qubits);
        for inst in instructions {
            circuit.dag.apply(inst)?;
        }
        Ok(circuit)
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_named_qubits() {
        let mut circuit = Circuit::new("named");
        let a = circuit.add_named_qubit("a").unwrap();
        let b = circuit.add_named_qubit("b").unwrap();
        assert_eq!(circuit.qubit_by_name("b"), Some(b));
        assert_eq!(circuit.qubit(a).unwrap().to_string(), "a");
        assert!(matches!(
            circuit.add_named_qubit("a"),
            Err(IrError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_qreg_labels() {
        let mut circuit = Circuit::new("regs");
        let q = circuit.add_qreg("q", 2).unwrap();
        let r = circuit.add_qreg("r", 1).unwrap();
        assert_eq!(q, vec![QubitId(0), QubitId(1)]);
        assert_eq!(r, vec![QubitId(2)]);
        assert_eq!(circuit.qubit_by_name("r[0]"), Some(QubitId(2)));
        assert!(circuit.add_qreg("q", 1).is_err());
    }

    #[test]
    fn test_mcx_picks_gate_by_width() {
        let mut circuit = Circuit::with_size("mcx", 5);
        let qs: Vec<_> = (0..5).map(QubitId).collect();
        circuit.mcx(&[], qs[0]).unwrap();
        circuit.mcx(&qs[..2], qs[2]).unwrap();
        circuit.mcx(&qs[..4], qs[4]).unwrap();
        let gates: Vec<_> = circuit
            .instructions()
            .iter()
            .filter_map(Instruction::as_gate)
            .collect();
        assert_eq!(
            gates,
            vec![
                StandardGate::X,
                StandardGate::CCX,
                StandardGate::Mcx { controls: 4 }
            ]
        );
    }

    #[test]
    fn test_from_instructions_validates() {
        let ok = Circuit::from_instructions(
            "ok",
            2,
            [Instruction::cx(QubitId(1), QubitId(0))],
        )
        .unwrap();
        assert_eq!(ok.num_ops(), 1);

        let err = Circuit::from_instructions("bad", 1, [Instruction::cx(QubitId(0), QubitId(1))]);
        assert!(matches!(err, Err(IrError::QubitNotFound { .. })));
    }

    #[test]
    fn test_with_dag_keeps_labels() {
        let mut circuit = Circuit::new("labels");
        let a = circuit.add_named_qubit("a").unwrap();
        circuit.h(a).unwrap();

        let mut dag = circuit.dag().clone();
        dag.rebuild([]).unwrap();
        let rebuilt = circuit.with_dag(dag).unwrap();
        assert_eq!(rebuilt.qubit_by_name("a"), Some(a));
        assert_eq!(rebuilt.num_ops(), 0);
    }

    #[test]
    fn test_t_depth() {
        let mut circuit = Circuit::with_size("tdepth", 2);
        circuit
            .t(QubitId(0))
            .unwrap()
            .t(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .t(QubitId(1))
            .unwrap();
        assert_eq!(circuit.t_depth(), 2);
        assert_eq!(circuit.depth(), 3);
    }
}
