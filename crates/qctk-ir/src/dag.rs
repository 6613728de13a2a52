//! DAG-based circuit representation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex as PetNodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Ordering key of an operation node: `(sequence, sub-position)`.
///
/// Nodes appended with [`CircuitDag::apply`] get increasing sequence
/// numbers; replacements from [`CircuitDag::substitute_node`] inherit the
/// sequence number of the node they replace. Keys only break ties between
/// operations that are simultaneously ready, so topological iteration
/// follows insertion order wherever the wires allow it.
type OpKey = (u64, u64);

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a wire.
    In(QubitId),
    /// Output node for a wire.
    Out(QubitId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }

    /// Get mutable reference to the instruction.
    #[inline]
    pub fn instruction_mut(&mut self) -> Option<&mut Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// An edge in the circuit DAG: one segment of a qubit wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge belongs to.
    pub wire: QubitId,
}

/// DAG-based circuit representation.
///
/// - Nodes are input nodes, output nodes, or operation nodes
/// - Edges are wire segments; each wire runs from its input node through
///   the operations touching it to its output node
///
/// The graph is a [`StableDiGraph`], so node indices stay valid across
/// removals. `wire_front` maps each wire to the node just before its
/// output node, making [`apply`](Self::apply) O(arity).
#[derive(Debug, Clone)]
pub struct CircuitDag {
    graph: StableDiGraph<DagNode, DagEdge, u32>,
    /// Qubits in the order they were added.
    qubits: Vec<QubitId>,
    qubit_inputs: FxHashMap<QubitId, NodeIndex>,
    qubit_outputs: FxHashMap<QubitId, NodeIndex>,
    wire_front: FxHashMap<QubitId, NodeIndex>,
    order: FxHashMap<NodeIndex, OpKey>,
    next_seq: u64,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::default(),
            qubits: vec![],
            qubit_inputs: FxHashMap::default(),
            qubit_outputs: FxHashMap::default(),
            wire_front: FxHashMap::default(),
            order: FxHashMap::default(),
            next_seq: 0,
        }
    }

    /// Add a qubit to the circuit. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.qubit_inputs.contains_key(&qubit) {
            return;
        }
        let in_node = self.graph.add_node(DagNode::In(qubit));
        let out_node = self.graph.add_node(DagNode::Out(qubit));
        self.graph.add_edge(in_node, out_node, DagEdge { wire: qubit });
        self.qubits.push(qubit);
        self.qubit_inputs.insert(qubit, in_node);
        self.qubit_outputs.insert(qubit, out_node);
        self.wire_front.insert(qubit, in_node);
    }

    /// Check that an instruction can be placed in this DAG.
    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            InstructionKind::Barrier => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got: u32::try_from(got).unwrap_or(u32::MAX),
                });
            }
        }

        for &qubit in &instruction.qubits {
            if !self.qubit_inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Apply an instruction at the end of the circuit.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.validate(&instruction)?;

        let qubits = instruction.qubits.clone();
        let op_node = self.graph.add_node(DagNode::Op(instruction));
        self.order.insert(op_node, (self.next_seq, 0));
        self.next_seq += 1;

        for qubit in qubits {
            let out_node = self.qubit_outputs[&qubit];
            let prev_node = self.wire_front[&qubit];

            let eid = self
                .graph
                .edges_directed(prev_node, Direction::Outgoing)
                .find(|e| e.weight().wire == qubit && e.target() == out_node)
                .map(|e| e.id())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Missing edge from predecessor to output for wire {qubit:?}"
                    ))
                })?;
            self.graph.remove_edge(eid);
            self.graph.add_edge(prev_node, op_node, DagEdge { wire: qubit });
            self.graph.add_edge(op_node, out_node, DagEdge { wire: qubit });
            self.wire_front.insert(qubit, op_node);
        }

        Ok(op_node)
    }

    /// Operation node indices in topological order.
    ///
    /// Kahn's algorithm with ready nodes ordered by insertion key, so the
    /// result is deterministic and matches the order instructions were
    /// applied whenever that order is still valid.
    pub fn topological_nodes(&self) -> Vec<NodeIndex> {
        let mut indegree: FxHashMap<NodeIndex, usize> = FxHashMap::default();
        let mut ready: BinaryHeap<Reverse<(OpKey, NodeIndex)>> = BinaryHeap::new();

        for node in self.graph.node_indices() {
            if !self.graph[node].is_op() {
                continue;
            }
            let deg = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .filter(|e| self.graph[e.source()].is_op())
                .count();
            if deg == 0 {
                ready.push(Reverse((self.key(node), node)));
            } else {
                indegree.insert(node, deg);
            }
        }

        let mut sorted = Vec::with_capacity(self.order.len());
        while let Some(Reverse((_, node))) = ready.pop() {
            sorted.push(node);
            for edge in self.graph.edges_directed(node, Direction::Outgoing) {
                let succ = edge.target();
                if let Some(deg) = indegree.get_mut(&succ) {
                    *deg -= 1;
                    if *deg == 0 {
                        indegree.remove(&succ);
                        ready.push(Reverse((self.key(succ), succ)));
                    }
                }
            }
        }
        sorted
    }

    /// Iterate over operations in topological order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.topological_nodes()
            .into_iter()
            .filter_map(|idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    /// Instructions in topological order, cloned.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.topological_ops().map(|(_, inst)| inst.clone()).collect()
    }

    #[inline]
    fn key(&self, node: NodeIndex) -> OpKey {
        self.order.get(&node).copied().unwrap_or((u64::MAX, 0))
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(|n| n.instruction())
    }

    /// Get a mutable instruction by node index.
    #[inline]
    pub fn get_instruction_mut(&mut self, node: NodeIndex) -> Option<&mut Instruction> {
        self.graph
            .node_weight_mut(node)
            .and_then(|n| n.instruction_mut())
    }

    /// The node following `node` on `wire`, or `None` if the wire ends there.
    pub fn next_on_wire(&self, node: NodeIndex, wire: QubitId) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|e| e.weight().wire == wire)
            .map(|e| e.target())
            .filter(|&n| self.graph[n].is_op())
    }

    /// Operation nodes on one wire, from input to output.
    pub fn wire_ops(&self, wire: QubitId) -> Vec<NodeIndex> {
        let Some(&start) = self.qubit_inputs.get(&wire) else {
            return vec![];
        };
        let mut ops = vec![];
        let mut current = start;
        while let Some(next) = self.next_on_wire(current, wire) {
            ops.push(next);
            current = next;
        }
        ops
    }

    /// Per-wire `(predecessor, successor)` of an operation node.
    fn neighbours_by_wire(&self, node: NodeIndex) -> FxHashMap<QubitId, (NodeIndex, NodeIndex)> {
        let mut around: FxHashMap<QubitId, (Option<NodeIndex>, Option<NodeIndex>)> =
            FxHashMap::default();
        for e in self.graph.edges_directed(node, Direction::Incoming) {
            around.entry(e.weight().wire).or_default().0 = Some(e.source());
        }
        for e in self.graph.edges_directed(node, Direction::Outgoing) {
            around.entry(e.weight().wire).or_default().1 = Some(e.target());
        }
        around
            .into_iter()
            .filter_map(|(w, (p, s))| Some((w, (p?, s?))))
            .collect()
    }

    /// Remove an operation node, reconnecting its wires.
    pub fn remove_op(&mut self, node: NodeIndex) -> IrResult<Instruction> {
        match self.graph.node_weight(node) {
            Some(DagNode::Op(_)) => {}
            Some(_) => {
                return Err(IrError::InvalidDag(
                    "Cannot remove non-operation node".into(),
                ));
            }
            None => return Err(IrError::InvalidNode),
        }

        let around = self.neighbours_by_wire(node);
        let Some(DagNode::Op(instruction)) = self.graph.remove_node(node) else {
            return Err(IrError::InvalidNode);
        };
        self.order.remove(&node);

        for (wire, (pred, succ)) in around {
            self.graph.add_edge(pred, succ, DagEdge { wire });
            if self.wire_front.get(&wire) == Some(&node) {
                self.wire_front.insert(wire, pred);
            }
        }

        Ok(instruction)
    }

    /// Replace an operation node by a sequence of instructions, in place.
    ///
    /// The replacement may only touch qubits of the replaced operation.
    /// An empty replacement is equivalent to [`remove_op`](Self::remove_op).
    pub fn substitute_node(
        &mut self,
        node: NodeIndex,
        replacement: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Vec<NodeIndex>> {
        let scope: Vec<QubitId> = self
            .get_instruction(node)
            .ok_or(IrError::InvalidNode)?
            .qubits
            .clone();
        let replacement: Vec<Instruction> = replacement.into_iter().collect();
        for inst in &replacement {
            self.validate(inst)?;
            if let Some(&q) = inst.qubits.iter().find(|q| !scope.contains(q)) {
                return Err(IrError::ReplacementOutOfScope(q));
            }
        }

        let (seq, sub) = self.key(node);
        let around = self.neighbours_by_wire(node);
        self.graph.remove_node(node);
        self.order.remove(&node);

        let mut front: FxHashMap<QubitId, NodeIndex> =
            around.iter().map(|(&w, &(pred, _))| (w, pred)).collect();
        let mut new_nodes = Vec::with_capacity(replacement.len());
        for (i, inst) in replacement.into_iter().enumerate() {
            let qubits = inst.qubits.clone();
            let op = self.graph.add_node(DagNode::Op(inst));
            self.order.insert(op, (seq, sub + i as u64 + 1));
            for q in qubits {
                self.graph.add_edge(front[&q], op, DagEdge { wire: q });
                front.insert(q, op);
            }
            new_nodes.push(op);
        }

        for (wire, (_, succ)) in around {
            let last = front[&wire];
            self.graph.add_edge(last, succ, DagEdge { wire });
            if self.wire_front.get(&wire) == Some(&node) {
                self.wire_front.insert(wire, last);
            }
        }

        Ok(new_nodes)
    }

    /// Replace every operation with `instructions`, keeping the qubits.
    pub fn rebuild(&mut self, instructions: impl IntoIterator<Item = Instruction>) -> IrResult<()> {
        let mut fresh = CircuitDag::new();
        for &q in &self.qubits {
            fresh.add_qubit(q);
        }
        for inst in instructions {
            fresh.apply(inst)?;
        }
        *self = fresh;
        Ok(())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.order.len()
    }

    /// Longest path through the DAG where each operation weighs `weight(op)`.
    pub fn weighted_depth(&self, weight: impl Fn(&Instruction) -> usize) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.order.len(), Default::default());
        let mut max_depth = 0usize;

        for node in self.topological_nodes() {
            let Some(inst) = self.graph[node].instruction() else {
                continue;
            };
            let max_pred = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            let d = max_pred + weight(inst);
            max_depth = max_depth.max(d);
            depths.insert(node, d);
        }

        max_depth
    }

    /// Circuit depth: every gate counts one layer, barriers none.
    pub fn depth(&self) -> usize {
        self.weighted_depth(|inst| usize::from(inst.is_gate()))
    }

    /// T-depth: number of layers containing a T or T-dagger gate.
    pub fn t_depth(&self) -> usize {
        self.weighted_depth(|inst| usize::from(inst.is_t()))
    }

    /// Iterate over qubits in the order they were added.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().copied()
    }

    /// Get the input node for a qubit.
    #[inline]
    pub fn qubit_input_node(&self, qubit: QubitId) -> Option<NodeIndex> {
        self.qubit_inputs.get(&qubit).copied()
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &StableDiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks that the graph is acyclic, every qubit has one In and one Out
    /// node, and every wire forms a path from In to Out.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for &qubit in &self.qubits {
            let (Some(&in_node), Some(&out_node)) =
                (self.qubit_inputs.get(&qubit), self.qubit_outputs.get(&qubit))
            else {
                return Err(IrError::InvalidDag(format!(
                    "Qubit {qubit:?} is missing an In or Out node"
                )));
            };

            let mut current = in_node;
            let mut steps = 0;
            let max_steps = self.graph.node_count();
            while current != out_node {
                current = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .find(|e| e.weight().wire == qubit)
                    .map(|e| e.target())
                    .ok_or_else(|| {
                        IrError::InvalidDag(format!(
                            "Wire for qubit {qubit:?} is broken after node {current:?}"
                        ))
                    })?;
                steps += 1;
                if steps > max_steps {
                    return Err(IrError::InvalidDag(format!(
                        "Wire for qubit {qubit:?} does not terminate"
                    )));
                }
            }
        }

        let op_nodes = self.graph.node_indices().filter(|&n| self.graph[n].is_op()).count();
        if op_nodes != self.topological_nodes().len() {
            return Err(IrError::InvalidDag(
                "Unreachable operation node found in DAG".into(),
            ));
        }

        Ok(())
    }
}

impl Default for CircuitDag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn two_qubit_dag() -> CircuitDag {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));
        dag
    }

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
        assert_eq!(dag.t_depth(), 0);
    }

    #[test]
    fn test_bell_state_depth() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_parallel_gates_depth() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_t_depth_propagates_through_cnot() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::Tdg, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();

        assert_eq!(dag.t_depth(), 2);
        assert_eq!(dag.depth(), 3);
    }

    #[test]
    fn test_barrier_has_no_depth_but_orders_wires() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::barrier([QubitId(0), QubitId(1)]))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let mut dag = two_qubit_dag();
        let result = dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)]));
        match result {
            Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            }) => {
                assert_eq!(gate_name, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            _ => panic!("Expected QubitCountMismatch error"),
        }
    }

    #[test]
    fn test_qubit_not_found_with_context() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        let result = dag.apply(Instruction::cx(QubitId(0), QubitId(99)));
        match result {
            Err(IrError::QubitNotFound { qubit, gate_name }) => {
                assert_eq!(qubit, QubitId(99));
                assert_eq!(gate_name, Some("cx".to_string()));
            }
            _ => panic!("Expected QubitNotFound error"),
        }
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut dag = two_qubit_dag();
        let result = dag.apply(Instruction::cx(QubitId(1), QubitId(1)));
        assert!(matches!(result, Err(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_topological_order_follows_insertion() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::S, QubitId(0)))
            .unwrap();

        let names: Vec<_> = dag.topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["h", "t", "cx", "s"]);
    }

    #[test]
    fn test_remove_op_reconnects_wire() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        let t = dag
            .apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();

        let removed = dag.remove_op(t).unwrap();
        assert_eq!(removed.as_gate(), Some(StandardGate::T));
        assert_eq!(dag.num_ops(), 2);
        dag.verify_integrity().unwrap();

        // The wire front still works after removal.
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(1)))
            .unwrap();
        dag.verify_integrity().unwrap();
        assert_eq!(dag.depth(), 3);
    }

    #[test]
    fn test_remove_last_op_updates_front() {
        let mut dag = two_qubit_dag();
        let h = dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.remove_op(h).unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(0)))
            .unwrap();
        dag.verify_integrity().unwrap();
        assert_eq!(dag.num_ops(), 1);
    }

    #[test]
    fn test_substitute_node_in_place() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        let swap = dag
            .apply(Instruction::two_qubit_gate(
                StandardGate::Swap,
                QubitId(0),
                QubitId(1),
            ))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::T, QubitId(1)))
            .unwrap();

        let new_nodes = dag
            .substitute_node(
                swap,
                [
                    Instruction::cx(QubitId(0), QubitId(1)),
                    Instruction::cx(QubitId(1), QubitId(0)),
                    Instruction::cx(QubitId(0), QubitId(1)),
                ],
            )
            .unwrap();
        assert_eq!(new_nodes.len(), 3);
        dag.verify_integrity().unwrap();

        let names: Vec<_> = dag.topological_ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["h", "cx", "cx", "cx", "t"]);
        assert_eq!(dag.depth(), 5);
    }

    #[test]
    fn test_substitute_rejects_foreign_qubit() {
        let mut dag = two_qubit_dag();
        let h = dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        let result = dag.substitute_node(
            h,
            [Instruction::single_qubit_gate(StandardGate::H, QubitId(1))],
        );
        assert!(matches!(result, Err(IrError::ReplacementOutOfScope(_))));
        // Validation happens before any mutation.
        assert_eq!(dag.num_ops(), 1);
    }

    #[test]
    fn test_wire_ops_walk() {
        let mut dag = two_qubit_dag();
        let a = dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        let b = dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();
        assert_eq!(dag.wire_ops(QubitId(0)), vec![a, b]);
        assert_eq!(dag.wire_ops(QubitId(1)), vec![b]);
        assert_eq!(dag.next_on_wire(b, QubitId(1)), None);
    }

    #[test]
    fn test_rebuild_keeps_qubits() {
        let mut dag = two_qubit_dag();
        dag.apply(Instruction::cx(QubitId(0), QubitId(1))).unwrap();
        dag.rebuild([Instruction::single_qubit_gate(StandardGate::X, QubitId(1))])
            .unwrap();
        assert_eq!(dag.num_qubits(), 2);
        assert_eq!(dag.num_ops(), 1);
        dag.verify_integrity().unwrap();
    }
}
