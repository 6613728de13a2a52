//! Cancellation of adjacent inverse gates.

use qctk_ir::{CircuitDag, Instruction, NodeIndex, QubitId, StandardGate};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Removes adjacent pairs `G · G⁻¹` acting on the same wires.
///
/// Covers the self-inverse gates (`H X Y Z CX CZ SWAP CCX CCZ MCX`) and
/// the pairs `S/S†` and `T/T†`. Symmetric gates match regardless of operand
/// order, as do the controls of Toffoli-like gates. Runs to a fixed point,
/// so `H H H H` and `X T T† X` vanish entirely.
pub struct CancelInverses;

impl CancelInverses {
    /// Find non-overlapping pairs that cancel in the current DAG.
    fn find_cancellable_pairs(dag: &CircuitDag) -> Vec<(NodeIndex, NodeIndex)> {
        let mut pairs = Vec::new();
        let mut processed: FxHashSet<NodeIndex> = FxHashSet::default();

        for (node, inst) in dag.topological_ops() {
            if processed.contains(&node) {
                continue;
            }
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            let Some(succ) = dag.next_on_wire(node, inst.qubits[0]) else {
                continue;
            };
            if processed.contains(&succ) {
                continue;
            }
            let Some(next) = dag.get_instruction(succ) else {
                continue;
            };
            if next.as_gate() != Some(gate.inverse()) || !same_operands(gate, inst, next) {
                continue;
            }
            // Directly adjacent on every wire, not just the first.
            if inst
                .qubits
                .iter()
                .all(|&q| dag.next_on_wire(node, q) == Some(succ))
            {
                pairs.push((node, succ));
                processed.insert(node);
                processed.insert(succ);
            }
        }

        pairs
    }
}

/// Whether two instructions of `gate` (or its inverse) act identically on
/// their operands.
fn same_operands(gate: StandardGate, a: &Instruction, b: &Instruction) -> bool {
    fn sorted(qs: &[QubitId]) -> Vec<QubitId> {
        let mut v = qs.to_vec();
        v.sort_unstable();
        v
    }

    if a.qubits.len() != b.qubits.len() {
        return false;
    }
    match gate {
        StandardGate::CZ | StandardGate::Swap | StandardGate::CCZ => {
            sorted(&a.qubits) == sorted(&b.qubits)
        }
        StandardGate::CCX | StandardGate::Mcx { .. } => {
            let (ca, ta) = a.qubits.split_at(a.qubits.len() - 1);
            let (cb, tb) = b.qubits.split_at(b.qubits.len() - 1);
            ta == tb && sorted(ca) == sorted(cb)
        }
        _ => a.qubits == b.qubits,
    }
}

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut removed = 0;
        loop {
            let pairs = Self::find_cancellable_pairs(dag);
            if pairs.is_empty() {
                break;
            }
            for (first, second) in pairs {
                dag.remove_op(second)?;
                dag.remove_op(first)?;
                removed += 2;
            }
        }
        debug!("cancelled {removed} gates");
        Ok(())
    }
}
