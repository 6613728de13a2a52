//! Merging runs of Z-axis phase gates.

use qctk_ir::{CircuitDag, Instruction, NodeIndex, StandardGate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Merges maximal runs of `Z S S† T T†` on one wire.
///
/// The phases add up in eighths of a turn mod 8, and the run is replaced by
/// the shortest sequence with that phase when it is shorter. `T T` becomes
/// `S`, `S S†` disappears, and `T S T` becomes `Z`.
pub struct MergePhases;

impl MergePhases {
    /// Maximal runs of two or more phase gates on each wire.
    fn find_runs(dag: &CircuitDag) -> Vec<Vec<(NodeIndex, StandardGate)>> {
        let mut runs = vec![];
        for wire in dag.qubits() {
            let mut run: Vec<(NodeIndex, StandardGate)> = vec![];
            for node in dag.wire_ops(wire) {
                let phase_gate = dag
                    .get_instruction(node)
                    .and_then(Instruction::as_gate)
                    .filter(|g| g.phase_eighths().is_some());
                match phase_gate {
                    Some(gate) => run.push((node, gate)),
                    None => {
                        if run.len() > 1 {
                            runs.push(std::mem::take(&mut run));
                        } else {
                            run.clear();
                        }
                    }
                }
            }
            if run.len() > 1 {
                runs.push(run);
            }
        }
        runs
    }
}

impl Pass for MergePhases {
    fn name(&self) -> &'static str {
        "MergePhases"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut merged = 0;
        for run in Self::find_runs(dag) {
            let total: u32 = run
                .iter()
                .filter_map(|(_, g)| g.phase_eighths())
                .map(u32::from)
                .sum();
            let replacement = StandardGate::from_phase_eighths((total % 8) as u8);
            if replacement.len() >= run.len() {
                continue;
            }

            let Some(&(first, _)) = run.first() else {
                continue;
            };
            let Some(qubit) = dag.get_instruction(first).map(|inst| inst.qubits[0]) else {
                continue;
            };
            for &(node, _) in &run[1..] {
                dag.remove_op(node)?;
            }
            dag.substitute_node(
                first,
                replacement
                    .into_iter()
                    .map(|g| Instruction::single_qubit_gate(g, qubit)),
            )?;
            merged += 1;
        }
        debug!("merged {merged} phase runs");
        Ok(())
    }
}
