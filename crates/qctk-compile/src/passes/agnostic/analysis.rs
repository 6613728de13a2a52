//! Analysis passes: circuit statistics and parity matrices.

use qctk_ir::{CircuitDag, CircuitStats, StandardGate};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::linalg::Mat2;
use crate::pass::{Pass, PassKind};
use crate::passes::wire_positions;
use crate::property::PropertySet;

/// Records [`CircuitStats`] in `properties.stats`.
pub struct StatsAnalysis {
    name: String,
}

impl StatsAnalysis {
    /// Statistics are labelled with `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for StatsAnalysis {
    fn default() -> Self {
        Self::new("circuit")
    }
}

impl Pass for StatsAnalysis {
    fn name(&self) -> &'static str {
        "StatsAnalysis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let stats = CircuitStats::from_dag(self.name.clone(), dag);
        debug!(
            gates = stats.total_gates,
            depth = stats.depth,
            t_depth = stats.t_depth,
            "circuit statistics"
        );
        properties.stats = Some(stats);
        Ok(())
    }
}

/// Parity matrix of a circuit made of CNOT and SWAP gates.
///
/// Row `i` is the set of input wires XORed onto output wire `i`; wires are
/// numbered in the DAG's qubit order. Barriers are ignored.
pub fn linear_map(dag: &CircuitDag) -> CompileResult<Mat2> {
    let positions = wire_positions(dag);
    let mut m = Mat2::identity(dag.num_qubits());

    for (position, (_, inst)) in dag.topological_ops().enumerate() {
        let Some(gate) = inst.as_gate() else {
            continue;
        };
        let wires: Vec<usize> = inst.qubits.iter().map(|q| positions[q]).collect();
        match gate {
            StandardGate::CX => m.row_add(wires[0], wires[1]),
            StandardGate::Swap => m.swap_rows(wires[0], wires[1]),
            other => {
                return Err(CompileError::NotLinear {
                    gate: other.name().to_string(),
                    position,
                });
            }
        }
    }

    Ok(m)
}

/// Records the circuit's parity matrix in `properties.linear_map`.
pub struct LinearMapAnalysis;

impl Pass for LinearMapAnalysis {
    fn name(&self) -> &'static str {
        "LinearMapAnalysis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let m = linear_map(dag)?;
        debug!(rank = m.rank(), "parity matrix computed");
        properties.linear_map = Some(m);
        Ok(())
    }
}
