//! Gate decomposition into CNOTs.

use qctk_ir::{CircuitDag, Instruction, StandardGate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Rewrites every `swap a b` as `cx a b; cx b a; cx a b`, in place.
pub struct SwapDecomposition;

impl Pass for SwapDecomposition {
    fn name(&self) -> &'static str {
        "SwapDecomposition"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let swaps: Vec<_> = dag
            .topological_ops()
            .filter(|(_, inst)| inst.as_gate() == Some(StandardGate::Swap))
            .map(|(node, inst)| (node, inst.qubits[0], inst.qubits[1]))
            .collect();

        for &(node, a, b) in &swaps {
            dag.substitute_node(
                node,
                [
                    Instruction::cx(a, b),
                    Instruction::cx(b, a),
                    Instruction::cx(a, b),
                ],
            )?;
        }

        debug!("decomposed {} swaps", swaps.len());
        Ok(())
    }

    fn should_run(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.topological_ops()
            .any(|(_, inst)| inst.as_gate() == Some(StandardGate::Swap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qctk_ir::{Circuit, QubitId};

    #[test]
    fn test_swap_becomes_three_cnots() {
        let mut circuit = Circuit::with_size("s", 3);
        circuit.h(QubitId(0)).unwrap();
        circuit.swap(QubitId(0), QubitId(2)).unwrap();
        circuit.t(QubitId(2)).unwrap();
        let mut dag = circuit.into_dag();

        let mut props = PropertySet::new();
        assert!(SwapDecomposition.should_run(&dag, &props));
        SwapDecomposition.run(&mut dag, &mut props).unwrap();

        let names: Vec<_> = dag.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "cx", "cx", "cx", "t"]);
        assert_eq!(dag.instructions()[2].qubits, vec![QubitId(2), QubitId(0)]);
        assert!(!SwapDecomposition.should_run(&dag, &props));
        dag.verify_integrity().unwrap();
    }
}
