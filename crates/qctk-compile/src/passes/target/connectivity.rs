//! Checking gates against the coupling map.

use qctk_ir::CircuitDag;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::passes::wire_positions;
use crate::property::PropertySet;

/// Fails with [`CompileError::Disconnected`] on the first multi-qubit gate
/// whose operands are not pairwise coupled.
///
/// Qubit `i` of the circuit (in declaration order) sits on physical qubit
/// `i`. Barriers are exempt.
pub struct ConnectivityCheck;

impl Pass for ConnectivityCheck {
    fn name(&self) -> &'static str {
        "ConnectivityCheck"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let coupling_map = properties
            .coupling_map
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;
        if dag.num_qubits() > coupling_map.num_qubits() as usize {
            return Err(CompileError::TooManyQubits {
                needed: dag.num_qubits(),
                available: coupling_map.num_qubits(),
            });
        }

        let positions = wire_positions(dag);
        let mut checked = 0;
        for (_, inst) in dag.topological_ops() {
            if !inst.is_gate() || inst.qubits.len() < 2 {
                continue;
            }
            let physical: Vec<u32> = inst
                .qubits
                .iter()
                .map(|q| positions[q] as u32)
                .collect();
            let coupled = physical.iter().enumerate().all(|(i, &a)| {
                physical[i + 1..]
                    .iter()
                    .all(|&b| coupling_map.is_connected(a, b))
            });
            if !coupled {
                return Err(CompileError::Disconnected {
                    gate: inst.name().to_string(),
                    qubits: physical,
                });
            }
            checked += 1;
        }

        debug!("{checked} multi-qubit gates respect {coupling_map}");
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.coupling_map.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::CouplingMap;
    use qctk_ir::{Circuit, QubitId};

    fn props(spec: &str) -> PropertySet {
        PropertySet::new().with_coupling_map(CouplingMap::parse(spec).unwrap())
    }

    #[test]
    fn test_linear_chain_ok() {
        let mut circuit = Circuit::with_size("c", 3);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(2), QubitId(1)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier([QubitId(0), QubitId(2)]).unwrap();
        let mut dag = circuit.into_dag();
        ConnectivityCheck.run(&mut dag, &mut props("linear:3")).unwrap();
    }

    #[test]
    fn test_distant_gate_rejected() {
        let mut circuit = Circuit::with_size("c", 3);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        let mut dag = circuit.into_dag();
        let err = ConnectivityCheck
            .run(&mut dag, &mut props("linear:3"))
            .unwrap_err();
        assert!(matches!(err, CompileError::Disconnected { ref qubits, .. } if qubits == &vec![0, 2]));
        ConnectivityCheck.run(&mut dag, &mut props("ring:3")).unwrap();
    }

    #[test]
    fn test_toffoli_needs_triangle() {
        let mut circuit = Circuit::with_size("c", 3);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        let mut dag = circuit.into_dag();
        assert!(ConnectivityCheck.run(&mut dag, &mut props("linear:3")).is_err());
        assert!(ConnectivityCheck.run(&mut dag, &mut props("full:3")).is_ok());
    }

    #[test]
    fn test_map_too_small() {
        let mut dag = Circuit::with_size("c", 4).into_dag();
        let err = ConnectivityCheck
            .run(&mut dag, &mut props("linear:3"))
            .unwrap_err();
        assert!(matches!(err, CompileError::TooManyQubits { needed: 4, available: 3 }));
        assert!(!ConnectivityCheck.should_run(&dag, &PropertySet::new()));
    }
}
