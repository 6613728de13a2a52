//! Tests for optimization passes.

use qctk_ir::{Circuit, CircuitDag, GateFamily, QubitId, StandardGate};

use crate::pass::Pass;
use crate::property::PropertySet;

use super::{CancelInverses, CzSynthesis, MergePhases};

fn run(pass: &dyn Pass, circuit: Circuit) -> CircuitDag {
    let mut dag = circuit.into_dag();
    pass.run(&mut dag, &mut PropertySet::new()).unwrap();
    dag.verify_integrity().unwrap();
    dag
}

fn names(dag: &CircuitDag) -> Vec<&'static str> {
    dag.topological_ops().map(|(_, inst)| inst.name()).collect()
}

fn q(i: u32) -> QubitId {
    QubitId(i)
}

#[test]
fn test_cancel_self_inverse_pairs() {
    let mut circuit = Circuit::with_size("test", 2);
    circuit.h(q(0)).unwrap();
    circuit.h(q(0)).unwrap();
    circuit.cx(q(0), q(1)).unwrap();
    circuit.cx(q(0), q(1)).unwrap();
    let dag = run(&CancelInverses, circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_cancel_to_fixed_point() {
    let mut circuit = Circuit::with_size("test", 1);
    circuit.x(q(0)).unwrap();
    circuit.t(q(0)).unwrap();
    circuit.tdg(q(0)).unwrap();
    circuit.s(q(0)).unwrap();
    circuit.sdg(q(0)).unwrap();
    circuit.x(q(0)).unwrap();
    let dag = run(&CancelInverses, circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_cancel_respects_direction() {
    let mut circuit = Circuit::with_size("test", 2);
    circuit.cx(q(0), q(1)).unwrap();
    circuit.cx(q(1), q(0)).unwrap();
    let dag = run(&CancelInverses, circuit);
    assert_eq!(dag.num_ops(), 2);
}

#[test]
fn test_cancel_symmetric_operands() {
    let mut circuit = Circuit::with_size("test", 3);
    circuit.cz(q(0), q(1)).unwrap();
    circuit.cz(q(1), q(0)).unwrap();
    circuit.ccx(q(0), q(1), q(2)).unwrap();
    circuit.ccx(q(1), q(0), q(2)).unwrap();
    let dag = run(&CancelInverses, circuit);
    assert_eq!(dag.num_ops(), 0);
}

#[test]
fn test_cancel_blocked_by_intervening_gate() {
    let mut circuit = Circuit::with_size("test", 2);
    circuit.cx(q(0), q(1)).unwrap();
    circuit.h(q(1)).unwrap();
    circuit.cx(q(0), q(1)).unwrap();
    circuit.t(q(0)).unwrap();
    circuit.t(q(0)).unwrap();
    let dag = run(&CancelInverses, circuit);
    assert_eq!(names(&dag), vec!["cx", "h", "cx", "t", "t"]);
}

#[test]
fn test_merge_t_pairs() {
    let mut circuit = Circuit::with_size("test", 1);
    circuit.t(q(0)).unwrap();
    circuit.t(q(0)).unwrap();
    circuit.h(q(0)).unwrap();
    circuit.t(q(0)).unwrap();
    circuit.s(q(0)).unwrap();
    circuit.t(q(0)).unwrap();
    let dag = run(&MergePhases, circuit);
    assert_eq!(names(&dag), vec!["s", "h", "z"]);
}

#[test]
fn test_merge_to_identity_and_keeps_short_runs() {
    let mut circuit = Circuit::with_size("test", 2);
    circuit.s(q(0)).unwrap();
    circuit.sdg(q(0)).unwrap();
    circuit.s(q(1)).unwrap();
    circuit.t(q(1)).unwrap();
    let dag = run(&MergePhases, circuit);
    assert_eq!(names(&dag), vec!["s", "t"]);
    assert_eq!(dag.wire_ops(q(0)).len(), 0);
}

#[test]
fn test_merge_reduces_t_count() {
    let mut circuit = Circuit::with_size("test", 2);
    for _ in 0..3 {
        circuit.t(q(0)).unwrap();
    }
    circuit.tdg(q(0)).unwrap();
    circuit.cx(q(0), q(1)).unwrap();
    let before = circuit.stats();
    let dag = run(&MergePhases, circuit.clone());
    let after = circuit.with_dag(dag).unwrap().stats();
    assert_eq!(before.t_count, 4);
    assert_eq!(after.t_count, 0);
    assert_eq!(after.count(GateFamily::S), 1);
}

#[test]
fn test_cz_duplicates_drop_out() {
    let mut circuit = Circuit::with_size("test", 3);
    circuit.cz(q(0), q(1)).unwrap();
    circuit.cz(q(1), q(2)).unwrap();
    circuit.cz(q(1), q(0)).unwrap();
    let dag = run(&CzSynthesis, circuit);
    assert_eq!(dag.num_ops(), 1);
    assert_eq!(dag.instructions()[0].qubits, vec![q(1), q(2)]);
}

#[test]
fn test_cz_block_folded_with_cnots() {
    // Qubits 0 and 1 both touch 2..6: eight CZs become six gates.
    let mut circuit = Circuit::with_size("test", 6);
    for k in 2..6 {
        circuit.cz(q(0), q(k)).unwrap();
        circuit.cz(q(1), q(k)).unwrap();
    }
    circuit.h(q(0)).unwrap();
    let dag = run(&CzSynthesis, circuit);
    assert_eq!(dag.num_ops(), 7);
    let cnots = dag
        .topological_ops()
        .filter(|(_, i)| i.as_gate() == Some(StandardGate::CX))
        .count();
    assert_eq!(cnots, 2);
    assert_eq!(names(&dag).last(), Some(&"h"));
}

#[test]
fn test_cz_short_runs_untouched() {
    let mut circuit = Circuit::with_size("test", 3);
    circuit.cz(q(0), q(1)).unwrap();
    circuit.h(q(1)).unwrap();
    circuit.cz(q(1), q(2)).unwrap();
    let dag = run(&CzSynthesis, circuit);
    assert_eq!(names(&dag), vec!["cz", "h", "cz"]);
}
