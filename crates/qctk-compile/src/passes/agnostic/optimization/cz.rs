//! Re-synthesis of CZ blocks.

use qctk_ir::{CircuitDag, Instruction, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CompileResult;
use crate::linalg::{Mat2, SynthGate, synthesize_cz};
use crate::pass::{Pass, PassKind};
use crate::passes::wire_positions;
use crate::property::PropertySet;

/// Re-synthesizes maximal contiguous runs of CZ gates.
///
/// CZs commute, so a run is just the parity of each pair. Repeated pairs
/// drop out, and pairs sharing many neighbours are folded with CNOTs (see
/// [`synthesize_cz`]). A run is replaced only when the result is shorter.
pub struct CzSynthesis;

/// A shorter equivalent of a CZ run, if there is one.
fn resynthesize(
    run: &[Instruction],
    positions: &FxHashMap<QubitId, usize>,
    qubits: &[QubitId],
) -> CompileResult<Option<Vec<Instruction>>> {
    if run.len() < 2 {
        return Ok(None);
    }
    let n = qubits.len();
    let mut cz = Mat2::zeros(n, n);
    for inst in run {
        let (a, b) = (positions[&inst.qubits[0]], positions[&inst.qubits[1]]);
        cz.set(a, b, !cz.get(a, b));
        cz.set(b, a, !cz.get(b, a));
    }

    let gates = synthesize_cz(&cz, true)?;
    if gates.len() >= run.len() {
        return Ok(None);
    }
    debug!("CZ run of {} rewritten as {} gates", run.len(), gates.len());
    Ok(Some(
        gates
            .into_iter()
            .map(|g| match g {
                SynthGate::Cnot(c, t) => Instruction::cx(qubits[c], qubits[t]),
                SynthGate::Cz(a, b) => {
                    Instruction::two_qubit_gate(StandardGate::CZ, qubits[a], qubits[b])
                }
            })
            .collect(),
    ))
}

/// Move `run` into `output`, rewritten if that helps. Returns whether it was.
fn flush_run(
    run: &mut Vec<Instruction>,
    output: &mut Vec<Instruction>,
    positions: &FxHashMap<QubitId, usize>,
    qubits: &[QubitId],
) -> CompileResult<bool> {
    let rewritten = resynthesize(run, positions, qubits)?;
    let changed = rewritten.is_some();
    match rewritten {
        Some(shorter) => {
            output.extend(shorter);
            run.clear();
        }
        None => output.append(run),
    }
    Ok(changed)
}

impl Pass for CzSynthesis {
    fn name(&self) -> &'static str {
        "CzSynthesis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let positions = wire_positions(dag);
        let qubits: Vec<QubitId> = dag.qubits().collect();

        let mut output = Vec::with_capacity(dag.num_ops());
        let mut run: Vec<Instruction> = vec![];
        let mut changed = false;

        for inst in dag.instructions() {
            if inst.as_gate() == Some(StandardGate::CZ) {
                run.push(inst);
                continue;
            }
            changed |= flush_run(&mut run, &mut output, &positions, &qubits)?;
            output.push(inst);
        }
        changed |= flush_run(&mut run, &mut output, &positions, &qubits)?;

        if changed {
            dag.rebuild(output)?;
        }
        Ok(())
    }
}
