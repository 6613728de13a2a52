//! AST-to-Circuit lowering for `.qc`.

use qctk_ir::{Circuit, QubitId, StandardGate};

use crate::ast::{Directive, GateLine, Program};
use crate::error::{QcError, QcResult};
use crate::header::HeaderStats;
use crate::qc::QcCircuit;

/// Lower a parsed program to a circuit.
pub(crate) fn lower_program(program: &Program, header: HeaderStats) -> QcResult<QcCircuit> {
    let mut circuit = Circuit::new("circuit");

    // First pass: wires, so `.i`/`.o` may appear in any order.
    for decl in &program.declarations {
        if decl.directive != Directive::Variables {
            continue;
        }
        for name in &decl.names {
            if circuit.qubit_by_name(name).is_some() {
                return Err(QcError::DuplicateWire {
                    line: decl.line,
                    name: name.clone(),
                });
            }
            circuit.add_named_qubit(name.as_str())?;
        }
    }

    let mut inputs = vec![];
    let mut outputs = vec![];
    let mut constants = vec![];
    let mut output_labels = vec![];
    for decl in &program.declarations {
        match decl.directive {
            Directive::Variables => {}
            Directive::Inputs => inputs.extend(resolve(&circuit, &decl.names, decl.line)?),
            Directive::Outputs => outputs.extend(resolve(&circuit, &decl.names, decl.line)?),
            Directive::Constants => constants.extend(decl.names.iter().cloned()),
            Directive::OutputLabels => output_labels.extend(decl.names.iter().cloned()),
        }
    }

    for gate_line in &program.body {
        lower_gate(&mut circuit, gate_line)?;
    }

    Ok(QcCircuit {
        circuit,
        inputs,
        outputs,
        constants,
        output_labels,
        header,
    })
}

fn resolve(circuit: &Circuit, names: &[String], line: usize) -> QcResult<Vec<QubitId>> {
    names
        .iter()
        .map(|name| {
            circuit
                .qubit_by_name(name)
                .ok_or_else(|| QcError::UnknownWire {
                    line,
                    name: name.clone(),
                })
        })
        .collect()
}

fn lower_gate(circuit: &mut Circuit, gate_line: &GateLine) -> QcResult<()> {
    let gate = resolve_gate(&gate_line.mnemonic, gate_line.args.len(), gate_line.line)?;
    let qubits = resolve(circuit, &gate_line.args, gate_line.line)?;
    circuit
        .gate(gate, qubits)
        .map_err(|source| QcError::Circuit {
            line: gate_line.line,
            source,
        })?;
    Ok(())
}

/// Map a mnemonic and argument count to a gate.
///
/// Mnemonics are case-insensitive. `cnot` and `tof` are the same
/// multi-controlled X whose last argument is the target; `Z` with two or
/// three arguments is a (doubly) controlled Z.
pub(crate) fn resolve_gate(mnemonic: &str, arity: usize, line: usize) -> QcResult<StandardGate> {
    let name = mnemonic.to_ascii_lowercase();
    let wrong = |expected: &str| QcError::WrongArity {
        line,
        gate: mnemonic.to_string(),
        expected: expected.to_string(),
        got: arity,
    };

    match (name.as_str(), arity) {
        ("h", 1) => Ok(StandardGate::H),
        ("x", 1) => Ok(StandardGate::X),
        ("y", 1) => Ok(StandardGate::Y),
        ("z", 1) => Ok(StandardGate::Z),
        ("z", 2) => Ok(StandardGate::CZ),
        ("z", 3) => Ok(StandardGate::CCZ),
        ("s" | "p", 1) => Ok(StandardGate::S),
        ("s*" | "p*", 1) => Ok(StandardGate::Sdg),
        ("t", 1) => Ok(StandardGate::T),
        ("t*", 1) => Ok(StandardGate::Tdg),
        ("swap", 2) => Ok(StandardGate::Swap),
        ("cnot" | "tof", n) if n >= 1 => {
            let controls = u32::try_from(n - 1).map_err(|_| wrong("fewer"))?;
            Ok(StandardGate::controlled_x(controls))
        }
        ("h" | "x" | "y" | "s" | "p" | "s*" | "p*" | "t" | "t*", _) => Err(wrong("1")),
        ("z", _) => Err(wrong("1 to 3")),
        ("swap", _) => Err(wrong("2")),
        ("cnot" | "tof", _) => Err(wrong("at least 1")),
        _ => Err(QcError::UnknownGate {
            line,
            name: mnemonic.to_string(),
        }),
    }
}
