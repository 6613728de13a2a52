//! AST-to-Circuit lowering for QASM 2.0.

use qctk_ir::{Circuit, QubitId, StandardGate};
use rustc_hash::FxHashMap;

use crate::ast::{GateCall, Program, QubitRef, StatementKind};
use crate::error::{ParseError, ParseResult};

/// Lower an AST Program to a Circuit and its classical registers.
pub(crate) fn lower_to_circuit(program: &Program) -> ParseResult<(Circuit, Vec<(String, u32)>)> {
    let mut lowerer = Lowerer::new();
    lowerer.lower(program)
}

/// Lowers AST to Circuit.
struct Lowerer {
    /// Qubit registers: name -> (first qubit id, size).
    qregs: FxHashMap<String, (u32, u32)>,
    /// Classical registers in declaration order.
    cregs: Vec<(String, u32)>,
}

impl Lowerer {
    fn new() -> Self {
        Self {
            qregs: FxHashMap::default(),
            cregs: vec![],
        }
    }

    fn lower(&mut self, program: &Program) -> ParseResult<(Circuit, Vec<(String, u32)>)> {
        let mut circuit = Circuit::new("circuit");

        for stmt in &program.statements {
            let line = stmt.line;
            match &stmt.kind {
                StatementKind::Include(_) => {}

                StatementKind::QregDecl { name, size } => {
                    if self.is_declared(name) {
                        return Err(ParseError::DuplicateDeclaration {
                            line,
                            name: name.clone(),
                        });
                    }
                    let ids = circuit
                        .add_qreg(name.as_str(), *size)
                        .map_err(|source| ParseError::Circuit { line, source })?;
                    let start = ids.first().map_or(0, |q| q.0);
                    self.qregs.insert(name.clone(), (start, *size));
                }

                StatementKind::CregDecl { name, size } => {
                    if self.is_declared(name) {
                        return Err(ParseError::DuplicateDeclaration {
                            line,
                            name: name.clone(),
                        });
                    }
                    self.cregs.push((name.clone(), *size));
                }

                StatementKind::Gate(call) => self.lower_gate_call(&mut circuit, call, line)?,

                StatementKind::Barrier { qubits } => {
                    let ids = if qubits.is_empty() {
                        circuit.qubits().iter().map(|q| q.id).collect()
                    } else {
                        let mut ids = vec![];
                        for r in qubits {
                            for q in self.expand(r, line)? {
                                if !ids.contains(&q) {
                                    ids.push(q);
                                }
                            }
                        }
                        ids
                    };
                    circuit
                        .barrier(ids)
                        .map_err(|source| ParseError::Circuit { line, source })?;
                }
            }
        }

        Ok((circuit, std::mem::take(&mut self.cregs)))
    }

    fn is_declared(&self, name: &str) -> bool {
        self.qregs.contains_key(name) || self.cregs.iter().any(|(n, _)| n == name)
    }

    fn lower_gate_call(&self, circuit: &mut Circuit, call: &GateCall, line: usize) -> ParseResult<()> {
        let gate = resolve_gate(&call.name, line)?;
        let expected = gate.map_or(1, |g| g.num_qubits() as usize);
        if call.qubits.len() != expected {
            return Err(ParseError::WrongQubitCount {
                line,
                gate: call.name.clone(),
                expected,
                got: call.qubits.len(),
            });
        }

        for operands in self.broadcast(call, line)? {
            // `id` checks its operands and emits nothing.
            let Some(gate) = gate else {
                continue;
            };
            circuit
                .gate(gate, operands)
                .map_err(|source| ParseError::Circuit { line, source })?;
        }
        Ok(())
    }

    /// Expand whole-register operands element-wise.
    fn broadcast(&self, call: &GateCall, line: usize) -> ParseResult<Vec<Vec<QubitId>>> {
        let expanded: Vec<Vec<QubitId>> = call
            .qubits
            .iter()
            .map(|r| self.expand(r, line))
            .collect::<ParseResult<_>>()?;

        let width = expanded
            .iter()
            .zip(&call.qubits)
            .filter(|(_, r)| matches!(r, QubitRef::Register { .. }))
            .map(|(ids, _)| ids.len())
            .try_fold(None, |acc: Option<usize>, len| match acc {
                Some(w) if w != len => Err(ParseError::BroadcastMismatch {
                    line,
                    gate: call.name.clone(),
                }),
                _ => Ok(Some(len)),
            })?;

        let Some(width) = width else {
            return Ok(vec![expanded.into_iter().flatten().collect()]);
        };

        Ok((0..width)
            .map(|i| {
                expanded
                    .iter()
                    .map(|ids| if ids.len() == 1 { ids[0] } else { ids[i] })
                    .collect()
            })
            .collect())
    }

    fn expand(&self, qubit_ref: &QubitRef, line: usize) -> ParseResult<Vec<QubitId>> {
        let register = qubit_ref.register();
        let &(start, size) =
            self.qregs
                .get(register)
                .ok_or_else(|| ParseError::UndefinedRegister {
                    line,
                    name: register.to_string(),
                })?;

        match qubit_ref {
            QubitRef::Single { index, .. } => {
                if *index >= size {
                    return Err(ParseError::IndexOutOfBounds {
                        line,
                        register: register.to_string(),
                        index: *index as usize,
                        size: size as usize,
                    });
                }
                Ok(vec![QubitId(start + index)])
            }
            QubitRef::Register { .. } => Ok((start..start + size).map(QubitId).collect()),
        }
    }
}

/// Map a qelib1 gate name to a gate. `id` maps to `None`.
fn resolve_gate(name: &str, line: usize) -> ParseResult<Option<StandardGate>> {
    let gate = match name {
        "id" => return Ok(None),
        "x" => StandardGate::X,
        "y" => StandardGate::Y,
        "z" => StandardGate::Z,
        "h" => StandardGate::H,
        "s" => StandardGate::S,
        "sdg" => StandardGate::Sdg,
        "t" => StandardGate::T,
        "tdg" => StandardGate::Tdg,
        "cx" | "CX" => StandardGate::CX,
        "cz" => StandardGate::CZ,
        "swap" => StandardGate::Swap,
        "ccx" => StandardGate::CCX,
        _ => {
            return Err(ParseError::UnknownGate {
                line,
                name: name.to_string(),
            });
        }
    };
    Ok(Some(gate))
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::parser::parse;
    use qctk_ir::{GateFamily, QubitId};

    fn header(body: &str) -> String {
        format!("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n{body}")
    }

    #[test]
    fn test_all_gates() {
        let qc = parse(&header(
            "qreg q[3];\nid q[0];\nx q[0];\ny q[0];\nz q[0];\nh q[0];\ns q[0];\nsdg q[0];\nt q[0];\ntdg q[0];\ncx q[0],q[1];\nCX q[1],q[2];\ncz q[0],q[2];\nswap q[0],q[1];\nccx q[0],q[1],q[2];\n",
        ))
        .unwrap();
        let stats = qc.circuit.stats();
        assert_eq!(stats.total_gates, 13);
        assert_eq!(stats.count(GateFamily::Cnot), 2);
        assert_eq!(stats.count(GateFamily::Tof), 1);
        assert_eq!(stats.t_count, 2);
    }

    #[test]
    fn test_broadcast() {
        let qc = parse(&header("qreg a[3];\nqreg b[3];\nh a;\ncx a, b;\ncx a[0], b;\n")).unwrap();
        let insts = qc.circuit.instructions();
        assert_eq!(insts.len(), 9);
        assert_eq!(insts[3].qubits, vec![QubitId(0), QubitId(3)]);
        assert_eq!(insts[5].qubits, vec![QubitId(2), QubitId(5)]);
        assert_eq!(insts[8].qubits, vec![QubitId(0), QubitId(5)]);
    }

    #[test]
    fn test_broadcast_size_mismatch() {
        let err = parse(&header("qreg a[2];\nqreg b[3];\ncx a, b;\n")).unwrap_err();
        assert!(matches!(err, ParseError::BroadcastMismatch { line: 5, .. }));
    }

    #[test]
    fn test_out_of_bounds_and_undefined() {
        let err = parse(&header("qreg q[2];\nx q[2];\n")).unwrap_err();
        assert!(matches!(err, ParseError::IndexOutOfBounds { index: 2, size: 2, .. }));
        let err = parse(&header("qreg q[2];\nx r[0];\n")).unwrap_err();
        assert!(matches!(err, ParseError::UndefinedRegister { .. }));
    }

    #[test]
    fn test_wrong_arity_and_unknown_gate() {
        let err = parse(&header("qreg q[2];\ncx q[0];\n")).unwrap_err();
        assert!(matches!(err, ParseError::WrongQubitCount { expected: 2, got: 1, .. }));
        let err = parse(&header("qreg q[2];\nu3 q[0];\n")).unwrap_err();
        assert!(matches!(err, ParseError::UnknownGate { .. }));
    }

    #[test]
    fn test_same_qubit_twice() {
        let err = parse(&header("qreg q[2];\ncx q[1], q[1];\n")).unwrap_err();
        assert!(matches!(err, ParseError::Circuit { line: 4, .. }));
    }

    #[test]
    fn test_duplicate_register() {
        let err = parse(&header("qreg q[2];\ncreg q[2];\n")).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDeclaration { line: 4, .. }));
    }

    #[test]
    fn test_cregs_and_barrier() {
        let qc = parse(&header("qreg q[2];\ncreg c[2];\nbarrier q;\nbarrier q[0], q[0];\n")).unwrap();
        assert_eq!(qc.cregs, vec![("c".to_string(), 2)]);
        assert_eq!(qc.circuit.num_ops(), 2);
        assert_eq!(qc.circuit.stats().total_gates, 0);
    }
}
