//! QASM 2.0 emitter for serializing circuits.

use qctk_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate, Wiring};
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseResult};
use crate::program::Qasm2Circuit;

/// Emit a circuit as QASM 2.0 source code.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    emit_with_wiring(circuit, None, None)
}

/// Emit a circuit with `Initial wiring` / `Resulting wiring` comments.
pub fn emit_with_wiring(
    circuit: &Circuit,
    initial: Option<&Wiring>,
    final_: Option<&Wiring>,
) -> ParseResult<String> {
    let mut emitter = Emitter::new(circuit);
    emitter.emit_circuit(circuit, initial, final_, &[])
}

/// Emit a parsed file, keeping its wiring comments and classical registers.
pub fn emit_program(program: &Qasm2Circuit) -> ParseResult<String> {
    let mut emitter = Emitter::new(&program.circuit);
    emitter.emit_circuit(
        &program.circuit,
        program.initial_wiring.as_ref(),
        program.final_wiring.as_ref(),
        &program.cregs,
    )
}

/// QASM 2.0 emitter.
struct Emitter {
    output: String,
    /// Register declarations in order.
    registers: Vec<(String, u32)>,
    /// Operand text for each qubit.
    operands: FxHashMap<QubitId, String>,
}

impl Emitter {
    /// Lay out registers. Circuits read from QASM keep their registers;
    /// anything else gets a single register `q` in qubit order.
    fn new(circuit: &Circuit) -> Self {
        let mut registers: Vec<(String, u32)> = vec![];
        let mut operands = FxHashMap::default();

        let mut keeps_registers = true;
        for qubit in circuit.qubits() {
            let (Some(reg), Some(idx)) = (&qubit.register, qubit.index) else {
                keeps_registers = false;
                break;
            };
            let seen = registers.iter().any(|(n, _)| n == reg);
            match registers.last_mut() {
                Some((name, size)) if *name == *reg && *size == idx => *size += 1,
                _ if idx == 0 && !seen => {
                    registers.push((reg.clone(), 1));
                }
                _ => {
                    keeps_registers = false;
                    break;
                }
            }
            operands.insert(qubit.id, format!("{reg}[{idx}]"));
        }

        if !keeps_registers {
            registers.clear();
            operands.clear();
            let n = circuit.num_qubits();
            for (i, qubit) in circuit.qubits().iter().enumerate() {
                operands.insert(qubit.id, format!("q[{i}]"));
            }
            if n > 0 {
                registers.push(("q".into(), u32::try_from(n).unwrap_or(u32::MAX)));
            }
        }

        Self {
            output: String::new(),
            registers,
            operands,
        }
    }

    fn emit_circuit(
        &mut self,
        circuit: &Circuit,
        initial: Option<&Wiring>,
        final_: Option<&Wiring>,
        cregs: &[(String, u32)],
    ) -> ParseResult<String> {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        if let Some(w) = initial {
            self.writeln(&format!("// Initial wiring: {w}"));
        }
        if let Some(w) = final_ {
            self.writeln(&format!("// Resulting wiring: {w}"));
        }

        for (name, size) in self.registers.clone() {
            self.writeln(&format!("qreg {name}[{size}];"));
        }
        for (name, size) in cregs {
            self.writeln(&format!("creg {name}[{size}];"));
        }

        for (_, instruction) in circuit.dag().topological_ops() {
            self.emit_instruction(instruction)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> ParseResult<()> {
        let qubits = self.emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate_name(*gate)?;
                self.writeln(&format!("{name} {qubits};"));
            }
            InstructionKind::Barrier => {
                self.writeln(&format!("barrier {qubits};"));
            }
        }
        Ok(())
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|q| {
                self.operands
                    .get(q)
                    .cloned()
                    .unwrap_or_else(|| format!("q[{}]", q.0))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// The qelib1 name of a gate.
fn gate_name(gate: StandardGate) -> ParseResult<&'static str> {
    match gate {
        StandardGate::CCZ | StandardGate::Mcx { .. } => {
            Err(ParseError::Unemittable(gate.name().to_string()))
        }
        other => Ok(other.name()),
    }
}
