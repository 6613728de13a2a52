//! `.qc` emitter for serializing circuits.

use qctk_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::header::HeaderSection;
use crate::qc::QcCircuit;

/// Emit a circuit as a `.qc` file. Every wire is listed as input and output.
pub fn emit(circuit: &Circuit) -> String {
    emit_with_header(circuit, &[])
}

/// Emit a circuit preceded by statistics header sections.
pub fn emit_with_header(circuit: &Circuit, sections: &[HeaderSection]) -> String {
    let all: Vec<_> = circuit.qubits().iter().map(|q| q.id).collect();
    let mut emitter = Emitter::new(circuit);
    emitter.emit_header(sections);
    emitter.emit_declarations(&all, &all, &[], &[]);
    emitter.emit_body(circuit);
    emitter.output
}

/// Emit a parsed `.qc` file, keeping its declarations and header.
pub fn emit_qc(qc: &QcCircuit) -> String {
    let mut emitter = Emitter::new(&qc.circuit);
    emitter.emit_header(&qc.header.sections);
    emitter.emit_declarations(&qc.inputs, &qc.outputs, &qc.constants, &qc.output_labels);
    emitter.emit_body(&qc.circuit);
    emitter.output
}

/// `.qc` emitter.
struct Emitter {
    output: String,
    names: FxHashMap<QubitId, String>,
    order: Vec<QubitId>,
}

impl Emitter {
    fn new(circuit: &Circuit) -> Self {
        let mut names = FxHashMap::default();
        let mut used = FxHashSet::default();
        for qubit in circuit.qubits() {
            let preferred = qubit.to_string();
            let name = if is_wire_name(&preferred) && !used.contains(&preferred) {
                preferred
            } else {
                // Labels that would not lex back fall back to the id.
                let mut fallback = format!("q{}", qubit.id.0);
                while used.contains(&fallback) {
                    fallback.push('_');
                }
                fallback
            };
            used.insert(name.clone());
            names.insert(qubit.id, name);
        }

        Self {
            output: String::new(),
            names,
            order: circuit.qubits().iter().map(|q| q.id).collect(),
        }
    }

    fn emit_header(&mut self, sections: &[HeaderSection]) {
        for section in sections {
            self.output.push_str(&section.render());
        }
    }

    fn emit_declarations(
        &mut self,
        inputs: &[QubitId],
        outputs: &[QubitId],
        constants: &[String],
        labels: &[String],
    ) {
        let vars = self.wire_list(&self.order);
        self.directive(".v", &vars);
        let ins = self.wire_list(inputs);
        self.directive(".i", &ins);
        let outs = self.wire_list(outputs);
        self.directive(".o", &outs);
        if !constants.is_empty() {
            self.directive(".c", &constants.join(" "));
        }
        if !labels.is_empty() {
            self.directive(".ol", &labels.join(" "));
        }
        self.writeln("");
    }

    fn emit_body(&mut self, circuit: &Circuit) {
        self.writeln("BEGIN");
        for (_, instruction) in circuit.dag().topological_ops() {
            self.emit_instruction(instruction);
        }
        self.writeln("END");
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        // `.qc` has no barriers; they carry no gates.
        let InstructionKind::Gate(gate) = &instruction.kind else {
            return;
        };
        let line = format!(
            "{} {}",
            mnemonic(*gate),
            self.wire_list(&instruction.qubits)
        );
        self.writeln(&line);
    }

    fn wire_list(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|q| self.names.get(q).cloned().unwrap_or_else(|| q.to_string()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn directive(&mut self, name: &str, args: &str) {
        if args.is_empty() {
            self.writeln(name);
        } else {
            self.writeln(&format!("{name} {args}"));
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// The `.qc` mnemonic for a gate.
fn mnemonic(gate: StandardGate) -> &'static str {
    match gate {
        StandardGate::H => "H",
        StandardGate::X => "X",
        StandardGate::Y => "Y",
        StandardGate::Z | StandardGate::CZ | StandardGate::CCZ => "Z",
        StandardGate::S => "S",
        StandardGate::Sdg => "S*",
        StandardGate::T => "T",
        StandardGate::Tdg => "T*",
        StandardGate::CX => "cnot",
        StandardGate::CCX | StandardGate::Mcx { .. } => "tof",
        StandardGate::Swap => "swap",
    }
}

/// Whether a label lexes back as a single wire name.
fn is_wire_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '[' | ']'))
        && !name.eq_ignore_ascii_case("begin")
        && !name.eq_ignore_ascii_case("end")
}
