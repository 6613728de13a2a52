//! `OpenQASM` 2.0 reader and writer for qctk.
//!
//! Only the Clifford+T gates of `qelib1.inc` are accepted. Circuits produced
//! by routing tools often carry their qubit placement as comments, and these
//! are read into [`Qasm2Circuit::initial_wiring`] and
//! [`Qasm2Circuit::final_wiring`]:
//!
//! ```text
//! // Initial wiring: [0, 1, 2]
//! // Resulting wiring: [1, 0, 2]
//! ```
//!
//! # Supported statements
//!
//! | Statement | Status | Example |
//! |-----------|--------|---------|
//! | Version | ✅ | `OPENQASM 2.0;` |
//! | Include | ✅ (ignored) | `include "qelib1.inc";` |
//! | Registers | ✅ | `qreg q[5];`, `creg c[5];` |
//! | Gates | ✅ | `cx q[0], q[1];`, `h q;` |
//! | Barriers | ✅ | `barrier q;` |
//! | Measure, reset, `if` | ❌ | |
//! | Gate definitions | ❌ | |
//! | Parameterized gates | ❌ | `rz(pi/4) q[0];` |
//!
//! # Example
//!
//! ```rust
//! use qctk_qasm2::{emit_program, parse};
//!
//! let source = "OPENQASM 2.0;
//! include \"qelib1.inc\";
//! // Initial wiring: [1, 0]
//! qreg q[2];
//! h q[0];
//! cx q[0], q[1];
//! ";
//!
//! let program = parse(source).unwrap();
//! assert_eq!(program.circuit.num_qubits(), 2);
//! assert_eq!(program.initial_wiring.as_ref().unwrap().as_slice(), &[1, 0]);
//!
//! let emitted = emit_program(&program).unwrap();
//! assert!(emitted.contains("cx q[0], q[1];"));
//! ```
//!
//! # Gates
//!
//! `id x y z h s sdg t tdg cx CX cz swap ccx`. `id` is checked and dropped.

mod ast;
mod emitter;
mod error;
mod lexer;
mod parser;
mod program;
mod wiring;

pub use emitter::{emit, emit_program, emit_with_wiring};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_ast};
pub use program::Qasm2Circuit;
pub use wiring::WiringComments;

// Re-export AST types for advanced users
pub mod syntax {
    pub use crate::ast::*;
}
