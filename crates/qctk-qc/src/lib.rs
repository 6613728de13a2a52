//! `.qc` Reader and Writer for qctk
//!
//! `.qc` is the gate-list format used by T-count and T-depth optimizers:
//! a few declaration lines, then one gate per line between `BEGIN` and
//! `END`. Optimizers record before/after statistics in `#` comments above
//! the declarations; [`HeaderStats`] reads those back so they can be
//! checked against the body.
//!
//! # Format
//!
//! | Line | Meaning |
//! |------|---------|
//! | `.v a b c` | wires, in order |
//! | `.i a b` | input wires |
//! | `.o c` | output wires |
//! | `.c 0 1` | constants |
//! | `.ol x` | output labels |
//! | `BEGIN` … `END` | gate block |
//!
//! Gates: `H`, `X`, `Y`, `Z` (`Z a b` is CZ, `Z a b c` is CCZ), `S`/`P`,
//! `S*`/`P*`, `T`, `T*`, `cnot`/`tof` with any number of controls (the
//! last argument is the target), `swap`.
//!
//! # Example
//!
//! ```rust
//! use qctk_qc::parse;
//!
//! let source = "\
//! ## Result:
//! ##   Qubits: 3
//! ##   T: 1
//! ##   Depth: 2
//! .v a b c
//! .i a b
//! .o c
//! BEGIN
//! tof a b c
//! T* c
//! END
//! ";
//!
//! let qc = parse(source).unwrap();
//! assert_eq!(qc.circuit.num_qubits(), 3);
//! assert_eq!(qc.verify(None), Some(vec![]));
//! ```

mod ast;
mod emitter;
mod error;
mod header;
mod lexer;
mod parser;
mod qc;

pub use emitter::{emit, emit_qc, emit_with_header};
pub use error::{QcError, QcResult};
pub use header::{HeaderEntry, HeaderKey, HeaderSection, HeaderStats};
pub use parser::{parse, parse_ast};
pub use qc::QcCircuit;

// Re-export AST types for advanced users
pub mod syntax {
    pub use crate::ast::*;
}
