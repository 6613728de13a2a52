//! Abstract Syntax Tree for `OpenQASM` 2.0 CNOT listings.

use serde::{Deserialize, Serialize};

/// A complete QASM 2.0 program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// QASM version (always "2.0" once parsed).
    pub version: String,
    /// Statements in the program.
    pub statements: Vec<Statement>,
}

/// A statement with its source line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

/// The statements of the supported subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatementKind {
    /// Include statement.
    Include(String),

    /// Quantum register: `qreg q[n];`
    QregDecl { name: String, size: u32 },

    /// Classical register: `creg c[n];`
    CregDecl { name: String, size: u32 },

    /// Gate application.
    Gate(GateCall),

    /// Barrier: `barrier q;`
    Barrier { qubits: Vec<QubitRef> },
}

/// A gate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    /// Gate name as written.
    pub name: String,
    /// Qubit operands.
    pub qubits: Vec<QubitRef>,
}

/// A qubit operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QubitRef {
    /// A single qubit: `q[3]`.
    Single { register: String, index: u32 },
    /// A whole register: `q`.
    Register { name: String },
}

impl QubitRef {
    /// The register the operand refers to.
    pub fn register(&self) -> &str {
        match self {
            QubitRef::Single { register, .. } => register,
            QubitRef::Register { name } => name,
        }
    }
}
