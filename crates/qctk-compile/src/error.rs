//! Error types for the compilation crate.

use qctk_ir::IrError;
use thiserror::Error;

/// Errors raised by passes, the pass manager and the GF(2) routines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR layer.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A pass needs a coupling map and none was set.
    #[error("Missing coupling map")]
    MissingCouplingMap,

    /// A pass needs a wiring and none was set.
    #[error("Missing {0} wiring")]
    MissingWiring(&'static str),

    /// The circuit contains a gate that is not a CNOT or SWAP.
    #[error("Circuit is not linear: '{gate}' at operation {position}")]
    NotLinear {
        /// The offending gate.
        gate: String,
        /// Its position in topological order.
        position: usize,
    },

    /// A multi-qubit gate acts on qubits the coupling map does not join.
    #[error("Gate '{gate}' on qubits {qubits:?} is not supported by the coupling map")]
    Disconnected {
        /// The offending gate.
        gate: String,
        /// Physical positions of its operands.
        qubits: Vec<u32>,
    },

    /// No path between two qubits of the coupling map.
    #[error("No path from qubit {from} to qubit {to} in the coupling map")]
    NoPath { from: u32, to: u32 },

    /// The circuit has more qubits than the coupling map.
    #[error("Circuit needs {needed} qubits, coupling map has {available}")]
    TooManyQubits { needed: usize, available: u32 },

    /// A wiring does not cover the circuit's qubits.
    #[error("Wiring has {wiring} entries, circuit has {qubits} qubits")]
    WiringSize { wiring: usize, qubits: usize },

    /// Matrix shapes do not fit the operation.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The matrix is not invertible.
    #[error("Matrix is singular")]
    Singular,

    /// A coupling map specification could not be parsed.
    #[error("Invalid coupling map '{spec}': {reason}")]
    InvalidCoupling { spec: String, reason: String },

    /// The synthesis method cannot serve this target.
    #[error("Synthesis method '{method}' is unsupported here: {reason}")]
    UnsupportedMethod {
        method: &'static str,
        reason: String,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
