//! Error types for the QASM 2.0 reader.

use qctk_ir::IrError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// The file does not start with a version declaration.
    #[error("Missing 'OPENQASM 2.0;' header")]
    MissingVersion,

    /// A version other than 2.0.
    #[error("Unsupported OPENQASM version {version} at line {line}")]
    InvalidVersion { line: usize, version: String },

    /// Register used before declaration.
    #[error("Undefined register '{name}' at line {line}")]
    UndefinedRegister { line: usize, name: String },

    /// Register declared twice.
    #[error("Duplicate declaration of '{name}' at line {line}")]
    DuplicateDeclaration { line: usize, name: String },

    /// Gate not in the supported set.
    #[error("Unknown gate '{name}' at line {line}")]
    UnknownGate { line: usize, name: String },

    /// Gate with parameters, e.g. `rz(pi/4)`.
    #[error("Parameterized gate '{gate}' at line {line} is not supported")]
    ParameterizedGate { line: usize, gate: String },

    /// A statement outside the CNOT-listing subset (`measure`, `reset`,
    /// `gate`, `opaque`, `if`).
    #[error("'{construct}' at line {line} is not supported")]
    Unsupported { line: usize, construct: String },

    /// Wrong number of operands.
    #[error("Gate '{gate}' at line {line} expects {expected} qubits, got {got}")]
    WrongQubitCount {
        line: usize,
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size} at line {line}")]
    IndexOutOfBounds {
        line: usize,
        register: String,
        index: usize,
        size: usize,
    },

    /// Whole-register operands of different sizes.
    #[error("Registers of different sizes in broadcast of '{gate}' at line {line}")]
    BroadcastMismatch { line: usize, gate: String },

    /// Malformed wiring comment.
    #[error("Invalid wiring comment at line {line}: {message}")]
    InvalidWiring { line: usize, message: String },

    /// A gate the QASM 2.0 standard library cannot express.
    #[error("Gate '{0}' has no qelib1 equivalent")]
    Unemittable(String),

    /// IR error while placing a gate.
    #[error("Circuit error at line {line}: {source}")]
    Circuit {
        line: usize,
        #[source]
        source: IrError,
    },

    /// IR error without a source position.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
