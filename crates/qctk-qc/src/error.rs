//! Error types for the `.qc` reader.

use qctk_ir::IrError;
use thiserror::Error;

/// Errors that can occur while reading a `.qc` file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QcError {
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

    /// Directive other than `.v .i .o .c .ol`.
    #[error("Unknown directive '.{name}' at line {line}")]
    UnknownDirective { line: usize, name: String },

    /// The gate block never started.
    #[error("Missing BEGIN")]
    MissingBegin,

    /// The gate block never ended.
    #[error("Missing END after BEGIN at line {begin_line}")]
    MissingEnd { begin_line: usize },

    /// Something other than blank lines follows `END`.
    #[error("Unexpected content after END at line {line}")]
    TrailingContent { line: usize },

    /// Unknown gate mnemonic.
    #[error("Unknown gate '{name}' at line {line}")]
    UnknownGate { line: usize, name: String },

    /// A wire that `.v` never declared.
    #[error("Undeclared wire '{name}' at line {line}")]
    UnknownWire { line: usize, name: String },

    /// A wire declared twice in `.v`.
    #[error("Duplicate wire '{name}' at line {line}")]
    DuplicateWire { line: usize, name: String },

    /// Wrong number of arguments for a gate.
    #[error("Gate '{gate}' at line {line} expects {expected} arguments, got {got}")]
    WrongArity {
        line: usize,
        gate: String,
        expected: String,
        got: usize,
    },

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

impl QcError {
    /// The source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            QcError::LexerError { line, .. }
            | QcError::UnexpectedToken { line, .. }
            | QcError::UnknownDirective { line, .. }
            | QcError::TrailingContent { line }
            | QcError::UnknownGate { line, .. }
            | QcError::UnknownWire { line, .. }
            | QcError::DuplicateWire { line, .. }
            | QcError::WrongArity { line, .. }
            | QcError::Circuit { line, .. } => Some(*line),
            QcError::MissingEnd { begin_line } => Some(*begin_line),
            QcError::MissingBegin | QcError::Ir(_) => None,
        }
    }
}

/// Result type for `.qc` operations.
pub type QcResult<T> = Result<T, QcError>;
