//! Parser for `OpenQASM` 2.0.

mod lowering;
mod statement;

use crate::ast::Program;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::program::Qasm2Circuit;
use crate::wiring::WiringComments;

/// Parse a QASM 2.0 source string, including its wiring comments.
pub fn parse(source: &str) -> ParseResult<Qasm2Circuit> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse_program()?;
    let (circuit, cregs) = lowering::lower_to_circuit(&program)?;
    let wiring = WiringComments::parse(source)?;
    wiring.check_size(circuit.num_qubits())?;

    Ok(Qasm2Circuit {
        circuit,
        initial_wiring: wiring.initial.map(|(_, w)| w),
        final_wiring: wiring.final_.map(|(_, w)| w),
        cregs,
    })
}

/// Parse a QASM 2.0 source string into an AST Program.
pub fn parse_ast(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    /// Line of the most recently consumed token.
    pub(super) line: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((line, message)) => return Err(ParseError::LexerError { line, message }),
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            line: 1,
        })
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Line of the current token, or of the last one at end of input.
    pub(super) fn peek_line(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.line, |t| t.line)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let spanned = self.tokens.get(self.pos)?;
        self.line = spanned.line;
        let token = spanned.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let line = self.peek_line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> ParseResult<Program> {
        if !self.check(&Token::OpenQasm) {
            return Err(ParseError::MissingVersion);
        }
        self.advance();
        let version = self.parse_version()?;
        self.expect(Token::Semicolon)?;

        let mut statements = Vec::new();
        while !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        Ok(Program {
            version,
            statements,
        })
    }

    /// Parse the version number; only 2.0 is accepted.
    fn parse_version(&mut self) -> ParseResult<String> {
        let line = self.peek_line();
        let version = match self.advance() {
            Some(Token::FloatLiteral(v)) => v,
            Some(Token::IntLiteral(v)) => v as f64,
            Some(other) => {
                return Err(ParseError::InvalidVersion {
                    line,
                    version: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        };
        if (version - 2.0).abs() > f64::EPSILON {
            return Err(ParseError::InvalidVersion {
                line,
                version: format!("{version:.1}"),
            });
        }
        Ok("2.0".into())
    }

    /// Parse an identifier.
    pub(super) fn parse_identifier(&mut self) -> ParseResult<String> {
        let line = self.peek_line();
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "identifier".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    /// Parse an integer literal that fits in `u32`.
    pub(super) fn parse_index(&mut self) -> ParseResult<u32> {
        let line = self.peek_line();
        match self.advance() {
            Some(Token::IntLiteral(v)) => {
                u32::try_from(v).map_err(|_| ParseError::UnexpectedToken {
                    line,
                    expected: "index below 2^32".into(),
                    found: v.to_string(),
                })
            }
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "integer".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qctk_ir::{GateFamily, QubitId};

    const ROUTED: &str = r#"OPENQASM 2.0;
include "qelib1.inc";
// Initial wiring: [0, 1, 2]
// Resulting wiring: [1, 0, 2]
qreg q[3];
cx q[0], q[1];
cx q[1], q[0];
cx q[0], q[1];
"#;

    #[test]
    fn test_parse_routing_listing() {
        let qc = parse(ROUTED).unwrap();
        assert_eq!(qc.circuit.num_qubits(), 3);
        assert_eq!(qc.circuit.stats().count(GateFamily::Cnot), 3);
        assert_eq!(qc.initial_wiring.unwrap().as_slice(), &[0, 1, 2]);
        assert_eq!(qc.final_wiring.unwrap().as_slice(), &[1, 0, 2]);
    }

    #[test]
    fn test_missing_version() {
        assert!(matches!(
            parse("qreg q[1];\nh q[0];"),
            Err(ParseError::MissingVersion)
        ));
        assert!(matches!(parse(""), Err(ParseError::MissingVersion)));
    }

    #[test]
    fn test_qasm3_rejected() {
        let err = parse("OPENQASM 3.0;\nqubit[2] q;").unwrap_err();
        assert!(matches!(err, ParseError::InvalidVersion { line: 1, .. }));
    }

    #[test]
    fn test_multiple_registers_are_consecutive() {
        let source = "OPENQASM 2.0;\nqreg a[2];\nqreg b[2];\ncx a[1], b[0];\n";
        let qc = parse(source).unwrap();
        assert_eq!(qc.circuit.num_qubits(), 4);
        let inst = &qc.circuit.instructions()[0];
        assert_eq!(inst.qubits, vec![QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_error_line_numbers() {
        let source = "OPENQASM 2.0;\nqreg q[2];\n\ncx q[0] q[1];\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { line: 4, .. }));
    }
}
