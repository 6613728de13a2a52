//! Statement parsing for QASM 2.0.

use super::Parser;
use crate::ast::{GateCall, QubitRef, Statement, StatementKind};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let line = self.peek_line();
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        let kind = match token {
            Token::Include => self.parse_include()?,
            Token::Qreg => self.parse_register_decl(true)?,
            Token::Creg => self.parse_register_decl(false)?,
            Token::Barrier => self.parse_barrier()?,
            Token::Identifier(_) => self.parse_gate_call()?,
            Token::Measure | Token::Reset | Token::Gate | Token::Opaque | Token::If => {
                return Err(ParseError::Unsupported {
                    line,
                    construct: token.to_string(),
                });
            }
            _ => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "statement".into(),
                    found: token.to_string(),
                });
            }
        };

        Ok(Statement { line, kind })
    }

    /// Parse include statement.
    fn parse_include(&mut self) -> ParseResult<StatementKind> {
        self.expect(Token::Include)?;
        let line = self.peek_line();
        let path = match self.advance() {
            Some(Token::StringLiteral(s)) => s,
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    line,
                    expected: "string literal".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        };
        self.expect(Token::Semicolon)?;
        Ok(StatementKind::Include(path))
    }

    /// Parse `qreg name[n];` or `creg name[n];`.
    fn parse_register_decl(&mut self, quantum: bool) -> ParseResult<StatementKind> {
        self.advance();
        let name = self.parse_identifier()?;
        self.expect(Token::LBracket)?;
        let size = self.parse_index()?;
        self.expect(Token::RBracket)?;
        self.expect(Token::Semicolon)?;

        Ok(if quantum {
            StatementKind::QregDecl { name, size }
        } else {
            StatementKind::CregDecl { name, size }
        })
    }

    /// Parse barrier statement.
    fn parse_barrier(&mut self) -> ParseResult<StatementKind> {
        self.expect(Token::Barrier)?;
        let qubits = if self.check(&Token::Semicolon) {
            vec![]
        } else {
            self.parse_qubit_refs()?
        };
        self.expect(Token::Semicolon)?;
        Ok(StatementKind::Barrier { qubits })
    }

    /// Parse a gate application such as `cx q[0], q[1];`.
    fn parse_gate_call(&mut self) -> ParseResult<StatementKind> {
        let line = self.peek_line();
        let name = self.parse_identifier()?;
        if self.check(&Token::LParen) {
            return Err(ParseError::ParameterizedGate { line, gate: name });
        }
        let qubits = self.parse_qubit_refs()?;
        self.expect(Token::Semicolon)?;
        Ok(StatementKind::Gate(GateCall { name, qubits }))
    }

    /// Parse a comma-separated operand list.
    fn parse_qubit_refs(&mut self) -> ParseResult<Vec<QubitRef>> {
        let mut refs = vec![self.parse_qubit_ref()?];
        while self.consume(&Token::Comma) {
            refs.push(self.parse_qubit_ref()?);
        }
        Ok(refs)
    }

    /// Parse `q` or `q[i]`.
    fn parse_qubit_ref(&mut self) -> ParseResult<QubitRef> {
        let name = self.parse_identifier()?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_index()?;
            self.expect(Token::RBracket)?;
            Ok(QubitRef::Single {
                register: name,
                index,
            })
        } else {
            Ok(QubitRef::Register { name })
        }
    }
}
