//! Parser for `.qc` gate lists.

mod lowering;
mod statement;

use crate::ast::Program;
use crate::error::{QcError, QcResult};
use crate::header::HeaderStats;
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::qc::QcCircuit;

/// Parse a `.qc` source string.
pub fn parse(source: &str) -> QcResult<QcCircuit> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse_program()?;
    lowering::lower_program(&program, HeaderStats::parse(source))
}

/// Parse a `.qc` source string into its syntax tree.
pub fn parse_ast(source: &str) -> QcResult<Program> {
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
    fn new(source: &str) -> QcResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((line, message)) => return Err(QcError::LexerError { line, message }),
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

    /// Skip blank lines.
    pub(super) fn skip_newlines(&mut self) {
        while self.consume(&Token::Newline) {}
    }

    /// Require the end of the current line (or of the input).
    pub(super) fn expect_line_end(&mut self) -> QcResult<()> {
        match self.peek() {
            None | Some(Token::Newline) => {
                self.advance();
                Ok(())
            }
            Some(other) => Err(QcError::UnexpectedToken {
                line: self.peek_line(),
                expected: "end of line".into(),
                found: other.to_string(),
            }),
        }
    }

    /// Parse the entire file.
    fn parse_program(&mut self) -> QcResult<Program> {
        let mut declarations = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                None => return Err(QcError::MissingBegin),
                Some(Token::Begin) => break,
                Some(Token::Directive(_)) => declarations.push(self.parse_declaration()?),
                Some(other) => {
                    return Err(QcError::UnexpectedToken {
                        line: self.peek_line(),
                        expected: "directive or BEGIN".into(),
                        found: other.to_string(),
                    });
                }
            }
        }

        self.advance();
        let begin_line = self.line;
        self.expect_line_end()?;

        let mut body = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                None => return Err(QcError::MissingEnd { begin_line }),
                Some(Token::End) => {
                    self.advance();
                    break;
                }
                Some(Token::Word(_)) => body.push(self.parse_gate_line()?),
                Some(other) => {
                    return Err(QcError::UnexpectedToken {
                        line: self.peek_line(),
                        expected: "gate or END".into(),
                        found: other.to_string(),
                    });
                }
            }
        }

        self.skip_newlines();
        if !self.is_eof() {
            return Err(QcError::TrailingContent {
                line: self.peek_line(),
            });
        }

        Ok(Program {
            declarations,
            begin_line,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qctk_ir::GateFamily;

    const ADDER: &str = "\
# Result:
#   Qubits: 3
#   T: 2
.v a b c
.i a b
.o c

BEGIN
H c
cnot b c
T* c
tof a b c
T c
S a
S* a
END
";

    #[test]
    fn test_parse_adder() {
        let qc = parse(ADDER).unwrap();
        assert_eq!(qc.circuit.num_qubits(), 3);
        assert_eq!(qc.inputs.len(), 2);
        assert_eq!(qc.outputs.len(), 1);

        let stats = qc.circuit.stats();
        assert_eq!(stats.total_gates, 7);
        assert_eq!(stats.count(GateFamily::T), 2);
        assert_eq!(stats.count(GateFamily::S), 2);
        assert_eq!(stats.count(GateFamily::Tof), 1);
        assert_eq!(qc.header.claim().unwrap().qubits, Some(3));
    }

    #[test]
    fn test_missing_begin() {
        assert!(matches!(parse(".v a\nH a\n"), Err(QcError::UnexpectedToken { line: 2, .. })));
        assert!(matches!(parse(".v a\n"), Err(QcError::MissingBegin)));
    }

    #[test]
    fn test_missing_end() {
        let err = parse(".v a\nBEGIN\nH a\n").unwrap_err();
        assert!(matches!(err, QcError::MissingEnd { begin_line: 2 }));
    }

    #[test]
    fn test_trailing_content() {
        let err = parse(".v a\nBEGIN\nEND\nH a\n").unwrap_err();
        assert!(matches!(err, QcError::TrailingContent { line: 4 }));
    }

    #[test]
    fn test_text_after_begin_on_same_line() {
        let err = parse(".v a\nBEGIN H a\nEND\n").unwrap_err();
        assert!(matches!(err, QcError::UnexpectedToken { line: 2, .. }));
    }

    #[test]
    fn test_ast_lines() {
        let program = parse_ast(ADDER).unwrap();
        assert_eq!(program.declarations.len(), 3);
        assert_eq!(program.begin_line, 8);
        assert_eq!(program.body[0].line, 9);
        assert_eq!(program.body[3].args, vec!["a", "b", "c"]);
    }
}
