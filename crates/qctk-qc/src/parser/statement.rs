//! Line-level parsing for `.qc`.

use super::Parser;
use crate::ast::{Declaration, Directive, GateLine};
use crate::error::{QcError, QcResult};
use crate::lexer::Token;

impl Parser {
    /// Parse a directive line such as `.v a b c`.
    pub(super) fn parse_declaration(&mut self) -> QcResult<Declaration> {
        let line = self.peek_line();
        let name = match self.advance() {
            Some(Token::Directive(name)) => name,
            Some(other) => {
                return Err(QcError::UnexpectedToken {
                    line,
                    expected: "directive".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(QcError::MissingBegin),
        };
        let directive =
            Directive::from_name(&name).ok_or(QcError::UnknownDirective { line, name })?;
        let names = self.parse_words();
        self.expect_line_end()?;

        Ok(Declaration {
            directive,
            names,
            line,
        })
    }

    /// Parse a gate line such as `tof a b c`.
    pub(super) fn parse_gate_line(&mut self) -> QcResult<GateLine> {
        let line = self.peek_line();
        let mnemonic = match self.advance() {
            Some(Token::Word(w)) => w,
            Some(other) => {
                return Err(QcError::UnexpectedToken {
                    line,
                    expected: "gate".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(QcError::MissingEnd { begin_line: line }),
        };
        let args = self.parse_words();
        self.expect_line_end()?;

        Ok(GateLine {
            mnemonic,
            args,
            line,
        })
    }

    /// Collect the words up to the end of the line.
    fn parse_words(&mut self) -> Vec<String> {
        let mut words = Vec::new();
        while let Some(Token::Word(w)) = self.peek().cloned() {
            self.advance();
            words.push(w);
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Directive;
    use crate::error::QcError;
    use crate::parser::parse_ast;

    #[test]
    fn test_directives() {
        let program = parse_ast(".v a b\n.i a\n.o b\n.c 0 1\n.ol out\nBEGIN\nEND\n").unwrap();
        let kinds: Vec<_> = program.declarations.iter().map(|d| d.directive).collect();
        assert_eq!(
            kinds,
            vec![
                Directive::Variables,
                Directive::Inputs,
                Directive::Outputs,
                Directive::Constants,
                Directive::OutputLabels,
            ]
        );
        assert_eq!(program.declarations[3].names, vec!["0", "1"]);
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse_ast(".v a\n.x b\nBEGIN\nEND\n").unwrap_err();
        match err {
            QcError::UnknownDirective { line, name } => {
                assert_eq!(line, 2);
                assert_eq!(name, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_gate_with_no_args_parses() {
        // Arity is checked during lowering.
        let program = parse_ast(".v a\nBEGIN\nH\nEND\n").unwrap();
        assert!(program.body[0].args.is_empty());
    }
}
