//! Lexer for `.qc` gate lists.

use logos::Logos;

/// Tokens for `.qc` files.
///
/// Lines matter in `.qc` (one gate per line), so newlines are tokens. The
/// lexer's `extras` counts them.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = usize)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token("\n", |lex| lex.extras += 1)]
    Newline,

    /// `.v`, `.i`, `.o`, `.c`, `.ol` and anything else starting with a dot.
    #[regex(r"\.[A-Za-z]+", |lex| lex.slice()[1..].to_string())]
    Directive(String),

    #[token("BEGIN", priority = 10, ignore(case))]
    Begin,

    #[token("END", priority = 10, ignore(case))]
    End,

    /// Gate mnemonics and wire names.
    #[regex(r"[A-Za-z0-9_][A-Za-z0-9_'\[\]]*\*?", |lex| lex.slice().to_string())]
    Word(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Newline => write!(f, "end of line"),
            Token::Directive(d) => write!(f, ".{d}"),
            Token::Begin => write!(f, "BEGIN"),
            Token::End => write!(f, "END"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// A token with its source line (1-based).
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
}

/// Tokenize a `.qc` source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (usize, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => {
                // A newline has already bumped the counter for the next line.
                let line = if token == Token::Newline {
                    lexer.extras
                } else {
                    lexer.extras + 1
                };
                tokens.push(Ok(SpannedToken { token, line }));
            }
            Err(()) => {
                let slice = lexer.slice();
                tokens.push(Err((lexer.extras + 1, format!("Invalid token: '{slice}'"))));
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_declaration_line() {
        assert_eq!(
            tokens(".v a b c\n"),
            vec![
                Token::Directive("v".into()),
                Token::Word("a".into()),
                Token::Word("b".into()),
                Token::Word("c".into()),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_dagger_suffix_and_keywords() {
        assert_eq!(
            tokens("BEGIN\nT* a\nend"),
            vec![
                Token::Begin,
                Token::Newline,
                Token::Word("T*".into()),
                Token::Word("a".into()),
                Token::Newline,
                Token::End,
            ]
        );
        // Longer words are not keywords.
        assert_eq!(tokens("BEGINNER"), vec![Token::Word("BEGINNER".into())]);
    }

    #[test]
    fn test_comments_and_lines() {
        let toks = tokenize("# header\n# more\n.v a\nH a\n");
        let toks: Vec<_> = toks.into_iter().map(Result::unwrap).collect();
        assert_eq!(toks[0].token, Token::Newline);
        assert_eq!(toks[0].line, 1);
        let h = toks
            .iter()
            .find(|t| t.token == Token::Word("H".into()))
            .unwrap();
        assert_eq!(h.line, 4);
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let result = tokenize(".v a\ncnot a, b\n");
        let err = result.into_iter().find_map(Result::err).unwrap();
        assert_eq!(err.0, 2);
        assert!(err.1.contains(','));
    }
}
