use std::fmt;

use serde::Serialize;

use crate::lexer::{Spanned, Token, TokenInfo};

/// Fatal tokenizer error: a character that starts no token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("lexical error at line {line}, offset {offset}: {message}")]
pub struct LexError {
    pub line: u32,
    pub offset: usize,
    pub message: String,
}

impl LexError {
    pub fn new(line: u32, offset: usize, message: impl Into<String>) -> Self {
        LexError {
            line,
            offset,
            message: message.into(),
        }
    }
}

/// Contract violations of the token cursor. `EndOfInput` is the only one a
/// well-formed parse can hit; the grammar turns it into a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("unexpected end of input")]
    EndOfInput,

    #[error("internal error: cursor retreated past the start of the token stream")]
    RetreatPastStart,

    /// The stream is empty, has no trailing end-of-input token, or has more than one.
    #[error("internal error: token stream must end with exactly one end-of-input token")]
    MalformedStream,
}

/// Errors that abort a parse. Syntax errors are not here: they are
/// recovered and reported as [`Diagnostic`]s.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Internal(#[from] CursorError),
}

/// One recorded syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    /// Offending token; `None` when the input ended where more was required.
    pub found: Option<TokenInfo>,
}

impl Diagnostic {
    pub fn at(token: &Spanned, message: impl Into<String>) -> Self {
        let found = match token.token {
            Token::Eof => None,
            _ => Some(TokenInfo::from(token)),
        };
        Diagnostic {
            message: message.into(),
            found,
        }
    }

    pub fn end_of_input(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            found: None,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.found.is_none()
    }

    pub fn line(&self) -> Option<u32> {
        self.found.as_ref().map(|t| t.line)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(t) => write!(
                f,
                "Syntax error at token [{}, '{}', {}, {}]: {}, skip to the next 'DOT'",
                t.kind, t.lexeme, t.line, t.offset, self.message
            ),
            None => write!(
                f,
                "Syntax error: {}, but end of input reached",
                self.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_names_offending_token() {
        let tok = Spanned::new(Token::Dot, 3, 17);
        let d = Diagnostic::at(&tok, "expected an atom or '('");
        assert_eq!(
            d.to_string(),
            "Syntax error at token [DOT, '.', 3, 17]: expected an atom or '(', skip to the next 'DOT'"
        );
        assert_eq!(d.line(), Some(3));
    }

    #[test]
    fn diagnostic_at_eof_has_no_token() {
        let tok = Spanned::new(Token::Eof, 1, 1);
        let d = Diagnostic::at(&tok, "expected '.' at end of clause");
        assert!(d.is_end_of_input());
        assert_eq!(
            d.to_string(),
            "Syntax error: expected '.' at end of clause, but end of input reached"
        );
    }

    #[test]
    fn module_token_reports_reserved_kind() {
        let tok = Spanned::new(Token::ident("module"), 1, 0);
        let d = Diagnostic::at(&tok, "unexpected token");
        assert_eq!(d.found.map(|t| t.kind), Some("MODULE".to_owned()));
    }
}
