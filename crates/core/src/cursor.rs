//! Positional view over a token stream.
//!
//! The grammar is predictive with one token of lookahead everywhere except
//! the leading `module` declaration, which peeks two tokens ahead by
//! advancing and then retreating one step at a time.

use crate::error::CursorError;
use crate::lexer::{Spanned, Token};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Rejects streams that do not end with exactly one `Eof` token.
    pub fn new(tokens: &'a [Spanned]) -> Result<Self, CursorError> {
        let eofs = tokens.iter().filter(|s| s.token == Token::Eof).count();
        match tokens.last() {
            Some(last) if last.token == Token::Eof && eofs == 1 => {
                Ok(Cursor { tokens, pos: 0 })
            }
            _ => Err(CursorError::MalformedStream),
        }
    }

    pub fn current(&self) -> &'a Spanned {
        &self.tokens[self.pos]
    }

    pub fn peek(&self) -> &'a Token {
        &self.current().token
    }

    pub fn at_end(&self) -> bool {
        self.peek() == &Token::Eof
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<&'a Spanned, CursorError> {
        if self.at_end() {
            return Err(CursorError::EndOfInput);
        }
        let t = &self.tokens[self.pos];
        self.pos += 1;
        Ok(t)
    }

    /// Undo one `advance`.
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        if self.pos == 0 {
            return Err(CursorError::RetreatPastStart);
        }
        self.pos -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn advance_walks_to_sentinel_then_fails() {
        let tokens = lex("f.").unwrap();
        let mut c = Cursor::new(&tokens).unwrap();
        assert_eq!(c.advance().unwrap().token, Token::ident("f"));
        assert_eq!(c.advance().unwrap().token, Token::Dot);
        assert!(c.at_end());
        assert_eq!(c.advance(), Err(CursorError::EndOfInput));
        assert!(c.at_end(), "failed advance must not move the cursor");
    }

    #[test]
    fn retreat_undoes_advance() {
        let tokens = lex("module m.").unwrap();
        let mut c = Cursor::new(&tokens).unwrap();
        c.advance().unwrap();
        c.advance().unwrap();
        assert_eq!(c.peek(), &Token::Dot);
        c.retreat().unwrap();
        c.retreat().unwrap();
        assert_eq!(c.position(), 0);
        assert_eq!(c.retreat(), Err(CursorError::RetreatPastStart));
    }

    #[test]
    fn rejects_stream_without_single_trailing_eof() {
        assert_eq!(Cursor::new(&[]).unwrap_err(), CursorError::MalformedStream);

        let no_eof = vec![Spanned::new(Token::Dot, 1, 0)];
        assert!(Cursor::new(&no_eof).is_err());

        let two_eofs = vec![Spanned::new(Token::Eof, 1, 0), Spanned::new(Token::Eof, 1, 0)];
        assert!(Cursor::new(&two_eofs).is_err());
    }
}
