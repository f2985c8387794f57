use super::{PResult, Parser};
use crate::ast::{Atom, Expr, Term};
use crate::lexer::Token;

impl<'a> Parser<'a> {
    // -- Expression parsing --------------------------------------
    //
    //   disjunction := conjunction (';' disjunction)?
    //   conjunction := element (',' conjunction)?
    //   element     := atom | '(' disjunction ')'

    pub(super) fn parse_disjunction(&mut self) -> PResult<Expr> {
        self.traced("disjunction", |p| {
            let left = p.parse_conjunction()?;
            if p.peek() == &Token::Disjunction {
                p.advance()?;
                let right = p.parse_disjunction()?;
                return Ok(Expr::disjunction(left, right));
            }
            Ok(left)
        })
    }

    fn parse_conjunction(&mut self) -> PResult<Expr> {
        self.traced("conjunction", |p| {
            let left = p.parse_element()?;
            if p.peek() == &Token::Conjunction {
                p.advance()?;
                let right = p.parse_conjunction()?;
                return Ok(Expr::conjunction(left, right));
            }
            Ok(left)
        })
    }

    fn parse_element(&mut self) -> PResult<Expr> {
        self.traced("element", |p| match p.peek() {
            Token::Ident { .. } => Ok(Expr::atom(p.parse_atom()?)),
            Token::LBracket => {
                p.advance()?;
                let e = p.parse_disjunction()?;
                p.expect(Token::RBracket, "expected ')'")?;
                Ok(e)
            }
            _ => Err(p.err("expected an atom or '('")),
        })
    }

    // -- Atoms ---------------------------------------------------
    //
    //   atom  := ident term*
    //   term  := ident | group
    //   group := '(' ident term+ ')' | '(' term ')'

    pub(super) fn parse_atom(&mut self) -> PResult<Atom> {
        self.traced("atom", |p| {
            let functor = p.take_identifier("expected an identifier")?;
            let args = p.parse_arguments()?;
            Ok(Atom::new(functor, args))
        })
    }

    fn parse_arguments(&mut self) -> PResult<Vec<Term>> {
        let mut args = Vec::new();
        while self.starts_term() {
            args.push(self.parse_term()?);
        }
        Ok(args)
    }

    fn parse_term(&mut self) -> PResult<Term> {
        if self.peek() == &Token::LBracket {
            return self.parse_group();
        }
        let name = self.take_identifier("expected an identifier or '('")?;
        Ok(Term::name(name))
    }

    /// A group around a single term collapses to that term.
    fn parse_group(&mut self) -> PResult<Term> {
        self.traced("group", |p| {
            p.expect(Token::LBracket, "expected '('")?;
            let inner = match p.peek() {
                Token::Ident { .. } => {
                    let functor = p.take_identifier("expected an identifier")?;
                    let args = p.parse_arguments()?;
                    if args.is_empty() {
                        Term::name(functor)
                    } else {
                        Term::compound(Atom::new(functor, args))
                    }
                }
                Token::LBracket => p.parse_group()?,
                _ => return Err(p.err("expected an identifier or '(' inside brackets")),
            };
            p.expect(Token::RBracket, "expected ')' to close argument group")?;
            Ok(inner)
        })
    }
}
