use super::{PResult, Parser};
use crate::ast::Clause;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    // -- Clauses ---------------------------------------------------

    /// `module <identifier> .` -- only tried at the start of a program.
    ///
    /// Looks two tokens past `module`. If the shape does not match, the
    /// cursor is stepped back to `module`, which then parses as an ordinary
    /// identifier (`module.`, `module a b.`, `module a :- b.`).
    pub(super) fn parse_module_declaration(&mut self) -> PResult<Option<Clause>> {
        if !self.is_reserved_module() {
            return Ok(None);
        }
        self.advance()?;
        if let Token::Ident { name, .. } = self.peek() {
            self.advance()?;
            if self.peek() == &Token::Dot {
                self.advance()?;
                return Ok(Some(Clause::ModuleDecl { name: name.clone() }));
            }
            self.cursor.retreat()?;
        }
        self.cursor.retreat()?;
        Ok(None)
    }

    /// `head .` or `head :- body .`
    pub(super) fn parse_clause(&mut self) -> PResult<Clause> {
        self.traced("clause", |p| {
            if !p.is_identifier() {
                return Err(p.err("clause head must start with an identifier"));
            }
            let head = p.parse_atom()?;
            let clause = if p.peek() == &Token::Assign {
                p.advance()?;
                let body = p.parse_disjunction()?;
                Clause::Rule { head, body }
            } else {
                Clause::Fact { head }
            };
            p.expect(Token::Dot, "expected '.' at end of clause")?;
            Ok(clause)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Atom, Clause, Term};
    use crate::lexer;
    use crate::parser::{parse, ParseOptions};

    fn clauses(src: &str) -> Vec<Clause> {
        let tokens = lexer::lex(src).unwrap();
        let out = parse(&tokens, &ParseOptions::default()).unwrap();
        assert!(out.is_clean(), "{:?}", out.diagnostics);
        out.program.clauses
    }

    #[test]
    fn leading_module_declaration() {
        assert_eq!(
            clauses("module m."),
            vec![Clause::ModuleDecl { name: "m".into() }]
        );
        assert_eq!(
            clauses("module module."),
            vec![Clause::ModuleDecl {
                name: "module".into()
            }]
        );
    }

    #[test]
    fn module_without_name_is_a_fact() {
        assert_eq!(
            clauses("module."),
            vec![Clause::Fact {
                head: Atom::bare("module")
            }]
        );
    }

    #[test]
    fn three_tokens_before_terminator_is_an_atom() {
        assert_eq!(
            clauses("module module module."),
            vec![Clause::Fact {
                head: Atom::new("module", vec![Term::name("module"), Term::name("module")])
            }]
        );
    }

    #[test]
    fn module_declaration_only_leads_the_program() {
        let got = clauses("module a. module b.");
        assert_eq!(got[0], Clause::ModuleDecl { name: "a".into() });
        assert_eq!(
            got[1],
            Clause::Fact {
                head: Atom::new("module", vec![Term::name("b")])
            }
        );
    }

    #[test]
    fn module_as_rule_functor() {
        let got = clauses("module a :- b.");
        assert!(matches!(
            &got[0],
            Clause::Rule { head, .. } if head == &Atom::new("module", vec![Term::name("a")])
        ));
    }

    #[test]
    fn bracketed_argument_after_module() {
        let got = clauses("module (a b).");
        assert_eq!(
            got,
            vec![Clause::Fact {
                head: Atom::new(
                    "module",
                    vec![Term::compound(Atom::new("a", vec![Term::name("b")]))]
                )
            }]
        );
    }
}
