//! Parse tree produced by the parser and consumed by [`crate::format`].
//!
//! Parenthesised groups that only regroup an expression leave no node of
//! their own: precedence is captured by the shape of the tree.

use serde::Serialize;

/// One element of an argument sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    /// A bare identifier-class token, or a bracket group around one.
    Name { name: String },
    /// `( functor arg+ )`
    Compound { atom: Atom },
}

impl Term {
    pub fn name(name: impl Into<String>) -> Self {
        Term::Name { name: name.into() }
    }

    pub fn compound(atom: Atom) -> Self {
        Term::Compound { atom }
    }
}

/// A functor optionally followed by arguments, e.g. `f (cons h t) x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Atom {
    pub functor: String,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            functor: functor.into(),
            args,
        }
    }

    pub fn bare(functor: impl Into<String>) -> Self {
        Atom::new(functor, Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Atom { atom: Atom },
    Conjunction { left: Box<Expr>, right: Box<Expr> },
    Disjunction { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    pub fn atom(atom: Atom) -> Self {
        Expr::Atom { atom }
    }

    pub fn conjunction(left: Expr, right: Expr) -> Self {
        Expr::Conjunction {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn disjunction(left: Expr, right: Expr) -> Self {
        Expr::Disjunction {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Clause {
    /// `module <name>.` at the very start of a program.
    ModuleDecl { name: String },
    /// `head.`
    Fact { head: Atom },
    /// `head :- body.`
    Rule { head: Atom, body: Expr },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub clauses: Vec<Clause>,
}

impl Program {
    pub fn module_name(&self) -> Option<&str> {
        match self.clauses.first() {
            Some(Clause::ModuleDecl { name }) => Some(name),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
