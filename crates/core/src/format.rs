//! Canonical text rendering.
//!
//! Every composite fragment embedded in another one goes through [`wrap`],
//! so `f :- g, (h; t).` renders as `Assign f (Conjunction g (Disjunction h t))`.

use crate::ast::{Atom, Clause, Expr, Program, Term};

/// Rendered in place of the program text when no clause was recognised.
pub const EMPTY_PROGRAM_TEXT: &str = "End of input reached while skipping or parsing";

/// Parenthesise a fragment that contains whitespace and is not already
/// parenthesised.
pub fn wrap(text: &str) -> String {
    if text.starts_with('(') && text.ends_with(')') {
        return text.to_owned();
    }
    if !text.contains(' ') {
        return text.to_owned();
    }
    format!("({})", text)
}

pub fn term(t: &Term) -> String {
    match t {
        Term::Name { name } => name.clone(),
        Term::Compound { atom: a } => wrap(&atom(a)),
    }
}

pub fn atom(a: &Atom) -> String {
    let mut out = a.functor.clone();
    for arg in &a.args {
        out.push(' ');
        out.push_str(&term(arg));
    }
    out
}

pub fn expr(e: &Expr) -> String {
    match e {
        Expr::Atom { atom: a } => atom(a),
        Expr::Conjunction { left, right } => {
            format!("Conjunction {} {}", wrap(&expr(left)), wrap(&expr(right)))
        }
        Expr::Disjunction { left, right } => {
            format!("Disjunction {} {}", wrap(&expr(left)), wrap(&expr(right)))
        }
    }
}

pub fn clause(c: &Clause) -> String {
    match c {
        Clause::ModuleDecl { name } => format!("Module {}", name),
        Clause::Fact { head } => atom(head),
        Clause::Rule { head, body } => {
            format!("Assign {} {}", wrap(&atom(head)), wrap(&expr(body)))
        }
    }
}

/// Clauses joined by newlines; empty string for an empty program.
pub fn program(p: &Program) -> String {
    p.clauses.iter().map(clause).collect::<Vec<_>>().join("\n")
}
