//! modlog-core: parser for a small Prolog-like clause language.
//!
//! Source text is lexed once into a token stream, parsed into a
//! [`Program`] by a predictive recursive-descent parser, and rendered to a
//! canonical bracketed text form by [`format`].
//!
//! # Public API
//!
//! - [`parse_source()`] -- lex + parse with default options
//! - [`parse_source_with()`] -- same, with [`ParseOptions`]
//! - [`parse_tokens()`] -- parse an already-lexed stream
//! - [`ParseOutput`] -- salvaged program plus recovered [`Diagnostic`]s
//! - [`Error`] -- the failures that abort a parse (lexical, internal)
//!
//! A syntax error inside one clause does not abort the parse: the clause is
//! reported as a diagnostic and parsing resumes after the next `.`.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{Atom, Clause, Expr, Program, Term};
pub use error::{CursorError, Diagnostic, Error, LexError};
pub use lexer::{lex, Spanned, Token};
pub use parser::{ParseOptions, ParseOutput};

pub fn parse_source(src: &str) -> Result<ParseOutput, Error> {
    parse_source_with(src, &ParseOptions::default())
}

pub fn parse_source_with(src: &str, options: &ParseOptions) -> Result<ParseOutput, Error> {
    let tokens = lexer::lex(src)?;
    Ok(parser::parse(&tokens, options)?)
}

pub fn parse_tokens(tokens: &[Spanned], options: &ParseOptions) -> Result<ParseOutput, CursorError> {
    parser::parse(tokens, options)
}
