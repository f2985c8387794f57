//! Recursive-descent parser over a lexed token stream.
//! Syntax errors are recovered at clause boundaries (the next `.`), so one
//! parse reports every malformed clause and keeps every well-formed one.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::ast::{Clause, Program};
use crate::cursor::Cursor;
use crate::error::{CursorError, Diagnostic};
use crate::format;
use crate::lexer::{Spanned, Token};

mod clauses;
mod expressions;

// ──────────────────────────────────────────────
// Options and results
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Stop after this many diagnostics. `None` keeps going to end of input.
    pub max_errors: Option<usize>,
}

/// Result of a parse that ran to completion. Diagnostics are not failures:
/// `program` holds every clause that parsed despite them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Canonical text of each clause, in source order.
    pub fn clauses_text(&self) -> Vec<String> {
        self.program.clauses.iter().map(format::clause).collect()
    }

    /// Diagnostics (one per line) followed by the program text, or by
    /// [`format::EMPTY_PROGRAM_TEXT`] when no clause was recognised.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for d in &self.diagnostics {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        if self.program.is_empty() {
            out.push_str(format::EMPTY_PROGRAM_TEXT);
        } else {
            out.push_str(&format::program(&self.program));
        }
        out
    }
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

/// Why a production gave up.
#[derive(Debug)]
enum Failure {
    Syntax(Diagnostic),
    Internal(CursorError),
}

impl From<CursorError> for Failure {
    fn from(e: CursorError) -> Self {
        match e {
            CursorError::EndOfInput => {
                Failure::Syntax(Diagnostic::end_of_input("unexpected end of input"))
            }
            other => Failure::Internal(other),
        }
    }
}

type PResult<T> = Result<T, Failure>;

struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
    max_errors: Option<usize>,
    /// Nesting level of the production currently running.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], options: &ParseOptions) -> Result<Self, CursorError> {
        Ok(Parser {
            cursor: Cursor::new(tokens)?,
            diagnostics: Vec::new(),
            max_errors: options.max_errors,
            depth: 0,
        })
    }

    fn cur(&self) -> &'a Spanned {
        self.cursor.current()
    }

    fn peek(&self) -> &'a Token {
        self.cursor.peek()
    }

    fn advance(&mut self) -> PResult<&'a Spanned> {
        Ok(self.cursor.advance()?)
    }

    fn err(&self, msg: impl Into<String>) -> Failure {
        Failure::Syntax(Diagnostic::at(self.cur(), msg))
    }

    /// Identifier-class token: a plain identifier or the reserved `module`.
    fn is_identifier(&self) -> bool {
        matches!(self.peek(), Token::Ident { .. })
    }

    fn is_reserved_module(&self) -> bool {
        matches!(self.peek(), Token::Ident { reserved: true, .. })
    }

    /// Whether the current token can begin an argument.
    fn starts_term(&self) -> bool {
        self.is_identifier() || self.peek() == &Token::LBracket
    }

    fn take_identifier(&mut self, msg: &str) -> PResult<String> {
        match self.peek() {
            Token::Ident { name, .. } => {
                self.advance()?;
                Ok(name.clone())
            }
            _ => Err(self.err(msg)),
        }
    }

    fn expect(&mut self, token: Token, msg: &str) -> PResult<()> {
        if self.peek() == &token {
            self.advance()?;
            Ok(())
        } else {
            Err(self.err(msg))
        }
    }

    /// Run one grammar production, emitting `enter`/`leave` trace events
    /// tagged with the nesting depth. The depth is restored on every exit
    /// path, including syntax errors.
    fn traced<T>(
        &mut self,
        production: &'static str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.depth += 1;
        let token = self.cur();
        trace!(
            depth = self.depth,
            production,
            kind = token.token.kind_name(),
            lexeme = token.token.lexeme(),
            line = token.line,
            "enter"
        );
        let result = f(self);
        trace!(
            depth = self.depth,
            production,
            ok = result.is_ok(),
            "leave"
        );
        self.depth -= 1;
        result
    }

    // -- Program driver and recovery ------------------------------

    fn parse_program(&mut self) -> Result<Program, CursorError> {
        let mut clauses = Vec::new();
        let mut leading = true;

        while !self.cursor.at_end() {
            let result = if leading {
                leading = false;
                self.parse_leading_clause()
            } else {
                self.parse_clause()
            };
            match result {
                Ok(clause) => {
                    trace!(clause = %format::clause(&clause), "parsed clause");
                    clauses.push(clause);
                }
                Err(Failure::Syntax(d)) => {
                    debug!(line = ?d.line(), "{}", d);
                    self.diagnostics.push(d);
                    if self
                        .max_errors
                        .is_some_and(|max| self.diagnostics.len() >= max)
                    {
                        warn!(
                            errors = self.diagnostics.len(),
                            "error limit reached, abandoning parse"
                        );
                        break;
                    }
                    self.recover_to_next_clause();
                }
                Err(Failure::Internal(e)) => return Err(e),
            }
        }

        Ok(Program { clauses })
    }

    fn parse_leading_clause(&mut self) -> PResult<Clause> {
        if let Some(decl) = self.parse_module_declaration()? {
            return Ok(decl);
        }
        self.parse_clause()
    }

    /// Discard tokens up to and including the next `.`, or up to end of input.
    fn recover_to_next_clause(&mut self) {
        let mut skipped = 0usize;
        while let Ok(s) = self.cursor.advance() {
            skipped += 1;
            if s.token == Token::Dot {
                break;
            }
        }
        debug!(
            skipped,
            position = self.cursor.position(),
            at_end = self.cursor.at_end(),
            "resynchronised"
        );
    }
}

/// Parse a token stream produced by [`crate::lexer::lex`] (or any stream that
/// ends with exactly one `Eof`).
pub fn parse(tokens: &[Spanned], options: &ParseOptions) -> Result<ParseOutput, CursorError> {
    let mut p = Parser::new(tokens, options)?;
    let program = p.parse_program()?;
    Ok(ParseOutput {
        program,
        diagnostics: p.diagnostics,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
