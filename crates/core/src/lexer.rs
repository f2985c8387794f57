use serde::Serialize;

use crate::error::LexError;

/// Spelling that the lexer flags as reserved on an identifier token.
pub const MODULE_KEYWORD: &str = "module";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `:-`
    Assign,
    /// `,`
    Conjunction,
    /// `;`
    Disjunction,
    /// `.` -- clause terminator
    Dot,
    LBracket,
    RBracket,
    /// Identifier-class token. `reserved` is set for the spelling `module`;
    /// the grammar accepts either flag value wherever an identifier is legal.
    Ident { name: String, reserved: bool },
    /// End of input
    Eof,
}

impl Token {
    pub fn ident(name: impl Into<String>) -> Self {
        let name = name.into();
        let reserved = name == MODULE_KEYWORD;
        Token::Ident { name, reserved }
    }

    /// Kind name as reported in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Assign => "ASSIGN",
            Token::Conjunction => "CONJUNCTION",
            Token::Disjunction => "DISJUNCTION",
            Token::Dot => "DOT",
            Token::LBracket => "LBRACKET",
            Token::RBracket => "RBRACKET",
            Token::Ident { reserved: true, .. } => "MODULE",
            Token::Ident { .. } => "IDENTIFIER",
            Token::Eof => "END",
        }
    }

    /// Source text of the token. Empty for `Eof`.
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Assign => ":-",
            Token::Conjunction => ",",
            Token::Disjunction => ";",
            Token::Dot => ".",
            Token::LBracket => "(",
            Token::RBracket => ")",
            Token::Ident { name, .. } => name,
            Token::Eof => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: u32,
    /// Character offset from the start of the input.
    pub offset: usize,
}

impl Spanned {
    pub fn new(token: Token, line: u32, offset: usize) -> Self {
        Spanned {
            token,
            line,
            offset,
        }
    }
}

/// Token as shown to users in listings and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub kind: String,
    pub lexeme: String,
    pub line: u32,
    pub offset: usize,
}

impl From<&Spanned> for TokenInfo {
    fn from(s: &Spanned) -> Self {
        TokenInfo {
            kind: s.token.kind_name().to_owned(),
            lexeme: s.token.lexeme().to_owned(),
            line: s.line,
            offset: s.offset,
        }
    }
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, LexError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
            }
            pos += 1;
            continue;
        }

        let start = pos;
        let punct = match c {
            ',' => Some(Token::Conjunction),
            ';' => Some(Token::Disjunction),
            '.' => Some(Token::Dot),
            '(' => Some(Token::LBracket),
            ')' => Some(Token::RBracket),
            _ => None,
        };
        if let Some(token) = punct {
            tokens.push(Spanned::new(token, line, start));
            pos += 1;
            continue;
        }

        if c == ':' {
            if pos + 1 < chars.len() && chars[pos + 1] == '-' {
                tokens.push(Spanned::new(Token::Assign, line, start));
                pos += 2;
                continue;
            }
            return Err(LexError::new(line, start, "expected '-' after ':'"));
        }

        if c.is_ascii_alphabetic() || c == '_' {
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Spanned::new(Token::ident(word), line, start));
            continue;
        }

        return Err(LexError::new(
            line,
            start,
            format!("illegal character '{}'", c),
        ));
    }

    tokens.push(Spanned::new(Token::Eof, line, chars.len()));
    Ok(tokens)
}
