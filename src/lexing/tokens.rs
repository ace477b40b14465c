//!
//! Lexical tokens.
//!

use std::fmt::{Display, Formatter};

use jsonlint_macros::{RfcRef, Spanned};

use crate::common::{Position, Spanned};

///
/// The closed set of token classes.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Illegal,
    Eof,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Str,
    Num,
    True,
    False,
    Null,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::Eof => "EOF",
            TokenType::LBrace => "LBRACE",
            TokenType::RBrace => "RBRACE",
            TokenType::LBracket => "LBRACKET",
            TokenType::RBracket => "RBRACKET",
            TokenType::Comma => "COMMA",
            TokenType::Colon => "COLON",
            TokenType::Str => "STR",
            TokenType::Num => "NUM",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::Null => "NULL",
        })
    }
}

///
/// `{ } [ ] : ,`
///
#[RfcRef("Structural characters", "2")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctKind {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
}

impl PunctKind {
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '{' => Self::OpenBrace,
            '}' => Self::CloseBrace,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            ':' => Self::Colon,
            ',' => Self::Comma,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Colon => ":",
            Self::Comma => ",",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Spanned)]
pub struct Punct {
    pub(crate) kind: PunctKind,
    pub(crate) position: Position,
}

impl Punct {
    pub fn kind(&self) -> PunctKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Str,
    Num,
    True,
    False,
    Null,
}

///
/// A well-formed scalar lexeme.
///
/// For strings, the lexeme is the raw text between the quotes,
/// escapes left as written, and so is the position.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Spanned)]
pub struct Literal {
    pub(crate) kind: LiteralKind,
    pub(crate) lexeme: String,
    pub(crate) position: Position,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

///
/// Why a lexeme was classified as [Illegal].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalReason {
    UnexpectedCharacter,
    InvalidNumber,
    UnknownLiteral,
    UnterminatedString,
    InvalidEscape,
    ControlCharacter,
}

impl Display for IllegalReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IllegalReason::UnexpectedCharacter => "unexpected character",
            IllegalReason::InvalidNumber => "invalid number",
            IllegalReason::UnknownLiteral => "unknown literal",
            IllegalReason::UnterminatedString => "unterminated string",
            IllegalReason::InvalidEscape => "invalid escape sequence",
            IllegalReason::ControlCharacter => "unescaped control character in string",
        })
    }
}

///
/// A lexeme which matched no token class, carried
/// along so the parser can report it.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Spanned)]
pub struct Illegal {
    pub(crate) lexeme: String,
    pub(crate) reason: IllegalReason,
    pub(crate) position: Position,
}

impl Illegal {
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn reason(&self) -> IllegalReason {
        self.reason
    }
}

impl Display for Illegal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.reason, self.lexeme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Spanned)]
pub enum Token {
    Punct(Punct),
    Literal(Literal),
    Illegal(Illegal),
    Eof(Position),
}

impl Token {
    pub(crate) fn punct(kind: PunctKind, position: Position) -> Self {
        Self::Punct(Punct { kind, position })
    }

    pub(crate) fn literal(kind: LiteralKind, lexeme: String, position: Position) -> Self {
        Self::Literal(Literal {
            kind,
            lexeme,
            position,
        })
    }

    pub(crate) fn illegal(lexeme: String, reason: IllegalReason, position: Position) -> Self {
        Self::Illegal(Illegal {
            lexeme,
            reason,
            position,
        })
    }

    pub fn ty(&self) -> TokenType {
        match self {
            Token::Punct(Punct { kind, .. }) => match kind {
                PunctKind::OpenBrace => TokenType::LBrace,
                PunctKind::CloseBrace => TokenType::RBrace,
                PunctKind::OpenBracket => TokenType::LBracket,
                PunctKind::CloseBracket => TokenType::RBracket,
                PunctKind::Colon => TokenType::Colon,
                PunctKind::Comma => TokenType::Comma,
            },
            Token::Literal(Literal { kind, .. }) => match kind {
                LiteralKind::Str => TokenType::Str,
                LiteralKind::Num => TokenType::Num,
                LiteralKind::True => TokenType::True,
                LiteralKind::False => TokenType::False,
                LiteralKind::Null => TokenType::Null,
            },
            Token::Illegal(_) => TokenType::Illegal,
            Token::Eof(_) => TokenType::Eof,
        }
    }

    ///
    /// The text matched; `EOF` for the end of input.
    ///
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Punct(p) => p.kind.as_str(),
            Token::Literal(l) => &l.lexeme,
            Token::Illegal(i) => &i.lexeme,
            Token::Eof(_) => "EOF",
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof(_))
    }

    pub fn is_punct(&self, kind: PunctKind) -> bool {
        matches!(self, Token::Punct(p) if p.kind == kind)
    }
}

///
/// `TYPE "lexeme" line:start-end`
///
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pos = self.position();
        write!(
            f,
            "{} {:?} {}:{}-{}",
            self.ty(),
            self.lexeme(),
            pos.line,
            pos.column_start,
            pos.column_end
        )
    }
}
