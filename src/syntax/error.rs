//!
//! Why a document was rejected.
//!

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::{
    common::{Position, SourceError, Spanned},
    lexing::{Illegal, TokenType},
};

///
/// What the grammar required at the point of failure.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Value,
    Key,
    Colon,
    CommaOrCloseBrace,
    CommaOrCloseBracket,
    EndOfInput,
    ClosingQuote,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Expected::Value => "a value",
            Expected::Key => "a string key",
            Expected::Colon => "`:`",
            Expected::CommaOrCloseBrace => "`,` or `}`",
            Expected::CommaOrCloseBracket => "`,` or `]`",
            Expected::EndOfInput => "end of input",
            Expected::ClosingQuote => "a closing `\"`",
        })
    }
}

///
/// Coarse taxonomy of [ParseError]s.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Lexical,
    Syntax,
    TrailingContent,
    Underflow,
    Limit,
    Io,
}

///
/// The first problem found in a document.
///
/// Messages leave the position out; see [crate::verdict::Report]
/// for the located rendering.
///
#[derive(Debug, Error)]
pub enum ParseError {
    ///
    /// An [Illegal] token reached the parser.
    ///
    #[error("{token}")]
    Lexical { token: Illegal },

    ///
    /// A well-formed token where the grammar wanted something else.
    ///
    #[error("expected {expected}, found {found} `{lexeme}`")]
    Syntax {
        expected: Expected,
        found: TokenType,
        lexeme: String,
        position: Position,
    },

    ///
    /// `[1,]` or `{"a":1,}`; positioned at the comma.
    ///
    #[error("trailing comma before {closing}")]
    TrailingComma {
        closing: TokenType,
        position: Position,
    },

    #[error("duplicate key {key:?}")]
    DuplicateKey { key: String, position: Position },

    #[error("unexpected {found} `{lexeme}` after the root value")]
    TrailingContent {
        found: TokenType,
        lexeme: String,
        position: Position,
    },

    ///
    /// Input ended in the middle of a value.
    ///
    #[error("unexpected end of input, expected {expected}")]
    Underflow {
        expected: Expected,
        position: Position,
    },

    #[error("nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize, position: Position },

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ParseError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ParseError::Lexical { .. } => ErrorClass::Lexical,
            ParseError::Syntax { .. }
            | ParseError::TrailingComma { .. }
            | ParseError::DuplicateKey { .. } => ErrorClass::Syntax,
            ParseError::TrailingContent { .. } => ErrorClass::TrailingContent,
            ParseError::Underflow { .. } => ErrorClass::Underflow,
            ParseError::DepthExceeded { .. } => ErrorClass::Limit,
            ParseError::Source(_) => ErrorClass::Io,
        }
    }

    ///
    /// Where the problem was found, if the input got that far.
    ///
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Lexical { token } => Some(token.position()),
            ParseError::Syntax { position, .. }
            | ParseError::TrailingComma { position, .. }
            | ParseError::DuplicateKey { position, .. }
            | ParseError::TrailingContent { position, .. }
            | ParseError::Underflow { position, .. }
            | ParseError::DepthExceeded { position, .. } => Some(*position),
            ParseError::Source(SourceError::InvalidUtf8 { position }) => Some(*position),
            ParseError::Source(SourceError::Io(_)) => None,
        }
    }

    pub fn expected(&self) -> Option<Expected> {
        match self {
            ParseError::Syntax { expected, .. } | ParseError::Underflow { expected, .. } => {
                Some(*expected)
            }
            ParseError::TrailingComma { closing, .. } => Some(match closing {
                TokenType::RBrace => Expected::Key,
                _ => Expected::Value,
            }),
            ParseError::TrailingContent { .. } => Some(Expected::EndOfInput),
            _ => None,
        }
    }

    ///
    /// The type of the token the parser stopped at.
    ///
    pub fn found(&self) -> Option<TokenType> {
        match self {
            ParseError::Lexical { .. } => Some(TokenType::Illegal),
            ParseError::Syntax { found, .. } | ParseError::TrailingContent { found, .. } => {
                Some(*found)
            }
            ParseError::TrailingComma { closing, .. } => Some(*closing),
            ParseError::DuplicateKey { .. } => Some(TokenType::Str),
            ParseError::Underflow { .. } => Some(TokenType::Eof),
            ParseError::DepthExceeded { .. } | ParseError::Source(_) => None,
        }
    }
}
