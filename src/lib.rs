//!
//! ## jsonlint
//!
//! A strict validator for [JSON](https://www.rfc-editor.org/rfc/rfc8259)
//! documents: a lexer, a recursive-descent parser, and a
//! located verdict for the first problem found.
//!
//! ```
//! use jsonlint::{validate_str, ParserOptions};
//!
//! assert!(validate_str(r#"{"fruits": ["apple"]}"#, ParserOptions::default()).is_ok());
//! assert!(validate_str("[1,]", ParserOptions::default()).is_err());
//! ```
//!

pub mod common;
pub mod lexing;
pub mod syntax;
pub mod verdict;

pub use common::{Position, SourceError, Spanned};
pub use lexing::{tokenize, Lexer, Token, TokenType};
pub use syntax::{
    DuplicateKeys, ErrorClass, Expected, ParseError, Parser, ParserOptions, Value,
};
pub use verdict::{validate, validate_str, Report, Verdict};
