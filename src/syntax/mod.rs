//!
//! Syntax Grammar.
//!
//! A recursive-descent [Parser] pulling one token at a time
//! from the [Lexer]. The first violation found ends the parse.
//!

pub mod error;
pub mod value;

use std::{
    io::{BufRead, BufReader, Read},
    mem,
};

use log::{debug, trace};

use crate::{
    common::Spanned,
    lexing::{
        tokens::{IllegalReason, PunctKind},
        Lexer, Literal, LiteralKind, Punct, Token,
    },
};

pub use self::{
    error::{ErrorClass, Expected, ParseError},
    value::Value,
};

pub type ParserResult<T> = Result<T, ParseError>;

///
/// Nesting allowed by [ParserOptions::default].
///
pub const DEFAULT_MAX_DEPTH: usize = 512;

///
/// What to do when an object repeats a key.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    ///
    /// The later member replaces the earlier one.
    ///
    #[default]
    LastWins,

    ///
    /// The second occurrence is an error.
    ///
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub duplicate_keys: DuplicateKeys,

    ///
    /// Deepest array/object nesting accepted.
    ///
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug)]
pub struct Parser<R> {
    lexer: Lexer<R>,

    ///
    /// The single token of lookahead.
    ///
    current: Token,

    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_text(text: &'a str, options: ParserOptions) -> ParserResult<Self> {
        Self::new(Lexer::from_text(text), options)
    }
}

impl<R: Read> Parser<BufReader<R>> {
    pub fn from_reader(reader: R, options: ParserOptions) -> ParserResult<Self> {
        Self::new(Lexer::from_reader(reader), options)
    }
}

impl<R: BufRead> Parser<R> {
    ///
    /// Primes the lookahead with the first token of `lexer`.
    ///
    pub fn new(mut lexer: Lexer<R>, options: ParserOptions) -> ParserResult<Self> {
        let current = lexer.next_token()?;
        trace!("{current}");

        Ok(Self {
            lexer,
            current,
            options,
            depth: 0,
        })
    }

    ///
    /// Parses exactly one value followed by EOF.
    ///
    pub fn parse(mut self) -> ParserResult<Value> {
        let value = self.parse_value()?;

        if !self.current.is_eof() {
            debug!("trailing content at {}", self.current.position());
            return Err(ParseError::TrailingContent {
                found: self.current.ty(),
                lexeme: self.current.lexeme().to_string(),
                position: self.current.position(),
            });
        }

        debug!("accepted {} root value", value.type_name());
        Ok(value)
    }

    ///
    /// Moves the lookahead on, returning the token it held.
    ///
    fn advance(&mut self) -> ParserResult<Token> {
        let next = self.lexer.next_token()?;
        trace!("{next}");
        Ok(mem::replace(&mut self.current, next))
    }

    fn eat_punct(&mut self, kind: PunctKind) -> ParserResult<Option<Punct>> {
        if !self.current.is_punct(kind) {
            return Ok(None);
        }

        match self.advance()? {
            Token::Punct(punct) => Ok(Some(punct)),
            _ => Ok(None),
        }
    }

    ///
    /// Takes the lookahead if it is a literal accepted by `filter`.
    ///
    fn eat_literal(
        &mut self,
        filter: impl Fn(LiteralKind) -> bool,
    ) -> ParserResult<Option<Literal>> {
        if !matches!(&self.current, Token::Literal(literal) if filter(literal.kind())) {
            return Ok(None);
        }

        match self.advance()? {
            Token::Literal(literal) => Ok(Some(literal)),
            _ => Ok(None),
        }
    }

    ///
    /// Classifies the lookahead as the reason `expected` was not met.
    ///
    fn unexpected(&self, expected: Expected) -> ParseError {
        let error = match &self.current {
            Token::Eof(position) => ParseError::Underflow {
                expected,
                position: *position,
            },
            Token::Illegal(token) if token.reason() == IllegalReason::UnterminatedString => {
                ParseError::Underflow {
                    expected: Expected::ClosingQuote,
                    position: token.position(),
                }
            }
            Token::Illegal(token) => ParseError::Lexical {
                token: token.clone(),
            },
            token => ParseError::Syntax {
                expected,
                found: token.ty(),
                lexeme: token.lexeme().to_string(),
                position: token.position(),
            },
        };

        debug!("rejected at {}: {error}", self.current.position());
        error
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DuplicateKeys, ErrorClass, Expected, ParseError, Parser, ParserOptions, Value};
    use crate::{common::Position, lexing::TokenType};

    fn parse(src: &str) -> Result<Value, ParseError> {
        Parser::from_text(src, ParserOptions::default())?.parse()
    }

    fn parse_with(src: &str, options: ParserOptions) -> Result<Value, ParseError> {
        Parser::from_text(src, options)?.parse()
    }

    #[rstest]
    #[case("{}")]
    #[case("[]")]
    #[case("0")]
    #[case("-1.5e+3")]
    #[case(r#""""#)]
    #[case("true")]
    #[case("false")]
    #[case("null")]
    #[case(r#"{"a": [1, 2, {"b": null}], "c": "d"}"#)]
    #[case(" \r\n [ true , false ] \r\n")]
    #[case(r#"[[[[[]]]]]"#)]
    #[case(r#"{"": {"": {}}}"#)]
    fn accepts(#[case] src: &str) {
        assert!(parse(src).is_ok(), "{src} should be accepted: {:?}", parse(src));
    }

    #[test]
    fn witness() {
        let value = parse(r#"{"a": [1, "x\ny", true], "b": null}"#).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(
            object["a"],
            Value::Array(vec![
                Value::Number("1".into()),
                Value::String("x\ny".into()),
                Value::Bool(true),
            ])
        );
        assert_eq!(object["b"], Value::Null);
    }

    #[rstest]
    #[case("[1,]", TokenType::RBracket, 3)]
    #[case(r#"{"a":1,}"#, TokenType::RBrace, 7)]
    #[case(r#"[{"a":[1,2,]}]"#, TokenType::RBracket, 11)]
    fn trailing_comma(#[case] src: &str, #[case] closing: TokenType, #[case] column: usize) {
        match parse(src) {
            Err(ParseError::TrailingComma { closing: c, position }) => {
                assert_eq!(c, closing);
                assert_eq!(position, Position::single_char(1, column));
            }
            other => panic!("{src}: {other:?}"),
        }
    }

    #[test]
    fn trailing_content() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.class(), ErrorClass::TrailingContent);
        assert_eq!(err.position(), Some(Position::single_char(1, 3)));
        assert_eq!(err.found(), Some(TokenType::Num));

        let err = parse("{} @").unwrap_err();
        assert_eq!(err.class(), ErrorClass::TrailingContent);
        assert_eq!(err.found(), Some(TokenType::Illegal));
    }

    #[rstest]
    #[case("", Expected::Value, Position::single_char(1, 1))]
    #[case("[", Expected::Value, Position::single_char(1, 2))]
    #[case("[1", Expected::CommaOrCloseBracket, Position::single_char(1, 3))]
    #[case("{", Expected::Key, Position::single_char(1, 2))]
    #[case(r#"{"a""#, Expected::Colon, Position::single_char(1, 5))]
    #[case(r#"{"a":"#, Expected::Value, Position::single_char(1, 6))]
    #[case(r#"{"a":1"#, Expected::CommaOrCloseBrace, Position::single_char(1, 7))]
    #[case(r#"["ab"#, Expected::ClosingQuote, Position::new(1, 2, 4))]
    fn underflow(#[case] src: &str, #[case] expected: Expected, #[case] position: Position) {
        let err = parse(src).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Underflow, "{src}: {err}");
        assert_eq!(err.expected(), Some(expected));
        assert_eq!(err.position(), Some(position));
    }

    #[rstest]
    #[case("{1:2}", Expected::Key, TokenType::Num, 2)]
    #[case(r#"{"a" 1}"#, Expected::Colon, TokenType::Num, 6)]
    #[case(r#"{"a":1 "b":2}"#, Expected::CommaOrCloseBrace, TokenType::Str, 9)]
    #[case("[1 2]", Expected::CommaOrCloseBracket, TokenType::Num, 4)]
    #[case("[,]", Expected::Value, TokenType::Comma, 2)]
    #[case("]", Expected::Value, TokenType::RBracket, 1)]
    #[case("{,}", Expected::Key, TokenType::Comma, 2)]
    #[case(":", Expected::Value, TokenType::Colon, 1)]
    fn syntax(
        #[case] src: &str,
        #[case] expected: Expected,
        #[case] found: TokenType,
        #[case] column: usize,
    ) {
        let err = parse(src).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Syntax, "{src}: {err}");
        assert_eq!(err.expected(), Some(expected));
        assert_eq!(err.found(), Some(found));
        assert_eq!(err.position().map(|p| p.column_start()), Some(column));
    }

    #[rstest]
    #[case("01", Position::new(1, 1, 2))]
    #[case("[1, tru]", Position::new(1, 5, 7))]
    #[case(r#"{"a": "\x"}"#, Position::new(1, 7, 10))]
    #[case("{\"a\" @ 1}", Position::single_char(1, 6))]
    #[case("[\"a\nb\"]", Position::new(1, 2, 3))]
    fn lexical(#[case] src: &str, #[case] position: Position) {
        let err = parse(src).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Lexical, "{src}: {err}");
        assert_eq!(err.position(), Some(position));
    }

    #[test]
    fn duplicate_keys() {
        let src = r#"{"a": 1, "a": 2}"#;

        let value = parse(src).unwrap();
        assert_eq!(value.get("a"), Some(&Value::Number("2".into())));

        let reject = ParserOptions {
            duplicate_keys: DuplicateKeys::Reject,
            ..Default::default()
        };
        match parse_with(src, reject) {
            Err(ParseError::DuplicateKey { key, position }) => {
                assert_eq!(key, "a");
                assert_eq!(position, Position::single_char(1, 11));
            }
            other => panic!("{other:?}"),
        }

        assert!(parse_with(r#"{"a": {"a": 1}}"#, reject).is_ok());
    }

    #[test]
    fn depth_limit() {
        let options = ParserOptions {
            max_depth: 3,
            ..Default::default()
        };

        assert!(parse_with("[[[]]]", options).is_ok());
        assert!(parse_with(r#"[{"a":[]}]"#, options).is_ok());

        let err = parse_with("[[[[]]]]", options).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Limit);
        assert_eq!(err.position(), Some(Position::single_char(1, 4)));
    }

    #[test]
    fn deep_input_does_not_overflow() {
        let src = "[".repeat(100_000);
        let err = parse(&src).unwrap_err();
        assert!(matches!(err, ParseError::DepthExceeded { limit: 512, .. }));
    }

    #[test]
    fn invalid_utf8_is_io() {
        let err = Parser::from_reader(&b"[\"\xFF\"]"[..], ParserOptions::default())
            .and_then(Parser::parse)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Io);
    }
}
