//!
//! ## Values
//!
//! The grammar productions, and the [Value] tree
//! they build as proof that a document is well-formed.
//!

use std::{collections::BTreeMap, io::BufRead};

use jsonlint_macros::RfcRef;
use log::debug;

use crate::{
    common::Spanned,
    lexing::{strings::unescape, tokens::PunctKind, Literal, LiteralKind, TokenType},
};

use super::{DuplicateKeys, Expected, ParseError, Parser, ParserResult};

///
/// A parsed JSON value.
///
/// Numbers keep their source text; strings and keys
/// have their escapes decoded.
///
#[RfcRef("Values", "3")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    ///
    /// Looks up a member of an object.
    ///
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal.kind {
            LiteralKind::Str => Value::String(unescape(&literal.lexeme)),
            LiteralKind::Num => Value::Number(literal.lexeme),
            LiteralKind::True => Value::Bool(true),
            LiteralKind::False => Value::Bool(false),
            LiteralKind::Null => Value::Null,
        }
    }
}

impl<R: BufRead> Parser<R> {
    pub(super) fn parse_value(&mut self) -> ParserResult<Value> {
        if self.current.is_punct(PunctKind::OpenBrace) {
            return self.parse_object();
        }

        if self.current.is_punct(PunctKind::OpenBracket) {
            return self.parse_array();
        }

        match self.eat_literal(|_| true)? {
            Some(literal) => Ok(literal.into()),
            None => Err(self.unexpected(Expected::Value)),
        }
    }

    ///
    /// Consumes an opening bracket, one level deeper.
    ///
    fn enter(&mut self) -> ParserResult<()> {
        if self.depth >= self.options.max_depth {
            debug!("nesting limit hit at {}", self.current.position());
            return Err(ParseError::DepthExceeded {
                limit: self.options.max_depth,
                position: self.current.position(),
            });
        }

        self.depth += 1;
        self.advance()?;
        Ok(())
    }

    ///
    /// `{` members `}`, where a member is `STR : value`.
    ///
    fn parse_object(&mut self) -> ParserResult<Value> {
        self.enter()?;

        let mut members = BTreeMap::new();
        if self.eat_punct(PunctKind::CloseBrace)?.is_some() {
            self.depth -= 1;
            return Ok(Value::Object(members));
        }

        loop {
            let Some(key) = self.eat_literal(|kind| kind == LiteralKind::Str)? else {
                return Err(self.unexpected(Expected::Key));
            };

            let name = unescape(key.lexeme());
            if self.options.duplicate_keys == DuplicateKeys::Reject && members.contains_key(&name)
            {
                debug!("duplicate key {name:?} at {}", key.position());
                return Err(ParseError::DuplicateKey {
                    key: name,
                    position: key.position(),
                });
            }

            if self.eat_punct(PunctKind::Colon)?.is_none() {
                return Err(self.unexpected(Expected::Colon));
            }

            let value = self.parse_value()?;
            members.insert(name, value);

            if let Some(comma) = self.eat_punct(PunctKind::Comma)? {
                if self.current.is_punct(PunctKind::CloseBrace) {
                    return Err(trailing_comma(TokenType::RBrace, &comma));
                }

                continue;
            }

            if self.eat_punct(PunctKind::CloseBrace)?.is_some() {
                break;
            }

            return Err(self.unexpected(Expected::CommaOrCloseBrace));
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn parse_array(&mut self) -> ParserResult<Value> {
        self.enter()?;

        let mut elements = vec![];
        if self.eat_punct(PunctKind::CloseBracket)?.is_some() {
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            if let Some(comma) = self.eat_punct(PunctKind::Comma)? {
                if self.current.is_punct(PunctKind::CloseBracket) {
                    return Err(trailing_comma(TokenType::RBracket, &comma));
                }

                continue;
            }

            if self.eat_punct(PunctKind::CloseBracket)?.is_some() {
                break;
            }

            return Err(self.unexpected(Expected::CommaOrCloseBracket));
        }

        self.depth -= 1;
        Ok(Value::Array(elements))
    }
}

fn trailing_comma(closing: TokenType, comma: &impl Spanned) -> ParseError {
    debug!("trailing comma at {}", comma.position());
    ParseError::TrailingComma {
        closing,
        position: comma.position(),
    }
}
