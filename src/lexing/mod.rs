//!
//! The process of lexing involves converting [char]s
//! from source code into lexical tokens according to
//! some [lexical grammar](https://en.wikipedia.org/wiki/Lexical_grammar).
//!
//! The [Lexer] never fails on malformed JSON: anything it cannot
//! classify comes out as an [Illegal] token, left for the parser
//! to report. Only failures of the input itself are errors.
//!

pub mod literal;
pub mod number;
pub mod strings;
pub mod tokens;

use std::io::{BufRead, BufReader, Read};

use crate::common::{CharSource, Position, SourceError};

use self::{
    literal::is_letter,
    number::{starts_number, NumberGrammar},
    tokens::{IllegalReason, PunctKind},
};

pub use self::tokens::{Illegal, Literal, LiteralKind, Punct, Token, TokenType};

///
/// Produces one [Token] per call from a [CharSource].
///
#[derive(Debug)]
pub struct Lexer<R> {
    source: CharSource<R>,
    numbers: NumberGrammar,

    ///
    /// Set once EOF (or an input failure) was handed out by the [Iterator].
    ///
    finished: bool,
}

impl<'a> Lexer<&'a [u8]> {
    ///
    /// Lex in-memory text.
    ///
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: Read> Lexer<BufReader<R>> {
    ///
    /// Lex from an unbuffered reader.
    ///
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            source: CharSource::new(reader),
            numbers: NumberGrammar,
            finished: false,
        }
    }

    ///
    /// Scans the next token.
    ///
    /// Once the input is exhausted, every call returns EOF.
    ///
    pub fn next_token(&mut self) -> Result<Token, SourceError> {
        loop {
            let Some(ch) = self.source.advance()? else {
                return Ok(Token::Eof(Position::single_char(
                    self.source.line(),
                    self.source.column() + 1,
                )));
            };

            let here = Position::single_char(self.source.line(), self.source.column());

            match ch {
                ' ' | '\t' | '\r' => continue,
                '\n' => self.source.next_line(),
                '"' => return self.lex_string(),
                ch => {
                    if let Some(kind) = PunctKind::from_char(ch) {
                        return Ok(Token::punct(kind, here));
                    }

                    if starts_number(ch, self.source.peek()?) {
                        return self.lex_number(ch);
                    }

                    if is_letter(ch) {
                        return self.lex_word(ch);
                    }

                    return Ok(Token::illegal(
                        ch.to_string(),
                        IllegalReason::UnexpectedCharacter,
                        here,
                    ));
                }
            }
        }
    }
}

///
/// Yields every token up to and including a single EOF.
///
impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_token();
        self.finished = matches!(item, Ok(Token::Eof(_)) | Err(_));
        Some(item)
    }
}

///
/// Collects every token of `reader`, EOF included.
///
pub fn tokenize<R: Read>(reader: R) -> Result<Vec<Token>, SourceError> {
    Lexer::from_reader(reader).collect()
}
