//!
//! String literals.
//!

use std::{io::BufRead, str::Chars};

use jsonlint_macros::RfcRef;

use crate::common::{Position, SourceError};

use super::{
    tokens::{IllegalReason, LiteralKind, Token},
    Lexer,
};

///
/// Characters allowed straight after a backslash,
/// besides `u`.
///
#[RfcRef("Strings", "7")]
pub const SINGLE_ESCAPES: [char; 8] = ['"', '\\', '/', 'b', 'f', 'n', 'r', 't'];

impl<R: BufRead> Lexer<R> {
    ///
    /// Scans a string literal; the opening quote was
    /// already consumed at the current column.
    ///
    /// Escapes are consumed pairwise, so a quote only closes the
    /// string after an even run of backslashes. Only the end of
    /// input leaves a string unterminated.
    ///
    /// A well-formed string is positioned on its contents; an
    /// illegal one on its rendered lexeme, opening quote included,
    /// up to the end of its first line.
    ///
    pub(super) fn lex_string(&mut self) -> Result<Token, SourceError> {
        let line = self.source.line();
        let start = self.source.column();

        let mut contents = String::new();
        let mut problem: Option<IllegalReason> = None;

        loop {
            let Some(ch) = self.source.advance()? else {
                return Ok(illegal(
                    format!("\"{contents}"),
                    IllegalReason::UnterminatedString,
                    line,
                    start,
                ));
            };

            match ch {
                '"' => break,
                '\\' => {
                    contents.push('\\');

                    match self.source.advance()? {
                        None => {
                            return Ok(illegal(
                                format!("\"{contents}"),
                                IllegalReason::UnterminatedString,
                                line,
                                start,
                            ));
                        }
                        Some('u') => {
                            contents.push('u');

                            for _ in 0..4 {
                                match self.source.peek()? {
                                    Some(digit) if digit.is_ascii_hexdigit() => {
                                        self.source.advance()?;
                                        contents.push(digit);
                                    }
                                    _ => {
                                        problem.get_or_insert(IllegalReason::InvalidEscape);
                                        break;
                                    }
                                }
                            }
                        }
                        Some(esc) if SINGLE_ESCAPES.contains(&esc) => contents.push(esc),
                        Some(other) => {
                            if other == '\n' {
                                self.source.next_line();
                            }

                            contents.push(other);
                            problem.get_or_insert(IllegalReason::InvalidEscape);
                        }
                    }
                }
                ch if ch < '\u{20}' => {
                    if ch == '\n' {
                        self.source.next_line();
                    }

                    contents.push(ch);
                    problem.get_or_insert(IllegalReason::ControlCharacter);
                }
                ch => contents.push(ch),
            }
        }

        Ok(match problem {
            None => {
                // `""` still covers one column: its closing quote.
                let position = Position::spanning(line, start + 1, contents.chars().count());
                Token::literal(LiteralKind::Str, contents, position)
            }
            Some(reason) => illegal(format!("\"{contents}\""), reason, line, start),
        })
    }
}

fn illegal(lexeme: String, reason: IllegalReason, line: usize, start: usize) -> Token {
    let width = lexeme.chars().take_while(|&ch| ch != '\n').count();
    let position = Position::spanning(line, start, width);
    Token::illegal(lexeme, reason, position)
}

fn hex4(chars: &mut Chars) -> Option<u32> {
    (0..4).try_fold(0, |acc, _| Some(acc * 16 + chars.next()?.to_digit(16)?))
}

///
/// Decodes the escapes of a well-formed string lexeme.
///
/// Surrogate pairs are combined; lone surrogates
/// become U+FFFD.
///
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let Some(unit) = hex4(&mut chars) else {
                    out.push(char::REPLACEMENT_CHARACTER);
                    continue;
                };

                if (0xD800..=0xDBFF).contains(&unit) {
                    let mut ahead = chars.clone();
                    if let (Some('\\'), Some('u')) = (ahead.next(), ahead.next()) {
                        if let Some(low @ 0xDC00..=0xDFFF) = hex4(&mut ahead) {
                            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                            chars = ahead;
                            continue;
                        }
                    }
                }

                out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            // `"`, `\` and `/` stand for themselves.
            Some(other) => out.push(other),
            None => (),
        }
    }

    out
}
