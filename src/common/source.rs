//!
//! Sources of source code.
//!
//! A [CharSource] decodes runes lazily from any buffered reader,
//! keeping the line/column cursor the lexer reports positions from.
//!

use std::{
    collections::VecDeque,
    io::{self, BufRead, BufReader, Read},
};

use thiserror::Error;

use super::Position;

///
/// How far [CharSource::peek_nth] may look ahead.
///
pub const MAX_LOOKAHEAD: usize = 4;

///
/// Failures of the underlying input, as opposed to
/// malformed JSON, which the lexer reports as tokens.
///
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("input is not valid UTF-8")]
    InvalidUtf8 { position: Position },
}

///
/// Buffered rune cursor over a reader.
///
#[derive(Debug)]
pub struct CharSource<R> {
    reader: R,

    ///
    /// Runes decoded but not yet consumed:
    /// lookahead, or a pushed-back rune.
    ///
    pending: VecDeque<char>,

    ///
    /// The last consumed rune, if it may still be pushed back.
    ///
    last: Option<char>,

    line: usize,
    column: usize,
}

impl<R: Read> CharSource<BufReader<R>> {
    ///
    /// Wraps an unbuffered reader (a [std::fs::File], say).
    ///
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> CharSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::with_capacity(MAX_LOOKAHEAD),
            last: None,
            line: 1,
            column: 0,
        }
    }

    ///
    /// Current (1-based) line.
    ///
    pub fn line(&self) -> usize {
        self.line
    }

    ///
    /// Column of the last consumed rune on this line,
    /// 0 if nothing on this line was consumed yet.
    ///
    pub fn column(&self) -> usize {
        self.column
    }

    ///
    /// Consume the next rune.
    ///
    /// `Ok(None)` signals the end of input.
    ///
    pub fn advance(&mut self) -> Result<Option<char>, SourceError> {
        let ch = match self.pending.pop_front() {
            Some(ch) => ch,
            None => match self.decode()? {
                Some(ch) => ch,
                None => {
                    self.last = None;
                    return Ok(None);
                }
            },
        };

        self.column += 1;
        self.last = Some(ch);
        Ok(Some(ch))
    }

    ///
    /// Push back the last consumed rune.
    ///
    /// Only one rune can be pushed back, and never across
    /// a line boundary: at column 0 this does nothing.
    ///
    pub fn back(&mut self) {
        if self.column == 0 {
            return;
        }

        if let Some(ch) = self.last.take() {
            self.pending.push_front(ch);
            self.column -= 1;
        }
    }

    ///
    /// Peeks at the next upcoming rune.
    ///
    pub fn peek(&mut self) -> Result<Option<char>, SourceError> {
        self.peek_nth(0)
    }

    ///
    /// Peeks `n` runes ahead (0 being the next rune) without consuming anything.
    ///
    /// Lookahead is bounded by [MAX_LOOKAHEAD]; anything further returns `Ok(None)`.
    ///
    pub fn peek_nth(&mut self, n: usize) -> Result<Option<char>, SourceError> {
        if n >= MAX_LOOKAHEAD {
            return Ok(None);
        }

        while self.pending.len() <= n {
            match self.decode()? {
                Some(ch) => self.pending.push_back(ch),
                None => return Ok(None),
            }
        }

        Ok(self.pending.get(n).copied())
    }

    ///
    /// Move the cursor to the start of the next line.
    ///
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 0;
        self.last = None;
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(byte));
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    fn invalid_utf8(&self) -> SourceError {
        SourceError::InvalidUtf8 {
            position: Position::single_char(self.line, self.column + self.pending.len() + 1),
        }
    }

    ///
    /// Decode one rune straight from the reader.
    ///
    fn decode(&mut self) -> Result<Option<char>, SourceError> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };

        let width = match first {
            0x00..=0x7F => return Ok(Some(char::from(first))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(self.invalid_utf8()),
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => *slot = byte,
                _ => return Err(self.invalid_utf8()),
            }
        }

        // Overlong forms and surrogates are caught here.
        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.invalid_utf8())
    }
}
