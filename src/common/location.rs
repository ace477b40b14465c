//!
//! Things that help trace errors and tokens: [Position] and [Spanned].
//!

use std::fmt::{Display, Formatter};

///
/// Represents the location of a token in source code.
///
/// Lines and columns are 1-based; `column_end` is inclusive.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub(crate) line: usize,
    pub(crate) column_start: usize,
    pub(crate) column_end: usize,
}

impl Position {
    pub fn new(line: usize, column_start: usize, column_end: usize) -> Self {
        Self {
            line,
            column_start,
            column_end: column_end.max(column_start),
        }
    }

    ///
    /// A [Position] covering `width` characters from `column_start`.
    ///
    /// Zero-width items still cover one column.
    ///
    pub fn spanning(line: usize, column_start: usize, width: usize) -> Self {
        Self::new(line, column_start, column_start + width.saturating_sub(1))
    }

    ///
    /// A [Position] covering the single column at `column`.
    ///
    pub fn single_char(line: usize, column: usize) -> Self {
        Self::new(line, column, column)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column_start(&self) -> usize {
        self.column_start
    }

    pub fn column_end(&self) -> usize {
        self.column_end
    }

    ///
    /// Returns the number of columns covered.
    ///
    pub fn width(&self) -> usize {
        self.column_end - self.column_start + 1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column_start)
    }
}

///
/// Returns the position attached to this
/// object.
///
pub trait Spanned {
    fn position(&self) -> Position;
}

impl Spanned for Position {
    fn position(&self) -> Position {
        *self
    }
}
