//!
//! The outcome of validating one document.
//!

use std::{
    fmt::{Display, Formatter},
    io::Read,
    path::{Path, PathBuf},
};

use log::debug;

use crate::syntax::{ParseError, Parser, ParserOptions, Value};

///
/// The witness on acceptance, or the first error found.
///
pub type Verdict = Result<Value, ParseError>;

///
/// Validates the whole of `reader` as one JSON document.
///
pub fn validate<R: Read>(reader: R, options: ParserOptions) -> Verdict {
    let verdict = Parser::from_reader(reader, options).and_then(Parser::parse);
    if let Err(err) = &verdict {
        debug!("document rejected ({:?}): {err}", err.class());
    }

    verdict
}

pub fn validate_str(text: &str, options: ParserOptions) -> Verdict {
    validate(text.as_bytes(), options)
}

///
/// A [ParseError] located in a named file,
/// rendered as `path:line:column: message`.
///
#[derive(Debug)]
pub struct Report {
    path: PathBuf,
    error: ParseError,
}

impl Report {
    pub fn new(path: impl AsRef<Path>, error: ParseError) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.error.position() {
            Some(position) => write!(
                f,
                "{}:{}:{}: {}",
                self.path.display(),
                position.line(),
                position.column_start(),
                self.error
            ),
            None => write!(f, "{}: {}", self.path.display(), self.error),
        }
    }
}

impl std::error::Error for Report {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
