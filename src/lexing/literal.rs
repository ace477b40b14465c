//!
//! ## Literal names
//!
//! `true`, `false` and `null`, and any other run of letters.
//!

use std::io::BufRead;

use finl_unicode::categories::{CharacterCategories, MinorCategory};
use jsonlint_macros::RfcRef;

use crate::common::{Position, SourceError};

use super::{
    tokens::{IllegalReason, LiteralKind, Token},
    Lexer,
};

pub fn is_letter(ch: char) -> bool {
    use MinorCategory::*;
    matches!(ch.get_minor_category(), Lu | Ll | Lt | Lm | Lo)
}

///
/// Case-sensitive match against the three literal names.
///
#[RfcRef("Values", "3")]
pub fn literal_kind(word: &str) -> Option<LiteralKind> {
    match word {
        "true" => Some(LiteralKind::True),
        "false" => Some(LiteralKind::False),
        "null" => Some(LiteralKind::Null),
        _ => None,
    }
}

impl<R: BufRead> Lexer<R> {
    ///
    /// Scans a maximal letter run, starting with `first`
    /// (already consumed at the current column).
    ///
    pub(super) fn lex_word(&mut self, first: char) -> Result<Token, SourceError> {
        let line = self.source.line();
        let start = self.source.column();

        let mut word = String::from(first);
        while let Some(ch) = self.source.advance()? {
            if !is_letter(ch) {
                self.source.back();
                break;
            }

            word.push(ch);
        }

        let position = Position::spanning(line, start, word.chars().count());
        Ok(match literal_kind(&word) {
            Some(kind) => Token::literal(kind, word, position),
            None => Token::illegal(word, IllegalReason::UnknownLiteral, position),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{is_letter, literal_kind};
    use crate::lexing::tokens::LiteralKind;

    #[test]
    fn letters() {
        assert!(is_letter('a'));
        assert!(is_letter('Z'));
        assert!(is_letter('ñ'));
        assert!(is_letter('日'));
        assert!(!is_letter('1'));
        assert!(!is_letter('_'));
        assert!(!is_letter(' '));
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(literal_kind("true"), Some(LiteralKind::True));
        assert_eq!(literal_kind("false"), Some(LiteralKind::False));
        assert_eq!(literal_kind("null"), Some(LiteralKind::Null));
        assert_eq!(literal_kind("True"), None);
        assert_eq!(literal_kind("NULL"), None);
        assert_eq!(literal_kind("nul"), None);
    }
}
