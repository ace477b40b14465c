//!
//! ## Number
//!
//! Number runs, validated against the strict JSON number grammar.
//!

use std::io::BufRead;

use jsonlint_macros::RfcRef;

use crate::common::{Position, SourceError};

use super::{
    tokens::{IllegalReason, LiteralKind, Token},
    Lexer,
};

///
/// States of the number grammar.
///
/// ```text
/// number = [ minus ] int [ frac ] [ exp ]
/// int    = zero / ( digit1-9 *DIGIT )
/// frac   = decimal-point 1*DIGIT
/// exp    = e [ minus / plus ] 1*DIGIT
/// ```
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Minus,
    Zero,
    Integer,
    Point,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl State {
    fn step(self, ch: char) -> Option<Self> {
        use State::*;

        Some(match (self, ch) {
            (Start, '-') => Minus,
            (Start | Minus, '0') => Zero,
            (Start | Minus, '1'..='9') => Integer,
            (Integer, '0'..='9') => Integer,
            (Zero | Integer, '.') => Point,
            (Point | Fraction, '0'..='9') => Fraction,
            (Zero | Integer | Fraction, 'e' | 'E') => Exponent,
            (Exponent, '+' | '-') => ExponentSign,
            (Exponent | ExponentSign | ExponentDigits, '0'..='9') => ExponentDigits,
            _ => return None,
        })
    }

    fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Zero | State::Integer | State::Fraction | State::ExponentDigits
        )
    }
}

///
/// Character-class state machine for JSON numbers.
///
#[RfcRef("Numbers", "6")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberGrammar;

impl NumberGrammar {
    ///
    /// Does the whole of `run` form a JSON number?
    ///
    pub fn accepts(&self, run: &str) -> bool {
        run.chars()
            .try_fold(State::Start, State::step)
            .is_some_and(State::is_accepting)
    }
}

///
/// Characters which may appear in a number run.
///
pub fn is_number_char(ch: char) -> bool {
    matches!(ch, '0'..='9' | '-' | '+' | '.' | 'e' | 'E')
}

///
/// Does `ch` (followed by `next`) start a number run?
///
/// A bare `e`/`E` only does when a digit or sign follows,
/// otherwise it starts a letter run.
///
pub fn starts_number(ch: char, next: Option<char>) -> bool {
    match ch {
        '0'..='9' | '-' | '+' | '.' => true,
        'e' | 'E' => matches!(next, Some('0'..='9' | '+' | '-')),
        _ => false,
    }
}

impl<R: BufRead> Lexer<R> {
    ///
    /// Scans a maximal number run, starting with `first`
    /// (already consumed at the current column).
    ///
    pub(super) fn lex_number(&mut self, first: char) -> Result<Token, SourceError> {
        let line = self.source.line();
        let start = self.source.column();

        let mut run = String::from(first);
        while let Some(ch) = self.source.advance()? {
            if !is_number_char(ch) {
                self.source.back();
                break;
            }

            run.push(ch);
        }

        let position = Position::spanning(line, start, run.chars().count());
        if self.numbers.accepts(&run) {
            Ok(Token::literal(LiteralKind::Num, run, position))
        } else {
            Ok(Token::illegal(run, IllegalReason::InvalidNumber, position))
        }
    }
}

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;
    use regex::Regex;
    use rstest::rstest;

    use super::{starts_number, NumberGrammar};

    lazy_static! {
        static ref JSON_NUMBER: Regex =
            Regex::new(r"^-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?$").unwrap();
    }

    #[rstest]
    #[case("0")]
    #[case("-0")]
    #[case("123")]
    #[case("1.23")]
    #[case("-1.23")]
    #[case("1.23e10")]
    #[case("1.23e-10")]
    #[case("-1.23E+10")]
    #[case("0.5")]
    #[case("0e0")]
    #[case("10E2")]
    fn accepts(#[case] run: &str) {
        assert!(NumberGrammar.accepts(run), "{run} should be a number");
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("01")]
    #[case("-01")]
    #[case("1.")]
    #[case(".5")]
    #[case("-1.2.3")]
    #[case("--1.2.3")]
    #[case("e10")]
    #[case("E-10")]
    #[case("1e")]
    #[case("1e+")]
    #[case("+1")]
    #[case("1-2")]
    #[case("1.e5")]
    fn rejects(#[case] run: &str) {
        assert!(!NumberGrammar.accepts(run), "{run} should not be a number");
    }

    #[test]
    fn agrees_with_regex() {
        // Every run over the number alphabet up to length 4.
        let alphabet = ['0', '1', '9', '-', '+', '.', 'e', 'E'];
        let mut frontier = vec![String::new()];
        let mut runs = vec![];
        for _ in 0..4 {
            frontier = frontier
                .iter()
                .flat_map(|run| alphabet.iter().map(move |ch| format!("{run}{ch}")))
                .collect();
            runs.extend(frontier.iter().cloned());
        }

        for run in runs {
            assert_eq!(
                NumberGrammar.accepts(&run),
                JSON_NUMBER.is_match(&run),
                "disagreement on {run:?}"
            );
        }
    }

    #[test]
    fn number_starts() {
        assert!(starts_number('7', None));
        assert!(starts_number('-', Some('x')));
        assert!(starts_number('e', Some('1')));
        assert!(starts_number('E', Some('-')));
        assert!(!starts_number('e', Some('l')));
        assert!(!starts_number('e', None));
        assert!(!starts_number('x', Some('1')));
    }
}
