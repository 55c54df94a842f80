//! Character-class parsers over codepoint streams.

use crate::error::DecodeError;
use crate::parser::combinators::Any;
use crate::parser::core::{ParseResult, Parser};
use crate::parser::prelude::any;
use crate::stream::Stream;

/// Range: Matches one character within an inclusive codepoint range.
#[derive(Clone)]
pub struct Range {
    lo: char,
    hi: char,
}

impl Range {
    pub fn new(lo: char, hi: char) -> Self {
        Self { lo, hi }
    }
}

impl Parser<char, char> for Range {
    fn parse(&self, stream: &mut Stream<char>) -> ParseResult<char> {
        let slice = stream.take(1);
        match slice.first().copied() {
            Some(token) if self.lo <= token && token <= self.hi => Ok(token),
            _ => {
                stream.undo(1);
                Err(DecodeError::leaf(
                    &slice,
                    format!("expected char in range [{}, {}]", self.lo, self.hi),
                ))
            }
        }
    }
}

/// One character in `[lo, hi]`, compared by codepoint.
pub fn range(lo: char, hi: char) -> Range {
    Range::new(lo, hi)
}

pub fn lower() -> Range {
    range('a', 'z')
}

pub fn upper() -> Range {
    range('A', 'Z')
}

pub fn zero() -> Range {
    range('0', '0')
}

pub fn nonzero() -> Range {
    range('1', '9')
}

pub fn digit() -> Any<char, char> {
    any(vec![Box::new(zero()), Box::new(nonzero())])
}

pub fn alpha() -> Any<char, char> {
    any(vec![Box::new(lower()), Box::new(upper())])
}

pub fn alphanumeric() -> Any<char, char> {
    any(vec![Box::new(alpha()), Box::new(digit())])
}
