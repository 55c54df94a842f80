//! Literal text matchers over codepoint streams.

use crate::error::DecodeError;
use crate::parser::combinators::Any;
use crate::parser::core::{ParseResult, Parser};
use crate::parser::prelude::any;
use crate::stream::Stream;

/// Literal: Matches an exact run of characters.
///
/// Takes as many tokens as the text has codepoints and compares element-wise;
/// succeeds with the owned text, undoes the take otherwise.
#[derive(Clone)]
pub struct Literal {
    text: String,
    tokens: Vec<char>,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = text.chars().collect();
        Self { text, tokens }
    }
}

impl Parser<char, String> for Literal {
    fn parse(&self, stream: &mut Stream<char>) -> ParseResult<String> {
        let slice = stream.take(self.tokens.len());
        if slice == self.tokens {
            Ok(self.text.clone())
        } else {
            stream.undo(1);
            let actual: String = slice.into_iter().collect();
            Err(DecodeError::leaf(
                actual,
                format!("expected literal {}", self.text),
            ))
        }
    }
}

/// Matches `text` exactly.
pub fn literal(text: impl Into<String>) -> Literal {
    Literal::new(text)
}

/// Matches the first of several literals, in order.
pub fn literals(texts: &[&str]) -> Any<char, String> {
    any(texts
        .iter()
        .map(|text| Box::new(literal(*text)) as Box<dyn Parser<char, String>>)
        .collect())
}
