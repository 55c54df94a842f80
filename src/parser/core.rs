//! # Core Parser Definitions
//!
//! This module defines the fundamental parser interface that the rest of the
//! combinator system builds on.

use crate::error::DecodeError;
use crate::stream::Stream;

/// Parser trait defines the core parsing interface.
///
/// All parsers in the system implement this trait, which takes the mutable
/// input stream and returns either the parsed value or a [`DecodeError`].
/// Parsers are total: every failure path is encoded in the result, never as a
/// panic.
///
/// A failing parser leaves the stream where it found it. Primitives do so by
/// undoing their own take; composites restore a checkpoint captured on entry.
///
/// # Type Parameters
///
/// * `S` - The input token type
/// * `A` - The output value type
pub trait Parser<S, A> {
    /// Attempts to parse from the stream's current position.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - parsing succeeded; the stream has advanced past the
    ///   consumed tokens
    /// * `Err(error)` - parsing failed; the stream is back at the position it
    ///   held when this parser was applied
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A>;
}

/// Result type for parsing operations.
pub type ParseResult<A> = Result<A, DecodeError>;

/// Maps a successful result through unchanged and a failure through
/// [`DecodeError::draw`], for callers that only want text out of a failure.
pub fn extract<A>(result: ParseResult<A>) -> Result<A, String> {
    result.map_err(|error| error.draw())
}
