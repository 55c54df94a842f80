//! # Parser Combinators
//!
//! This module implements the core parser combinators that form the building
//! blocks of the parsing system. These combinators allow for the composition
//! of simple parsers into more complex ones.
//!
//! ## Combinator Types
//!
//! * **Basic Combinators**: `Succeed`, `Fail`, `Take`, `FromPredicate`
//! * **Sequential Combinators**: `Sequence`, `Tuple2`, `Tuple3`, `Preceded`,
//!   `Delimited`, `Surround`
//! * **Alternative Combinators**: `Any`
//! * **Repetition Combinators**: `Many`, `Many1`, `SeparatedList`
//! * **Transformation Combinators**: `Map`, `FlatMap`, `Apply`
//! * **Error Handling Combinators**: `Recover`, `Optional`, `WithDefault`,
//!   `WithContext`
//!
//! ## Rollback Discipline
//!
//! Consuming primitives undo their own take when they fail. Sequential
//! composites capture a [`Checkpoint`](crate::stream::Checkpoint) on entry
//! and restore it on any failure, so a failing parser always hands the stream
//! back at the position it was applied at, however deeply its children
//! consumed before failing.

use super::core::ParseResult;
use super::core::Parser;
use crate::error::DecodeError;
use crate::stream::Stream;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Succeed: Always produces the held value without touching the stream.
#[derive(Clone)]
pub struct Succeed<A> {
    value: A,
}

impl<A> Succeed<A> {
    pub fn new(value: A) -> Self {
        Self { value }
    }
}

impl<S, A: Clone> Parser<S, A> for Succeed<A> {
    fn parse(&self, _stream: &mut Stream<S>) -> ParseResult<A> {
        Ok(self.value.clone())
    }
}

/// Fail: Always fails with a leaf error built from the held value and reason.
///
/// By the self-rollback convention a failing parser undoes one take step, so
/// `Fail` calls `undo(1)` before reporting. When nothing was taken the undo
/// is absorbed by the empty history.
#[derive(Clone)]
pub struct Fail<S, A> {
    value: Option<Value>,
    reason: String,
    _phantom: PhantomData<(S, A)>,
}

impl<S, A> Fail<S, A> {
    pub fn new(actual: impl Serialize, reason: &str) -> Self {
        Self {
            value: serde_json::to_value(actual).ok(),
            reason: reason.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl<S, A> Parser<S, A> for Fail<S, A> {
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        stream.undo(1);
        Err(DecodeError::Leaf {
            value: self.value.clone(),
            reason: self.reason.clone(),
        })
    }
}

/// Take: Consumes an exact number of tokens.
///
/// Succeeds only if the stream yields the full count; a short slice is
/// reported as a leaf error and the take is undone.
#[derive(Clone)]
pub struct Take<S> {
    count: usize,
    _phantom: PhantomData<S>,
}

impl<S> Take<S> {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            _phantom: PhantomData,
        }
    }
}

impl<S: Clone + Serialize> Parser<S, Vec<S>> for Take<S> {
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<S>> {
        let slice = stream.take(self.count);
        if slice.len() == self.count {
            Ok(slice)
        } else {
            stream.undo(1);
            Err(DecodeError::leaf(
                &slice,
                format!("expected slice with length of {}", self.count),
            ))
        }
    }
}

/// FromPredicate: Consumes a fixed-length slice and checks it as a whole.
#[derive(Clone)]
pub struct FromPredicate<S, F> {
    predicate: F,
    reason: String,
    count: usize,
    _phantom: PhantomData<S>,
}

impl<S, F> FromPredicate<S, F> {
    pub fn new(predicate: F, reason: &str, count: usize) -> Self {
        Self {
            predicate,
            reason: reason.to_string(),
            count,
            _phantom: PhantomData,
        }
    }
}

impl<S, F> Parser<S, Vec<S>> for FromPredicate<S, F>
where
    S: Clone + Serialize,
    F: Fn(&[S]) -> bool,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<S>> {
        let slice = stream.take(self.count);
        if slice.len() == self.count && (self.predicate)(&slice) {
            Ok(slice)
        } else {
            stream.undo(1);
            Err(DecodeError::leaf(&slice, self.reason.clone()))
        }
    }
}

/// Map: Transforms the output of a parser using a function.
///
/// This parser applies a transformation function to the result of another
/// parser. Failures pass through unchanged.
#[derive(Clone)]
pub struct Map<P, F, A, B> {
    /// The parser whose output will be transformed
    parser: P,
    /// The transformation function
    f: F,
    _phantom: PhantomData<(A, B)>,
}

impl<P, F, A, B> Map<P, F, A, B> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, B, P, F> Parser<S, B> for Map<P, F, A, B>
where
    P: Parser<S, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<B> {
        self.parser.parse(stream).map(|value| (self.f)(value))
    }
}

/// FlatMap: Monadic bind, where the second parser depends on the first's value.
///
/// On success of the inner parser, the continuation builds the next parser,
/// which runs against the stream as left by the first. A failure anywhere
/// restores the entry position.
#[derive(Clone)]
pub struct FlatMap<P, F, A> {
    parser: P,
    f: F,
    _phantom: PhantomData<A>,
}

impl<P, F, A> FlatMap<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, B, P, F, Q> Parser<S, B> for FlatMap<P, F, A>
where
    P: Parser<S, A>,
    F: Fn(A) -> Q,
    Q: Parser<S, B>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<B> {
        let checkpoint = stream.checkpoint();
        let value = match self.parser.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        match (self.f)(value).parse(stream) {
            Ok(next) => Ok(next),
            Err(error) => {
                stream.restore(checkpoint);
                Err(error)
            }
        }
    }
}

/// Apply: Combines a parser of a function with a parser of its argument.
///
/// The function parser runs first, the value parser against the stream it
/// leaves behind; both must succeed.
#[derive(Clone)]
pub struct Apply<PF, PA, F, A> {
    function: PF,
    value: PA,
    _phantom: PhantomData<(F, A)>,
}

impl<PF, PA, F, A> Apply<PF, PA, F, A> {
    pub fn new(function: PF, value: PA) -> Self {
        Self {
            function,
            value,
            _phantom: PhantomData,
        }
    }
}

impl<S, F, A, B, PF, PA> Parser<S, B> for Apply<PF, PA, F, A>
where
    PF: Parser<S, F>,
    PA: Parser<S, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<B> {
        let checkpoint = stream.checkpoint();
        let function = match self.function.parse(stream) {
            Ok(function) => function,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        match self.value.parse(stream) {
            Ok(value) => Ok(function(value)),
            Err(error) => {
                stream.restore(checkpoint);
                Err(error)
            }
        }
    }
}

/// Recover: Turns a failure into a second chance.
///
/// On failure the handler receives the error and builds a fallback parser,
/// which runs from the failed parser's already-restored position. Successes
/// pass through untouched.
#[derive(Clone)]
pub struct Recover<P, F> {
    parser: P,
    f: F,
}

impl<P, F> Recover<P, F> {
    pub fn new(parser: P, f: F) -> Self {
        Self { parser, f }
    }
}

impl<S, A, P, F, Q> Parser<S, A> for Recover<P, F>
where
    P: Parser<S, A>,
    F: Fn(DecodeError) -> Q,
    Q: Parser<S, A>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        match self.parser.parse(stream) {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!(
                    target: "parser::recover",
                    error = ?error,
                    position = stream.cursor(),
                    "recovering from parse failure"
                );
                (self.f)(error).parse(stream)
            }
        }
    }
}

/// Any: Tries multiple parsers and succeeds with the first successful one.
///
/// Every alternative starts from the same stream position. If all fail, the
/// collected sub-errors are merged into one flat bag, in order.
pub struct Any<S, A> {
    /// The list of parsers to try
    parsers: Vec<Box<dyn Parser<S, A>>>,
}

impl<S, A> Any<S, A> {
    pub fn new(parsers: Vec<Box<dyn Parser<S, A>>>) -> Self {
        Self { parsers }
    }
}

impl<S, A> Parser<S, A> for Any<S, A> {
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        let checkpoint = stream.checkpoint();
        let mut errors = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            stream.restore(checkpoint);
            match parser.parse(stream) {
                Ok(value) => return Ok(value),
                Err(error) => errors.push(error),
            }
        }
        stream.restore(checkpoint);
        Err(DecodeError::many(errors))
    }
}

/// Sequence: Applies multiple parsers in order, collecting their results.
///
/// Succeeds only if every parser succeeds; the first failure restores the
/// entry position and propagates.
pub struct Sequence<S, A> {
    /// The list of parsers to apply in sequence
    parsers: Vec<Box<dyn Parser<S, A>>>,
}

impl<S, A> Sequence<S, A> {
    pub fn new(parsers: Vec<Box<dyn Parser<S, A>>>) -> Self {
        Self { parsers }
    }
}

impl<S, A> Parser<S, Vec<A>> for Sequence<S, A> {
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<A>> {
        let checkpoint = stream.checkpoint();
        let mut results = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            match parser.parse(stream) {
                Ok(value) => results.push(value),
                Err(error) => {
                    stream.restore(checkpoint);
                    return Err(error);
                }
            }
        }
        Ok(results)
    }
}

/// Many: Applies a parser zero or more times.
///
/// This parser repeatedly applies the inner parser until it fails or the
/// stream runs out, collecting all successful results. It always succeeds,
/// even with zero matches; the failing attempt's own rollback leaves the
/// stream after the last success.
#[derive(Clone)]
pub struct Many<P, S, A> {
    parser: P,
    _phantom: PhantomData<(S, A)>,
}

impl<P, S, A> Many<P, S, A> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, P> Parser<S, Vec<A>> for Many<P, S, A>
where
    P: Parser<S, A>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<A>> {
        let mut results = Vec::new();
        while !stream.at_end() {
            match self.parser.parse(stream) {
                Ok(value) => results.push(value),
                Err(error) => {
                    tracing::warn!(
                        target: "parser::many",
                        error = ?error,
                        position = stream.cursor(),
                        items_collected = results.len(),
                        "Many parser stopped collection due to error"
                    );
                    break;
                }
            }
        }
        Ok(results)
    }
}

/// Many1: Applies a parser one or more times.
///
/// Similar to Many, but the first application must succeed.
#[derive(Clone)]
pub struct Many1<P, S, A> {
    parser: P,
    _phantom: PhantomData<(S, A)>,
}

impl<P, S, A> Many1<P, S, A> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, P> Parser<S, Vec<A>> for Many1<P, S, A>
where
    P: Parser<S, A>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<A>> {
        let first = self.parser.parse(stream)?;
        let mut results = vec![first];
        while !stream.at_end() {
            match self.parser.parse(stream) {
                Ok(value) => results.push(value),
                Err(error) => {
                    tracing::warn!(
                        target: "parser::many1",
                        error = ?error,
                        position = stream.cursor(),
                        items_collected = results.len(),
                        "Many1 parser stopped additional collection due to error"
                    );
                    break;
                }
            }
        }
        Ok(results)
    }
}

/// Optional: Makes a parser's success optional.
///
/// A failure is absorbed into `None` at the failed parser's already-restored
/// position; this parser never fails.
#[derive(Clone)]
pub struct Optional<P, S, A> {
    parser: P,
    _phantom: PhantomData<(S, A)>,
}

impl<P, S, A> Optional<P, S, A> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, P> Parser<S, Option<A>> for Optional<P, S, A>
where
    P: Parser<S, A>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Option<A>> {
        match self.parser.parse(stream) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(
                    target: "parser::optional",
                    error = ?error,
                    position = stream.cursor(),
                    "Optional parser suppressed an error"
                );
                Ok(None)
            }
        }
    }
}

/// WithDefault: Like Optional, but substitutes a caller-supplied default.
#[derive(Clone)]
pub struct WithDefault<P, S, A> {
    parser: P,
    default: A,
    _phantom: PhantomData<S>,
}

impl<P, S, A> WithDefault<P, S, A> {
    pub fn new(parser: P, default: A) -> Self {
        Self {
            parser,
            default,
            _phantom: PhantomData,
        }
    }
}

impl<S, A, P> Parser<S, A> for WithDefault<P, S, A>
where
    P: Parser<S, A>,
    A: Clone,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        match self.parser.parse(stream) {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::warn!(
                    target: "parser::with_default",
                    error = ?error,
                    position = stream.cursor(),
                    "substituting default after parse failure"
                );
                Ok(self.default.clone())
            }
        }
    }
}

/// Preceded: Runs two parsers in order and keeps the second's value.
#[derive(Clone)]
pub struct Preceded<P1, P2, S, O1> {
    first: P1,
    second: P2,
    _phantom: PhantomData<(S, O1)>,
}

impl<P1, P2, S, O1> Preceded<P1, P2, S, O1> {
    pub fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _phantom: PhantomData,
        }
    }
}

impl<S, O1, O2, P1, P2> Parser<S, O2> for Preceded<P1, P2, S, O1>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<O2> {
        let checkpoint = stream.checkpoint();
        if let Err(error) = self.first.parse(stream) {
            stream.restore(checkpoint);
            return Err(error);
        }
        match self.second.parse(stream) {
            Ok(value) => Ok(value),
            Err(error) => {
                stream.restore(checkpoint);
                Err(error)
            }
        }
    }
}

/// Tuple2: Heterogeneous two-parser sequence.
#[derive(Clone)]
pub struct Tuple2<P1, P2, S, O1, O2> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<(S, O1, O2)>,
}

impl<P1, P2, S, O1, O2> Tuple2<P1, P2, S, O1, O2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<S, O1, O2, P1, P2> Parser<S, (O1, O2)> for Tuple2<P1, P2, S, O1, O2>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<(O1, O2)> {
        let checkpoint = stream.checkpoint();
        let result1 = match self.parser1.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        let result2 = match self.parser2.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        Ok((result1, result2))
    }
}

/// Tuple3: Heterogeneous three-parser sequence.
#[derive(Clone)]
pub struct Tuple3<P1, P2, P3, S, O1, O2, O3> {
    parser1: P1,
    parser2: P2,
    parser3: P3,
    _phantom: PhantomData<(S, O1, O2, O3)>,
}

impl<P1, P2, P3, S, O1, O2, O3> Tuple3<P1, P2, P3, S, O1, O2, O3> {
    pub fn new(parser1: P1, parser2: P2, parser3: P3) -> Self {
        Self {
            parser1,
            parser2,
            parser3,
            _phantom: PhantomData,
        }
    }
}

impl<S, O1, O2, O3, P1, P2, P3> Parser<S, (O1, O2, O3)> for Tuple3<P1, P2, P3, S, O1, O2, O3>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
    P3: Parser<S, O3>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<(O1, O2, O3)> {
        let checkpoint = stream.checkpoint();
        let result1 = match self.parser1.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        let result2 = match self.parser2.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        let result3 = match self.parser3.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        Ok((result1, result2, result3))
    }
}

/// Delimited: Parses content between left and right delimiters.
///
/// This parser handles bracketed patterns like parenthesized expressions,
/// returning only the content parser's result. A failure of any of the three
/// restores the entry position.
#[derive(Clone)]
pub struct Delimited<L, P, R, S, LO, RO> {
    /// Parser for the left delimiter
    left: L,
    /// Parser for the content between delimiters
    parser: P,
    /// Parser for the right delimiter
    right: R,
    _phantom: PhantomData<(S, LO, RO)>,
}

impl<L, P, R, S, LO, RO> Delimited<L, P, R, S, LO, RO> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<S, O, LO, RO, L, P, R> Parser<S, O> for Delimited<L, P, R, S, LO, RO>
where
    L: Parser<S, LO>,
    P: Parser<S, O>,
    R: Parser<S, RO>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<O> {
        let checkpoint = stream.checkpoint();
        if let Err(error) = self.left.parse(stream) {
            stream.restore(checkpoint);
            return Err(error);
        }
        let value = match self.parser.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        if let Err(error) = self.right.parse(stream) {
            stream.restore(checkpoint);
            return Err(error);
        }
        Ok(value)
    }
}

/// Surround: Delimited with the same delimiter on both sides.
#[derive(Clone)]
pub struct Surround<D, P, S, DO> {
    delimiter: D,
    parser: P,
    _phantom: PhantomData<(S, DO)>,
}

impl<D, P, S, DO> Surround<D, P, S, DO> {
    pub fn new(delimiter: D, parser: P) -> Self {
        Self {
            delimiter,
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<S, O, DO, D, P> Parser<S, O> for Surround<D, P, S, DO>
where
    D: Parser<S, DO>,
    P: Parser<S, O>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<O> {
        let checkpoint = stream.checkpoint();
        if let Err(error) = self.delimiter.parse(stream) {
            stream.restore(checkpoint);
            return Err(error);
        }
        let value = match self.parser.parse(stream) {
            Ok(value) => value,
            Err(error) => {
                stream.restore(checkpoint);
                return Err(error);
            }
        };
        if let Err(error) = self.delimiter.parse(stream) {
            stream.restore(checkpoint);
            return Err(error);
        }
        Ok(value)
    }
}

/// SeparatedList: Parses a list of items separated by a delimiter.
///
/// Handles empty lists, single items, trailing separators, and a lone
/// separator; it never fails.
pub struct SeparatedList<P, Sep, S, SO> {
    /// Parser for list items
    item: P,
    /// Parser for the separator between items
    separator: Sep,
    _phantom: PhantomData<(S, SO)>,
}

impl<P, Sep, S, SO> SeparatedList<P, Sep, S, SO> {
    pub fn new(item: P, separator: Sep) -> Self {
        Self {
            item,
            separator,
            _phantom: PhantomData,
        }
    }
}

impl<S, O, SO, P, Sep> Parser<S, Vec<O>> for SeparatedList<P, Sep, S, SO>
where
    P: Parser<S, O>,
    Sep: Parser<S, SO>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        if let Ok(first) = self.item.parse(stream) {
            results.push(first);
            while self.separator.parse(stream).is_ok() {
                match self.item.parse(stream) {
                    Ok(value) => results.push(value),
                    Err(_) => break,
                }
            }
        } else {
            // A lone separator counts as an empty list and is consumed.
            let _ = self.separator.parse(stream);
        }
        Ok(results)
    }
}

/// WithContext: Annotates any failure with a context label.
#[derive(Clone)]
pub struct WithContext<P, C> {
    parser: P,
    context: C,
}

impl<P, C> WithContext<P, C> {
    pub fn new(parser: P, context: C) -> Self {
        Self { parser, context }
    }
}

impl<S, A, P, C> Parser<S, A> for WithContext<P, C>
where
    P: Parser<S, A>,
    C: ToString,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        self.parser
            .parse(stream)
            .map_err(|error| DecodeError::wrap(self.context.to_string(), error))
    }
}

/// Lazy: Defers parser construction until parse time.
///
/// The building block for recursive grammars.
#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

impl<F> Lazy<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S, A, F, P> Parser<S, A> for Lazy<F>
where
    F: Fn() -> P,
    P: Parser<S, A>,
{
    fn parse(&self, stream: &mut Stream<S>) -> ParseResult<A> {
        (self.f)().parse(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::prelude::*;

    fn chars(source: &str) -> Stream<char> {
        Stream::from_source(source)
    }

    fn item() -> Take<char> {
        Take::new(1)
    }

    #[test]
    fn test_succeed() {
        let mut stream = chars("abc");
        let parser = Succeed::new(42);
        assert_eq!(parser.parse(&mut stream), Ok(42));
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_fail_reports_and_rolls_back() {
        let mut stream = chars("abc");
        let parser = Fail::<char, char>::new("a", "something else");
        let error = parser.parse(&mut stream).unwrap_err();
        assert_eq!(
            error.draw(),
            "cannot decode \"a\", should be something else"
        );
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_take_exact_and_short() {
        let mut stream = chars("abc");
        let parser = Take::<char>::new(2);
        assert_eq!(parser.parse(&mut stream), Ok(vec!['a', 'b']));
        assert_eq!(stream.cursor(), 2);

        // Only one token left: failure, cursor unchanged.
        let parser = Take::<char>::new(2);
        let error = parser.parse(&mut stream).unwrap_err();
        assert_eq!(
            error.draw(),
            "cannot decode [\"c\"], should be expected slice with length of 2"
        );
        assert_eq!(stream.cursor(), 2);
    }

    #[test]
    fn test_from_predicate() {
        let mut stream = chars("ab");
        let parser = FromPredicate::new(|s: &[char]| s[0].is_ascii_lowercase(), "lowercase", 1);
        assert_eq!(parser.parse(&mut stream), Ok(vec!['a']));

        let mut stream = chars("AB");
        let parser = FromPredicate::new(|s: &[char]| s[0].is_ascii_lowercase(), "lowercase", 1);
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_map() {
        let mut stream = chars("abc");
        let parser = Map::new(item(), |s: Vec<char>| s[0].to_ascii_uppercase());
        assert_eq!(parser.parse(&mut stream), Ok('A'));

        // Failures pass through unchanged.
        let mut stream = chars("");
        let parser = Map::new(item(), |s: Vec<char>| s[0]);
        assert!(parser.parse(&mut stream).is_err());
    }

    #[test]
    fn test_flat_map_threads_the_stream() {
        // Take one char, then require the next char to equal it.
        let doubled = flat_map(item(), |first: Vec<char>| {
            from_predicate(
                move |s: &[char]| s[0] == first[0],
                "repeat of the previous char",
                1,
            )
        });

        let mut stream = chars("aab");
        assert_eq!(doubled.parse(&mut stream), Ok(vec!['a']));
        assert_eq!(stream.cursor(), 2);

        // Second half fails: the whole bind rolls back.
        let mut stream = chars("ab");
        assert!(doubled.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_apply() {
        let parser = apply(
            succeed(|value: Vec<char>| value.len()),
            Take::<char>::new(3),
        );
        let mut stream = chars("abcd");
        assert_eq!(parser.parse(&mut stream), Ok(3));
        assert_eq!(stream.cursor(), 3);

        let mut stream = chars("ab");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_recover_runs_fallback_from_failure_point() {
        let parser = recover(literal("abc"), |_| literal("xyz"));

        let mut stream = chars("xyz");
        assert_eq!(parser.parse(&mut stream), Ok("xyz".to_string()));
        assert_eq!(stream.cursor(), 3);

        let mut stream = chars("abc");
        assert_eq!(parser.parse(&mut stream), Ok("abc".to_string()));
    }

    #[test]
    fn test_any_returns_first_success() {
        let parser = any(vec![
            Box::new(literal("ab")) as Box<dyn Parser<char, String>>,
            Box::new(literal("a")),
        ]);
        let mut stream = chars("abc");
        assert_eq!(parser.parse(&mut stream), Ok("ab".to_string()));
        assert_eq!(stream.cursor(), 2);
    }

    #[test]
    fn test_any_merges_failures_in_order() {
        let parser = any(vec![
            Box::new(Fail::<char, char>::new((), "first")) as Box<dyn Parser<char, char>>,
            Box::new(Fail::<char, char>::new((), "second")),
        ]);
        let mut stream = chars("abc");
        let error = parser.parse(&mut stream).unwrap_err();
        assert_eq!(
            error,
            DecodeError::many(vec![
                DecodeError::leaf((), "first"),
                DecodeError::leaf((), "second"),
            ])
        );
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_sequence_collects_or_rolls_back() {
        let parser = sequence(vec![
            Box::new(literal("a")) as Box<dyn Parser<char, String>>,
            Box::new(literal("b")),
            Box::new(literal("c")),
        ]);
        let mut stream = chars("abc");
        assert_eq!(
            parser.parse(&mut stream),
            Ok(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );

        // Failure after two successes: full rollback to the entry position.
        let mut stream = chars("abX");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_nested_sequence_rolls_back_fully() {
        let inner = || {
            sequence(vec![
                Box::new(literal("a")) as Box<dyn Parser<char, String>>,
                Box::new(literal("b")),
            ])
        };
        let parser = tuple2(inner(), literal("z"));

        let mut stream = chars("abq");
        assert!(parser.parse(&mut stream).is_err());
        // The inner sequence consumed two tokens before the outer failure.
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_many_collects_until_failure() {
        let parser = many(literal("a"));
        let mut stream = chars("aaab");
        assert_eq!(
            parser.parse(&mut stream),
            Ok(vec!["a".to_string(), "a".to_string(), "a".to_string()])
        );
        assert_eq!(stream.cursor(), 3);
    }

    #[test]
    fn test_many_never_fails() {
        let parser = many(literal("a"));
        let mut stream = chars("bbb");
        assert_eq!(parser.parse(&mut stream), Ok(vec![]));
        assert_eq!(stream.cursor(), 0);

        let mut stream = chars("");
        assert_eq!(parser.parse(&mut stream), Ok(vec![]));
    }

    #[test]
    fn test_many1_requires_one() {
        let parser = many1(literal("a"));
        let mut stream = chars("aab");
        assert_eq!(
            parser.parse(&mut stream),
            Ok(vec!["a".to_string(), "a".to_string()])
        );

        let mut stream = chars("b");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_optional() {
        let parser = optional(literal("a"));
        let mut stream = chars("ab");
        assert_eq!(parser.parse(&mut stream), Ok(Some("a".to_string())));

        let mut stream = chars("ba");
        assert_eq!(parser.parse(&mut stream), Ok(None));
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_with_default() {
        let parser = with_default(literal("a"), "fallback".to_string());
        let mut stream = chars("b");
        assert_eq!(parser.parse(&mut stream), Ok("fallback".to_string()));
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_preceded_keeps_second() {
        let parser = preceded(literal("-"), literal("a"));
        let mut stream = chars("-a");
        assert_eq!(parser.parse(&mut stream), Ok("a".to_string()));

        let mut stream = chars("-b");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_tuple3() {
        let parser = tuple3(literal("a"), literal("b"), literal("c"));
        let mut stream = chars("abc");
        assert_eq!(
            parser.parse(&mut stream),
            Ok(("a".to_string(), "b".to_string(), "c".to_string()))
        );

        let mut stream = chars("abX");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_delimited_projects_middle() {
        let parser = delimited(literal("("), literal("x"), literal(")"));
        let mut stream = chars("(x)");
        assert_eq!(parser.parse(&mut stream), Ok("x".to_string()));
        assert_eq!(stream.cursor(), 3);

        // Missing right delimiter: everything is rolled back.
        let mut stream = chars("(x]");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_surround() {
        let parser = surround(literal("\""), many(alpha()));
        let mut stream = chars("\"hi\"");
        assert_eq!(parser.parse(&mut stream), Ok(vec!['h', 'i']));
        assert_eq!(stream.cursor(), 4);

        let mut stream = chars("\"hi");
        assert!(parser.parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_separated_list() {
        let parser = separated_list(alpha(), literal(","));

        let mut stream = chars("");
        assert_eq!(parser.parse(&mut stream), Ok(vec![]));

        let mut stream = chars("a");
        assert_eq!(parser.parse(&mut stream), Ok(vec!['a']));

        let mut stream = chars("a,b,c");
        assert_eq!(parser.parse(&mut stream), Ok(vec!['a', 'b', 'c']));
        assert_eq!(stream.cursor(), 5);

        // Trailing separator is consumed.
        let mut stream = chars("a,b,");
        assert_eq!(parser.parse(&mut stream), Ok(vec!['a', 'b']));
        assert_eq!(stream.cursor(), 4);

        // A lone separator reads as an empty list.
        let mut stream = chars(",");
        assert_eq!(parser.parse(&mut stream), Ok(vec![]));
        assert_eq!(stream.cursor(), 1);
    }

    #[test]
    fn test_with_context_wraps_failures() {
        let parser = with_context(literal("abc"), "matching the abc keyword");
        let mut stream = chars("abX");
        let error = parser.parse(&mut stream).unwrap_err();
        assert_eq!(
            error.draw(),
            "matching the abc keyword\n└─ cannot decode \"abX\", should be expected literal abc"
        );
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_lazy_defers_construction() {
        let parser = lazy(|| literal("a"));
        let mut stream = chars("a");
        assert_eq!(parser.parse(&mut stream), Ok("a".to_string()));
    }
}
