//! Lowercase constructor functions for every combinator, plus re-exports of
//! the concrete character, literal, and numeric parsers. Grammar code is
//! expected to `use kumu::parser::prelude::*` and compose from there.

use super::combinators::*;
use super::core::Parser;
use crate::error::DecodeError;
use serde::Serialize;

pub fn succeed<A: Clone>(value: A) -> Succeed<A> {
    Succeed::new(value)
}

pub fn fail<S, A>(actual: impl Serialize, reason: &str) -> Fail<S, A> {
    Fail::new(actual, reason)
}

pub fn take<S: Clone + Serialize>(count: usize) -> Take<S> {
    Take::new(count)
}

pub fn from_predicate<S, F>(predicate: F, reason: &str, count: usize) -> FromPredicate<S, F>
where
    S: Clone + Serialize,
    F: Fn(&[S]) -> bool,
{
    FromPredicate::new(predicate, reason, count)
}

pub fn map<P, F, S, A, B>(parser: P, f: F) -> Map<P, F, A, B>
where
    P: Parser<S, A>,
    F: Fn(A) -> B,
{
    Map::new(parser, f)
}

pub fn flat_map<P, F, S, A, B, Q>(parser: P, f: F) -> FlatMap<P, F, A>
where
    P: Parser<S, A>,
    F: Fn(A) -> Q,
    Q: Parser<S, B>,
{
    FlatMap::new(parser, f)
}

pub fn apply<PF, PA, S, F, A, B>(function: PF, value: PA) -> Apply<PF, PA, F, A>
where
    PF: Parser<S, F>,
    PA: Parser<S, A>,
    F: Fn(A) -> B,
{
    Apply::new(function, value)
}

pub fn recover<P, F, S, A, Q>(parser: P, f: F) -> Recover<P, F>
where
    P: Parser<S, A>,
    F: Fn(DecodeError) -> Q,
    Q: Parser<S, A>,
{
    Recover::new(parser, f)
}

pub fn any<S, A>(parsers: Vec<Box<dyn Parser<S, A>>>) -> Any<S, A> {
    Any::new(parsers)
}

pub fn sequence<S, A>(parsers: Vec<Box<dyn Parser<S, A>>>) -> Sequence<S, A> {
    Sequence::new(parsers)
}

pub fn many<P, S, A>(parser: P) -> Many<P, S, A>
where
    P: Parser<S, A>,
{
    Many::new(parser)
}

pub fn many1<P, S, A>(parser: P) -> Many1<P, S, A>
where
    P: Parser<S, A>,
{
    Many1::new(parser)
}

pub fn optional<P, S, A>(parser: P) -> Optional<P, S, A>
where
    P: Parser<S, A>,
{
    Optional::new(parser)
}

pub fn with_default<P, S, A>(parser: P, default: A) -> WithDefault<P, S, A>
where
    P: Parser<S, A>,
    A: Clone,
{
    WithDefault::new(parser, default)
}

pub fn preceded<P1, P2, S, O1, O2>(first: P1, second: P2) -> Preceded<P1, P2, S, O1>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
{
    Preceded::new(first, second)
}

pub fn tuple2<P1, P2, S, O1, O2>(parser1: P1, parser2: P2) -> Tuple2<P1, P2, S, O1, O2>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
{
    Tuple2::new(parser1, parser2)
}

pub fn tuple3<P1, P2, P3, S, O1, O2, O3>(
    parser1: P1,
    parser2: P2,
    parser3: P3,
) -> Tuple3<P1, P2, P3, S, O1, O2, O3>
where
    P1: Parser<S, O1>,
    P2: Parser<S, O2>,
    P3: Parser<S, O3>,
{
    Tuple3::new(parser1, parser2, parser3)
}

pub fn delimited<L, P, R, S, LO, O, RO>(left: L, parser: P, right: R) -> Delimited<L, P, R, S, LO, RO>
where
    L: Parser<S, LO>,
    P: Parser<S, O>,
    R: Parser<S, RO>,
{
    Delimited::new(left, parser, right)
}

pub fn surround<D, P, S, DO, O>(delimiter: D, parser: P) -> Surround<D, P, S, DO>
where
    D: Parser<S, DO>,
    P: Parser<S, O>,
{
    Surround::new(delimiter, parser)
}

pub fn separated_list<P, Sep, S, O, SO>(item: P, separator: Sep) -> SeparatedList<P, Sep, S, SO>
where
    P: Parser<S, O>,
    Sep: Parser<S, SO>,
{
    SeparatedList::new(item, separator)
}

pub fn with_context<P, C, S, A>(parser: P, context: C) -> WithContext<P, C>
where
    P: Parser<S, A>,
    C: ToString,
{
    WithContext::new(parser, context)
}

pub fn lazy<F, P, S, A>(f: F) -> Lazy<F>
where
    F: Fn() -> P,
    P: Parser<S, A>,
{
    Lazy::new(f)
}

pub use super::parsers::chars::{
    alpha, alphanumeric, digit, lower, nonzero, range, upper, zero, Range,
};
pub use super::parsers::literals::{literal, literals, Literal};
pub use super::parsers::numbers::{decimal, integer, natural_number};
