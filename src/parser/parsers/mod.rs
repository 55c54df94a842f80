//! Concrete parsers for character streams: character classes, literal text,
//! and numeric literals. Everything here is composed from the generic
//! combinators; nothing touches the stream beyond what the combinators and
//! the [`Range`](chars::Range), [`Literal`](literals::Literal) primitives do.

pub mod chars;
pub mod literals;
pub mod numbers;
