//! # Parser System
//!
//! The parser module implements a backtracking parser combinator system.
//! Small parsers match one token, a range, or a literal; combinators compose
//! them into parsers for whole grammars while preserving exact failure
//! provenance and rolling the stream back when a composed attempt fails
//! partway through consuming input.
//!
//! ## Core Components
//!
//! * **Parser Trait**: Defines the core parsing interface ([`core`])
//! * **Combinators**: Building blocks for creating complex parsers
//!   ([`combinators`])
//! * **Concrete Parsers**: Character classes, literals, and numbers
//!   ([`parsers`])
//! * **Prelude**: Constructor functions for grammar code ([`prelude`])
//!
//! ## Architecture Design
//!
//! Building a parser is pure value composition; no stream is involved until
//! the finished parser is applied. Application threads a single mutable
//! [`Stream`](crate::stream::Stream) through the combinator tree, and every
//! failure hands the stream back at the position the failing parser started
//! from.
//!
//! ## Usage Example
//!
//! ```
//! use kumu::parser::prelude::*;
//! use kumu::parser::Parser;
//! use kumu::stream::Stream;
//!
//! let parser = delimited(literal("("), many(alpha()), literal(")"));
//!
//! let mut stream = Stream::from_source("(hello)");
//! let result = parser.parse(&mut stream);
//! assert_eq!(result, Ok(vec!['h', 'e', 'l', 'l', 'o']));
//! ```

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use self::core::extract;
pub use self::core::ParseResult;
pub use self::core::Parser;
