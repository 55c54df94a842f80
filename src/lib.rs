//! # Kumu: Backtracking Parser Combinators
//!
//! Kumu provides a small parser combinator system with exact failure
//! provenance. Parsers are composed as plain values, applied to a
//! position-tracked input stream, and report failures as a structured error
//! tree with a deterministic rendering.
//!
//! ## Core Components
//!
//! * **Stream** ([`stream`]): an addressable, position-tracked view over a
//!   token buffer supporting bounded consumption, stepwise undo, and
//!   checkpoint-based rewind.
//! * **Error Algebra** ([`error`]): a closed set of error variants with
//!   flattening constructors, a monoidal `concat`, and a box-drawing tree
//!   renderer whose exact output is part of the contract.
//! * **Parser System** ([`parser`]): the combinator core (success/failure
//!   primitives, map/bind/apply, alternation with error aggregation,
//!   sequencing with full rollback, repetition, optionality, bracketing)
//!   plus concrete character, literal, and numeric parsers.
//!
//! ## Processing Model
//!
//! ```text
//! Source Text → Stream → composed Parser → ParseResult<A> (+ drawn errors)
//! ```
//!
//! Parsing is synchronous and single-threaded. The stream is the only
//! mutable state in a parse run and is threaded by `&mut`, so sharing one
//! stream across concurrent parses is impossible by construction.
//!
//! ## Usage Example
//!
//! ```
//! use kumu::parser::prelude::*;
//! use kumu::parser::{extract, Parser};
//! use kumu::stream::Stream;
//!
//! let mut stream = Stream::from_source("-27.5 and change");
//! assert_eq!(decimal().parse(&mut stream), Ok(-27.5));
//!
//! let mut stream = Stream::from_source("xyz");
//! let message = extract(natural_number().parse(&mut stream)).unwrap_err();
//! assert_eq!(
//!     message,
//!     "cannot decode [\"x\"], should be expected char in range [1, 9]"
//! );
//! ```

pub mod error;
pub mod parser;
pub mod stream;

pub use error::DecodeError;
pub use error::Property;
pub use parser::extract;
pub use parser::ParseResult;
pub use parser::Parser;
pub use stream::Checkpoint;
pub use stream::Stream;
