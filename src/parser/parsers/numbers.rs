//! Numeric literal parsers built from the character classes.

use crate::parser::core::Parser;
use crate::parser::parsers::chars::{digit, nonzero};
use crate::parser::parsers::literals::literal;
use crate::parser::prelude::{many, many1, map, optional, preceded, tuple2};

fn digit_value(token: char) -> u64 {
    token as u64 - '0' as u64
}

/// Unsigned base-10 integer with a non-zero leading digit.
///
/// Saturates at `u64::MAX` rather than wrapping for absurdly long digit runs.
pub fn natural_number() -> impl Parser<char, u64> {
    map(tuple2(nonzero(), many(digit())), |(first, rest)| {
        rest.iter().fold(digit_value(first), |acc, token| {
            acc.saturating_mul(10).saturating_add(digit_value(*token))
        })
    })
}

/// Signed base-10 integer: an optional leading `-` before a natural number.
pub fn integer() -> impl Parser<char, i64> {
    map(
        tuple2(optional(literal("-")), natural_number()),
        |(sign, magnitude)| {
            let value = magnitude as i64;
            if sign.is_some() { -value } else { value }
        },
    )
}

/// Decimal number: an integer with an optional fractional part.
///
/// The fractional part is a `.` followed by at least one digit; a dangling
/// `.` is left on the stream for whatever follows.
pub fn decimal() -> impl Parser<char, f64> {
    map(
        tuple2(integer(), optional(preceded(literal("."), many1(digit())))),
        |(whole, fraction)| {
            let Some(digits) = fraction else {
                return whole as f64;
            };
            let scale = 10f64.powi(digits.len() as i32);
            let fractional = digits
                .iter()
                .fold(0.0, |acc, token| acc * 10.0 + digit_value(*token) as f64)
                / scale;
            if whole < 0 {
                whole as f64 - fractional
            } else {
                whole as f64 + fractional
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Stream;

    #[test]
    fn test_natural_number_stops_at_nondigit() {
        let mut stream = Stream::from_source("123abc");
        assert_eq!(natural_number().parse(&mut stream), Ok(123));
        assert_eq!(stream.cursor(), 3);
    }

    #[test]
    fn test_natural_number_rejects_leading_zero() {
        let mut stream = Stream::from_source("0123");
        assert!(natural_number().parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_integer_negative() {
        let mut stream = Stream::from_source("-456");
        assert_eq!(integer().parse(&mut stream), Ok(-456));
        assert!(stream.at_end());
    }

    #[test]
    fn test_integer_positive_has_no_sign() {
        let mut stream = Stream::from_source("789");
        assert_eq!(integer().parse(&mut stream), Ok(789));

        // A bare sign without digits rolls the sign back too.
        let mut stream = Stream::from_source("-x");
        assert!(integer().parse(&mut stream).is_err());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_decimal_with_fraction() {
        let mut stream = Stream::from_source("12.25");
        assert_eq!(decimal().parse(&mut stream), Ok(12.25));
        assert!(stream.at_end());

        let mut stream = Stream::from_source("-3.5");
        assert_eq!(decimal().parse(&mut stream), Ok(-3.5));
    }

    #[test]
    fn test_decimal_without_fraction() {
        let mut stream = Stream::from_source("42");
        assert_eq!(decimal().parse(&mut stream), Ok(42.0));
    }

    #[test]
    fn test_decimal_leaves_dangling_dot() {
        let mut stream = Stream::from_source("7.x");
        assert_eq!(decimal().parse(&mut stream), Ok(7.0));
        // The dot was tried and rolled back.
        assert_eq!(stream.cursor(), 1);
    }
}
