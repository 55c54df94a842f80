use kumu::parser::combinators::Any;
use kumu::parser::prelude::*;
use kumu::parser::{extract, Parser};
use kumu::stream::Stream;
use kumu::DecodeError;
use pretty_assertions::assert_eq;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[test]
fn it_parses_digits_and_stops() {
    let mut stream = Stream::from_source("123abc");
    assert_eq!(natural_number().parse(&mut stream), Ok(123));
    assert_eq!(stream.cursor(), 3);
    assert_eq!(stream.take(3), vec!['a', 'b', 'c']);
}

#[test]
fn it_parses_negative_integers() {
    let mut stream = Stream::from_source("-456");
    assert_eq!(integer().parse(&mut stream), Ok(-456));
}

#[test]
fn it_repeats_literals() {
    let mut stream = Stream::from_source("aaab");
    let result = many(literal("a")).parse(&mut stream);
    assert_eq!(
        result,
        Ok(vec!["a".to_string(), "a".to_string(), "a".to_string()])
    );
    assert_eq!(stream.cursor(), 3);
}

#[test]
fn it_projects_bracketed_content() {
    let mut stream = Stream::from_source("(hello)");
    let parser = delimited(literal("("), many(alpha()), literal(")"));
    assert_eq!(parser.parse(&mut stream), Ok(vec!['h', 'e', 'l', 'l', 'o']));
    assert!(stream.at_end());
}

#[test]
fn it_aggregates_alternation_failures_in_order() {
    let parser = any(vec![
        Box::new(fail("?", "first")) as Box<dyn Parser<char, char>>,
        Box::new(fail("?", "second")),
    ]);
    let mut stream = Stream::from_source("anything");
    let error = parser.parse(&mut stream).unwrap_err();
    assert_eq!(
        error,
        DecodeError::many(vec![
            DecodeError::leaf("?", "first"),
            DecodeError::leaf("?", "second"),
        ])
    );
}

#[test]
fn it_extracts_values_and_drawn_errors() {
    let mut stream = Stream::from_source("42");
    assert_eq!(extract(natural_number().parse(&mut stream)), Ok(42));

    let mut stream = Stream::from_source("x");
    let parser = with_context(natural_number(), "reading a count");
    assert_eq!(
        extract(parser.parse(&mut stream)),
        Err(
            "reading a count\n└─ cannot decode [\"x\"], should be expected char in range [1, 9]"
                .to_string()
        )
    );
}

// A small recursive grammar: nested, comma-separated lists of decimals.

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Number(f64),
    List(Vec<Value>),
}

fn parse_value() -> Any<char, Value> {
    any(vec![
        Box::new(map(decimal(), Value::Number)) as Box<dyn Parser<char, Value>>,
        Box::new(parse_list()),
    ])
}

fn parse_list() -> impl Parser<char, Value> {
    map(
        delimited(
            literal("("),
            separated_list(lazy(parse_value), literal(",")),
            literal(")"),
        ),
        Value::List,
    )
}

#[test]
fn it_parses_a_recursive_grammar() {
    let mut stream = Stream::from_source("(1,2.5,(3,-4.75),())");
    let result = parse_value().parse(&mut stream);
    assert_eq!(
        result,
        Ok(Value::List(vec![
            Value::Number(1.0),
            Value::Number(2.5),
            Value::List(vec![Value::Number(3.0), Value::Number(-4.75)]),
            Value::List(vec![]),
        ]))
    );
    assert!(stream.at_end());
}

#[test]
fn it_reports_both_branches_of_a_failed_alternation() {
    let mut stream = Stream::from_source("x");
    let error = parse_value().parse(&mut stream).unwrap_err();
    assert_eq!(
        error.draw(),
        "cannot decode [\"x\"], should be expected char in range [1, 9]\n\
         cannot decode \"x\", should be expected literal ("
    );
    assert_eq!(stream.cursor(), 0);
}

#[test]
fn it_backtracks_across_alternatives() {
    // "literal then tail" alternatives sharing a long common prefix force
    // full rollback between attempts.
    let parser = any(vec![
        Box::new(tuple2(literal("parse"), literal("rs"))) as Box<dyn Parser<char, (String, String)>>,
        Box::new(tuple2(literal("parse"), literal("r!"))),
    ]);
    let mut stream = Stream::from_source("parser!");
    assert_eq!(
        parser.parse(&mut stream),
        Ok(("parse".to_string(), "r!".to_string()))
    );
    assert!(stream.at_end());
}

#[test]
fn it_recovers_with_a_fallback_parser() {
    let parser = recover(map(natural_number(), |n| n as i64), |_| integer());
    let mut stream = Stream::from_source("-12");
    assert_eq!(parser.parse(&mut stream), Ok(-12));
}

#[test]
fn it_substitutes_defaults() {
    let parser = with_default(natural_number(), 1);
    let mut stream = Stream::from_source("x10");
    assert_eq!(parser.parse(&mut stream), Ok(1));
    assert_eq!(stream.cursor(), 0);
}
