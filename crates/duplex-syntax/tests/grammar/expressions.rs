//! Grammar tests for directive expressions (literals, operators, functions)

use duplex_syntax::parser::{DuplexParser, Rule};
use pest::Parser;

fn parses_fully(input: &str) -> bool {
    match DuplexParser::parse(Rule::expression, input) {
        Ok(mut pairs) => pairs.next().map(|p| p.as_str()) == Some(input),
        Err(_) => false,
    }
}

#[test]
fn test_parse_literals() {
    let inputs = vec!["'hello'", "''", "'it''s'", "42", "3.14", "true", "FALSE", "null"];
    for input in inputs {
        assert!(parses_fully(input), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_identifiers_and_paths() {
    assert!(parses_fully("user_id"));
    assert!(parses_fully("_hidden"));
    assert!(parses_fully("user.address.city"));
}

#[test]
fn test_parse_comparisons() {
    let inputs = vec![
        "age >= 18",
        "count<10",
        "name = 'bob'",
        "name == 'bob'",
        "state != 'done'",
        "state <> 'done'",
    ];
    for input in inputs {
        assert!(parses_fully(input), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_logical_operators_both_spellings() {
    let inputs = vec![
        "a and b",
        "a AND b or c",
        "a && b || c",
        "not done",
        "!done",
        "a and not b",
    ];
    for input in inputs {
        assert!(parses_fully(input), "Failed to parse: {}", input);
    }
}

#[test]
fn test_parse_null_checks() {
    assert!(parses_fully("name is null"));
    assert!(parses_fully("name IS NOT NULL"));
    assert!(parses_fully("user.city is not null"));
}

#[test]
fn test_parse_function_calls() {
    assert!(parses_fully("upper(name)"));
    assert!(parses_fully("concat(first, ' ', last)"));
    assert!(parses_fully("coalesce(nick, name, 'anon')"));
    assert!(parses_fully("length(name) > 3"));
}

#[test]
fn test_parse_arithmetic_and_grouping() {
    assert!(parses_fully("limit_rows + 1"));
    assert!(parses_fully("(a + b) * 2"));
    assert!(parses_fully("total % 10"));
    assert!(parses_fully("-offset_rows"));
}

#[test]
fn test_keywords_do_not_eat_identifiers() {
    // "android" starts with "and" but is a plain identifier.
    assert!(parses_fully("android"));
    assert!(parses_fully("nothing"));
    assert!(parses_fully("nullable"));
    assert!(parses_fully("trueish"));
}

#[test]
fn test_rejects_malformed() {
    assert!(!parses_fully("1 +"));
    assert!(!parses_fully("and a"));
    assert!(!parses_fully("a ="));
}
