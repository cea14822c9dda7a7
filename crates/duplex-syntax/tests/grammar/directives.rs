//! Tests for directive recognition at the template level

use duplex_syntax::parser::{DuplexParser, Rule};
use pest::Parser;

fn parses(input: &str) -> bool {
    DuplexParser::parse(Rule::template, input).is_ok()
}

#[test]
fn test_plain_sql_is_one_text_node() {
    let input = "SELECT id, name FROM users WHERE active = 1";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());

    let template = result.unwrap().next().unwrap();
    let inner: Vec<_> = template
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .collect();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].as_rule(), Rule::sql_text);
    assert_eq!(inner[0].as_str(), input);
}

#[test]
fn test_comment_with_leading_space_stays_text() {
    let input = "SELECT 1 /* not a directive */ FROM dual";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok());

    let template = result.unwrap().next().unwrap();
    let rules: Vec<_> = template
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| p.as_rule())
        .collect();
    assert_eq!(rules, vec![Rule::sql_text]);
}

#[test]
fn test_identifier_after_comment_open_is_directive() {
    let input = "WHERE id = /*user_id*/42";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());

    let template = result.unwrap().next().unwrap();
    let rules: Vec<_> = template
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| p.as_rule())
        .collect();
    assert_eq!(rules, vec![Rule::sql_text, Rule::placeholder]);
}

#[test]
fn test_quoted_strings_are_opaque() {
    // A /* inside quotes must not open a directive.
    let inputs = vec![
        "SELECT '/*IF x*/' FROM t",
        "SELECT \"/*weird column*/\" FROM t",
        "SELECT `/*col*/` FROM t",
        "WHERE note = 'it''s /*fine*/'",
    ];
    for input in inputs {
        let result = DuplexParser::parse(Rule::template, input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
        let template = result.unwrap().next().unwrap();
        let rules: Vec<_> = template
            .into_inner()
            .filter(|p| p.as_rule() != Rule::EOI)
            .map(|p| p.as_rule())
            .collect();
        assert_eq!(rules, vec![Rule::sql_text], "directive leaked in: {}", input);
    }
}

#[test]
fn test_line_comment_is_opaque() {
    let input = "SELECT 1 -- /*user_id*/\nFROM dual";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok());

    let template = result.unwrap().next().unwrap();
    let rules: Vec<_> = template
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| p.as_rule())
        .collect();
    assert_eq!(rules, vec![Rule::sql_text]);
}

#[test]
fn test_if_block_with_all_clauses() {
    let input = "/*IF a*/x/*ELSEIF b*/y/*ELSE*/z/*END*/";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());

    let template = result.unwrap().next().unwrap();
    let block = template.into_inner().next().unwrap();
    assert_eq!(block.as_rule(), Rule::if_block);
    assert_eq!(block.as_str(), input);

    let rules: Vec<_> = block.into_inner().map(|p| p.as_rule()).collect();
    assert_eq!(
        rules,
        vec![
            Rule::if_marker,
            Rule::branch_body,
            Rule::elseif_clause,
            Rule::else_clause,
            Rule::end_marker,
        ]
    );
}

#[test]
fn test_nested_if_blocks() {
    let input = "/*IF a*/x/*IF b*/y/*END*/z/*END*/";
    assert!(parses(input));
}

#[test]
fn test_empty_branch_body_produces_pair() {
    let input = "/*IF a*//*END*/";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok());

    let template = result.unwrap().next().unwrap();
    let block = template.into_inner().next().unwrap();
    let body = block
        .into_inner()
        .find(|p| p.as_rule() == Rule::branch_body)
        .unwrap();
    assert_eq!(body.as_str(), "");
}

#[test]
fn test_unclosed_if_is_rejected() {
    assert!(!parses("SELECT 1 /*IF flag*/ AND x = 1"));
}

#[test]
fn test_stray_markers_are_rejected() {
    assert!(!parses("a /*ELSE*/ b"));
    assert!(!parses("a /*END*/ b"));
    assert!(!parses("a /*ELSEIF x*/ b"));
}

#[test]
fn test_marker_keywords_are_case_sensitive() {
    // Lowercase "end" is an ordinary bind placeholder name, so an
    // unmatched uppercase END must still be rejected.
    assert!(parses("/*end_date*/'2024-01-01'"));
    assert!(!parses("/*IF a*/x/*end*/"));
}

#[test]
fn test_default_literal_forms() {
    let inputs = vec![
        "x = /*v*/10",
        "x = /*v*/10.5",
        "x = /*v*/'text'",
        "x = /*v*/(1, 2, 3)",
        "x = /*v*/CURRENT_DATE",
        "x = /*v*/",
    ];
    for input in inputs {
        assert!(parses(input), "Failed to parse: {}", input);
    }
}

#[test]
fn test_default_literal_must_be_adjacent() {
    let input = "x = /*v*/ 10";
    let result = DuplexParser::parse(Rule::template, input);
    assert!(result.is_ok());

    let template = result.unwrap().next().unwrap();
    let placeholder = template
        .into_inner()
        .find(|p| p.as_rule() == Rule::placeholder)
        .unwrap();
    // The space keeps "10" out of the placeholder.
    assert_eq!(placeholder.as_str(), "/*v*/");
}
