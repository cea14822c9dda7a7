//! Tests for text and placeholder node construction

use duplex_syntax::ast::expr::ExpressionKind;
use duplex_syntax::ast::node::Node;
use duplex_syntax::builder::parse;

#[test]
fn test_parse_bind_placeholder_with_default() {
    let input = "SELECT * FROM users WHERE id = /*user_id*/42";
    let result = parse(input);
    assert!(result.is_ok(), "Failed to parse: {:?}", result.err());

    let ast = result.unwrap();
    assert_eq!(ast.nodes.len(), 2);

    match &ast.nodes[0] {
        Node::SqlText(text) => assert_eq!(text.text, "SELECT * FROM users WHERE id = "),
        other => panic!("expected sql text, got {:?}", other),
    }

    match &ast.nodes[1] {
        Node::Placeholder(p) => {
            assert!(p.is_bind());
            assert_eq!(p.expr.as_identifier(), Some("user_id"));
            assert_eq!(p.default.as_deref(), Some("42"));
            // The span covers the directive and its default literal.
            assert_eq!(&input[p.span.start..p.span.end], "/*user_id*/42");
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[test]
fn test_parse_expression_placeholder() {
    let input = "SELECT /*upper(name)*/'X' AS display";
    let ast = parse(input).unwrap();

    match &ast.nodes[1] {
        Node::Placeholder(p) => {
            assert!(!p.is_bind());
            assert!(matches!(
                p.expr.kind,
                ExpressionKind::FunctionCall { ref name, .. } if name == "upper"
            ));
            assert_eq!(p.default.as_deref(), Some("'X'"));
            assert_eq!(&input[p.span.start..p.span.end], "/*upper(name)*/'X'");
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[test]
fn test_path_placeholder_is_expression_slot() {
    let input = "WHERE city = /*user.address.city*/'nowhere'";
    let ast = parse(input).unwrap();

    match &ast.nodes[1] {
        Node::Placeholder(p) => {
            assert!(!p.is_bind());
            assert!(matches!(p.expr.kind, ExpressionKind::Path(_)));
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[test]
fn test_placeholder_without_default() {
    let input = "LIMIT /*max_rows*/";
    let ast = parse(input).unwrap();

    match &ast.nodes[1] {
        Node::Placeholder(p) => {
            assert_eq!(p.default, None);
            assert_eq!(&input[p.span.start..p.span.end], "/*max_rows*/");
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[test]
fn test_plain_comment_stays_in_text() {
    let input = "SELECT 1 /* keep me */ FROM dual";
    let ast = parse(input).unwrap();

    assert_eq!(ast.nodes.len(), 1);
    match &ast.nodes[0] {
        Node::SqlText(text) => assert_eq!(text.text, input),
        other => panic!("expected sql text, got {:?}", other),
    }
}

#[test]
fn test_spans_reconstruct_source() {
    let input = "a = /*a*/1 AND b = /*b*/'x' /* note */";
    let ast = parse(input).unwrap();

    let mut rebuilt = String::new();
    for node in &ast.nodes {
        let span = node.span();
        rebuilt.push_str(&input[span.start..span.end]);
    }
    assert_eq!(rebuilt, input);
}

#[test]
fn test_ast_serializes_to_json() {
    let ast = parse("x = /*v*/1").unwrap();
    let json = serde_json::to_value(&ast).unwrap();

    assert_eq!(json["nodes"][0]["SqlText"]["text"], "x = ");
    assert_eq!(json["nodes"][1]["Placeholder"]["default"], "1");
    assert!(json["nodes"][1]["Placeholder"]["span"]["start"].is_u64());
}

#[test]
fn test_line_and_column_positions() {
    let input = "SELECT *\nFROM t\nWHERE a = /*a*/0";
    let ast = parse(input).unwrap();

    match &ast.nodes[1] {
        Node::Placeholder(p) => {
            assert_eq!(p.span.line, 3);
            assert_eq!(p.span.column, 11);
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}
