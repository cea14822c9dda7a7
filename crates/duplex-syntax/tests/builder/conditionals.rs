//! Tests for conditional block construction

use duplex_syntax::ast::node::Node;
use duplex_syntax::builder::parse;

fn conditional(input: &str, index: usize) -> duplex_syntax::ast::node::Conditional {
    let ast = parse(input).unwrap();
    match &ast.nodes[index] {
        Node::Conditional(c) => c.clone(),
        other => panic!("expected conditional, got {:?}", other),
    }
}

#[test]
fn test_if_else_chain() {
    let input = "A/*IF x > 1*/B/*ELSEIF y*/C/*ELSE*/D/*END*/E";
    let ast = parse(input).unwrap();
    assert_eq!(ast.nodes.len(), 3);

    let cond = conditional(input, 1);
    assert_eq!(cond.branches.len(), 2);
    assert_eq!(cond.branches[0].condition_text, "x > 1");
    assert_eq!(cond.branches[1].condition_text, "y");
    assert!(cond.else_branch.is_some());

    // The block span covers marker to marker.
    assert_eq!(
        &input[cond.span.start..cond.span.end],
        "/*IF x > 1*/B/*ELSEIF y*/C/*ELSE*/D/*END*/"
    );

    // Body spans exclude the markers.
    let first = &cond.branches[0];
    assert_eq!(&input[first.body_span.start..first.body_span.end], "B");
    let second = &cond.branches[1];
    assert_eq!(&input[second.body_span.start..second.body_span.end], "C");
    let else_branch = cond.else_branch.unwrap();
    assert_eq!(
        &input[else_branch.body_span.start..else_branch.body_span.end],
        "D"
    );
}

#[test]
fn test_nested_conditionals() {
    let input = "/*IF a*/X/*IF b*/Y/*END*/Z/*END*/";
    let cond = conditional(input, 0);

    assert_eq!(cond.branches.len(), 1);
    let body = &cond.branches[0].nodes;
    assert_eq!(body.len(), 3);
    assert!(matches!(body[0], Node::SqlText(_)));
    assert!(matches!(body[1], Node::Conditional(_)));
    assert!(matches!(body[2], Node::SqlText(_)));
}

#[test]
fn test_empty_branch() {
    let input = "W/*IF a*//*END*/Z";
    let cond = conditional(input, 1);

    assert_eq!(cond.branches.len(), 1);
    assert!(cond.branches[0].nodes.is_empty());
    assert!(cond.branches[0].body_span.is_empty());
    assert!(cond.else_branch.is_none());
}

#[test]
fn test_placeholder_inside_branch() {
    let input = "SELECT * FROM t/*IF id is not null*/ WHERE id = /*id*/7/*END*/";
    let cond = conditional(input, 1);

    assert_eq!(cond.branches[0].condition_text, "id is not null");
    let body = &cond.branches[0].nodes;
    assert_eq!(body.len(), 2);
    match &body[1] {
        Node::Placeholder(p) => {
            assert_eq!(p.expr.as_identifier(), Some("id"));
            assert_eq!(p.default.as_deref(), Some("7"));
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[test]
fn test_multiline_condition() {
    let input = "/*IF state = 'active'\n   and age >= 21*/x/*END*/";
    let cond = conditional(input, 0);

    assert_eq!(cond.branches.len(), 1);
    assert!(cond.branches[0].condition_text.contains("state = 'active'"));
}

#[test]
fn test_three_level_nesting() {
    let input = "/*IF a*/1/*IF b*/2/*IF c*/3/*END*/4/*END*/5/*END*/";
    let outer = conditional(input, 0);

    let mid = match &outer.branches[0].nodes[1] {
        Node::Conditional(c) => c.clone(),
        other => panic!("expected conditional, got {:?}", other),
    };
    let inner = match &mid.branches[0].nodes[1] {
        Node::Conditional(c) => c.clone(),
        other => panic!("expected conditional, got {:?}", other),
    };
    assert_eq!(inner.branches[0].condition_text, "c");
    assert_eq!(
        &input[inner.branches[0].body_span.start..inner.branches[0].body_span.end],
        "3"
    );
}
