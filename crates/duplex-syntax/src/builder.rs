use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        literal::Literal,
        node::{Branch, Conditional, ElseBranch, Node, Placeholder, SqlText, TemplateAst},
        operator::{BinaryOperator, UnaryOperator},
        path::ArgPath,
        span::Span,
    },
    error::TemplateParseError,
    parser::{DuplexParser, Rule},
};
use pest::{
    Parser,
    iterators::Pair,
};
use tracing::debug;

pub type BuildResult<T> = Result<T, TemplateParseError>;

/// Parse two-way SQL text into a typed template AST
pub fn parse(input: &str) -> BuildResult<TemplateAst> {
    if input.trim().is_empty() {
        return Err(TemplateParseError::EmptyTemplate);
    }

    let mut pairs = DuplexParser::parse(Rule::template, input)
        .map_err(TemplateParseError::from_pest_error)?;

    let template = pairs.next().ok_or(TemplateParseError::EmptyTemplate)?;
    let ast = build_template(template)?;
    debug!(nodes = ast.nodes.len(), "parsed template");
    Ok(ast)
}

fn build_template(pair: Pair<Rule>) -> BuildResult<TemplateAst> {
    let span = pair_to_span(&pair);
    let mut nodes = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::EOI => {}
            _ => nodes.push(build_node(inner)?),
        }
    }

    Ok(TemplateAst { nodes, span })
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, col) = pair.line_col();
    let span_pest = pair.as_span();
    Span::new(span_pest.start(), span_pest.end(), line, col)
}

fn build_node(pair: Pair<Rule>) -> BuildResult<Node> {
    match pair.as_rule() {
        Rule::sql_text => Ok(Node::SqlText(SqlText {
            text: pair.as_str().to_string(),
            span: pair_to_span(&pair),
        })),
        Rule::placeholder => Ok(Node::Placeholder(build_placeholder(pair)?)),
        Rule::if_block => Ok(Node::Conditional(build_conditional(pair)?)),
        _ => Err(unexpected_rule(&pair, "template node")),
    }
}

fn build_placeholder(pair: Pair<Rule>) -> BuildResult<Placeholder> {
    let span = pair_to_span(&pair);
    let mut expr = None;
    let mut default = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::expression => expr = Some(build_expression(inner)?),
            Rule::default_literal => default = Some(inner.as_str().to_string()),
            _ => {}
        }
    }

    let expr = expr.ok_or_else(|| TemplateParseError::Syntax {
        message: "placeholder directive has no expression".to_string(),
        line: span.line,
        column: span.column,
        source_snippet: String::new(),
    })?;

    Ok(Placeholder {
        expr,
        default,
        span,
    })
}

fn build_conditional(pair: Pair<Rule>) -> BuildResult<Conditional> {
    let span = pair_to_span(&pair);
    let mut branches = Vec::new();
    let mut else_branch = None;
    let mut pending: Option<(Expression, String)> = None;

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::if_marker => {
                pending = Some(build_marker_condition(item)?);
            }
            Rule::branch_body => {
                // Body directly under the block belongs to the IF arm.
                let (condition, condition_text) =
                    pending.take().ok_or_else(|| TemplateParseError::Syntax {
                        message: "branch body without a condition".to_string(),
                        line: span.line,
                        column: span.column,
                        source_snippet: String::new(),
                    })?;
                let (nodes, body_span) = build_branch_body(item)?;
                branches.push(Branch {
                    condition,
                    condition_text,
                    nodes,
                    body_span,
                });
            }
            Rule::elseif_clause => branches.push(build_elseif_clause(item)?),
            Rule::else_clause => else_branch = Some(build_else_clause(item)?),
            Rule::end_marker => {}
            _ => {}
        }
    }

    Ok(Conditional {
        branches,
        else_branch,
        span,
    })
}

fn build_marker_condition(pair: Pair<Rule>) -> BuildResult<(Expression, String)> {
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::expression {
            let text = inner.as_str().trim().to_string();
            return Ok((build_expression(inner)?, text));
        }
    }
    Err(TemplateParseError::Syntax {
        message: "conditional marker has no condition".to_string(),
        line: 1,
        column: 1,
        source_snippet: String::new(),
    })
}

fn build_elseif_clause(pair: Pair<Rule>) -> BuildResult<Branch> {
    let mut condition = None;
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::elseif_marker => condition = Some(build_marker_condition(inner)?),
            Rule::branch_body => body = Some(build_branch_body(inner)?),
            _ => {}
        }
    }

    let (condition, condition_text) = condition.unwrap();
    let (nodes, body_span) = body.unwrap();
    Ok(Branch {
        condition,
        condition_text,
        nodes,
        body_span,
    })
}

fn build_else_clause(pair: Pair<Rule>) -> BuildResult<ElseBranch> {
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::branch_body {
            let (nodes, body_span) = build_branch_body(inner)?;
            return Ok(ElseBranch { nodes, body_span });
        }
    }
    Ok(ElseBranch {
        nodes: Vec::new(),
        body_span: Span::new(0, 0, 1, 1),
    })
}

fn build_branch_body(pair: Pair<Rule>) -> BuildResult<(Vec<Node>, Span)> {
    let span = pair_to_span(&pair);
    let mut nodes = Vec::new();
    for inner in pair.into_inner() {
        nodes.push(build_node(inner)?);
    }
    Ok((nodes, span))
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    build_expression_inner(pair, span)
}

fn build_expression_inner(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    match pair.as_rule() {
        Rule::expression => {
            // Unwrap the top-level expression rule
            let inner = pair.into_inner().next().unwrap();
            build_expression_inner(inner, span)
        }
        Rule::logical_or
        | Rule::logical_and
        | Rule::equality
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative => build_binary_chain(pair, span),
        Rule::unary_expr => build_unary_expression(pair, span),
        Rule::is_null_check => build_is_null_check(pair, span),
        _ => Err(unexpected_rule(&pair, "expression")),
    }
}

/// Folds `a op b op c` left-associatively. Levels without an operator
/// collapse into their single operand.
fn build_binary_chain(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap();
    let mut expr = build_expression_inner(first, span)?;

    while let Some(op_pair) = inner.next() {
        let operator = build_operator(&op_pair, span)?;
        let right = inner.next().unwrap();
        expr = Expression::new(
            ExpressionKind::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(build_expression_inner(right, span)?),
            },
            span,
        );
    }

    Ok(expr)
}

fn build_operator(pair: &Pair<Rule>, span: Span) -> BuildResult<BinaryOperator> {
    let op = match pair.as_rule() {
        Rule::op_or => BinaryOperator::Or,
        Rule::op_and => BinaryOperator::And,
        Rule::op_eq => match pair.as_str() {
            "!=" | "<>" => BinaryOperator::NotEqual,
            _ => BinaryOperator::Equal,
        },
        Rule::op_cmp => match pair.as_str() {
            "<=" => BinaryOperator::LessOrEqual,
            ">=" => BinaryOperator::GreaterOrEqual,
            "<" => BinaryOperator::LessThan,
            _ => BinaryOperator::GreaterThan,
        },
        Rule::op_add => match pair.as_str() {
            "+" => BinaryOperator::Add,
            _ => BinaryOperator::Subtract,
        },
        Rule::op_mul => match pair.as_str() {
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            _ => BinaryOperator::Modulo,
        },
        _ => {
            return Err(TemplateParseError::Syntax {
                message: format!("Unknown operator: {}", pair.as_str()),
                line: span.line,
                column: span.column,
                source_snippet: pair.as_str().to_string(),
            });
        }
    };
    Ok(op)
}

fn build_unary_expression(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    let mut inner = pair.into_inner();
    let first = inner.next().unwrap();

    match first.as_rule() {
        Rule::op_not => {
            let operand = inner.next().unwrap();
            Ok(Expression::new(
                ExpressionKind::Unary {
                    operator: UnaryOperator::Not,
                    operand: Box::new(build_expression_inner(operand, span)?),
                },
                span,
            ))
        }
        Rule::op_neg => {
            let operand = inner.next().unwrap();
            Ok(Expression::new(
                ExpressionKind::Unary {
                    operator: UnaryOperator::Negate,
                    operand: Box::new(build_expression_inner(operand, span)?),
                },
                span,
            ))
        }
        _ => build_expression_inner(first, span),
    }
}

fn build_is_null_check(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    let mut inner = pair.into_inner();
    let primary = inner.next().unwrap();
    let expr = build_primary(primary, span)?;

    if let Some(suffix) = inner.next() {
        let negated = suffix.into_inner().any(|p| p.as_rule() == Rule::kw_not);
        if negated {
            Ok(Expression::new(
                ExpressionKind::IsNotNull(Box::new(expr)),
                span,
            ))
        } else {
            Ok(Expression::new(ExpressionKind::IsNull(Box::new(expr)), span))
        }
    } else {
        Ok(expr)
    }
}

fn build_primary(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    match pair.as_rule() {
        Rule::grouped => {
            let inner = pair.into_inner().next().unwrap();
            Ok(Expression::new(
                ExpressionKind::Grouped(Box::new(build_expression_inner(inner, span)?)),
                span,
            ))
        }
        Rule::lit_string => Ok(Expression::new(
            ExpressionKind::Literal(Literal::String(parse_string_literal(pair.as_str()))),
            span,
        )),
        Rule::lit_number => build_number_literal(&pair, span),
        Rule::lit_boolean => Ok(Expression::new(
            ExpressionKind::Literal(Literal::Boolean(
                pair.as_str().eq_ignore_ascii_case("true"),
            )),
            span,
        )),
        Rule::lit_null => Ok(Expression::new(ExpressionKind::Literal(Literal::Null), span)),
        Rule::function_call => build_function_call(pair, span),
        Rule::dotted_path => Ok(Expression::new(
            ExpressionKind::Path(ArgPath::from_string(pair.as_str(), span)),
            span,
        )),
        Rule::ident => Ok(Expression::new(
            ExpressionKind::Identifier(pair.as_str().to_string()),
            span,
        )),
        _ => Err(unexpected_rule(&pair, "primary expression")),
    }
}

fn build_number_literal(pair: &Pair<Rule>, span: Span) -> BuildResult<Expression> {
    let text = pair.as_str();
    let literal = if text.contains('.') {
        let num = text.parse::<f64>().map_err(|_| invalid_number(text, span))?;
        Literal::Float(num)
    } else {
        let num = text.parse::<i64>().map_err(|_| invalid_number(text, span))?;
        Literal::Integer(num)
    };
    Ok(Expression::new(ExpressionKind::Literal(literal), span))
}

fn build_function_call(pair: Pair<Rule>, span: Span) -> BuildResult<Expression> {
    let mut name = String::new();
    let mut arguments = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::expression => arguments.push(build_expression(inner)?),
            _ => {}
        }
    }

    Ok(Expression::new(
        ExpressionKind::FunctionCall { name, arguments },
        span,
    ))
}

/// Strips the outer quotes and collapses doubled quotes.
fn parse_string_literal(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    inner.replace("''", "'")
}

fn invalid_number(text: &str, span: Span) -> TemplateParseError {
    TemplateParseError::Syntax {
        message: format!("Invalid number: {}", text),
        line: span.line,
        column: span.column,
        source_snippet: text.to_string(),
    }
}

fn unexpected_rule(pair: &Pair<Rule>, context: &str) -> TemplateParseError {
    let span = pair_to_span(pair);
    TemplateParseError::Syntax {
        message: format!("Unexpected rule in {}: {:?}", context, pair.as_rule()),
        line: span.line,
        column: span.column,
        source_snippet: pair.as_str().to_string(),
    }
}
