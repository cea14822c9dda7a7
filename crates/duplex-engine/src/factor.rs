use duplex_syntax::ast::{
    expr::Expression,
    node::{Conditional, Node, Placeholder, TemplateAst},
    span::Span,
};
use duplex_syntax::error::TemplateParseError;
use std::sync::Arc;

/// One dynamic range of the template: a placeholder or a whole conditional
/// block, identified by its byte range in the source.
///
/// Factors form a forest: any two ranges are either disjoint or one
/// contains the other. The flat list is sorted by start ascending and, for
/// equal starts, end descending, so an enclosing factor always precedes
/// the factors inside it.
#[derive(Debug, Clone)]
pub(crate) enum Factor {
    /// Bind placeholder: the comment body is a bare argument name.
    Bind { name: String, span: Span },
    /// Expression placeholder: the comment body is evaluated per render.
    Expr {
        expr: Arc<Expression>,
        text: String,
        span: Span,
    },
    /// An IF/ELSEIF/ELSE/END block. The span covers marker to marker; the
    /// branch body spans exclude the markers themselves.
    Conditional(ConditionalFactor),
}

#[derive(Debug, Clone)]
pub(crate) struct ConditionalFactor {
    pub branches: Vec<BranchFactor>,
    pub else_body: Option<Span>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub(crate) struct BranchFactor {
    pub condition: Arc<Expression>,
    pub condition_text: String,
    pub body: Span,
}

impl Factor {
    pub fn span(&self) -> Span {
        match self {
            Factor::Bind { span, .. } => *span,
            Factor::Expr { span, .. } => *span,
            Factor::Conditional(block) => block.span,
        }
    }
}

/// Flattens the AST into the sorted factor list the segment builder
/// consumes. The forest property is checked even though the parser cannot
/// currently produce a violation.
pub(crate) fn collect_factors(
    ast: &TemplateAst,
    source: &str,
) -> Result<Vec<Factor>, TemplateParseError> {
    let mut factors = Vec::new();
    collect_nodes(&ast.nodes, source, &mut factors);
    factors.sort_by(|a, b| {
        let (a, b) = (a.span(), b.span());
        a.start.cmp(&b.start).then(b.end.cmp(&a.end))
    });
    verify_forest(&factors)?;
    Ok(factors)
}

fn collect_nodes(nodes: &[Node], source: &str, out: &mut Vec<Factor>) {
    for node in nodes {
        match node {
            Node::SqlText(_) => {}
            Node::Placeholder(placeholder) => out.push(placeholder_factor(placeholder, source)),
            Node::Conditional(conditional) => {
                out.push(conditional_factor(conditional));
                for branch in &conditional.branches {
                    collect_nodes(&branch.nodes, source, out);
                }
                if let Some(else_branch) = &conditional.else_branch {
                    collect_nodes(&else_branch.nodes, source, out);
                }
            }
        }
    }
}

fn placeholder_factor(placeholder: &Placeholder, source: &str) -> Factor {
    if let Some(name) = placeholder.expr.as_identifier() {
        return Factor::Bind {
            name: name.to_string(),
            span: placeholder.span,
        };
    }
    let expr_span = placeholder.expr.span;
    Factor::Expr {
        expr: Arc::new(placeholder.expr.clone()),
        text: source[expr_span.start..expr_span.end].trim().to_string(),
        span: placeholder.span,
    }
}

fn conditional_factor(conditional: &Conditional) -> Factor {
    let branches = conditional
        .branches
        .iter()
        .map(|branch| BranchFactor {
            condition: Arc::new(branch.condition.clone()),
            condition_text: branch.condition_text.clone(),
            body: branch.body_span,
        })
        .collect();
    Factor::Conditional(ConditionalFactor {
        branches,
        else_body: conditional.else_branch.as_ref().map(|e| e.body_span),
        span: conditional.span,
    })
}

/// Walks the sorted list with a stack of open ranges and rejects any pair
/// that overlaps without one containing the other.
fn verify_forest(factors: &[Factor]) -> Result<(), TemplateParseError> {
    let mut open: Vec<Span> = Vec::new();
    for factor in factors {
        let span = factor.span();
        while let Some(top) = open.last() {
            if top.end <= span.start {
                open.pop();
            } else {
                break;
            }
        }
        if let Some(top) = open.last() {
            if span.overlaps_partially(top) {
                return Err(TemplateParseError::OverlappingFactors {
                    first: *top,
                    second: span,
                });
            }
        }
        open.push(span);
    }
    Ok(())
}
