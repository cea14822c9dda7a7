use crate::ast::{expr::Expression, span::Span};
use serde::{Deserialize, Serialize};

/// Root of a parsed template: the node sequence plus the span of the whole
/// source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateAst {
    pub nodes: Vec<Node>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    SqlText(SqlText),
    Placeholder(Placeholder),
    Conditional(Conditional),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::SqlText(t) => t.span,
            Node::Placeholder(p) => p.span,
            Node::Conditional(c) => c.span,
        }
    }
}

/// Literal SQL between directives, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlText {
    pub text: String,
    pub span: Span,
}

/// A directive comment that renders as a placeholder. The span covers the
/// comment and its adjacent default literal, so consuming the span removes
/// the default from the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    pub expr: Expression,
    pub default: Option<String>,
    pub span: Span,
}

impl Placeholder {
    /// Bind placeholders carry a bare argument name; everything else is an
    /// expression placeholder.
    pub fn is_bind(&self) -> bool {
        self.expr.as_identifier().is_some()
    }
}

/// An IF/ELSEIF/ELSE/END block. The span runs from the opening marker to
/// the end of the closing marker; branch body spans exclude the markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub branches: Vec<Branch>,
    pub else_branch: Option<ElseBranch>,
    pub span: Span,
}

/// One IF or ELSEIF arm: its condition, the condition's exact source text
/// for diagnostics, and the body between this marker and the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Expression,
    pub condition_text: String,
    pub nodes: Vec<Node>,
    pub body_span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseBranch {
    pub nodes: Vec<Node>,
    pub body_span: Span,
}
