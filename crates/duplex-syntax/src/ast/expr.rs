use crate::ast::{
    literal::Literal,
    operator::{BinaryOperator, UnaryOperator},
    path::ArgPath,
    span::Span,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }

    /// The bare argument name when the expression is a plain identifier.
    /// Placeholders whose body is a plain identifier are bind slots; every
    /// other expression shape is an expression slot.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// Expression types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Literal(Literal),
    Identifier(String),
    Path(ArgPath),
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    FunctionCall {
        name: String,
        arguments: Vec<Expression>,
    },
    IsNull(Box<Expression>),
    IsNotNull(Box<Expression>),
    Grouped(Box<Expression>),
}
