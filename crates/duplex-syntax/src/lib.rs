pub mod ast;
pub mod builder;
pub mod error;
pub mod parser;

pub use ast::expr::{Expression, ExpressionKind};
pub use ast::node::{Branch, Conditional, ElseBranch, Node, Placeholder, SqlText, TemplateAst};
pub use ast::span::Span;
pub use builder::parse;
pub use error::TemplateParseError;
