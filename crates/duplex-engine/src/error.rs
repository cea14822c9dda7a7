use duplex_expr::ExpressionError;
use duplex_syntax::ast::span::Span;
use duplex_syntax::error::TemplateParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level errors for template compilation and rendering.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse the template: {0}")]
    Parse(#[from] TemplateParseError),

    /// A branch condition could not be evaluated.
    #[error("Failed to evaluate condition '{expr_text}': {source}")]
    ConditionEvaluation {
        expr_text: String,
        source: ExpressionError,
    },

    /// An expression placeholder could not be evaluated.
    #[error("Failed to evaluate expression '{expr_text}': {source}")]
    ExpressionEvaluation {
        expr_text: String,
        source: ExpressionError,
    },

    #[error("Expression references undeclared argument '{name}' at {span}")]
    UndeclaredArgument { name: String, span: Span },

    #[error("Expression calls unknown function '{name}' at {span}")]
    UnknownFunction { name: String, span: Span },

    #[error("Template has no slot named '{0}'")]
    UnknownParam(String),

    #[error("No template root directory is configured")]
    MissingRoot,

    #[error("Template path '{0}' escapes the configured root")]
    OutsideRoot(PathBuf),

    #[error("Failed to read template file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
