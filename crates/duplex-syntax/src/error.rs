use crate::ast::span::Span;
use crate::parser::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateParseError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        source_snippet: String,
    },

    #[error("Directives at {first} and {second} overlap without nesting")]
    OverlappingFactors { first: Span, second: Span },

    #[error("Template source is empty")]
    EmptyTemplate,
}

impl TemplateParseError {
    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        use pest::error::LineColLocation;

        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };

        let message = format!("{}", err.variant);
        let source_snippet = err.line().to_string();

        TemplateParseError::Syntax {
            message,
            line,
            column,
            source_snippet,
        }
    }

    /// Format error with a caret pointing at the offending column.
    pub fn format_error(&self) -> String {
        match self {
            TemplateParseError::Syntax {
                message,
                line,
                column,
                source_snippet,
            } => {
                format!(
                    "Parse error at line {}, column {}:\n{}\n{}^\n{}",
                    line,
                    column,
                    source_snippet,
                    " ".repeat(column.saturating_sub(1)),
                    message
                )
            }
            _ => self.to_string(),
        }
    }
}
