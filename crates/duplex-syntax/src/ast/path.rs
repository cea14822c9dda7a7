use crate::ast::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dot-separated argument path (e.g., user.address.city). The first segment
/// names a declared argument, the rest navigate into its JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgPath {
    pub segments: Vec<String>,
    pub span: Span,
}

impl ArgPath {
    pub fn new(segments: Vec<String>, span: Span) -> Self {
        Self { segments, span }
    }

    pub fn from_string(path: &str, span: Span) -> Self {
        Self {
            segments: path.split('.').map(|s| s.to_string()).collect(),
            span,
        }
    }

    /// The declared argument the path starts from.
    pub fn root(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for ArgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
