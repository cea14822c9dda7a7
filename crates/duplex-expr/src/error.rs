use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid function arguments for {function}: {message}")]
    InvalidFunctionArgs { function: String, message: String },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
