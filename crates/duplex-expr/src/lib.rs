pub mod context;
pub mod error;
pub mod eval;
pub mod functions;

pub use context::EvalContext;
pub use error::{ExpressionError, Result};
pub use eval::Evaluator;
pub use functions::FunctionRegistry;
