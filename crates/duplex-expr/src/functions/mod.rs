pub mod null;
pub mod string;

use crate::{
    context::EvalContext,
    error::{ExpressionError, Result},
};
use model::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Type alias for function implementations
pub type FunctionImpl = fn(&[Value], &EvalContext) -> Result<Value>;

/// Registry of the functions callable from directive expressions. Names
/// are case-insensitive.
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionImpl>,
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register("lower", string::eval_lower);
        registry.register("upper", string::eval_upper);
        registry.register("concat", string::eval_concat);
        registry.register("length", string::eval_length);
        registry.register("coalesce", null::eval_coalesce);

        registry
    }

    pub fn register(&mut self, name: &str, func: FunctionImpl) {
        self.functions.insert(name.to_lowercase(), func);
    }

    pub fn call(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Result<Value> {
        trace!(function = name, argc = args.len(), "calling template function");
        let func = self
            .functions
            .get(&name.to_lowercase())
            .ok_or_else(|| ExpressionError::UnknownFunction(name.to_string()))?;

        func(args, ctx)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.function_names();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
