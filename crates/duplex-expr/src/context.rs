use crate::functions::FunctionRegistry;
use model::{params, ParamMap, Value};

/// Evaluation context for one render: the caller's arguments plus the
/// function registry the template was compiled with.
pub struct EvalContext<'a> {
    params: &'a ParamMap,
    functions: &'a FunctionRegistry,
}

impl<'a> EvalContext<'a> {
    pub fn new(params: &'a ParamMap, functions: &'a FunctionRegistry) -> Self {
        Self { params, functions }
    }

    /// Argument lookup. Declared arguments that were not supplied read as
    /// Null rather than failing, so guards can test for their absence.
    pub fn arg(&self, name: &str) -> Value {
        params::lookup(self.params, name)
    }

    pub fn functions(&self) -> &FunctionRegistry {
        self.functions
    }
}
