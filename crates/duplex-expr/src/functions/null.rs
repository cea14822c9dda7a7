use crate::{context::EvalContext, error::Result};
use model::Value;

/// First non-null argument, or NULL when all are null
pub fn eval_coalesce(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    for arg in args {
        if !arg.is_null() {
            return Ok(arg.clone());
        }
    }
    Ok(Value::Null)
}
