use crate::{
    context::EvalContext,
    error::{ExpressionError, Result},
};
use model::Value;

/// Convert string to lowercase. NULL passes through, SQL-style.
pub fn eval_lower(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args.first() {
        Some(Value::String(s)) => Ok(Value::String(s.to_lowercase())),
        Some(Value::Null) => Ok(Value::Null),
        Some(other) => Err(ExpressionError::InvalidFunctionArgs {
            function: "lower".to_string(),
            message: format!("Expected string, got {}", other.type_name()),
        }),
        None => Err(ExpressionError::InvalidFunctionArgs {
            function: "lower".to_string(),
            message: "Expected 1 argument, got 0".to_string(),
        }),
    }
}

/// Convert string to uppercase. NULL passes through, SQL-style.
pub fn eval_upper(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args.first() {
        Some(Value::String(s)) => Ok(Value::String(s.to_uppercase())),
        Some(Value::Null) => Ok(Value::Null),
        Some(other) => Err(ExpressionError::InvalidFunctionArgs {
            function: "upper".to_string(),
            message: format!("Expected string, got {}", other.type_name()),
        }),
        None => Err(ExpressionError::InvalidFunctionArgs {
            function: "upper".to_string(),
            message: "Expected 1 argument, got 0".to_string(),
        }),
    }
}

/// Concatenate the arguments into one string
pub fn eval_concat(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    let concatenated = args
        .iter()
        .map(stringify)
        .collect::<Vec<_>>()
        .join("");
    Ok(Value::String(concatenated))
}

/// Character count of a string argument
pub fn eval_length(args: &[Value], _ctx: &EvalContext) -> Result<Value> {
    match args.first() {
        Some(Value::String(s)) => Ok(Value::Int(s.chars().count() as i64)),
        Some(Value::Null) => Ok(Value::Null),
        Some(other) => Err(ExpressionError::InvalidFunctionArgs {
            function: "length".to_string(),
            message: format!("Expected string, got {}", other.type_name()),
        }),
        None => Err(ExpressionError::InvalidFunctionArgs {
            function: "length".to_string(),
            message: "Expected 1 argument, got 0".to_string(),
        }),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Uuid(u) => u.to_string(),
        Value::Date(d) => d.to_string(),
        Value::Timestamp(t) => t.to_rfc3339(),
        Value::Json(v) => v.to_string(),
        Value::Bytes(b) => String::from_utf8_lossy(b).to_string(),
        Value::Null => String::new(),
    }
}
