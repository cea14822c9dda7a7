use crate::{
    context::EvalContext,
    error::{ExpressionError, Result},
    eval::binary::BinaryOpEvaluator,
};
use duplex_syntax::ast::{
    expr::{Expression, ExpressionKind},
    literal::Literal,
    operator::{BinaryOperator, UnaryOperator},
    path::ArgPath,
};
use model::Value;

/// Trait for evaluating directive expressions against call-time arguments
pub trait Evaluator {
    fn evaluate(&self, ctx: &EvalContext) -> Result<Value>;

    /// Truth value of the expression, for IF/ELSEIF guards.
    fn evaluate_bool(&self, ctx: &EvalContext) -> Result<bool> {
        Ok(self.evaluate(ctx)?.is_truthy())
    }
}

impl Evaluator for Expression {
    fn evaluate(&self, ctx: &EvalContext) -> Result<Value> {
        match &self.kind {
            ExpressionKind::Literal(literal) => Ok(literal_value(literal)),

            ExpressionKind::Identifier(name) => Ok(ctx.arg(name)),

            ExpressionKind::Path(path) => eval_path(path, ctx),

            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => match operator {
                // and/or short-circuit on truthiness so conditions can be
                // written over non-boolean arguments.
                BinaryOperator::And => {
                    if !left.evaluate(ctx)?.is_truthy() {
                        return Ok(Value::Boolean(false));
                    }
                    Ok(Value::Boolean(right.evaluate(ctx)?.is_truthy()))
                }
                BinaryOperator::Or => {
                    if left.evaluate(ctx)?.is_truthy() {
                        return Ok(Value::Boolean(true));
                    }
                    Ok(Value::Boolean(right.evaluate(ctx)?.is_truthy()))
                }
                _ => {
                    let left_val = left.evaluate(ctx)?;
                    let right_val = right.evaluate(ctx)?;
                    BinaryOpEvaluator::new(&left_val, &right_val, *operator).evaluate()
                }
            },

            ExpressionKind::Unary { operator, operand } => {
                let value = operand.evaluate(ctx)?;
                match operator {
                    UnaryOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
                    UnaryOperator::Negate => negate(value),
                }
            }

            ExpressionKind::FunctionCall { name, arguments } => {
                let args = arguments
                    .iter()
                    .map(|arg| arg.evaluate(ctx))
                    .collect::<Result<Vec<_>>>()?;
                ctx.functions().call(name, &args, ctx)
            }

            ExpressionKind::IsNull(inner) => Ok(Value::Boolean(inner.evaluate(ctx)?.is_null())),

            ExpressionKind::IsNotNull(inner) => {
                Ok(Value::Boolean(!inner.evaluate(ctx)?.is_null()))
            }

            ExpressionKind::Grouped(inner) => inner.evaluate(ctx),
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
    }
}

/// Navigates a dotted path: the root segment is an argument, the rest step
/// through its JSON value. Missing keys read as Null, stepping into a
/// non-object is an error.
fn eval_path(path: &ArgPath, ctx: &EvalContext) -> Result<Value> {
    let mut current = ctx.arg(path.root());

    for segment in &path.segments[1..] {
        current = match current {
            Value::Json(json) => json
                .get(segment)
                .cloned()
                .map(Value::from)
                .unwrap_or(Value::Null),
            Value::Null => Value::Null,
            other => {
                return Err(ExpressionError::TypeMismatch {
                    expected: "json object".to_string(),
                    actual: other.type_name().to_string(),
                });
            }
        };
    }

    Ok(current)
}

fn negate(value: Value) -> Result<Value> {
    match value {
        Value::Int(v) => Ok(Value::Int(-v)),
        Value::Float(v) => Ok(Value::Float(-v)),
        Value::Decimal(d) => Ok(Value::Decimal(-d)),
        other => Err(ExpressionError::UnsupportedOperation(format!(
            "cannot negate {} value",
            other.type_name()
        ))),
    }
}
