use crate::error::{ExpressionError, Result};
use bigdecimal::{BigDecimal, FromPrimitive};
use duplex_syntax::ast::operator::BinaryOperator;
use model::Value;
use std::cmp::Ordering;

/// Binary operation evaluator that handles different value type
/// combinations. Logical and/or are short-circuited by the runtime and
/// never reach this table.
pub(crate) struct BinaryOpEvaluator<'a> {
    left: &'a Value,
    right: &'a Value,
    op: BinaryOperator,
}

impl<'a> BinaryOpEvaluator<'a> {
    pub fn new(left: &'a Value, right: &'a Value, op: BinaryOperator) -> Self {
        Self { left, right, op }
    }

    pub fn evaluate(&self) -> Result<Value> {
        use Value::*;

        match (self.left, self.right) {
            (Int(l), Int(r)) => self.eval_int(*l, *r),
            (Int(_), Float(_)) | (Float(_), Int(_)) | (Float(_), Float(_)) => self.eval_float(),
            (Decimal(_), Decimal(_))
            | (Decimal(_), Int(_))
            | (Int(_), Decimal(_))
            | (Decimal(_), Float(_))
            | (Float(_), Decimal(_)) => self.eval_decimal(),
            (String(l), String(r)) => self.eval_string(l, r),
            (Boolean(l), Boolean(r)) => self.eval_boolean(*l, *r),
            (Date(_), Date(_)) | (Timestamp(_), Timestamp(_)) | (Uuid(_), Uuid(_)) => {
                self.eval_ordered()
            }
            (Null, _) | (_, Null) => self.eval_null(),
            (l, r) => Err(ExpressionError::TypeMismatch {
                expected: l.type_name().to_string(),
                actual: r.type_name().to_string(),
            }),
        }
    }

    fn eval_int(&self, l: i64, r: i64) -> Result<Value> {
        use Value::*;
        Ok(match self.op {
            BinaryOperator::Add => Int(l + r),
            BinaryOperator::Subtract => Int(l - r),
            BinaryOperator::Multiply => Int(l * r),
            BinaryOperator::Divide => {
                if r == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Int(l / r)
            }
            BinaryOperator::Modulo => {
                if r == 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                Int(l % r)
            }
            BinaryOperator::Equal => Boolean(l == r),
            BinaryOperator::NotEqual => Boolean(l != r),
            BinaryOperator::GreaterThan => Boolean(l > r),
            BinaryOperator::LessThan => Boolean(l < r),
            BinaryOperator::GreaterOrEqual => Boolean(l >= r),
            BinaryOperator::LessOrEqual => Boolean(l <= r),
            _ => return Err(self.unsupported("int")),
        })
    }

    fn eval_float(&self) -> Result<Value> {
        use Value::*;
        let l = self.as_float(self.left)?;
        let r = self.as_float(self.right)?;

        Ok(match self.op {
            BinaryOperator::Add => Float(l + r),
            BinaryOperator::Subtract => Float(l - r),
            BinaryOperator::Multiply => Float(l * r),
            BinaryOperator::Divide => Float(l / r),
            BinaryOperator::Modulo => Float(l % r),
            BinaryOperator::Equal => Boolean((l - r).abs() < f64::EPSILON),
            BinaryOperator::NotEqual => Boolean((l - r).abs() >= f64::EPSILON),
            BinaryOperator::GreaterThan => Boolean(l > r),
            BinaryOperator::LessThan => Boolean(l < r),
            BinaryOperator::GreaterOrEqual => Boolean(l >= r),
            BinaryOperator::LessOrEqual => Boolean(l <= r),
            _ => return Err(self.unsupported("float")),
        })
    }

    fn eval_decimal(&self) -> Result<Value> {
        use Value::*;
        let l = self.as_decimal(self.left)?;
        let r = self.as_decimal(self.right)?;

        Ok(match self.op {
            BinaryOperator::Add => Decimal(l + r),
            BinaryOperator::Subtract => Decimal(l - r),
            BinaryOperator::Multiply => Decimal(l * r),
            BinaryOperator::Divide => {
                if r == BigDecimal::from(0) {
                    return Err(ExpressionError::DivisionByZero);
                }
                Decimal(l / r)
            }
            BinaryOperator::Modulo => {
                if r == BigDecimal::from(0) {
                    return Err(ExpressionError::DivisionByZero);
                }
                Decimal(l % r)
            }
            BinaryOperator::Equal => Boolean(l == r),
            BinaryOperator::NotEqual => Boolean(l != r),
            BinaryOperator::GreaterThan => Boolean(l > r),
            BinaryOperator::LessThan => Boolean(l < r),
            BinaryOperator::GreaterOrEqual => Boolean(l >= r),
            BinaryOperator::LessOrEqual => Boolean(l <= r),
            _ => return Err(self.unsupported("decimal")),
        })
    }

    fn eval_string(&self, l: &str, r: &str) -> Result<Value> {
        use Value::*;
        Ok(match self.op {
            BinaryOperator::Equal => Boolean(l == r),
            BinaryOperator::NotEqual => Boolean(l != r),
            BinaryOperator::GreaterThan => Boolean(l > r),
            BinaryOperator::LessThan => Boolean(l < r),
            BinaryOperator::GreaterOrEqual => Boolean(l >= r),
            BinaryOperator::LessOrEqual => Boolean(l <= r),
            BinaryOperator::Add => String(format!("{}{}", l, r)),
            _ => return Err(self.unsupported("string")),
        })
    }

    fn eval_boolean(&self, l: bool, r: bool) -> Result<Value> {
        use Value::*;
        Ok(match self.op {
            BinaryOperator::Equal => Boolean(l == r),
            BinaryOperator::NotEqual => Boolean(l != r),
            _ => return Err(self.unsupported("boolean")),
        })
    }

    fn eval_ordered(&self) -> Result<Value> {
        use Value::*;
        let ordering = self.left.compare(self.right);
        Ok(match self.op {
            BinaryOperator::Equal => Boolean(ordering == Some(Ordering::Equal)),
            BinaryOperator::NotEqual => Boolean(ordering != Some(Ordering::Equal)),
            BinaryOperator::GreaterThan => Boolean(ordering == Some(Ordering::Greater)),
            BinaryOperator::LessThan => Boolean(ordering == Some(Ordering::Less)),
            BinaryOperator::GreaterOrEqual => Boolean(matches!(
                ordering,
                Some(Ordering::Greater) | Some(Ordering::Equal)
            )),
            BinaryOperator::LessOrEqual => Boolean(matches!(
                ordering,
                Some(Ordering::Less) | Some(Ordering::Equal)
            )),
            _ => return Err(self.unsupported(self.left.type_name())),
        })
    }

    /// NULL equals NULL; every other comparison against NULL is false.
    /// Arithmetic on NULL is an error rather than a silent NULL so broken
    /// templates fail loudly.
    fn eval_null(&self) -> Result<Value> {
        use Value::*;
        let both_null = self.left.is_null() && self.right.is_null();
        Ok(match self.op {
            BinaryOperator::Equal => Boolean(both_null),
            BinaryOperator::NotEqual => Boolean(!both_null),
            BinaryOperator::GreaterThan
            | BinaryOperator::LessThan
            | BinaryOperator::GreaterOrEqual
            | BinaryOperator::LessOrEqual => Boolean(false),
            _ => return Err(self.unsupported("null")),
        })
    }

    fn as_float(&self, value: &Value) -> Result<f64> {
        value.as_f64().ok_or_else(|| ExpressionError::TypeMismatch {
            expected: "numeric".to_string(),
            actual: value.type_name().to_string(),
        })
    }

    fn as_decimal(&self, value: &Value) -> Result<BigDecimal> {
        match value {
            Value::Decimal(d) => Ok(d.clone()),
            Value::Int(i) => Ok(BigDecimal::from(*i)),
            Value::Float(f) => {
                BigDecimal::from_f64(*f).ok_or_else(|| ExpressionError::TypeMismatch {
                    expected: "finite numeric".to_string(),
                    actual: "float".to_string(),
                })
            }
            other => Err(ExpressionError::TypeMismatch {
                expected: "numeric".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    fn unsupported(&self, type_name: &str) -> ExpressionError {
        ExpressionError::UnsupportedOperation(format!(
            "operator {} is not defined for {} operands",
            self.op, type_name
        ))
    }
}
