//! Evaluation of non-literal index arguments
//!
//! When an indexer call's argument is not a constant in the tree (for example
//! `x => x.Items[i]` where `i` is captured from the surrounding scope), the
//! converter asks a [`SubexpressionEvaluator`] for its value. The evaluator
//! only reads the tree and must not cache anything between conversions, since
//! captured values can change from one call to the next.

use crate::ast::{BinaryOperator, Expr, TypeName};
use crate::error::{Error, Result};
use crate::value::Value;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves an index sub-expression to a concrete value.
///
/// Implementations signal values they cannot produce with
/// [`Error::IndexEvaluationFailure`]; the converter returns that error
/// unchanged. Plain closures implement this trait as well:
///
/// ```rust
/// use pathkey_identifier::{Expr, Result, SubexpressionEvaluator, Value};
///
/// let always_seven = |_: &Expr| -> Result<Value> { Ok(Value::Integer(7)) };
/// assert_eq!(
///     always_seven.evaluate(&Expr::variable("i")).unwrap(),
///     Value::Integer(7)
/// );
/// ```
pub trait SubexpressionEvaluator: Send + Sync {
    fn evaluate(&self, expression: &Expr) -> Result<Value>;
}

impl<F> SubexpressionEvaluator for F
where
    F: Fn(&Expr) -> Result<Value> + Send + Sync,
{
    fn evaluate(&self, expression: &Expr) -> Result<Value> {
        self(expression)
    }
}

/// Values of variables captured from the scope an access path was written in.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    variables: Arc<HashMap<Arc<str>, Value>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.variables).insert(Arc::from(name), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let variables = iter
            .into_iter()
            .map(|(name, value)| (Arc::from(name.as_ref()), value.into()))
            .collect();
        Self {
            variables: Arc::new(variables),
        }
    }
}

/// Default evaluator: a small tree-walking interpreter over [`Bindings`].
///
/// Supports constants, captured variables, conversions, negation and the
/// arithmetic operators. Everything else (the lambda parameter, member
/// access, method calls) refers to state that only exists inside the
/// original closure and fails with [`Error::IndexEvaluationFailure`].
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    bindings: Bindings,
}

impl Interpreter {
    pub fn new(bindings: Bindings) -> Self {
        Self { bindings }
    }

    fn eval(&self, expression: &Expr) -> Result<Value> {
        match expression {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Variable { name } => self.bindings.get(name).cloned().ok_or_else(|| {
                Error::evaluation(expression, format!("variable '{}' is not bound", name))
            }),
            Expr::Convert {
                operand,
                target_type,
            } => {
                let value = self.eval(operand)?;
                coerce(value, target_type).ok_or_else(|| {
                    Error::evaluation(
                        expression,
                        format!("value does not fit in '{}'", target_type),
                    )
                })
            }
            Expr::Negate { operand } => match self.eval(operand)? {
                Value::Integer(i) => i
                    .checked_neg()
                    .map(Value::Integer)
                    .ok_or_else(|| Error::evaluation(expression, "integer overflow")),
                Value::Decimal(d) => Ok(Value::Decimal(-d)),
                other => Err(Error::evaluation(
                    expression,
                    format!("cannot negate a {} value", other.kind()),
                )),
            },
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*operator, left, right)
                    .map_err(|reason| Error::evaluation(expression, reason))
            }
            Expr::Parameter { name } => Err(Error::evaluation(
                expression,
                format!("lambda parameter '{}' has no value outside the path", name),
            )),
            Expr::Member { .. }
            | Expr::ArrayIndex { .. }
            | Expr::Call { .. }
            | Expr::Lambda { .. } => Err(Error::evaluation(
                expression,
                "expression depends on state outside its capturing scope",
            )),
        }
    }
}

impl SubexpressionEvaluator for Interpreter {
    fn evaluate(&self, expression: &Expr) -> Result<Value> {
        let value = self.eval(expression)?;
        tracing::trace!(expression = %expression, value = ?value, "evaluated index argument");
        Ok(value)
    }
}

const INTEGER_TYPES: &[&str] = &[
    "byte", "sbyte", "short", "ushort", "int", "uint", "long", "ulong", "Byte", "SByte", "Int16",
    "UInt16", "Int32", "UInt32", "Int64", "UInt64", "i8", "u8", "i16", "u16", "i32", "u32", "i64",
    "u64", "isize", "usize",
];

const DECIMAL_TYPES: &[&str] = &[
    "decimal", "double", "float", "Decimal", "Double", "Single", "f32", "f64",
];

/// Numeric conversions; other target types leave the value untouched.
fn coerce(value: Value, target_type: &TypeName) -> Option<Value> {
    let target = target_type.name.as_str();
    if INTEGER_TYPES.contains(&target) {
        return match value {
            Value::Decimal(d) => d.trunc().to_i64().map(Value::Integer),
            other => Some(other),
        };
    }
    if DECIMAL_TYPES.contains(&target) {
        return match value {
            Value::Integer(i) => Some(Value::Decimal(Decimal::from(i))),
            other => Some(other),
        };
    }
    Some(value)
}

fn binary(
    operator: BinaryOperator,
    left: Value,
    right: Value,
) -> std::result::Result<Value, String> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => {
            let result = match operator {
                BinaryOperator::Add => l.checked_add(r),
                BinaryOperator::Subtract => l.checked_sub(r),
                BinaryOperator::Multiply => l.checked_mul(r),
                BinaryOperator::Divide if r == 0 => return Err("division by zero".into()),
                BinaryOperator::Divide => l.checked_div(r),
                BinaryOperator::Modulo if r == 0 => return Err("division by zero".into()),
                BinaryOperator::Modulo => l.checked_rem(r),
            };
            result
                .map(Value::Integer)
                .ok_or_else(|| "integer overflow".to_string())
        }
        (l @ (Value::Integer(_) | Value::Decimal(_)), r @ (Value::Integer(_) | Value::Decimal(_))) => {
            let (l, r) = (to_decimal(&l), to_decimal(&r));
            if r.is_zero() && matches!(operator, BinaryOperator::Divide | BinaryOperator::Modulo) {
                return Err("division by zero".into());
            }
            let result = match operator {
                BinaryOperator::Add => l.checked_add(r),
                BinaryOperator::Subtract => l.checked_sub(r),
                BinaryOperator::Multiply => l.checked_mul(r),
                BinaryOperator::Divide => l.checked_div(r),
                BinaryOperator::Modulo => l.checked_rem(r),
            };
            result
                .map(Value::Decimal)
                .ok_or_else(|| "decimal overflow".to_string())
        }
        (l, r) if operator == BinaryOperator::Add
            && (matches!(l, Value::String(_)) || matches!(r, Value::String(_))) =>
        {
            Ok(Value::String(format!("{}{}", plain_text(&l), plain_text(&r))))
        }
        (l, r) => Err(format!(
            "operator '{}' is not defined for {} and {}",
            operator.symbol(),
            l.kind(),
            r.kind()
        )),
    }
}

fn to_decimal(value: &Value) -> Decimal {
    match value {
        Value::Integer(i) => Decimal::from(*i),
        Value::Decimal(d) => *d,
        _ => Decimal::ZERO,
    }
}

/// Text of a value when concatenated into a string.
fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_index_string(),
    }
}
