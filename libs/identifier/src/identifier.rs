//! Public entry points

use crate::ast::Expr;
use crate::converter::PathConverter;
use crate::error::{Error, Result};
use crate::evaluator::{Bindings, Interpreter, SubexpressionEvaluator};
use crate::options::ConversionOptions;

/// Convert an access path to its canonical identifier string.
///
/// Non-literal indexer arguments are evaluated with an [`Interpreter`] that
/// has no bindings, so any captured variable fails with
/// [`Error::IndexEvaluationFailure`]. Use [`to_identifier_string_with`] to
/// supply values.
///
/// # Example
///
/// ```rust
/// use pathkey_identifier::{to_identifier_string, Expr};
///
/// let path = Expr::member(
///     Expr::member(Expr::parameter("x"), "TestClassProperty"),
///     "ValueTypeProperty",
/// );
/// assert_eq!(
///     to_identifier_string(&path, None).unwrap(),
///     "TestClassProperty.ValueTypeProperty"
/// );
/// ```
pub fn to_identifier_string<'a>(
    expression: impl Into<Option<&'a Expr>>,
    options: Option<&ConversionOptions>,
) -> Result<String> {
    to_identifier_string_with(expression, options, &Interpreter::default())
}

/// Convert an access path, evaluating non-literal indexer arguments with `evaluator`.
///
/// `None` as the expression fails with [`Error::NullExpression`]; `None` as
/// the options uses [`ConversionOptions::default`].
pub fn to_identifier_string_with<'a>(
    expression: impl Into<Option<&'a Expr>>,
    options: Option<&ConversionOptions>,
    evaluator: &dyn SubexpressionEvaluator,
) -> Result<String> {
    let expression = expression.into().ok_or(Error::NullExpression)?;
    let default_options;
    let options = match options {
        Some(options) => options,
        None => {
            default_options = ConversionOptions::default();
            &default_options
        }
    };

    tracing::debug!(kind = expression.kind(), "converting access path");
    let identifier = PathConverter::new(options, evaluator).convert(expression)?;
    tracing::debug!(identifier = %identifier, "converted access path");
    Ok(identifier)
}

/// Convenience over [`to_identifier_string_with`] for the default interpreter.
pub fn to_identifier_string_bound<'a>(
    expression: impl Into<Option<&'a Expr>>,
    options: Option<&ConversionOptions>,
    bindings: &Bindings,
) -> Result<String> {
    to_identifier_string_with(expression, options, &Interpreter::new(bindings.clone()))
}
