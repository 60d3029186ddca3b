//! Error types for identifier conversion

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Identifier conversion errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Expression must not be null")]
    NullExpression,

    #[error("Unsupported expression shape: {expression}")]
    UnsupportedExpressionShape { expression: String },

    #[error("Cannot evaluate index expression '{expression}': {reason}")]
    IndexEvaluationFailure { expression: String, reason: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl Error {
    pub(crate) fn unsupported(expression: &impl std::fmt::Display) -> Self {
        Error::UnsupportedExpressionShape {
            expression: expression.to_string(),
        }
    }

    pub(crate) fn evaluation(
        expression: &impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::IndexEvaluationFailure {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
