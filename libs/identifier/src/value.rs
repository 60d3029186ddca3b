//! Values produced by evaluating index arguments
//!
//! An indexer argument that is not a literal in the tree is evaluated down to a
//! [`Value`] before it is rendered between brackets.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// A concrete value an index argument evaluates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    String(String),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Name of the value kind, used in evaluation error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
        }
    }

    /// Render the value the way it appears between index brackets.
    ///
    /// Numbers never carry digit grouping and always use `.` as the decimal
    /// point. Strings are wrapped in double quotes without escaping.
    pub fn to_index_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::String(s) => format!("\"{}\"", s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// Source-literal form, as accepted back by the expression parser.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}

/// Parse a binding literal such as `42`, `1.5`, `true`, `null`, `"key"` or `'key'`.
///
/// Anything that is not recognised as a literal is taken verbatim as a string.
impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Boolean(true)),
            "false" => return Ok(Value::Boolean(false)),
            _ => {}
        }

        for quote in ['"', '\''] {
            if let Some(inner) = trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return Ok(Value::String(inner.to_string()));
            }
            if trimmed.starts_with(quote) {
                return Err(Error::ParseError(format!(
                    "Unterminated string literal: {}",
                    trimmed
                )));
            }
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Value::Integer(i));
        }
        if trimmed.contains('.') {
            if let Ok(d) = Decimal::from_str(trimmed) {
                return Ok(Value::Decimal(d));
            }
        }

        Ok(Value::String(s.to_string()))
    }
}
