//! Runtime values.

use std::fmt;

use crate::error::{EvalError, EvalResult};

/// A Hermes runtime value.
///
/// Equality is structural and never coerces: `1 == "1"` is false.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Value>),
    /// Absence of a value: a function that did not return, an `if` with no branch taken.
    #[default]
    Null,
}

impl Value {
    /// Decide the runtime type of a literal.
    ///
    /// Text made only of digits, `.`, `+`, `-`, `e` and `E` that parses as a
    /// number is a number; anything else stays a string. This applies to
    /// quoted literals too, so `"42"` is the number 42.
    pub fn from_literal(text: &str) -> Value {
        let numeric_chars = !text.is_empty()
            && text
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
        if numeric_chars {
            if let Ok(n) = text.parse::<f64>() {
                return Value::Number(n);
            }
        }
        Value::String(text.to_string())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    /// `false`, `0`, `""` and null are falsy. Everything else, lists included, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(_) => true,
            Value::Null => false,
        }
    }

    /// Numeric view used by arithmetic, comparisons and math builtins.
    pub fn to_number(&self) -> EvalResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Null => Ok(0.0),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
                EvalError::TypeMismatch(format!("cannot convert string \"{s}\" to a number"))
            }),
            Value::List(_) => Err(EvalError::TypeMismatch(
                "cannot convert list to a number".to_string(),
            )),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display already prints 4.0 as "4" and 2.5 as "2.5".
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
