//! Runtime values for the interpreter

use std::fmt;

use crate::error::{EvalError, Result};

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number
    Scalar(f64),
    /// An ordered sequence of numbers, never mutated after creation
    List(Vec<f64>),
    /// A function named without being invoked. Also carries the raw branch
    /// text handed to `if`, which receives its arguments unevaluated.
    Name(String),
}

impl Value {
    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::List(_) => "list",
            Value::Name(_) => "function name",
        }
    }

    /// Coerce to a scalar. These coercions are the interpreter's only
    /// type-checking mechanism: anything else is a type mismatch.
    pub fn as_scalar(&self) -> Result<f64> {
        match self {
            Value::Scalar(n) => Ok(*n),
            other => Err(EvalError::type_mismatch("scalar", other.type_name())),
        }
    }

    /// Coerce to a list
    pub fn as_list(&self) -> Result<&[f64]> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(EvalError::type_mismatch("list", other.type_name())),
        }
    }

    /// The text carried by a name value
    pub(crate) fn as_text(&self) -> Result<&str> {
        match self {
            Value::Name(text) => Ok(text),
            other => Err(EvalError::type_mismatch("function name", other.type_name())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(n) => write!(f, "{n}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Name(name) => write!(f, "{name}"),
        }
    }
}
