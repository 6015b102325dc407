//! Error types and reporting

use std::ops::Range;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, EvalError>;

/// Evaluation error
///
/// Every failure aborts the current `declare_function` or `evaluate` call
/// and propagates to the shell; nothing is retried or rolled back inside
/// the interpreter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Malformed declaration, list literal, call syntax, or numeric literal
    #[error("{message}")]
    Syntax { message: String },

    /// Callee name not present in the registry
    #[error("Unknown function: `{name}`{hint}")]
    UnknownFunction { name: String, hint: String },

    /// A scalar used where a list was needed, or the other way around
    #[error("Expected a {expected} value, but got a {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// Wrong argument count, checked inside each builtin
    #[error("Function `{name}` expects {expected} argument(s), got {got}")]
    Arity {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot take the square root of a negative number")]
    NegativeArgument,

    /// `head` or `tail` applied to an empty list
    #[error("Cannot take the {operation} of an empty list")]
    EmptyList { operation: &'static str },

    /// `map`/`filter` given something other than an eligible function name
    #[error("{message}")]
    InvalidArgument { message: String },
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    pub fn unknown_function(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::UnknownFunction {
            name: name.into(),
            hint: hint.into(),
        }
    }

    pub fn type_mismatch(expected: &'static str, got: &'static str) -> Self {
        Self::TypeMismatch { expected, got }
    }

    pub fn arity(name: &'static str, expected: usize, got: usize) -> Self {
        Self::Arity {
            name,
            expected,
            got,
        }
    }

    pub fn empty_list(operation: &'static str) -> Self {
        Self::EmptyList { operation }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Report error with ariadne
///
/// `span` is the byte range of the failing line inside `source`.
pub fn report_error(filename: &str, source: &str, span: Range<usize>, error: &EvalError) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let kind = match error {
        EvalError::Syntax { .. } => "Syntax",
        EvalError::UnknownFunction { .. } => "Name",
        EvalError::TypeMismatch { .. } | EvalError::Arity { .. } => "Type",
        EvalError::DivisionByZero
        | EvalError::NegativeArgument
        | EvalError::EmptyList { .. }
        | EvalError::InvalidArgument { .. } => "Evaluation",
    };

    Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(format!("{kind} error"))
        .with_label(
            Label::new((filename, span))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .print((filename, Source::from(source)))
        .unwrap();
}
