//! Registry entries: builtins, special forms, and user declarations

use crate::error::Result;
use crate::interp::eval::Interpreter;
use crate::interp::value::Value;

/// Builtin implementation over already-evaluated arguments
pub type BuiltinFn = fn(&[Value]) -> Result<Value>;

/// Special-form implementation. These need the interpreter itself, to
/// evaluate raw argument text (`if`), resolve bare function names
/// (`nand`/`le`/`eq`), or dispatch a named function per list element
/// (`map`/`filter`).
pub type SpecialFn = fn(&Interpreter, &[Value]) -> Result<Value>;

/// A callable registry entry
#[derive(Debug, Clone)]
pub struct Function {
    pub kind: FunctionKind,
    /// Declared arity hint. Metadata only: builtins check their own
    /// argument counts and user functions accept whatever count the
    /// substitution step receives.
    pub arity: usize,
    /// Right-hand side of a user declaration, kept pre-substitution for
    /// placeholder introspection. Empty for everything else.
    pub source: String,
}

/// How a registry entry is invoked
#[derive(Debug, Clone)]
pub enum FunctionKind {
    /// Fixed implementation over evaluated arguments
    Builtin(BuiltinFn),
    /// Fixed implementation that drives the evaluator itself
    Special(SpecialFn),
    /// Zero-argument constant
    Const(f64),
    /// Zero-argument wrapper returning the declared list of this name
    List(String),
    /// User expression: substitute `#i` tokens, then re-evaluate the text
    Expr,
}

impl Function {
    pub fn builtin(implementation: BuiltinFn, arity: usize) -> Self {
        Function {
            kind: FunctionKind::Builtin(implementation),
            arity,
            source: String::new(),
        }
    }

    pub fn special(implementation: SpecialFn, arity: usize) -> Self {
        Function {
            kind: FunctionKind::Special(implementation),
            arity,
            source: String::new(),
        }
    }

    pub fn constant(value: f64) -> Self {
        Function {
            kind: FunctionKind::Const(value),
            arity: 0,
            source: String::new(),
        }
    }

    pub fn list(name: impl Into<String>) -> Self {
        Function {
            kind: FunctionKind::List(name.into()),
            arity: 0,
            source: String::new(),
        }
    }

    /// A user-declared expression. The declared arity is the raw count of
    /// `#` characters, which overcounts when an index is reused.
    pub fn expression(body: impl Into<String>) -> Self {
        let body = body.into();
        Function {
            kind: FunctionKind::Expr,
            arity: body.matches('#').count(),
            source: body,
        }
    }
}
