//! The interpreter core: values, the function registry, and the evaluator

mod builtins;
mod eval;
mod function;
mod value;

pub use eval::Interpreter;
pub use function::{Function, FunctionKind};
pub use value::Value;
