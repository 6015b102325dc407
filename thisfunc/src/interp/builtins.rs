//! The fixed builtin set
//!
//! Plain builtins receive arguments already evaluated. Special forms
//! additionally receive the interpreter: `if` evaluates its branch text
//! lazily, `nand`/`le`/`eq` resolve bare function names before comparing,
//! and `map`/`filter` dispatch a named function over list elements. Every
//! builtin checks its own argument count; the declared arity stored on the
//! registry entry is never consulted.

use std::collections::HashMap;

use crate::error::{EvalError, Result};
use crate::interp::eval::Interpreter;
use crate::interp::function::Function;
use crate::interp::value::Value;

/// Register the builtin set into a fresh registry
pub(crate) fn install(functions: &mut HashMap<String, Function>) {
    functions.insert("add".to_string(), Function::builtin(builtin_add, 2));
    functions.insert("sub".to_string(), Function::builtin(builtin_sub, 2));
    functions.insert("mul".to_string(), Function::builtin(builtin_mul, 2));
    functions.insert("div".to_string(), Function::builtin(builtin_div, 2));
    functions.insert("pow".to_string(), Function::builtin(builtin_pow, 2));
    functions.insert("sqrt".to_string(), Function::builtin(builtin_sqrt, 1));
    functions.insert("sin".to_string(), Function::builtin(builtin_sin, 1));
    functions.insert("cos".to_string(), Function::builtin(builtin_cos, 1));
    functions.insert("list".to_string(), Function::builtin(builtin_list, 0));
    functions.insert("head".to_string(), Function::builtin(builtin_head, 1));
    functions.insert("tail".to_string(), Function::builtin(builtin_tail, 1));
    functions.insert("if".to_string(), Function::special(special_if, 3));
    functions.insert("nand".to_string(), Function::special(special_nand, 2));
    functions.insert("le".to_string(), Function::special(special_le, 2));
    functions.insert("eq".to_string(), Function::special(special_eq, 2));
    functions.insert("map".to_string(), Function::special(special_map, 2));
    functions.insert("filter".to_string(), Function::special(special_filter, 2));
}

fn builtin_add(args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("add", 2, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()? + args[1].as_scalar()?))
}

fn builtin_sub(args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("sub", 2, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()? - args[1].as_scalar()?))
}

fn builtin_mul(args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("mul", 2, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()? * args[1].as_scalar()?))
}

fn builtin_div(args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("div", 2, args.len()));
    }
    let dividend = args[0].as_scalar()?;
    let divisor = args[1].as_scalar()?;
    if divisor == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::Scalar(dividend / divisor))
}

fn builtin_pow(args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("pow", 2, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()?.powf(args[1].as_scalar()?)))
}

fn builtin_sqrt(args: &[Value]) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity("sqrt", 1, args.len()));
    }
    let value = args[0].as_scalar()?;
    if value < 0.0 {
        return Err(EvalError::NegativeArgument);
    }
    Ok(Value::Scalar(value.sqrt()))
}

fn builtin_sin(args: &[Value]) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity("sin", 1, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()?.sin()))
}

fn builtin_cos(args: &[Value]) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity("cos", 1, args.len()));
    }
    Ok(Value::Scalar(args[0].as_scalar()?.cos()))
}

/// Variadic constructor: every argument must coerce to a scalar
fn builtin_list(args: &[Value]) -> Result<Value> {
    let mut items = Vec::with_capacity(args.len());
    for arg in args {
        items.push(arg.as_scalar()?);
    }
    Ok(Value::List(items))
}

fn builtin_head(args: &[Value]) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity("head", 1, args.len()));
    }
    let items = args[0].as_list()?;
    match items.first() {
        Some(&first) => Ok(Value::Scalar(first)),
        None => Err(EvalError::empty_list("head")),
    }
}

fn builtin_tail(args: &[Value]) -> Result<Value> {
    if args.len() != 1 {
        return Err(EvalError::arity("tail", 1, args.len()));
    }
    let items = args[0].as_list()?;
    if items.is_empty() {
        return Err(EvalError::empty_list("tail"));
    }
    Ok(Value::List(items[1..].to_vec()))
}

/// `if(condition, then, else)`. The arguments arrive as raw expression
/// text; the condition is evaluated eagerly, then exactly one branch.
/// The untaken branch may reference undefined names or diverge.
fn special_if(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 3 {
        return Err(EvalError::arity("if", 3, args.len()));
    }
    let condition = interp.evaluate(args[0].as_text()?)?.as_scalar()?;
    if condition != 0.0 {
        interp.evaluate(args[1].as_text()?)
    } else {
        interp.evaluate(args[2].as_text()?)
    }
}

/// Resolve a comparison operand that may still be a bare function name
fn resolve_scalar(interp: &Interpreter, value: &Value) -> Result<f64> {
    match value {
        Value::Name(text) => interp.evaluate(text)?.as_scalar(),
        other => other.as_scalar(),
    }
}

fn special_nand(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("nand", 2, args.len()));
    }
    let first = resolve_scalar(interp, &args[0])?;
    let second = resolve_scalar(interp, &args[1])?;
    let both = first != 0.0 && second != 0.0;
    Ok(Value::Scalar(if both { 0.0 } else { 1.0 }))
}

fn special_le(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("le", 2, args.len()));
    }
    let first = resolve_scalar(interp, &args[0])?;
    let second = resolve_scalar(interp, &args[1])?;
    Ok(Value::Scalar(if first <= second { 1.0 } else { 0.0 }))
}

fn special_eq(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("eq", 2, args.len()));
    }
    let first = resolve_scalar(interp, &args[0])?;
    let second = resolve_scalar(interp, &args[1])?;
    Ok(Value::Scalar(if first == second { 1.0 } else { 0.0 }))
}

/// Check the callable handed to `map`/`filter` and look it up.
/// Anything but the name of a function passing the single-argument check
/// is rejected; the list elements are dispatched against the entry
/// directly, skipping call-syntax parsing.
fn eligible_callable<'a>(
    interp: &'a Interpreter,
    form: &str,
    value: &Value,
) -> Result<&'a Function> {
    let Value::Name(name) = value else {
        return Err(EvalError::invalid_argument(format!(
            "The first argument of `{form}` must name a single-argument function"
        )));
    };
    if !interp.is_single_argument(name)? {
        return Err(EvalError::invalid_argument(format!(
            "The first argument of `{form}` must name a single-argument function"
        )));
    }
    interp.lookup(name)
}

fn special_map(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("map", 2, args.len()));
    }
    let function = eligible_callable(interp, "map", &args[0])?;
    let items = args[1].as_list()?;

    let mut mapped = Vec::with_capacity(items.len());
    for &item in items {
        let result = interp.invoke(function, &[Value::Scalar(item)])?;
        mapped.push(result.as_scalar()?);
    }
    Ok(Value::List(mapped))
}

fn special_filter(interp: &Interpreter, args: &[Value]) -> Result<Value> {
    if args.len() != 2 {
        return Err(EvalError::arity("filter", 2, args.len()));
    }
    let predicate = eligible_callable(interp, "filter", &args[0])?;
    let items = args[1].as_list()?;

    let mut kept = Vec::new();
    for &item in items {
        let verdict = interp.invoke(predicate, &[Value::Scalar(item)])?;
        if verdict.as_scalar()? != 0.0 {
            kept.push(item);
        }
    }
    Ok(Value::List(kept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_builtins() {
        assert_eq!(
            builtin_add(&[Value::Scalar(2.0), Value::Scalar(3.0)]),
            Ok(Value::Scalar(5.0))
        );
        assert_eq!(
            builtin_sub(&[Value::Scalar(2.0), Value::Scalar(3.0)]),
            Ok(Value::Scalar(-1.0))
        );
        assert_eq!(
            builtin_mul(&[Value::Scalar(2.0), Value::Scalar(3.0)]),
            Ok(Value::Scalar(6.0))
        );
        assert_eq!(
            builtin_pow(&[Value::Scalar(2.0), Value::Scalar(10.0)]),
            Ok(Value::Scalar(1024.0))
        );
    }

    #[test]
    fn test_arity_checked_inside_each_builtin() {
        assert_eq!(
            builtin_add(&[Value::Scalar(1.0)]),
            Err(EvalError::arity("add", 2, 1))
        );
        assert_eq!(
            builtin_sqrt(&[Value::Scalar(1.0), Value::Scalar(2.0)]),
            Err(EvalError::arity("sqrt", 1, 2))
        );
    }

    #[test]
    fn test_div_rejects_zero_divisor() {
        assert_eq!(
            builtin_div(&[Value::Scalar(1.0), Value::Scalar(0.0)]),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            builtin_div(&[Value::Scalar(9.0), Value::Scalar(3.0)]),
            Ok(Value::Scalar(3.0))
        );
    }

    #[test]
    fn test_sqrt_rejects_negative() {
        assert_eq!(
            builtin_sqrt(&[Value::Scalar(-1.0)]),
            Err(EvalError::NegativeArgument)
        );
        assert_eq!(builtin_sqrt(&[Value::Scalar(4.0)]), Ok(Value::Scalar(2.0)));
    }

    #[test]
    fn test_list_coerces_every_argument() {
        assert_eq!(
            builtin_list(&[Value::Scalar(1.0), Value::Scalar(2.0)]),
            Ok(Value::List(vec![1.0, 2.0]))
        );
        assert_eq!(builtin_list(&[]), Ok(Value::List(vec![])));
        assert_eq!(
            builtin_list(&[Value::List(vec![1.0])]),
            Err(EvalError::type_mismatch("scalar", "list"))
        );
    }

    #[test]
    fn test_head_and_tail() {
        let xs = Value::List(vec![1.0, 2.0, 3.0]);
        assert_eq!(builtin_head(&[xs.clone()]), Ok(Value::Scalar(1.0)));
        assert_eq!(builtin_tail(&[xs]), Ok(Value::List(vec![2.0, 3.0])));
    }

    #[test]
    fn test_head_and_tail_reject_empty_list() {
        let empty = Value::List(vec![]);
        assert_eq!(
            builtin_head(&[empty.clone()]),
            Err(EvalError::empty_list("head"))
        );
        assert_eq!(builtin_tail(&[empty]), Err(EvalError::empty_list("tail")));
    }

    #[test]
    fn test_tail_of_single_element_list_is_empty() {
        assert_eq!(
            builtin_tail(&[Value::List(vec![7.0])]),
            Ok(Value::List(vec![]))
        );
    }

    #[test]
    fn test_head_requires_a_list() {
        assert_eq!(
            builtin_head(&[Value::Scalar(1.0)]),
            Err(EvalError::type_mismatch("list", "scalar"))
        );
    }
}
