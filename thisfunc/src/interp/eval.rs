//! Declaration engine and expression evaluator

use std::collections::HashMap;

use crate::error::{EvalError, Result};
use crate::interp::builtins;
use crate::interp::function::{Function, FunctionKind};
use crate::interp::value::Value;
use crate::scan::{extract_placeholders, split_arguments};
use crate::util::{find_similar_name, format_suggestion_hint};

/// Stack growth parameters for deeply recursive declarations
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// The interpreter: a function registry, a declared-list table, and a
/// recursive evaluator over expression text.
///
/// Each instance owns its registries outright; independent instances share
/// nothing. Evaluation reads the registries but never mutates them, so one
/// evaluation is in flight at a time per instance and recursion is plain
/// procedure recursion.
pub struct Interpreter {
    /// Every callable name: builtins, special forms, and user declarations
    functions: HashMap<String, Function>,
    /// Declared lists, readable both by bare identifier and through the
    /// zero-argument wrapper registered under the same name
    lists: HashMap<String, Vec<f64>>,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut functions = HashMap::new();
        builtins::install(&mut functions);
        Interpreter {
            functions,
            lists: HashMap::new(),
        }
    }

    /// Shell entry point: a line containing `<-` is a declaration and
    /// produces no value, anything else is evaluated.
    pub fn execute(&mut self, line: &str) -> Result<Option<Value>> {
        if line.contains("<-") {
            self.declare_function(line)?;
            Ok(None)
        } else {
            self.evaluate(line).map(Some)
        }
    }

    /// Install a `name <- body` declaration.
    ///
    /// The body is classified as a list literal, a placeholder expression,
    /// or a constant, in that order. Placeholder expressions are stored as
    /// source text and substituted at call time; every call re-resolves
    /// names through the live registry, so a body may freely call the name
    /// being declared (or names declared later), which is what makes
    /// recursion work. Redeclaring a name replaces the old entry entirely,
    /// including any declared list previously stored under it.
    pub fn declare_function(&mut self, declaration: &str) -> Result<()> {
        let Some(arrow) = declaration.find("<-") else {
            return Err(EvalError::syntax(format!(
                "Invalid declaration, expected `name <- body`: `{}`",
                declaration.trim()
            )));
        };
        let name = declaration[..arrow].trim();
        let body = declaration[arrow + 2..].trim();

        if body.starts_with("list(") && body.ends_with(')') {
            let interior = &body[5..body.len() - 1];
            let mut items = Vec::new();
            for piece in split_arguments(interior) {
                let token = piece.trim();
                let value = token
                    .parse()
                    .map_err(|_| EvalError::syntax(format!("Invalid number in list: `{token}`")))?;
                items.push(value);
            }
            self.lists.insert(name.to_string(), items);
            self.functions.insert(name.to_string(), Function::list(name));
        } else if body.contains('#') {
            self.lists.remove(name);
            self.functions
                .insert(name.to_string(), Function::expression(body));
        } else {
            let value = body.parse().map_err(|_| {
                EvalError::syntax(format!("Invalid constant declaration: `{body}`"))
            })?;
            self.lists.remove(name);
            self.functions
                .insert(name.to_string(), Function::constant(value));
        }
        Ok(())
    }

    /// Evaluate expression text to a value, growing the stack as recursive
    /// declarations nest. Depth is bounded only by memory; termination of a
    /// recursive declaration is the caller's responsibility.
    pub fn evaluate(&self, expression: &str) -> Result<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_inner(expression)
        })
    }

    fn eval_inner(&self, expression: &str) -> Result<Value> {
        let text = expression.trim();

        // Numeric literal: a leading digit, or a minus sign then a digit
        let bytes = text.as_bytes();
        let numeric = match bytes.first() {
            Some(b) if b.is_ascii_digit() => true,
            Some(&b'-') => bytes.get(1).is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        };
        if numeric {
            return text
                .parse()
                .map(Value::Scalar)
                .map_err(|_| EvalError::syntax(format!("Invalid number: `{text}`")));
        }

        // A declared list named outright, bypassing its wrapper function
        if let Some(items) = self.lists.get(text) {
            return Ok(Value::List(items.clone()));
        }

        // A bare function name evaluates to a reference, not a call
        if !text.contains('(') && self.functions.contains_key(text) {
            return Ok(Value::Name(text.to_string()));
        }

        // Call syntax: the callee is everything before the first `(`, the
        // argument list runs to the last `)`. Text after the last `)` is
        // ignored.
        let (open, close) = match (text.find('('), text.rfind(')')) {
            (Some(open), Some(close)) if close > open => (open, close),
            _ => {
                return Err(EvalError::syntax(format!(
                    "Invalid function syntax: `{text}`"
                )));
            }
        };
        let name = text[..open].trim();
        let argument_text = &text[open + 1..close];

        let function = self.lookup(name)?;
        let pieces = split_arguments(argument_text);

        // `if` receives raw text so that only the taken branch is ever
        // evaluated; everything else receives evaluated values.
        let args: Vec<Value> = if name == "if" {
            pieces
                .iter()
                .map(|piece| Value::Name(piece.trim().to_string()))
                .collect()
        } else {
            pieces
                .iter()
                .map(|piece| self.evaluate(piece))
                .collect::<Result<_>>()?
        };

        self.invoke(function, &args)
    }

    /// Dispatch a registry entry over prepared arguments. `map` and
    /// `filter` call this once per list element, skipping call-syntax
    /// parsing.
    pub(crate) fn invoke(&self, function: &Function, args: &[Value]) -> Result<Value> {
        match &function.kind {
            FunctionKind::Builtin(implementation) => implementation(args),
            FunctionKind::Special(implementation) => implementation(self, args),
            FunctionKind::Const(value) => Ok(Value::Scalar(*value)),
            FunctionKind::List(name) => {
                Ok(Value::List(self.lists.get(name).cloned().unwrap_or_default()))
            }
            FunctionKind::Expr => {
                let substituted = substitute_placeholders(&function.source, args)?;
                self.evaluate(&substituted)
            }
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<&Function> {
        self.functions.get(name).ok_or_else(|| self.unknown(name))
    }

    /// Whether `name` may be handed to `map`/`filter`: its stored source
    /// references at most one distinct placeholder index. Builtins and
    /// constants store no source, so they pass vacuously; a two-argument
    /// builtin still fails at call time when it receives one element.
    pub fn is_single_argument(&self, name: &str) -> Result<bool> {
        let function = self.lookup(name)?;
        let placeholders = extract_placeholders(&function.source);
        Ok(placeholders.windows(2).all(|pair| pair[0] == pair[1]))
    }

    /// Build the unknown-function error, suggesting the closest registered
    /// name when one is near enough.
    fn unknown(&self, name: &str) -> EvalError {
        let candidates = self.functions.keys().map(String::as_str);
        let suggestion = find_similar_name(name, candidates, 2);
        EvalError::unknown_function(name, format_suggestion_hint(suggestion))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every `#i` token in `body` with the decimal rendering of the
/// i-th argument.
///
/// Arguments whose token never occurs are ignored without coercion, and
/// placeholder indices beyond the argument count stay in the text to fail
/// downstream. Replacement goes through `f64`'s `Display`, so the spliced
/// text is a plain decimal numeral that re-parses to the same value.
/// Replacement is plain substring search, token by token: with eleven or
/// more arguments, replacing `#1` also rewrites the prefix of a later
/// `#10`.
fn substitute_placeholders(body: &str, args: &[Value]) -> Result<String> {
    let mut text = body.to_string();
    for (index, argument) in args.iter().enumerate() {
        let token = format!("#{index}");
        if !text.contains(&token) {
            continue;
        }
        let rendering = argument.as_scalar()?.to_string();
        text = text.replace(&token, &rendering);
    }
    Ok(text)
}
