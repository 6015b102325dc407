//! thisfunc interpreter library
//!
//! A tiny prefix-call expression language over scalars and lists. A
//! declaration `name <- body` installs a constant, a list, or an expression
//! over positional placeholders `#0`, `#1`, ...; calls evaluate by splicing
//! the rendered arguments into the stored body text and re-reading it,
//! which is also what lets a declaration call itself. The REPL and the
//! file runner are thin shells over the same [`Interpreter`].

pub mod error;
pub mod interp;
pub mod repl;
pub mod scan;
pub mod util;

pub use error::{EvalError, Result};
pub use interp::{Interpreter, Value};
