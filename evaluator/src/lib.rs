//! Evaluation of typed arithmetic expressions.
//!
//! [`eval`] runs the whole pipeline: parse, kind check, evaluate. Callers that already hold a
//! [`Checked`] tree can call [`evaluate`] directly. Evaluation is a pure function of the
//! expression and the environment.

use analyzer::{Environment, Value, analyze_syntax, check_expr, first_diagnostic};

mod error;
mod eval;

pub use analyzer::Checked;
pub use error::{ArithmeticError, ErrorKind, EvalError, EvalResult};
pub use eval::evaluate;

/// Parses, checks and evaluates `source` against `env`.
///
/// Syntax errors report the earliest diagnostic; the rest are available through
/// [`analyzer::analyze_syntax`].
#[tracing::instrument(level = "debug", skip(env), fields(bindings = env.len()))]
pub fn eval(source: &str, env: &Environment) -> EvalResult<Value> {
    let syntax = analyze_syntax(source);
    if let Some(diag) = first_diagnostic(&syntax.diagnostics) {
        tracing::debug!(offset = diag.offset(), message = %diag.message, "syntax error");
        return Err(EvalError::Syntax {
            offset: diag.offset(),
            message: diag.message.clone(),
        });
    }

    let checked = check_expr(&syntax.expr, env)?;
    let value = evaluate(&checked, env)?;
    tracing::debug!(%value, kind = %value.kind(), "evaluated expression");
    Ok(value)
}
