use analyzer::ast::{BinOpKind, Expr, ExprKind, UnOp};
use analyzer::{Checked, Environment, NumKind, Span, TypeError, Value};

use crate::error::{ArithmeticError, EvalResult};

/// Evaluates a checked expression against `env`.
///
/// Each binary node is computed at the wider of its annotated kind and its operands' kinds, so
/// an environment that binds a float where the check saw an int still never narrows. Integer
/// arithmetic is checked; float arithmetic follows IEEE-754 (`1.0 / 0.0` is `inf`).
pub fn evaluate(checked: &Checked<'_>, env: &Environment) -> EvalResult<Value> {
    Evaluator { checked, env }.eval_expr(checked.expr)
}

struct Evaluator<'c, 'e> {
    checked: &'c Checked<'e>,
    env: &'c Environment,
}

impl Evaluator<'_, '_> {
    fn eval_expr(&self, expr: &Expr) -> EvalResult<Value> {
        let value = match &expr.kind {
            ExprKind::Lit(lit) => {
                Value::from_lit(lit).ok_or(TypeError::Malformed { span: expr.span })?
            }
            ExprKind::Ident(sym) => {
                let value = self.env.lookup(&sym.text);
                value.ok_or_else(|| TypeError::UnresolvedReference {
                    name: sym.text.clone(),
                    span: expr.span,
                })?
            }
            ExprKind::Group { inner } => self.eval_expr(inner)?,
            ExprKind::Unary { op, expr: inner } => {
                let operand = self.eval_expr(inner)?;
                unary(*op, operand, expr.span)?
            }
            ExprKind::Binary { op, left, right } => {
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                let operands = lhs.kind().widen(rhs.kind());
                let kind = match self.checked.kind_of(expr) {
                    Some(annotated) => annotated.widen(operands),
                    None => operands,
                };
                binary(op.node, kind, lhs, rhs, expr.span)?
            }
            ExprKind::Error => return Err(TypeError::Malformed { span: expr.span }.into()),
        };

        tracing::trace!(id = expr.id, %value, "evaluated node");
        Ok(value)
    }
}

fn unary(op: UnOp, operand: Value, span: Span) -> Result<Value, ArithmeticError> {
    match (op, operand) {
        (UnOp::Neg, Value::Int(v)) => v
            .checked_neg()
            .map(Value::Int)
            .ok_or(ArithmeticError::Overflow { span }),
        (UnOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
    }
}

fn binary(
    op: BinOpKind,
    kind: NumKind,
    lhs: Value,
    rhs: Value,
    span: Span,
) -> Result<Value, ArithmeticError> {
    match (kind, lhs.as_i64(), rhs.as_i64()) {
        (NumKind::Int, Some(l), Some(r)) => int_binary(op, l, r, span).map(Value::Int),
        _ => Ok(Value::Float(float_binary(op, lhs.as_f64(), rhs.as_f64()))),
    }
}

fn int_binary(op: BinOpKind, l: i64, r: i64, span: Span) -> Result<i64, ArithmeticError> {
    let result = match op {
        BinOpKind::Plus => l.checked_add(r),
        BinOpKind::Minus => l.checked_sub(r),
        BinOpKind::Star => l.checked_mul(r),
        BinOpKind::Slash | BinOpKind::Percent if r == 0 => {
            return Err(ArithmeticError::DivisionByZero { span });
        }
        // Truncates toward zero; `%` takes the sign of the dividend.
        BinOpKind::Slash => l.checked_div(r),
        BinOpKind::Percent => l.checked_rem(r),
    };
    result.ok_or(ArithmeticError::Overflow { span })
}

fn float_binary(op: BinOpKind, l: f64, r: f64) -> f64 {
    match op {
        BinOpKind::Plus => l + r,
        BinOpKind::Minus => l - r,
        BinOpKind::Star => l * r,
        BinOpKind::Slash => l / r,
        BinOpKind::Percent => l % r,
    }
}
