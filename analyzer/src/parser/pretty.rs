use std::fmt;

use super::ast::{Expr, ExprKind};

impl Expr {
    /// Canonical source form with the fewest parentheses that keep the tree shape.
    ///
    /// Source groups are not preserved: `((1 + 2)) * 3` prints as `(1 + 2) * 3`, and
    /// `1 + (2 * 3)` prints as `1 + 2 * 3`.
    pub fn pretty(&self) -> String {
        self.pretty_with_prec(0)
    }

    fn pretty_with_prec(&self, parent_prec: u8) -> String {
        match &self.kind {
            ExprKind::Ident(sym) => sym.text.clone(),
            ExprKind::Lit(lit) => lit.symbol.text.clone(),
            ExprKind::Group { inner } => inner.pretty_with_prec(parent_prec),
            ExprKind::Unary { op, expr } => {
                let inner = expr.pretty_with_prec(op.prefix_binding_power());
                format!("{}{}", op.as_str(), inner)
            }
            ExprKind::Binary { op, left, right } => {
                let (l_bp, r_bp) = op.node.infix_binding_power();

                let l = left.pretty_with_prec(l_bp);
                let r = right.pretty_with_prec(r_bp);
                let combined = format!("{} {} {}", l, op.node.as_str(), r);

                if l_bp < parent_prec {
                    format!("({})", combined)
                } else {
                    combined
                }
            }
            ExprKind::Error => "<error>".to_string(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
