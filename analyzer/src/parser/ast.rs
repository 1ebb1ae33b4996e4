use crate::lexer::{Lit, NodeId, Symbol};
use crate::span::{Span, Spanned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
}

pub type BinOp = Spanned<BinOpKind>;

impl BinOpKind {
    /// Returns the Pratt binding power `(left_bp, right_bp)` for an infix operator.
    ///
    /// Larger numbers bind tighter. Every operator is left-associative
    /// (`a - b - c` parses as `(a - b) - c`), so `right_bp = left_bp + 1`.
    pub fn infix_binding_power(&self) -> (u8, u8) {
        use BinOpKind::*;

        match self {
            Plus | Minus => (1, 2),
            Star | Slash | Percent => (3, 4),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinOpKind::Plus => "+",
            BinOpKind::Minus => "-",
            BinOpKind::Star => "*",
            BinOpKind::Slash => "/",
            BinOpKind::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `-`
    Neg,
}

impl UnOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
        }
    }

    /// Returns the Pratt binding power for a prefix operator.
    ///
    /// Binds tighter than every infix operator: `-a * b` is `(-a) * b`.
    pub fn prefix_binding_power(&self) -> u8 {
        match self {
            UnOp::Neg => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// Reference to a binding in the environment.
    Ident(Symbol),
    Lit(Lit),
    Group {
        inner: Box<Expr>,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Placeholder produced by error recovery.
    Error,
}

impl Expr {
    /// Returns true if this tree contains no recovery placeholders.
    pub fn is_well_formed(&self) -> bool {
        match &self.kind {
            ExprKind::Ident(_) | ExprKind::Lit(_) => true,
            ExprKind::Group { inner } => inner.is_well_formed(),
            ExprKind::Unary { expr, .. } => expr.is_well_formed(),
            ExprKind::Binary { left, right, .. } => {
                left.is_well_formed() && right.is_well_formed()
            }
            ExprKind::Error => false,
        }
    }
}
