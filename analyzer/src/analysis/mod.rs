//! Numeric kind checking.
//!
//! Assigns every node of a parsed [`Expr`] a [`NumKind`] bottom-up, following the widening
//! rule: Int with Int is Int, anything involving Float is Float. Kinds live in a side table
//! keyed by node id ([`KindMap`]) rather than in the tree itself.

use std::collections::HashMap;

use thiserror::Error;

use crate::ast::{Expr, ExprKind};
use crate::lexer::{LitKind, NodeId};
use crate::span::Span;

mod env;
pub use env::{Binding, Environment, NumKind, Value};

pub type ExprId = NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unresolved reference `{name}`")]
    UnresolvedReference { name: String, span: Span },

    #[error("malformed expression")]
    Malformed { span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UnresolvedReference { span, .. } | TypeError::Malformed { span } => *span,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindMap {
    inner: HashMap<ExprId, NumKind>,
}

impl KindMap {
    pub fn insert(&mut self, id: ExprId, kind: NumKind) {
        self.inner.insert(id, kind);
    }

    pub fn get(&self, id: ExprId) -> Option<NumKind> {
        self.inner.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

/// A type-checked expression: the tree plus the kind of every node.
#[derive(Debug, Clone)]
pub struct Checked<'e> {
    pub expr: &'e Expr,
    /// Kind of the root node.
    pub kind: NumKind,
    pub kinds: KindMap,
}

impl Checked<'_> {
    pub fn kind_of(&self, expr: &Expr) -> Option<NumKind> {
        self.kinds.get(expr.id)
    }
}

/// Checks `expr` against the kinds of the bindings in `env`.
///
/// Fails on the first (leftmost) reference that `env` does not bind, and on recovery
/// placeholders left by the parser.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_expr<'e>(expr: &'e Expr, env: &Environment) -> Result<Checked<'e>, TypeError> {
    let mut kinds = KindMap::default();
    let kind = infer_kind(expr, env, &mut kinds)?;
    tracing::debug!(%kind, nodes = kinds.len(), "checked expression");
    Ok(Checked { expr, kind, kinds })
}

fn infer_kind(expr: &Expr, env: &Environment, map: &mut KindMap) -> Result<NumKind, TypeError> {
    let kind = match &expr.kind {
        ExprKind::Lit(lit) => match lit.kind {
            LitKind::Int => NumKind::Int,
            LitKind::Float => NumKind::Float,
        },
        ExprKind::Ident(sym) => {
            let kind = env.kind_of(&sym.text);
            kind.ok_or_else(|| TypeError::UnresolvedReference {
                name: sym.text.clone(),
                span: expr.span,
            })?
        }
        ExprKind::Group { inner } => infer_kind(inner, env, map)?,
        ExprKind::Unary { expr: inner, .. } => infer_kind(inner, env, map)?,
        ExprKind::Binary { left, right, .. } => {
            let l = infer_kind(left, env, map)?;
            let r = infer_kind(right, env, map)?;
            l.widen(r)
        }
        ExprKind::Error => return Err(TypeError::Malformed { span: expr.span }),
    };

    map.insert(expr.id, kind);
    Ok(kind)
}
