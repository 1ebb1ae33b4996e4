use crate::{ParseOutput, analyze_syntax};

/// Routes `tracing` output through the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parses `source` and asserts that it produced no diagnostics.
pub fn parse_ok(source: &str) -> ParseOutput {
    let parsed = analyze_syntax(source);
    assert!(
        parsed.diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parsed.diagnostics
    );
    parsed
}

macro_rules! assert_bin {
    ($e:expr, $op:pat) => {{
        match &($e).kind {
            $crate::ast::ExprKind::Binary {
                op, left, right, ..
            } if matches!(op.node, $op) => (left.as_ref(), right.as_ref()),
            other => panic!("expected Binary({}), got {:?}", stringify!($op), other),
        }
    }};
}

macro_rules! assert_lit {
    ($e:expr, $kind:expr, $text:expr) => {{
        match &($e).kind {
            $crate::ast::ExprKind::Lit(lit) if lit.kind == $kind => {
                assert_eq!(lit.symbol.text, $text);
            }
            other => panic!("expected {:?} literal, got {:?}", $kind, other),
        }
    }};
}

macro_rules! assert_lit_int {
    ($e:expr, $value:expr) => {
        assert_lit!($e, $crate::LitKind::Int, $value.to_string())
    };
}

macro_rules! assert_ident {
    ($e:expr, $name:expr) => {{
        match &($e).kind {
            $crate::ast::ExprKind::Ident(sym) => assert_eq!(sym.text, $name),
            other => panic!("expected Ident, got {:?}", other),
        }
    }};
}

macro_rules! assert_group {
    ($e:expr) => {{
        match &($e).kind {
            $crate::ast::ExprKind::Group { inner } => inner.as_ref(),
            other => panic!("expected Group, got {:?}", other),
        }
    }};
}

macro_rules! assert_neg {
    ($e:expr) => {{
        match &($e).kind {
            $crate::ast::ExprKind::Unary {
                op: $crate::ast::UnOp::Neg,
                expr,
            } => expr.as_ref(),
            other => panic!("expected Unary(Neg), got {:?}", other),
        }
    }};
}
