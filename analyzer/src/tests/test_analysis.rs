use crate::analysis::{Environment, NumKind, TypeError, Value, check_expr};
use crate::ast::ExprKind;
use crate::tests::common::{init_tracing, parse_ok};
use crate::{Span, analyze, analyze_syntax};

fn kind_of(source: &str, env: &Environment) -> Result<NumKind, TypeError> {
    let parsed = parse_ok(source);
    check_expr(&parsed.expr, env).map(|checked| checked.kind)
}

#[test]
fn test_integer_only_expressions_are_int() {
    let env = Environment::new().with("n", 3i64);
    for source in ["1", "3 + 4 * 2", "-(7 % n) / 2", "(1 - 2) * (3 + n)"] {
        assert_eq!(kind_of(source, &env), Ok(NumKind::Int), "{source}");
    }
}

#[test]
fn test_any_float_widens_to_float() {
    let env = Environment::new().with("n", 3i64).with("rate", 0.5);
    for source in ["1.0", "1 + 2.0", "2e3 - 1", "n * rate", "-(rate)", "(1 + 2) * (3 + 4.5)"] {
        assert_eq!(kind_of(source, &env), Ok(NumKind::Float), "{source}");
    }
}

#[test]
fn test_every_node_is_annotated() {
    init_tracing();
    let env = Environment::new().with("x", 2.5);
    let parsed = parse_ok("3 + 4 * (2 - x)");
    let checked = check_expr(&parsed.expr, &env).unwrap();

    assert_eq!(checked.kind, NumKind::Float);
    assert_eq!(checked.kinds.len(), 8);

    let ExprKind::Binary { left, right, .. } = &parsed.expr.kind else {
        panic!("expected Binary, got {:?}", parsed.expr.kind);
    };
    assert_eq!(checked.kind_of(left), Some(NumKind::Int));
    assert_eq!(checked.kind_of(right), Some(NumKind::Float));
}

#[test]
fn test_unresolved_reference() {
    let err = kind_of("x + 1", &Environment::new()).unwrap_err();
    assert_eq!(
        err,
        TypeError::UnresolvedReference {
            name: "x".into(),
            span: Span::new(0, 1),
        }
    );
    assert_eq!(err.to_string(), "unresolved reference `x`");
}

#[test]
fn test_first_unresolved_reference_wins() {
    let env = Environment::new().with("b", 1i64);
    let err = kind_of("b * (c + d)", &env).unwrap_err();
    match err {
        TypeError::UnresolvedReference { name, span } => {
            assert_eq!(name, "c");
            assert_eq!(span.start, 5);
        }
        other => panic!("expected unresolved reference, got {other:?}"),
    }
}

#[test]
fn test_error_nodes_are_malformed() {
    let parsed = analyze_syntax("1 +");
    let err = check_expr(&parsed.expr, &Environment::new()).unwrap_err();
    assert_eq!(err, TypeError::Malformed { span: Span::new(3, 3) });
}

#[test]
fn test_analyze_skips_checking_on_syntax_errors() {
    let result = analyze("(x", &Environment::new());
    assert!(result.syntax.has_errors());
    assert!(result.kind.is_none());

    let env = Environment::new().with("x", 1i64);
    let result = analyze("x / 2", &env);
    assert_eq!(result.kind, Some(Ok(NumKind::Int)));
}

#[test]
fn test_widening_rule() {
    use NumKind::*;
    assert_eq!(Int.widen(Int), Int);
    assert_eq!(Int.widen(Float), Float);
    assert_eq!(Float.widen(Int), Float);
    assert_eq!(Float.widen(Float), Float);
}

#[test]
fn test_environment_bindings_are_immutable() {
    let mut env = Environment::new();
    assert!(env.insert("x", 1i64));
    assert!(!env.insert("x", 2.0));
    assert_eq!(env.lookup("x"), Some(Value::Int(1)));
    assert_eq!(env.len(), 1);

    let env: Environment = [("a", Value::Int(1)), ("b", Value::Float(2.0)), ("a", Value::Int(9))]
        .into_iter()
        .collect();
    let names: Vec<_> = env.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(env.kind_of("b"), Some(NumKind::Float));
    assert_eq!(env.kind_of("zzz"), None);
}

#[test]
fn test_environment_serializes_in_insertion_order() {
    let env = Environment::new().with("z", 1i64).with("a", 0.5);
    let json = serde_json::to_string(&env).unwrap();
    assert_eq!(
        json,
        r#"[{"name":"z","value":{"Int":1}},{"name":"a","value":{"Float":0.5}}]"#
    );
}

#[test]
fn test_environment_deserialize_keeps_first_binding() {
    let json = r#"[
        {"name":"rate","value":{"Float":0.5}},
        {"name":"n","value":{"Int":3}},
        {"name":"rate","value":{"Int":9}}
    ]"#;
    let env: Environment = serde_json::from_str(json).unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env.lookup("rate"), Some(Value::Float(0.5)));
    assert_eq!(env.lookup("n"), Some(Value::Int(3)));

    let back: Environment = serde_json::from_str(&serde_json::to_string(&env).unwrap()).unwrap();
    assert_eq!(back, env);

    assert!(serde_json::from_str::<Environment>(r#"{"x":1}"#).is_err());
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(-11).to_string(), "-11");
    assert_eq!(Value::Float(3.0).to_string(), "3.0");
    assert_eq!(Value::Float(0.25).to_string(), "0.25");
    assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
    assert_eq!(NumKind::Float.to_string(), "float");
}
