use crate::ast::{BinOpKind, ExprKind};
use crate::{analyze_syntax, first_diagnostic};

fn offsets(source: &str) -> Vec<u32> {
    analyze_syntax(source)
        .diagnostics
        .iter()
        .map(|d| d.offset())
        .collect()
}

#[test]
fn test_missing_close_paren_points_at_end_of_input() {
    let result = analyze_syntax("(2 + 3");
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.message, "expected `)`, found end of input");
    assert_eq!((diag.span.start, diag.span.end), (6, 6));
    assert!(
        diag.labels
            .iter()
            .any(|l| l.message == "this '(' is not closed" && l.span.start == 0),
        "expected the opening delimiter to be labelled, got {diag:?}"
    );

    // Recovery still yields a group around the parsed operand.
    let inner = assert_group!(result.expr);
    assert_bin!(inner, BinOpKind::Plus);
}

#[test]
fn test_missing_close_paren_before_other_token() {
    let result = analyze_syntax("(1 + 2 3");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "expected `)`, found integer literal"
    );
    assert_eq!(result.diagnostics[0].offset(), 7);
}

#[test]
fn test_trailing_tokens_error() {
    let result = analyze_syntax("1 2");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "unexpected integer literal after expression"
    );
    assert_eq!(result.diagnostics[0].offset(), 2);
}

#[test]
fn test_unmatched_close_paren() {
    let result = analyze_syntax("1 + 2)");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "unexpected `)` after expression"
    );
    assert_eq!(result.diagnostics[0].offset(), 5);
}

#[test]
fn test_missing_operand() {
    let result = analyze_syntax("3 +");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "expected expression after `+`, found end of input"
    );
    assert_eq!(result.diagnostics[0].offset(), 3);

    match &result.expr.kind {
        ExprKind::Binary { right, .. } => assert_eq!(right.kind, ExprKind::Error),
        other => panic!("expected Binary, got {other:?}"),
    }
    assert!(!result.expr.is_well_formed());
}

#[test]
fn test_operator_in_operand_position() {
    let result = analyze_syntax("1 + * 2");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "expected expression after `+`, found `*`"
    );
    assert_eq!(result.diagnostics[0].offset(), 4);
}

#[test]
fn test_empty_input_and_empty_parens() {
    let result = analyze_syntax("");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "expected expression, found end of input"
    );
    assert_eq!(result.diagnostics[0].offset(), 0);

    assert_eq!(offsets("()"), vec![1]);
    assert_eq!(offsets("  // only a comment"), vec![19]);
}

#[test]
fn test_integer_literal_out_of_range() {
    let result = analyze_syntax("1 + 9223372036854775808");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].message,
        "integer literal `9223372036854775808` does not fit in 64 bits"
    );
    assert_eq!(result.diagnostics[0].offset(), 4);

    // The largest i64 is fine.
    assert!(analyze_syntax("9223372036854775807").diagnostics.is_empty());
}

#[test]
fn test_lexer_errors_are_reported_with_parse_errors() {
    let result = analyze_syntax("(1 + 2 # 3");
    let mut messages: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| (d.offset(), d.message.as_str()))
        .collect();
    messages.sort();
    assert_eq!(
        messages,
        vec![
            (7, "unexpected char '#'"),
            (10, "expected `)`, found end of input"),
        ]
    );

    let first = first_diagnostic(&result.diagnostics).map(|d| d.offset());
    assert_eq!(first, Some(7));
}

#[test]
fn test_multiple_errors_collected() {
    // Missing operand before ')' and an unexpected trailing token.
    let result = analyze_syntax("(1 + ) 3");
    assert_eq!(offsets("(1 + ) 3"), vec![5, 7]);
    assert_eq!(
        first_diagnostic(&result.diagnostics).map(|d| d.message.as_str()),
        Some("expected expression after `+`, found `)`")
    );
}

fn nested_parens(depth: usize, inner: &str) -> String {
    format!("{}{inner}{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let result = analyze_syntax(&nested_parens(256, "1 + 2"));
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let source = format!("{}x", "-".repeat(256));
    assert!(analyze_syntax(&source).diagnostics.is_empty());
}

#[test]
fn test_too_deep_parens_report_one_error() {
    let result = analyze_syntax(&nested_parens(10_000, "1"));
    assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.message, "expression is nested more than 256 levels deep");
    assert_eq!(diag.offset(), 256);
    // Points at the first `(` past the limit.
    assert_eq!(diag.span.end, 257);
    assert!(!result.expr.is_well_formed());
}

#[test]
fn test_too_deep_unary_minus() {
    let source = format!("{}1 + 2", "-".repeat(300));
    let result = analyze_syntax(&source);
    assert_eq!(offsets(&source), vec![256]);
    assert_bin!(result.expr, BinOpKind::Plus);
}

#[test]
fn test_too_deep_unclosed_parens_still_point_at_the_limit() {
    let source = "(".repeat(1_000);
    let result = analyze_syntax(&source);
    assert_eq!(
        first_diagnostic(&result.diagnostics).map(|d| d.offset()),
        Some(256)
    );
}
