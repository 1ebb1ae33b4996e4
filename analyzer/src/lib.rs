//! Front end for a small typed arithmetic language.
//!
//! Pipeline: lex → parse → kind check. Evaluation lives in the `evaluator` crate.
//! All spans are UTF-8 byte offsets into the original source, using `[start, end)`.
use crate::parser::Parser;

pub mod analysis;
mod diagnostics;
mod lexer;
mod parser;
mod source_map;
mod span;
mod tests;

pub use parser::ParseOutput;
pub type SyntaxResult = ParseOutput;

/// Outcome of [`analyze`]: the syntax result plus the kind check, which only runs on input
/// without syntax diagnostics.
#[derive(Debug)]
pub struct AnalyzeResult {
    pub syntax: SyntaxResult,
    pub kind: Option<Result<NumKind, TypeError>>,
}

/// Lexes and parses `text`, collecting lexer and parser diagnostics.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn analyze_syntax(text: &str) -> SyntaxResult {
    let lex_output = lex(text);
    let token_cursor = parser::TokenCursor::new(text, lex_output.tokens);
    let mut parser = Parser::new(token_cursor);
    let mut output = parser.parse();
    output.diagnostics.extend(lex_output.diagnostics);
    tracing::debug!(diagnostics = output.diagnostics.len(), "parsed expression");
    output
}

pub fn analyze(text: &str, env: &Environment) -> AnalyzeResult {
    let syntax = analyze_syntax(text);
    let kind = (!syntax.has_errors())
        .then(|| analysis::check_expr(&syntax.expr, env).map(|checked| checked.kind));

    AnalyzeResult { syntax, kind }
}

pub use analysis::{
    Binding, Checked, Environment, ExprId, KindMap, NumKind, TypeError, Value, check_expr,
};
pub use diagnostics::{Diagnostic, Label, first_diagnostic, format_diagnostics};
pub use lexer::{Lit, LitKind, LexOutput, NodeId, Symbol, Token, TokenKind, lex};
pub use parser::ast;
pub use source_map::SourceMap;
pub use span::{Span, Spanned};
