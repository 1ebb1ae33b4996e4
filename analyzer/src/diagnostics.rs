use std::fmt::{self, Write as _};

use crate::analysis::TypeError;
use crate::source_map::SourceMap;
use crate::span::Span;

/// An error anchored at a byte span of the input, with optional secondary labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            span,
            labels: Vec::new(),
        }
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    /// Byte offset of the offending position.
    pub fn offset(&self) -> u32 {
        self.span.start
    }

    fn render(&self, sm: &SourceMap, out: &mut String) -> fmt::Result {
        let (line, col) = sm.line_col(self.span.start);
        writeln!(out, "error: {}", self.message)?;
        writeln!(
            out,
            "  --> <input>:{line}:{col} [{}..{}]",
            self.span.start, self.span.end
        )?;

        let mut labels: Vec<&Label> = self.labels.iter().collect();
        labels.sort_by_key(|l| (l.span.start, l.span.end));
        for label in labels {
            let (line, col) = sm.line_col(label.span.start);
            writeln!(
                out,
                "  = label: {line}:{col} [{}..{}] {}",
                label.span.start, label.span.end, label.message
            )?;
        }
        Ok(())
    }
}

impl From<&TypeError> for Diagnostic {
    fn from(err: &TypeError) -> Self {
        Diagnostic::error(err.span(), err.to_string())
    }
}

/// Collects diagnostics while lexing or parsing.
#[derive(Default, Debug)]
pub(crate) struct Diagnostics {
    pub diags: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn emit(&mut self, diag: Diagnostic) {
        self.diags.push(diag);
    }

    pub fn emit_error(&mut self, span: Span, message: impl Into<String>) {
        self.emit(Diagnostic::error(span, message));
    }
}

/// Returns the diagnostic with the smallest start offset, ties broken by emission order.
pub fn first_diagnostic(diags: &[Diagnostic]) -> Option<&Diagnostic> {
    diags.iter().min_by_key(|d| d.span.start)
}

/// Renders `diags` in source order, each with its 1-based line/column and byte range.
pub fn format_diagnostics(source: &str, mut diags: Vec<Diagnostic>) -> String {
    diags.sort_by(|a, b| {
        (a.span.start, a.span.end, &a.message).cmp(&(b.span.start, b.span.end, &b.message))
    });

    let sm = SourceMap::new(source);
    let mut out = String::new();
    for diag in &diags {
        // Writing into a String cannot fail.
        let _ = diag.render(&sm, &mut out);
    }
    out
}
