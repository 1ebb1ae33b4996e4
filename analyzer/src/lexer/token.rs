//! Lexer tokens.
//!
//! Token spans use UTF-8 byte offsets into the original source and are half-open `[start, end)`.
//! The lexer always emits a [`TokenKind::Eof`] token with an empty span at end of input.

use crate::span::Span;

pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    /// Digits only: `42`.
    Int,
    /// Digits with a fraction and/or exponent: `1.5`, `2e10`, `1.5e-3`.
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lit {
    pub kind: LitKind,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /* Expression-operator symbols. */
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

    /* Structural symbols */
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,

    /* Literals */
    /// Literal token.
    Literal(Lit),
    /// Identifier token.
    Ident(Symbol),

    /// A line comment token, excluding the leading `//`.
    LineComment(Symbol),
    /// A block comment token, excluding the `/*` `*/` delimiters.
    BlockComment(Symbol),
    /// Newline trivia (`\n`).
    Newline,

    /// End Of File
    Eof,
}

#[derive(Debug, Clone)]
/// A token with its source span.
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn can_begin_expr(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Ident(..) | TokenKind::OpenParen | TokenKind::Literal(..) | TokenKind::Minus
        )
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::LineComment(_) | TokenKind::BlockComment(_) | TokenKind::Newline
        )
    }

    /// Source spelling for punctuation tokens.
    pub fn spelling(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            _ => return None,
        })
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        if let Some(spelling) = self.spelling() {
            return format!("`{spelling}`");
        }

        match self {
            TokenKind::Ident(sym) => format!("identifier `{}`", sym.text),
            TokenKind::Literal(lit) => match lit.kind {
                LitKind::Int => "integer literal".into(),
                LitKind::Float => "float literal".into(),
            },
            TokenKind::Eof => "end of input".into(),
            TokenKind::LineComment(_) | TokenKind::BlockComment(_) => "comment".into(),
            TokenKind::Newline => "newline".into(),
            _ => format!("{self:?}"),
        }
    }
}
