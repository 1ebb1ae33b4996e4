//! Parser for arithmetic expressions.
//!
//! Inputs: a [`TokenCursor`] over lexer tokens that include trivia and an explicit EOF token.
//! Spans are UTF-8 byte offsets into the original source, with half-open semantics `[start, end)`.
//! The parser skips trivia for `cur()`/`bump()`, but spans remain byte-based.
//!
//! Responsibility: build the AST plus parse diagnostics only. Type checking is handled
//! separately in `analysis`.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::lexer::{NodeId, Token, TokenKind};
use crate::span::Span;

pub mod ast;
use ast::{Expr, ExprKind};
mod expr;
mod pretty;
mod tokenstream;
pub use tokenstream::TokenCursor;

pub struct Parser<'a> {
    token_cursor: TokenCursor<'a>,
    next_id: NodeId,
    /// Open `(` and unary `-` enclosing the current position.
    depth: u32,
    diagnostics: Diagnostics,
}

#[derive(Debug)]
pub struct ParseOutput {
    pub expr: Expr,
    pub diagnostics: Vec<Diagnostic>,
    pub tokens: Vec<Token>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl<'a> Parser<'a> {
    pub fn new(mut token_cursor: TokenCursor<'a>) -> Self {
        if !matches!(
            token_cursor.tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ) {
            let end = token_cursor.source.len() as u32;
            token_cursor.tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::empty(end),
            });
        }

        Parser {
            token_cursor,
            next_id: 0,
            depth: 0,
            diagnostics: Diagnostics::default(),
        }
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn cur(&self) -> Token {
        let idx = self.next_nontrivia_idx(self.token_cursor.pos);
        self.token_cursor.tokens[idx].clone()
    }

    fn bump(&mut self) -> Token {
        let idx = self.next_nontrivia_idx(self.token_cursor.pos);
        let tok = self.token_cursor.tokens[idx].clone();
        self.token_cursor.pos = idx + 1;
        tok
    }

    fn last_bumped(&self) -> Option<&Token> {
        self.token_cursor
            .pos
            .checked_sub(1)
            .and_then(|i| self.token_cursor.tokens.get(i))
    }

    fn last_bumped_end(&self) -> u32 {
        self.last_bumped()
            .map(|t| t.span.end)
            .unwrap_or(self.cur().span.end)
    }

    fn lit_text(&self, span: Span) -> &'a str {
        &self.token_cursor.source[span.start as usize..span.end as usize]
    }

    fn next_nontrivia_idx(&self, mut idx: usize) -> usize {
        while idx < self.token_cursor.tokens.len() {
            if self.token_cursor.tokens[idx].is_trivia() {
                idx += 1;
                continue;
            }
            break;
        }
        idx.min(self.token_cursor.tokens.len().saturating_sub(1))
    }

    fn mk_expr(&mut self, span: Span, kind: ExprKind) -> Expr {
        Expr {
            id: self.alloc_id(),
            span,
            kind,
        }
    }
}
