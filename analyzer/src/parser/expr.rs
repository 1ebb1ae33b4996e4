//! Expression parsing (Pratt parser).
//!
//! Produces an AST plus parse diagnostics. Spans are UTF-8 byte offsets with half-open semantics
//! `[start, end)`.

use super::ast::{BinOp, BinOpKind, Expr, ExprKind, UnOp};
use super::{ParseOutput, Parser};
use crate::diagnostics::Diagnostic;
use crate::lexer::{Lit, LitKind, Symbol, Token, TokenKind};
use crate::span::Span;

/// Tokens the parser resynchronises on after an error.
const SYNC: [TokenKind; 2] = [TokenKind::CloseParen, TokenKind::Eof];

/// Deepest nesting of `(` and unary `-` the parser accepts. Checking and evaluation recurse
/// over the tree, so this also bounds their stack use.
const MAX_NESTING: u32 = 256;

impl<'a> Parser<'a> {
    /// Parser's entry point
    ///
    /// Supported forms:
    /// - literals: `1`, `2.5`, `1e3`
    /// - references: `x`, `rate_2`
    /// - grouping(parentheses): `(expr)`
    /// - unary: [`UnOp`]
    /// - binary: [`BinOpKind`]
    ///
    /// ```text
    /// `1 + 2 * 3` parses as `1 + (2 * 3)`
    /// `8 - 4 - 2` parses as `(8 - 4) - 2`   // left-associative
    /// `-a * b`    parses as `(-a) * b`
    /// ```
    ///
    /// Diagnostics point at the offending token; at end of input that is the empty span
    /// `[len, len)`.
    pub fn parse(&mut self) -> ParseOutput {
        let expr = self.parse_expr();

        let cur = self.cur();
        if cur.kind != TokenKind::Eof {
            self.diagnostics.emit_error(
                cur.span,
                format!("unexpected {} after expression", cur.kind.describe()),
            );
        }

        ParseOutput {
            expr,
            diagnostics: std::mem::take(&mut self.diagnostics.diags),
            tokens: self.token_cursor.tokens.clone(),
        }
    }

    /// Parses an expression.
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_expr_assoc_with(0)
    }

    /// Parses an associative expression with operators of at least `min_bp` precedence.
    fn parse_expr_assoc_with(&mut self, min_bp: u8) -> Expr {
        let lhs = self.parse_expr_prefix();
        self.parse_expr_assoc_rest_with(min_bp, lhs)
    }

    /// Parses the rest of an associative expression (i.e. the part after the lhs) with operators
    /// of at least `min_bp` precedence.
    fn parse_expr_assoc_rest_with(&mut self, min_bp: u8, lhs: Expr) -> Expr {
        let mut lhs = lhs;

        loop {
            let Some(op) = self.peek_binop_kind() else {
                break;
            };

            let (l_bp, r_bp) = op.infix_binding_power();
            if l_bp < min_bp {
                break;
            }

            let op_tok = self.bump(); // operator token

            let rhs = if self.cur().can_begin_expr() {
                self.parse_expr_assoc_with(r_bp)
            } else {
                self.recover_from_infix(op_tok.clone())
            };

            let span = lhs.span.to(rhs.span);
            lhs = self.mk_expr(
                span,
                ExprKind::Binary {
                    op: BinOp {
                        node: op,
                        span: op_tok.span,
                    },
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
            );
        }

        lhs
    }

    /// Parses a prefix-unary-operator expr.
    /// Note: when adding new unary operators, don't forget to adjust [`Token::can_begin_expr()`]
    fn parse_expr_prefix(&mut self) -> Expr {
        let nests = matches!(self.cur().kind, TokenKind::Minus | TokenKind::OpenParen);
        if nests && self.depth >= MAX_NESTING {
            return self.recover_from_nesting();
        }

        self.depth += 1;
        let expr = match self.cur().kind {
            // `-expr`
            TokenKind::Minus => self.parse_expr_unary(UnOp::Neg),
            _ => self.parse_expr_primary(),
        };
        self.depth -= 1;
        expr
    }

    fn parse_expr_unary(&mut self, op: UnOp) -> Expr {
        let tok = self.bump();
        let expr = if self.cur().can_begin_expr() {
            self.parse_expr_assoc_with(op.prefix_binding_power())
        } else {
            self.recover_from_infix(tok.clone())
        };
        let span = tok.span.to(expr.span);
        self.mk_expr(
            span,
            ExprKind::Unary {
                op,
                expr: Box::new(expr),
            },
        )
    }

    fn peek_binop_kind(&self) -> Option<BinOpKind> {
        match self.cur().kind {
            TokenKind::Plus => Some(BinOpKind::Plus),
            TokenKind::Minus => Some(BinOpKind::Minus),
            TokenKind::Star => Some(BinOpKind::Star),
            TokenKind::Slash => Some(BinOpKind::Slash),
            TokenKind::Percent => Some(BinOpKind::Percent),
            _ => None,
        }
    }

    /// Parses a primary expression: `a`, `1`, `1.5`, `(expr)`.
    fn parse_expr_primary(&mut self) -> Expr {
        match self.cur().kind {
            TokenKind::Ident(_) => self.parse_ident(),

            TokenKind::Literal(lit) => match lit.kind {
                LitKind::Int => self.parse_int_literal(),
                LitKind::Float => self.parse_float_literal(),
            },

            TokenKind::OpenParen => self.parse_expr_parens(),

            _ => {
                let tok = self.cur();
                self.diagnostics.emit_error(
                    tok.span,
                    format!("expected expression, found {}", tok.kind.describe()),
                );
                self.error_expr_bump()
            }
        }
    }

    fn parse_ident(&mut self) -> Expr {
        let tok = self.bump(); // identifier

        let sym = match tok.kind {
            TokenKind::Ident(sym) => sym,
            _ => unreachable!(),
        };

        self.mk_expr(tok.span, ExprKind::Ident(sym))
    }

    fn parse_int_literal(&mut self) -> Expr {
        let tok = self.bump(); // integer literal
        let text = self.lit_text(tok.span);

        if text.parse::<i64>().is_err() {
            self.diagnostics.emit_error(
                tok.span,
                format!("integer literal `{text}` does not fit in 64 bits"),
            );
            return self.mk_expr(tok.span, ExprKind::Error);
        }

        self.mk_expr(
            tok.span,
            ExprKind::Lit(Lit {
                kind: LitKind::Int,
                symbol: Symbol { text: text.into() },
            }),
        )
    }

    fn parse_float_literal(&mut self) -> Expr {
        let tok = self.bump(); // float literal
        self.mk_expr(
            tok.span,
            ExprKind::Lit(Lit {
                kind: LitKind::Float,
                symbol: Symbol {
                    text: self.lit_text(tok.span).into(),
                },
            }),
        )
    }

    fn parse_expr_parens(&mut self) -> Expr {
        let lparen = self.bump(); // '('
        let inner = self.parse_expr_assoc_with(0);

        if self.cur().kind == TokenKind::CloseParen {
            self.bump();
        } else {
            let found = self.cur();
            self.diagnostics.emit(
                Diagnostic::error(
                    found.span,
                    format!("expected `)`, found {}", found.kind.describe()),
                )
                .with_label(lparen.span, "this '(' is not closed"),
            );
            self.recover_to(&SYNC);
            if self.cur().kind == TokenKind::CloseParen {
                self.bump();
            }
        }

        let span = Span {
            start: lparen.span.start,
            end: self.last_bumped_end(),
        };
        self.mk_expr(
            span,
            ExprKind::Group {
                inner: Box::new(inner),
            },
        )
    }

    fn error_expr_at(&mut self, span: Span) -> Expr {
        self.mk_expr(span, ExprKind::Error)
    }

    /// Error node for the current token; consumes it unless it is a synchronization token.
    fn error_expr_bump(&mut self) -> Expr {
        let tok = self.cur();
        if !SYNC.contains(&tok.kind) {
            self.bump();
        }
        self.mk_expr(tok.span, ExprKind::Error)
    }

    /// Skip tokens until reaching a synchronization token.
    ///
    /// This is used after emitting a diagnostic to avoid cascading errors.
    ///
    /// ```text
    /// source: "(a + b"
    /// parsing: expects ')', finds Eof
    /// recovery: recover_to([CloseParen, Eof]) stops at Eof
    ///
    /// source: "(a + * b) + 1"
    /// parsing: expects an expression after '+', finds '*'
    /// recovery: skips `* b`, stops at ')'
    /// ```
    fn recover_to(&mut self, sync: &[TokenKind]) {
        while !sync.iter().any(|k| self.cur().kind == *k) {
            if self.cur().kind == TokenKind::Eof {
                return;
            }
            self.bump();
        }
    }

    /// Reports an operand nested past [`MAX_NESTING`] and skips it: its leading `-`s, then
    /// a balanced `( ... )` group or a single operand token.
    ///
    /// ```text
    /// source: "(((...(1 + 2)...)))" with 300 levels
    /// reports: the 257th '('
    /// skips:   from that '(' to the ')' closing it; the 256 outer groups parse normally
    /// ```
    fn recover_from_nesting(&mut self) -> Expr {
        let start = self.cur();
        self.diagnostics.emit_error(
            start.span,
            format!("expression is nested more than {MAX_NESTING} levels deep"),
        );

        while self.cur().kind == TokenKind::Minus {
            self.bump();
        }
        if self.cur().kind == TokenKind::OpenParen {
            let mut open = 0u32;
            loop {
                match self.cur().kind {
                    TokenKind::Eof => break,
                    TokenKind::OpenParen => open += 1,
                    TokenKind::CloseParen => open -= 1,
                    _ => {}
                }
                self.bump();
                if open == 0 {
                    break;
                }
            }
        } else if self.cur().can_begin_expr() {
            self.bump();
        }

        let span = Span {
            start: start.span.start,
            end: self.last_bumped_end(),
        };
        self.error_expr_at(span)
    }

    /// Reports a missing operand after `op_tok` and returns an error node in its place.
    fn recover_from_infix(&mut self, op_tok: Token) -> Expr {
        let found = self.cur();
        let op = op_tok.kind.spelling().unwrap_or("operator");
        self.diagnostics.emit_error(
            found.span,
            format!(
                "expected expression after `{op}`, found {}",
                found.kind.describe()
            ),
        );

        if !SYNC.contains(&found.kind) {
            self.bump();
            self.recover_to(&SYNC);
        }
        self.error_expr_at(found.span)
    }
}
