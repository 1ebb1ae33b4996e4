use std::iter::Peekable;
use std::str::CharIndices;

use crate::diagnostics::Diagnostic;
use crate::span::Span;

mod token;

pub use token::{Lit, LitKind, NodeId, Symbol, Token, TokenKind};

pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lex the input into tokens.
///
/// - Numbers: ASCII digits, an optional `.digits` fraction and an optional `e[+-]digits`
///   exponent. A fraction or exponent makes the literal a float.
/// - Identifiers: ASCII letters/`_` and any non-ASCII codepoint that is not whitespace; digits
///   after the first char.
/// - Comments: `// ...` up to the newline and `/* ... */`, kept as trivia tokens.
///
/// Lexing stops at the first error; the EOF token is still appended.
pub fn lex(input: &str) -> LexOutput {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut iter = input.char_indices().peekable();

    while let Some((start, ch)) = iter.next() {
        // Skip whitespace (including non-ASCII spaces) but keep newlines as trivia tokens.
        if ch != '\n' && ch.is_whitespace() {
            continue;
        }

        let kind = match ch {
            '\n' => TokenKind::Newline,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '%' => TokenKind::Percent,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,

            '/' => match iter.peek() {
                Some((_, '/')) => {
                    iter.next();
                    let mut end = start + 2;
                    while let Some(&(i, c2)) = iter.peek() {
                        if c2 == '\n' {
                            break;
                        }
                        iter.next();
                        end = i + c2.len_utf8();
                    }

                    tokens.push(Token {
                        kind: TokenKind::LineComment(Symbol {
                            text: String::from(&input[start + 2..end]),
                        }),
                        span: span(start, end),
                    });
                    continue;
                }
                Some((_, '*')) => {
                    iter.next();

                    let mut end = start + 2;
                    let mut terminated = false;
                    while let Some((i, c2)) = iter.next() {
                        if c2 == '*' && matches!(iter.peek(), Some((_, '/'))) {
                            iter.next();
                            end = i + 2;
                            terminated = true;
                            break;
                        }
                        end = i + c2.len_utf8();
                    }

                    if !terminated {
                        diagnostics.push(make_error(
                            span(start, input.len()),
                            "unterminated block comment".to_string(),
                        ));
                        break;
                    }

                    tokens.push(Token {
                        kind: TokenKind::BlockComment(Symbol {
                            text: String::from(&input[start + 2..end - 2]),
                        }),
                        span: span(start, end),
                    });
                    continue;
                }
                _ => TokenKind::Slash,
            },

            c if c.is_ascii_digit() => {
                let (end, kind) = lex_number(&mut iter, start);
                tokens.push(Token {
                    kind: TokenKind::Literal(Lit {
                        kind,
                        symbol: Symbol {
                            text: String::from(&input[start..end]),
                        },
                    }),
                    span: span(start, end),
                });
                continue;
            }

            c if is_ident_start(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, ch2)) = iter.peek() {
                    if is_ident_continue(ch2) {
                        iter.next();
                        end = i + ch2.len_utf8();
                    } else {
                        break;
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::Ident(Symbol {
                        text: String::from(&input[start..end]),
                    }),
                    span: span(start, end),
                });
                continue;
            }

            _ => {
                diagnostics.push(make_error(
                    span(start, start + ch.len_utf8()),
                    format!("unexpected char '{}'", ch),
                ));
                break;
            }
        };

        tokens.push(Token {
            kind,
            span: span(start, start + ch.len_utf8()),
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::empty(input.len() as u32),
    });

    LexOutput {
        tokens,
        diagnostics,
    }
}

/// Consumes the rest of a number literal whose first digit starts at `start`.
///
/// Returns the end offset and the literal kind. A `.` or `e` is only taken when a digit
/// follows, so `1.` lexes as `1` followed by an unexpected `.`.
fn lex_number(iter: &mut Peekable<CharIndices<'_>>, start: usize) -> (usize, LitKind) {
    let mut end = start + 1;
    let mut kind = LitKind::Int;

    end = eat_digits(iter, end);

    if let Some(&(_, '.')) = iter.peek() {
        let mut ahead = iter.clone();
        ahead.next();
        if matches!(ahead.peek(), Some((_, c)) if c.is_ascii_digit()) {
            iter.next();
            kind = LitKind::Float;
            end = eat_digits(iter, end + 1);
        }
    }

    if let Some(&(_, 'e' | 'E')) = iter.peek() {
        let mut ahead = iter.clone();
        ahead.next();
        let mut sign_len = 0;
        if let Some(&(_, '+' | '-')) = ahead.peek() {
            ahead.next();
            sign_len = 1;
        }
        if matches!(ahead.peek(), Some((_, c)) if c.is_ascii_digit()) {
            iter.next();
            if sign_len == 1 {
                iter.next();
            }
            kind = LitKind::Float;
            end = eat_digits(iter, end + 1 + sign_len);
        }
    }

    (end, kind)
}

fn eat_digits(iter: &mut Peekable<CharIndices<'_>>, mut end: usize) -> usize {
    while let Some(&(i, c)) = iter.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        iter.next();
        end = i + 1;
    }
    end
}

fn span(start: usize, end: usize) -> Span {
    Span {
        start: start as u32,
        end: end as u32,
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && !c.is_whitespace())
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn make_error(span: Span, message: String) -> Diagnostic {
    Diagnostic::error(span, message)
}
