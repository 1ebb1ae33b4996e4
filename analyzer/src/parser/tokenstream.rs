use crate::lexer::Token;

/// Owned token buffer plus read position, consumed by [`super::Parser`].
///
/// The buffer must end with an EOF token; the lexer guarantees this.
pub struct TokenCursor<'a> {
    pub source: &'a str,
    pub tokens: Vec<Token>,
    pub pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        TokenCursor {
            source,
            tokens,
            pos: 0,
        }
    }
}
