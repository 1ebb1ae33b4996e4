use analyzer::{Diagnostic, Span, TypeError};
use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

/// Coarse classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Type,
    Arithmetic,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Malformed input. `offset` is the byte offset of the offending token, or the input
    /// length when the input ends too early.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: u32, message: String },

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Syntax { .. } => ErrorKind::Syntax,
            EvalError::Type(_) => ErrorKind::Type,
            EvalError::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }

    /// Byte offset the error points at.
    pub fn offset(&self) -> u32 {
        self.span().start
    }

    /// Span the error points at. Syntax errors only keep an offset, so theirs is empty.
    pub fn span(&self) -> Span {
        match self {
            EvalError::Syntax { offset, .. } => Span::empty(*offset),
            EvalError::Type(err) => err.span(),
            EvalError::Arithmetic(err) => err.span(),
        }
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        Diagnostic::error(err.span(), err.to_string())
    }
}

/// Failure of integer arithmetic. Floating-point operations never fail.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("integer overflow")]
    Overflow { span: Span },
}

impl ArithmeticError {
    /// Span of the operation that failed.
    pub fn span(&self) -> Span {
        match self {
            ArithmeticError::DivisionByZero { span } | ArithmeticError::Overflow { span } => *span,
        }
    }
}
