use thiserror::Error;

/// Broad classification of an evaluation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be tokenized or parsed, or was not a number.
    Syntax,
    /// The operation is undefined for its argument (sqrt of a negative, log of zero).
    Domain,
    /// Division by zero or a result that overflowed to infinity.
    Arithmetic,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("domain error: {0}")]
    Domain(String),
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Syntax(_) => ErrorKind::Syntax,
            EvalError::Domain(_) => ErrorKind::Domain,
            EvalError::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
