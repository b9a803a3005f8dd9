use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("selector {selector:?} has no option {option}")]
    InvalidOption {
        selector: String,
        option:   String,
    },

    #[error("no selector named {0:?}")]
    UnknownSelector(String),

    #[error("a selector named {0:?} is already published")]
    DuplicateSelector(String),

    #[error("preset parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SelectResult<T> = Result<T, SelectError>;
