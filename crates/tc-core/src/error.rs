//! Framework error type.
//!
//! Sub-crates define their own error enums; those that can fail on loop
//! configuration wrap `CoreError` as one variant via `From`.

use thiserror::Error;

/// The error type for `tc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `tc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
