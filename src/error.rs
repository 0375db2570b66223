// File: src/error.rs
use thiserror::Error;

/// Everything that can go wrong inside a single user action.
#[derive(Debug, Error)]
pub enum GlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no word with id '{0}'")]
    WordNotFound(String),

    #[error("no affix rule with id '{0}'")]
    RuleNotFound(String),

    #[error("Invalid JSON file format")]
    InvalidImport,
}

pub type Result<T> = std::result::Result<T, GlotError>;
