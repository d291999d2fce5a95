//! Error types shared across crates

use thiserror::Error;

/// Result alias used by core traits
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
///
/// Crate-specific errors convert into this via `From` so trait objects can
/// share a single error type across crate boundaries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Romanization error: {0}")]
    Romanization(String),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedPair { from: String, to: String },

    #[error("Unsupported script: {0}")]
    UnsupportedScript(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came from a remote call that ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}
