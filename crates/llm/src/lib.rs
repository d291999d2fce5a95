//! LLM integration
//!
//! A single OpenAI-compatible chat-completion backend behind the
//! `LlmBackend` trait. Each voice turn sends exactly one user message; no
//! history or system prompt is carried between turns.

pub mod backend;
pub mod prompt;

pub use backend::{
    create_backend, FinishReason, GenerationResult, LlmBackend, OpenAIBackend, OpenAIConfig,
};
pub use prompt::{Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for chitti_core::Error {
    fn from(err: LlmError) -> Self {
        chitti_core::Error::Llm(err.to_string())
    }
}
