//! Chitti Server
//!
//! HTTP front end for the voice bridge: the voice-platform skill endpoint,
//! usage statistics, health and Prometheus metrics.

pub mod http;
pub mod metrics;
pub mod skill;
pub mod state;

pub use http::create_router;
pub use metrics::install_recorder;
pub use skill::{RequestEnvelope, ResponseEnvelope, SkillAction};
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service initialization failed: {0}")]
    Startup(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Persistence(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config(_) | ServerError::Startup(_) => {
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<chitti_config::ConfigError> for ServerError {
    fn from(err: chitti_config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<chitti_text_processing::TextProcessingError> for ServerError {
    fn from(err: chitti_text_processing::TextProcessingError) -> Self {
        ServerError::Startup(err.to_string())
    }
}

impl From<chitti_llm::LlmError> for ServerError {
    fn from(err: chitti_llm::LlmError) -> Self {
        ServerError::Startup(err.to_string())
    }
}

impl From<chitti_persistence::PersistenceError> for ServerError {
    fn from(err: chitti_persistence::PersistenceError) -> Self {
        ServerError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            StatusCode::from(ServerError::Persistence("disk".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            StatusCode::from(ServerError::Config("port".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
