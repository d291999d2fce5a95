//! Configuration management for the Chitti voice bridge
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`CHITTI__` prefix, `__` separator)
//!
//! User-facing fallback phrases live in [`phrases`] so every apology the
//! bridge can speak is data rather than code.

pub mod constants;
pub mod phrases;
pub mod settings;

pub use phrases::{FallbackPhrase, FallbackPhrases};
pub use settings::{
    load_settings, load_settings_from, LanguageConfig, LlmConfig, ObservabilityConfig,
    PersistenceConfig, PipelineConfig, QuotaConfig, RuntimeEnvironment, ServerConfig, Settings,
    StorageBackend, TranslationConfig, TranslationProvider, TransliterationConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for chitti_core::Error {
    fn from(err: ConfigError) -> Self {
        chitti_core::Error::Config(err.to_string())
    }
}
