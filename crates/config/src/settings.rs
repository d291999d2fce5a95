//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use chitti_core::{Language, RomanScheme};

use crate::constants::{endpoints, llm, quota, storage, timeouts, voice};
use crate::{ConfigError, FallbackPhrases};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    /// Missing API keys are fatal outside development
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Source/pivot languages and voice locale
    #[serde(default)]
    pub languages: LanguageConfig,

    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub transliteration: TransliterationConfig,

    #[serde(default)]
    pub quota: QuotaConfig,

    /// Usage ledger storage
    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_languages()?;
        self.validate_timeouts()?;
        self.validate_quota()?;
        self.validate_phrases()?;
        self.validate_credentials()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if !server.skill_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "server.skill_path".to_string(),
                message: format!("Must start with '/', got {:?}", server.skill_path),
            });
        }

        Ok(())
    }

    fn validate_languages(&self) -> Result<(), ConfigError> {
        let languages = &self.languages;

        if languages.source == languages.pivot {
            return Err(ConfigError::InvalidValue {
                field: "languages.pivot".to_string(),
                message: "Pivot language must differ from source language".to_string(),
            });
        }

        if languages.voice_locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "languages.voice_locale".to_string(),
                message: "Voice locale cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_timeouts(&self) -> Result<(), ConfigError> {
        let checks = [
            ("translation.timeout_ms", self.translation.timeout_ms),
            ("llm.timeout_ms", self.llm.timeout_ms),
            ("transliteration.timeout_ms", self.transliteration.timeout_ms),
        ];

        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }
        }

        // worst case: both translations, the query and romanization all run to their limit
        let stages_ms = self
            .translation
            .timeout_ms
            .saturating_mul(2)
            .saturating_add(self.llm.timeout_ms)
            .saturating_add(self.transliteration.timeout_ms);
        let budget_ms = self.server.turn_budget().as_millis() as u64;

        if budget_ms <= stages_ms {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: format!(
                    "Turn budget of {} ms does not cover stage timeouts totalling {} ms",
                    budget_ms, stages_ms
                ),
            });
        }

        Ok(())
    }

    /// Phonetic phrases go to the speech voice verbatim
    fn validate_phrases(&self) -> Result<(), ConfigError> {
        for (name, phonetic) in self.pipeline.phrases.phonetic_all() {
            let message = if phonetic.trim().is_empty() {
                "Phonetic phrase cannot be empty"
            } else if !phonetic.is_ascii() {
                "Phonetic phrase must be ASCII"
            } else {
                continue;
            };

            return Err(ConfigError::InvalidValue {
                field: format!("pipeline.phrases.{name}"),
                message: message.to_string(),
            });
        }

        Ok(())
    }

    fn validate_quota(&self) -> Result<(), ConfigError> {
        if self.quota.character_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quota.character_limit".to_string(),
                message: "Character limit must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_credentials(&self) -> Result<(), ConfigError> {
        if !self.environment.is_strict() {
            return Ok(());
        }

        if self.translation.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField("translation.api_key".to_string()));
        }

        if self.llm.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField("llm.api_key".to_string()));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the voice platform posts requests to
    #[serde(default = "default_skill_path")]
    pub skill_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Time a skill turn may take before the endpoint answers with an apology
    pub fn turn_budget(&self) -> Duration {
        Duration::from_millis(
            self.timeout_seconds
                .saturating_mul(1000)
                .saturating_sub(timeouts::RESPONSE_MARGIN_MS),
        )
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(voice::DEFAULT_PORT)
}
fn default_skill_path() -> String {
    voice::SKILL_PATH.to_string()
}
fn default_timeout() -> u64 {
    timeouts::SERVER_SECS
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            skill_path: default_skill_path(),
            timeout_seconds: default_timeout(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics on `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Languages used by a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language the user speaks
    #[serde(default = "default_source")]
    pub source: Language,

    /// Working language of the LLM
    #[serde(default = "default_pivot")]
    pub pivot: Language,

    /// Locale of the speech voice that pronounces the phonetic text
    #[serde(default = "default_voice_locale")]
    pub voice_locale: String,
}

fn default_source() -> Language {
    Language::Telugu
}
fn default_pivot() -> Language {
    Language::English
}
fn default_voice_locale() -> String {
    voice::VOICE_LOCALE.to_string()
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            pivot: default_pivot(),
            voice_locale: default_voice_locale(),
        }
    }
}

/// Translation backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Google Cloud Translation v2
    #[default]
    Google,
    /// Pass-through (development without credentials)
    Disabled,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default)]
    pub provider: TranslationProvider,

    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    /// API key (falls back to GOOGLE_TRANSLATE_API_KEY)
    #[serde(default = "default_translate_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_translation_timeout")]
    pub timeout_ms: u64,
}

fn default_translate_endpoint() -> String {
    endpoints::GOOGLE_TRANSLATE_DEFAULT.to_string()
}
fn default_translate_api_key() -> Option<String> {
    std::env::var("GOOGLE_TRANSLATE_API_KEY").ok()
}
fn default_translation_timeout() -> u64 {
    timeouts::TRANSLATION_MS
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            endpoint: default_translate_endpoint(),
            api_key: default_translate_api_key(),
            timeout_ms: default_translation_timeout(),
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible API base
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API key (falls back to OPENAI_API_KEY)
    #[serde(default = "default_llm_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_ms: u64,

    /// Sent as `OpenAI-Organization` (falls back to OPENAI_ORGANIZATION)
    #[serde(default = "default_llm_organization")]
    pub organization: Option<String>,
}

fn default_llm_endpoint() -> String {
    endpoints::OPENAI_DEFAULT.to_string()
}
fn default_llm_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok()
}
fn default_llm_model() -> String {
    llm::DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    llm::MAX_TOKENS
}
fn default_temperature() -> f32 {
    llm::TEMPERATURE
}
fn default_llm_timeout() -> u64 {
    timeouts::LLM_MS
}
fn default_llm_organization() -> Option<String> {
    std::env::var("OPENAI_ORGANIZATION").ok().filter(|o| !o.is_empty())
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: default_llm_api_key(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_llm_timeout(),
            organization: default_llm_organization(),
        }
    }
}

/// Transliteration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransliterationConfig {
    /// Intermediate romanization scheme
    #[serde(default)]
    pub scheme: RomanScheme,

    #[serde(default = "default_transliteration_timeout")]
    pub timeout_ms: u64,
}

fn default_transliteration_timeout() -> u64 {
    timeouts::TRANSLITERATION_MS
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            scheme: RomanScheme::default(),
            timeout_ms: default_transliteration_timeout(),
        }
    }
}

/// Character quota configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Hard limit on cumulative translated characters
    #[serde(default = "default_character_limit")]
    pub character_limit: u64,
}

fn default_character_limit() -> u64 {
    quota::CHARACTER_LIMIT
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            character_limit: default_character_limit(),
        }
    }
}

/// Where the usage ledger lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on local disk
    #[default]
    File,
    /// ScyllaDB singleton row
    Scylla,
    /// Process memory only (tests, ephemeral runs)
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Scylla => "scylla",
            Self::Memory => "memory",
        }
    }
}

/// Persistence configuration for the usage ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Ledger file for the `file` backend
    #[serde(default = "default_usage_path")]
    pub usage_path: String,

    /// ScyllaDB host addresses
    #[serde(default = "default_scylla_hosts")]
    pub scylla_hosts: Vec<String>,

    /// ScyllaDB keyspace name
    #[serde(default = "default_scylla_keyspace")]
    pub keyspace: String,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,
}

fn default_usage_path() -> String {
    storage::USAGE_FILE.to_string()
}

fn default_scylla_hosts() -> Vec<String> {
    std::env::var("SCYLLA_HOSTS")
        .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_else(|_| vec![storage::SCYLLA_HOST.to_string()])
}

fn default_scylla_keyspace() -> String {
    std::env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| storage::SCYLLA_KEYSPACE.to_string())
}

fn default_replication_factor() -> u8 {
    1
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            usage_path: default_usage_path(),
            scylla_hosts: default_scylla_hosts(),
            keyspace: default_scylla_keyspace(),
            replication_factor: default_replication_factor(),
        }
    }
}

/// Turn pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Utterances that are only the invocation name, compared after
    /// trimming and lower-casing
    #[serde(default = "default_blocked_phrases")]
    pub blocked_phrases: Vec<String>,

    /// Title shown on the companion-app card
    #[serde(default = "default_card_title")]
    pub card_title: String,

    #[serde(default)]
    pub phrases: FallbackPhrases,
}

fn default_blocked_phrases() -> Vec<String> {
    voice::BLOCKED_PHRASES.iter().map(|p| p.to_string()).collect()
}
fn default_card_title() -> String {
    voice::CARD_TITLE.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blocked_phrases: default_blocked_phrases(),
            card_title: default_card_title(),
            phrases: FallbackPhrases::default(),
        }
    }
}

/// Load settings from `config/` in the working directory
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from a config directory
///
/// Order: `{dir}/default`, `{dir}/{env}`, then `CHITTI__*` environment
/// variables. Later sources win.
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::from(dir.join("default")).required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("CHITTI")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
