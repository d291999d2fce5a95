//! Centralized constants
//!
//! Single source of truth for defaults used across crates. Settings fall
//! back to these when a value is not configured.

/// Translation quota accounting
pub mod quota {
    /// Free-tier character allowance of the translation provider
    pub const CHARACTER_LIMIT: u64 = 450_000;

    /// Sliding window sizes in calendar days, inclusive of today
    pub const WEEK_DAYS: u32 = 7;
    pub const MONTH_DAYS: u32 = 30;
    pub const YEAR_DAYS: u32 = 365;
}

/// Service endpoints
pub mod endpoints {
    /// Google Cloud Translation v2 REST endpoint
    pub const GOOGLE_TRANSLATE_DEFAULT: &str =
        "https://translation.googleapis.com/language/translate/v2";

    /// OpenAI-compatible API base
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";
}

/// Per-call timeouts for remote work (milliseconds)
///
/// The voice platform abandons a turn after roughly eight seconds, so the
/// sum along the happy path has to stay under that.
pub mod timeouts {
    pub const TRANSLATION_MS: u64 = 2_500;
    pub const LLM_MS: u64 = 5_000;
    pub const TRANSLITERATION_MS: u64 = 500;
    pub const SERVER_SECS: u64 = 30;
    /// Reserved at the end of the server timeout for answering with an apology
    pub const RESPONSE_MARGIN_MS: u64 = 250;
}

/// Language model defaults
pub mod llm {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const MAX_TOKENS: u32 = 256;
    pub const TEMPERATURE: f32 = 0.7;
}

/// Voice platform defaults
pub mod voice {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const SKILL_PATH: &str = "/alexa";
    pub const VOICE_LOCALE: &str = "en-IN";
    pub const CARD_TITLE: &str = "Chitti";
    /// Bare invocation names that carry no question
    pub const BLOCKED_PHRASES: &[&str] = &["chitti", "చిట్టి"];
}

/// Ledger storage defaults
pub mod storage {
    pub const USAGE_FILE: &str = "usage.json";
    pub const SCYLLA_HOST: &str = "127.0.0.1:9042";
    pub const SCYLLA_KEYSPACE: &str = "chitti";
}
