//! Staged turn execution
//!
//! A turn runs Normalize, Filter, ForwardTranslate, Query, ReverseTranslate
//! and Transliterate in order and stops at the first failure. Each failure
//! maps to a pre-authored phrase, so callers always receive a complete
//! `PipelineResult`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;

use chitti_config::{FallbackPhrase, FallbackPhrases, Settings};
use chitti_core::{Language, RomanScheme, Romanizer, Translator};
use chitti_llm::{LlmBackend, Message};
use chitti_persistence::{QuotaError, QuotaTracker};
use chitti_text_processing::Transliterator;

use crate::error::{PipelineError, Stage};
use crate::metrics;
use crate::result::PipelineResult;

/// One user utterance plus the language pair to run it through
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub raw_input: String,
    pub source: Language,
    pub pivot: Language,
}

impl PipelineRequest {
    pub fn new(raw_input: impl Into<String>, source: Language, pivot: Language) -> Self {
        Self {
            raw_input: raw_input.into(),
            source,
            pivot,
        }
    }
}

/// Pipeline tuning, usually derived from `Settings`
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub source: Language,
    pub pivot: Language,
    pub scheme: RomanScheme,
    /// Compared against the normalized utterance
    pub blocked_phrases: Vec<String>,
    pub phrases: FallbackPhrases,
    pub translation_timeout: Duration,
    pub llm_timeout: Duration,
    pub transliteration_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl PipelineSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            source: settings.languages.source,
            pivot: settings.languages.pivot,
            scheme: settings.transliteration.scheme,
            blocked_phrases: settings
                .pipeline
                .blocked_phrases
                .iter()
                .map(|p| normalize_utterance(p))
                .collect(),
            phrases: settings.pipeline.phrases.clone(),
            translation_timeout: Duration::from_millis(settings.translation.timeout_ms),
            llm_timeout: Duration::from_millis(settings.llm.timeout_ms),
            transliteration_timeout: Duration::from_millis(settings.transliteration.timeout_ms),
        }
    }
}

pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
    llm: Arc<dyn LlmBackend>,
    romanizer: Arc<dyn Romanizer>,
    quota: Arc<QuotaTracker>,
    settings: PipelineSettings,
}

impl TranslationPipeline {
    pub fn new(
        settings: PipelineSettings,
        translator: Arc<dyn Translator>,
        llm: Arc<dyn LlmBackend>,
        romanizer: Arc<dyn Romanizer>,
        quota: Arc<QuotaTracker>,
    ) -> Self {
        Self {
            translator,
            llm,
            romanizer,
            quota,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn phrases(&self) -> &FallbackPhrases {
        &self.settings.phrases
    }

    /// Run an utterance with the configured language pair
    pub async fn ask(&self, raw_input: &str) -> PipelineResult {
        self.run(PipelineRequest::new(
            raw_input,
            self.settings.source,
            self.settings.pivot,
        ))
        .await
    }

    pub async fn run(&self, request: PipelineRequest) -> PipelineResult {
        let result = self.execute(&request).await;

        let stage = result.failed_stage().map_or("none", |s| s.as_str());
        ::metrics::counter!(metrics::TURNS_TOTAL, "outcome" => result.outcome(), "stage" => stage)
            .increment(1);

        if let PipelineResult::Degraded { reason, .. } = &result {
            tracing::warn!(stage, error = %reason, "Turn degraded");
        }

        result
    }

    async fn execute(&self, request: &PipelineRequest) -> PipelineResult {
        let phrases = &self.settings.phrases;

        let normalized = normalize_utterance(&request.raw_input);
        if normalized.is_empty() {
            return degraded(PipelineError::EmptyInput, &phrases.empty_input);
        }

        if self.is_blocked(&normalized) {
            return degraded(PipelineError::BlockedPhrase, &phrases.blocked_phrase);
        }

        let pivot_text = match self
            .translate(Stage::ForwardTranslate, &normalized, request.source, request.pivot)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                return degraded(
                    PipelineError::ForwardTranslateFailure(e),
                    &phrases.forward_failure,
                )
            }
        };

        let answer = match self.query(&pivot_text).await {
            Ok(text) => text,
            Err(e) => return degraded(PipelineError::QueryFailure(e), &phrases.query_failure),
        };

        let source_script = match self
            .translate(Stage::ReverseTranslate, &answer, request.pivot, request.source)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                return degraded(
                    PipelineError::ReverseTranslateFailure(e),
                    &phrases.reverse_failure,
                )
            }
        };

        match self.transliterate(&source_script, request.source).await {
            Ok(phonetic_speech) => PipelineResult::Success {
                source_script,
                phonetic_speech,
            },
            // the answer itself is fine; only its pronunciation is missing
            Err(e) => PipelineResult::Degraded {
                fallback_phonetic_speech: phrases.transliteration_failure.clone(),
                fallback_script: source_script,
                failed_stage: Stage::Transliterate,
                reason: PipelineError::TransliterationUnavailable(e),
            },
        }
    }

    fn is_blocked(&self, normalized: &str) -> bool {
        self.settings
            .blocked_phrases
            .iter()
            .any(|phrase| phrase == normalized)
    }

    async fn translate(
        &self,
        stage: Stage,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, String> {
        self.account(stage, text).await;

        let started = Instant::now();
        let outcome = timeout(
            self.settings.translation_timeout,
            self.translator.translate(text, from, to),
        )
        .await;
        observe(stage, started);

        match outcome {
            Err(_) => Err(timed_out(self.settings.translation_timeout)),
            Ok(Err(e)) => Err(e.to_string()),
            Ok(Ok(t)) if t.trim().is_empty() => Err("provider returned empty text".to_string()),
            Ok(Ok(t)) => Ok(t.trim().to_string()),
        }
    }

    /// Report characters before dispatch; exceeding the quota is only logged
    async fn account(&self, stage: Stage, text: &str) {
        let chars = text.chars().count() as u64;
        ::metrics::counter!(metrics::TRANSLATION_CHARACTERS_TOTAL, "stage" => stage.as_str())
            .increment(chars);

        match self.quota.record(chars).await {
            Ok(()) => {}
            Err(QuotaError::Exceeded { total, limit }) => {
                ::metrics::counter!(metrics::QUOTA_EXCEEDED_TOTAL, "stage" => stage.as_str()).increment(1);
                let err = PipelineError::QuotaExceeded { stage, total, limit };
                tracing::warn!(stage = stage.as_str(), chars, total, limit, error = %err, "Translation quota exceeded");
            }
            Err(QuotaError::Storage(e)) => {
                tracing::error!(stage = stage.as_str(), chars, error = %e, "Failed to record translation usage");
            }
        }
    }

    async fn query(&self, prompt: &str) -> Result<String, String> {
        let messages = [Message::user(prompt)];

        let started = Instant::now();
        let outcome = timeout(self.settings.llm_timeout, self.llm.generate(&messages)).await;
        observe(Stage::Query, started);

        match outcome {
            Err(_) => Err(timed_out(self.settings.llm_timeout)),
            Ok(Err(e)) => Err(e.to_string()),
            Ok(Ok(r)) if r.text.trim().is_empty() => Err("model returned empty text".to_string()),
            Ok(Ok(r)) => {
                tracing::debug!(model = self.llm.model_name(), tokens = r.tokens, ms = r.total_time_ms, "LLM answered");
                Ok(r.text.trim().to_string())
            }
        }
    }

    async fn transliterate(&self, text: &str, language: Language) -> Result<String, String> {
        let transliterator =
            Transliterator::new(self.romanizer.clone(), language.script(), self.settings.scheme);
        let owned = text.to_string();

        let started = Instant::now();
        let outcome = timeout(
            self.settings.transliteration_timeout,
            tokio::task::spawn_blocking(move || transliterator.transliterate(&owned)),
        )
        .await;
        observe(Stage::Transliterate, started);

        match outcome {
            Err(_) => Err(timed_out(self.settings.transliteration_timeout)),
            Ok(Err(join_err)) => Err(join_err.to_string()),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Ok(Ok(phonetic))) => Ok(phonetic),
        }
    }
}

/// Trim and lower-case
pub fn normalize_utterance(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn degraded(reason: PipelineError, phrase: &FallbackPhrase) -> PipelineResult {
    PipelineResult::Degraded {
        fallback_phonetic_speech: phrase.phonetic.clone(),
        fallback_script: phrase.script.clone(),
        failed_stage: reason.stage(),
        reason,
    }
}

fn observe(stage: Stage, started: Instant) {
    ::metrics::histogram!(metrics::STAGE_DURATION_SECONDS, "stage" => stage.as_str())
        .record(started.elapsed().as_secs_f64());
}

fn timed_out(limit: Duration) -> String {
    format!("timed out after {} ms", limit.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_utterance() {
        assert_eq!(normalize_utterance("  Chitti \n"), "chitti");
        assert_eq!(normalize_utterance("   "), "");
        assert_eq!(normalize_utterance(" వాతావరణం "), "వాతావరణం");
    }

    #[test]
    fn test_settings_normalize_blocked_phrases() {
        let mut settings = Settings::default();
        settings.pipeline.blocked_phrases = vec!["  Hey Chitti ".to_string()];
        let ps = PipelineSettings::from_settings(&settings);
        assert_eq!(ps.blocked_phrases, vec!["hey chitti"]);
    }
}
