//! Turn failures

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Normalize,
    Filter,
    ForwardTranslate,
    Query,
    ReverseTranslate,
    Transliterate,
    /// Outside the pipeline: request handling around it
    Dispatch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Filter => "filter",
            Stage::ForwardTranslate => "forward_translate",
            Stage::Query => "query",
            Stage::ReverseTranslate => "reverse_translate",
            Stage::Transliterate => "transliterate",
            Stage::Dispatch => "dispatch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Input is only the invocation phrase")]
    BlockedPhrase,

    #[error("Forward translation failed: {0}")]
    ForwardTranslateFailure(String),

    #[error("LLM query failed: {0}")]
    QueryFailure(String),

    #[error("Reverse translation failed: {0}")]
    ReverseTranslateFailure(String),

    #[error("Transliteration unavailable: {0}")]
    TransliterationUnavailable(String),

    /// Logged only; never ends a turn. `stage` is the translation call that crossed the limit
    #[error("Character quota exceeded during {stage}: {total} > {limit}")]
    QuotaExceeded { stage: Stage, total: u64, limit: u64 },

    #[error("Unhandled fault: {0}")]
    UnhandledFault(String),
}

impl PipelineError {
    /// Stage the failure belongs to
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::EmptyInput => Stage::Normalize,
            PipelineError::BlockedPhrase => Stage::Filter,
            PipelineError::ForwardTranslateFailure(_) => Stage::ForwardTranslate,
            PipelineError::QueryFailure(_) => Stage::Query,
            PipelineError::ReverseTranslateFailure(_) => Stage::ReverseTranslate,
            PipelineError::TransliterationUnavailable(_) => Stage::Transliterate,
            PipelineError::QuotaExceeded { stage, .. } => *stage,
            PipelineError::UnhandledFault(_) => Stage::Dispatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        assert_eq!(PipelineError::EmptyInput.stage(), Stage::Normalize);
        assert_eq!(PipelineError::BlockedPhrase.stage(), Stage::Filter);
        assert_eq!(
            PipelineError::TransliterationUnavailable("x".into()).stage(),
            Stage::Transliterate
        );
        assert_eq!(Stage::ReverseTranslate.to_string(), "reverse_translate");

        let exceeded = PipelineError::QuotaExceeded {
            stage: Stage::ReverseTranslate,
            total: 450_010,
            limit: 450_000,
        };
        assert_eq!(exceeded.stage(), Stage::ReverseTranslate);
        assert!(exceeded.to_string().contains("reverse_translate"));
    }
}
