//! Turn outcome

use crate::error::{PipelineError, Stage};

/// Result of one turn; every variant is complete and speakable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Success {
        /// Answer in the user's script, for display
        source_script: String,
        /// ASCII rendering for the speech voice
        phonetic_speech: String,
    },
    Degraded {
        fallback_phonetic_speech: String,
        fallback_script: String,
        failed_stage: Stage,
        reason: PipelineError,
    },
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }

    pub fn speech(&self) -> &str {
        match self {
            PipelineResult::Success { phonetic_speech, .. } => phonetic_speech,
            PipelineResult::Degraded {
                fallback_phonetic_speech,
                ..
            } => fallback_phonetic_speech,
        }
    }

    pub fn script(&self) -> &str {
        match self {
            PipelineResult::Success { source_script, .. } => source_script,
            PipelineResult::Degraded {
                fallback_script, ..
            } => fallback_script,
        }
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineResult::Success { .. } => None,
            PipelineResult::Degraded { failed_stage, .. } => Some(*failed_stage),
        }
    }

    /// Metrics label
    pub fn outcome(&self) -> &'static str {
        if self.is_success() {
            "success"
        } else {
            "degraded"
        }
    }
}
