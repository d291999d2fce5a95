//! Voice-platform request and response envelopes
//!
//! Incoming requests are routed through an ordered table of
//! `(predicate, action)` pairs; the first predicate that matches wins and the
//! last entry always matches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use chitti_agent::ComposedResponse;

use crate::state::AppState;

pub const CHAT_INTENT: &str = "ChatIntent";
pub const QUESTION_SLOT: &str = "question";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

// ---- request envelope ----

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<SkillSession>,
    pub request: SkillRequest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSession {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub new: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Set on `SessionEndedRequest`
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl RequestEnvelope {
    pub fn request_type(&self) -> &str {
        &self.request.kind
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|i| i.slots.get(slot))
            .and_then(|s| s.value.as_deref())
    }

    fn is_intent(&self, name: &str) -> bool {
        self.request_type() == "IntentRequest" && self.intent_name() == Some(name)
    }
}

// ---- response envelope ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl OutputSpeech {
    pub fn ssml(markup: impl Into<String>) -> Self {
        Self {
            kind: "SSML".to_string(),
            ssml: markup.into(),
        }
    }
}

impl ResponseEnvelope {
    pub fn empty() -> Self {
        Self {
            version: "1.0".to_string(),
            response: ResponseBody::default(),
        }
    }

    /// Build a spoken response; `reprompt_markup` keeps the session open
    pub fn from_composed(
        composed: ComposedResponse,
        reprompt_markup: Option<String>,
        end_session: bool,
    ) -> Self {
        let card = composed.card_body.map(|content| Card {
            kind: "Simple".to_string(),
            title: composed.card_title,
            content,
        });

        Self {
            version: "1.0".to_string(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::ssml(composed.speech_markup)),
                reprompt: reprompt_markup.map(|m| Reprompt {
                    output_speech: OutputSpeech::ssml(m),
                }),
                card,
                should_end_session: Some(end_session),
            },
        }
    }
}

// ---- dispatch ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillAction {
    Launch,
    Ask,
    Help,
    Goodbye,
    SessionEnded,
    /// Fallback intent and anything unrecognised
    Repeat,
}

impl SkillAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillAction::Launch => "launch",
            SkillAction::Ask => "ask",
            SkillAction::Help => "help",
            SkillAction::Goodbye => "goodbye",
            SkillAction::SessionEnded => "session_ended",
            SkillAction::Repeat => "repeat",
        }
    }
}

type Predicate = fn(&RequestEnvelope) -> bool;

const DISPATCH_TABLE: &[(Predicate, SkillAction)] = &[
    (|e| e.request_type() == "LaunchRequest", SkillAction::Launch),
    (|e| e.is_intent(CHAT_INTENT), SkillAction::Ask),
    (|e| e.is_intent(HELP_INTENT), SkillAction::Help),
    (
        |e| e.is_intent(STOP_INTENT) || e.is_intent(CANCEL_INTENT),
        SkillAction::Goodbye,
    ),
    (
        |e| e.request_type() == "SessionEndedRequest",
        SkillAction::SessionEnded,
    ),
    (|_| true, SkillAction::Repeat),
];

/// First matching action
pub fn route(envelope: &RequestEnvelope) -> SkillAction {
    DISPATCH_TABLE
        .iter()
        .find(|(predicate, _)| predicate(envelope))
        .map_or(SkillAction::Repeat, |(_, action)| *action)
}

/// Handle one envelope. Pipeline failures are already folded into the
/// composed speech, so this never fails.
pub async fn dispatch(state: &AppState, envelope: RequestEnvelope) -> ResponseEnvelope {
    let action = route(&envelope);
    ::metrics::counter!(crate::metrics::SKILL_REQUESTS_TOTAL, "action" => action.as_str())
        .increment(1);
    tracing::debug!(
        action = action.as_str(),
        request_type = envelope.request_type(),
        request_id = envelope.request.request_id.as_deref().unwrap_or("-"),
        "Dispatching skill request"
    );

    let phrases = state.pipeline.phrases();
    let composer = &state.composer;
    let reprompt = || Some(composer.speak(composer.reprompt_text()));

    match action {
        SkillAction::Launch => {
            ResponseEnvelope::from_composed(composer.phrase(&phrases.welcome), reprompt(), false)
        }
        SkillAction::Ask => {
            let question = envelope.slot_value(QUESTION_SLOT).unwrap_or_default();
            let result = state.pipeline.ask(question).await;
            ResponseEnvelope::from_composed(composer.compose(&result), reprompt(), false)
        }
        SkillAction::Help => {
            ResponseEnvelope::from_composed(composer.phrase(&phrases.help), reprompt(), false)
        }
        SkillAction::Goodbye => {
            ResponseEnvelope::from_composed(composer.phrase(&phrases.goodbye), None, true)
        }
        SkillAction::SessionEnded => {
            tracing::info!(
                reason = envelope.request.reason.as_deref().unwrap_or("unknown"),
                "Session ended"
            );
            ResponseEnvelope::empty()
        }
        SkillAction::Repeat => {
            ResponseEnvelope::from_composed(composer.phrase(&phrases.empty_input), reprompt(), false)
        }
    }
}
