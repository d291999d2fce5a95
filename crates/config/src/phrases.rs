//! Pre-authored user-facing phrases
//!
//! Each phrase exists twice: in the native script for the display card and as
//! a hand-written phonetic rendering for the speech engine. The phonetic side
//! never goes through the transliterator, so it is available even when
//! romanization itself is the stage that failed.

use serde::{Deserialize, Serialize};

/// A phrase in native script plus its ASCII phonetic rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPhrase {
    pub script: String,
    pub phonetic: String,
}

impl FallbackPhrase {
    pub fn new(script: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            phonetic: phonetic.into(),
        }
    }
}

/// Every canned response the bridge can produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackPhrases {
    /// Empty utterance: ask the user to repeat
    #[serde(default = "default_empty_input")]
    pub empty_input: FallbackPhrase,

    /// Bare invocation name: ask for the actual question
    #[serde(default = "default_blocked_phrase")]
    pub blocked_phrase: FallbackPhrase,

    #[serde(default = "default_forward_failure")]
    pub forward_failure: FallbackPhrase,

    #[serde(default = "default_query_failure")]
    pub query_failure: FallbackPhrase,

    #[serde(default = "default_reverse_failure")]
    pub reverse_failure: FallbackPhrase,

    /// Speech used when the answer exists but cannot be romanized
    #[serde(default = "default_transliteration_failure")]
    pub transliteration_failure: String,

    /// Outermost catch-all
    #[serde(default = "default_unhandled")]
    pub unhandled: FallbackPhrase,

    #[serde(default = "default_welcome")]
    pub welcome: FallbackPhrase,

    #[serde(default = "default_help")]
    pub help: FallbackPhrase,

    #[serde(default = "default_reprompt")]
    pub reprompt: FallbackPhrase,

    #[serde(default = "default_goodbye")]
    pub goodbye: FallbackPhrase,
}

fn default_empty_input() -> FallbackPhrase {
    FallbackPhrase::new("దయచేసి మళ్ళీ చెప్పండి", "dayachesi malli cheppandi")
}
fn default_blocked_phrase() -> FallbackPhrase {
    FallbackPhrase::new("దయచేసి మీ ప్రశ్న అడగండి", "dayachesi mee prashna adagandi")
}
fn default_forward_failure() -> FallbackPhrase {
    FallbackPhrase::new(
        "క్షమించండి, మీ ప్రశ్న అర్థం కాలేదు",
        "kshaminchandi, mee prashna artham kaaledu",
    )
}
fn default_query_failure() -> FallbackPhrase {
    FallbackPhrase::new(
        "క్షమించండి, సమాధానం దొరకలేదు",
        "kshaminchandi, samaadhaanam dorakaledu",
    )
}
fn default_reverse_failure() -> FallbackPhrase {
    FallbackPhrase::new(
        "క్షమించండి, సమాధానాన్ని అనువదించలేకపోయాను",
        "kshaminchandi, samaadhaanaanni anuvadinchalekapoyaanu",
    )
}
fn default_transliteration_failure() -> String {
    "kshaminchandi, samaadhaanam cheppalekapotunnaanu".to_string()
}
fn default_unhandled() -> FallbackPhrase {
    FallbackPhrase::new(
        "క్షమించండి, ఏదో పొరపాటు జరిగింది",
        "kshaminchandi, edo porapaatu jarigindi",
    )
}
fn default_welcome() -> FallbackPhrase {
    FallbackPhrase::new(
        "నమస్కారం, నేను చిట్టి. ఏదైనా అడగండి",
        "namaskaaram, nenu chitti. edaina adagandi",
    )
}
fn default_help() -> FallbackPhrase {
    FallbackPhrase::new(
        "మీ ప్రశ్నను తెలుగులో అడగండి",
        "mee prashnanu telugulo adagandi",
    )
}
fn default_reprompt() -> FallbackPhrase {
    FallbackPhrase::new(
        "ఇంకా ఏమైనా అడగాలనుకుంటున్నారా?",
        "inkaa emaina adagaalanukuntunnaaraa?",
    )
}
fn default_goodbye() -> FallbackPhrase {
    FallbackPhrase::new("సెలవు", "selavu")
}

impl Default for FallbackPhrases {
    fn default() -> Self {
        Self {
            empty_input: default_empty_input(),
            blocked_phrase: default_blocked_phrase(),
            forward_failure: default_forward_failure(),
            query_failure: default_query_failure(),
            reverse_failure: default_reverse_failure(),
            transliteration_failure: default_transliteration_failure(),
            unhandled: default_unhandled(),
            welcome: default_welcome(),
            help: default_help(),
            reprompt: default_reprompt(),
            goodbye: default_goodbye(),
        }
    }
}

impl FallbackPhrases {
    /// All phonetic renderings, for validation
    pub fn phonetic_all(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("empty_input", self.empty_input.phonetic.as_str()),
            ("blocked_phrase", self.blocked_phrase.phonetic.as_str()),
            ("forward_failure", self.forward_failure.phonetic.as_str()),
            ("query_failure", self.query_failure.phonetic.as_str()),
            ("reverse_failure", self.reverse_failure.phonetic.as_str()),
            ("transliteration_failure", self.transliteration_failure.as_str()),
            ("unhandled", self.unhandled.phonetic.as_str()),
            ("welcome", self.welcome.phonetic.as_str()),
            ("help", self.help.phonetic.as_str()),
            ("reprompt", self.reprompt.phonetic.as_str()),
            ("goodbye", self.goodbye.phonetic.as_str()),
        ]
    }
}
