//! Speech, reprompt and card assembly

use serde::Serialize;

use chitti_config::{FallbackPhrase, Settings};

use crate::result::PipelineResult;

/// What the voice platform needs to answer a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedResponse {
    /// `<speak>` document with the phonetic text
    pub speech_markup: String,
    pub reprompt_text: String,
    pub card_title: String,
    /// Native-script text for screens; may differ in script from the speech
    pub card_body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResponseComposer {
    voice_locale: String,
    card_title: String,
    reprompt: String,
}

impl ResponseComposer {
    pub fn new(
        voice_locale: impl Into<String>,
        card_title: impl Into<String>,
        reprompt: impl Into<String>,
    ) -> Self {
        Self {
            voice_locale: voice_locale.into(),
            card_title: card_title.into(),
            reprompt: reprompt.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.languages.voice_locale.clone(),
            settings.pipeline.card_title.clone(),
            settings.pipeline.phrases.reprompt.phonetic.clone(),
        )
    }

    pub fn voice_locale(&self) -> &str {
        &self.voice_locale
    }

    pub fn reprompt_text(&self) -> &str {
        &self.reprompt
    }

    pub fn compose(&self, result: &PipelineResult) -> ComposedResponse {
        let body = result.script();
        ComposedResponse {
            speech_markup: self.speak(result.speech()),
            reprompt_text: self.reprompt.clone(),
            card_title: self.card_title.clone(),
            card_body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Compose a canned phrase, e.g. the welcome or help text
    pub fn phrase(&self, phrase: &FallbackPhrase) -> ComposedResponse {
        ComposedResponse {
            speech_markup: self.speak(&phrase.phonetic),
            reprompt_text: self.reprompt.clone(),
            card_title: self.card_title.clone(),
            card_body: (!phrase.script.is_empty()).then(|| phrase.script.clone()),
        }
    }

    /// Wrap romanized text for the base voice.
    ///
    /// The text is tagged with the voice locale rather than the source
    /// language, since it is a romanization and not the script itself.
    pub fn speak(&self, phonetic: &str) -> String {
        format!(
            "<speak><lang xml:lang=\"{}\">{}</lang></speak>",
            escape_xml(&self.voice_locale),
            escape_xml(phonetic)
        )
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, Stage};

    fn composer() -> ResponseComposer {
        ResponseComposer::new("en-IN", "Chitti", "meeru inkaa emainaa adagaalanukuntunnaaraa")
    }

    #[test]
    fn test_success_speaks_phonetic_and_shows_script() {
        let result = PipelineResult::Success {
            source_script: "హైదరాబాద్ తెలంగాణ రాజధాని".to_string(),
            phonetic_speech: "haidaraabaad telangaana raajadhaani".to_string(),
        };
        let composed = composer().compose(&result);

        assert_eq!(
            composed.speech_markup,
            "<speak><lang xml:lang=\"en-IN\">haidaraabaad telangaana raajadhaani</lang></speak>"
        );
        assert_eq!(composed.card_title, "Chitti");
        assert_eq!(
            composed.card_body.as_deref(),
            Some("హైదరాబాద్ తెలంగాణ రాజధాని")
        );
        assert!(!composed.reprompt_text.is_empty());
    }

    #[test]
    fn test_transliteration_failure_keeps_script_on_card() {
        let result = PipelineResult::Degraded {
            fallback_phonetic_speech: "kshaminchandi".to_string(),
            fallback_script: "నమస్కారం".to_string(),
            failed_stage: Stage::Transliterate,
            reason: PipelineError::TransliterationUnavailable("boom".into()),
        };
        let composed = composer().compose(&result);

        assert!(composed.speech_markup.contains("kshaminchandi"));
        assert_eq!(composed.card_body.as_deref(), Some("నమస్కారం"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let markup = composer().speak("a < b & \"c\"");
        assert_eq!(
            markup,
            "<speak><lang xml:lang=\"en-IN\">a &lt; b &amp; &quot;c&quot;</lang></speak>"
        );
    }

    #[test]
    fn test_empty_script_has_no_card_body() {
        let composed = composer().phrase(&FallbackPhrase::new("", "bye"));
        assert!(composed.card_body.is_none());
    }
}
