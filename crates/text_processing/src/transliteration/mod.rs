//! Script text to speakable ASCII
//!
//! Two steps: romanize into IAST, then flatten the IAST diacritics into
//! plain ASCII a non-native speech voice can read out.

mod normalize;
mod romanizer;

pub use normalize::{normalize_for_speech, NORMALIZATION_TABLE};
pub use romanizer::IndicRomanizer;

use std::sync::Arc;

use chitti_core::{RomanScheme, Romanizer, Script};

use crate::{Result, TextProcessingError};

/// Romanize then normalize
#[derive(Clone)]
pub struct Transliterator {
    romanizer: Arc<dyn Romanizer>,
    script: Script,
    scheme: RomanScheme,
}

impl Transliterator {
    pub fn new(romanizer: Arc<dyn Romanizer>, script: Script, scheme: RomanScheme) -> Self {
        Self {
            romanizer,
            script,
            scheme,
        }
    }

    /// Transliterator backed by the built-in Brahmic romanizer
    pub fn indic(script: Script) -> Self {
        Self::new(Arc::new(IndicRomanizer::new()), script, RomanScheme::Iast)
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Convert script text into lower-case ASCII
    ///
    /// Fails with `TransliterationUnavailable` when the script is not
    /// supported or nothing speakable is left.
    pub fn transliterate(&self, text: &str) -> Result<String> {
        if !self.romanizer.supports_script(self.script) {
            return Err(TextProcessingError::TransliterationUnavailable(format!(
                "no romanizer for {:?}",
                self.script
            )));
        }

        let romanized = self
            .romanizer
            .romanize(text, self.script, self.scheme)
            .map_err(|e| TextProcessingError::TransliterationUnavailable(e.to_string()))?;

        let phonetic = normalize_for_speech(&romanized);
        if phonetic.is_empty() {
            return Err(TextProcessingError::TransliterationUnavailable(
                "romanization produced no speakable text".to_string(),
            ));
        }

        Ok(phonetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telugu_words() {
        let t = Transliterator::indic(Script::Telugu);
        assert_eq!(t.transliterate("నమస్కారం").unwrap(), "namaskaaram");
        assert_eq!(t.transliterate("తెలుగు").unwrap(), "telugu");
        assert_eq!(t.transliterate("నేను").unwrap(), "neenu");
        assert_eq!(t.transliterate("కృష్ణ").unwrap(), "krushna");
    }

    #[test]
    fn test_output_is_ascii() {
        let t = Transliterator::indic(Script::Telugu);
        let samples = [
            "హైదరాబాద్ భారతదేశంలో ఒక నగరం।",
            "ఈ రోజు వాతావరణం బాగుంది ₹ ౧౨౩",
            "జ్ఞానం, శక్తి, ఐశ్వర్యం",
            "Google సమాధానం",
        ];
        for s in samples {
            let out = t.transliterate(s).unwrap();
            assert!(out.is_ascii(), "non-ascii output for {s}: {out}");
            assert_eq!(out, out.trim());
            assert_eq!(out, out.to_lowercase());
        }
    }

    #[test]
    fn test_unsupported_script() {
        let t = Transliterator::indic(Script::Arabic);
        assert!(matches!(
            t.transliterate("سلام"),
            Err(TextProcessingError::TransliterationUnavailable(_))
        ));
    }

    #[test]
    fn test_nothing_speakable() {
        let t = Transliterator::indic(Script::Telugu);
        assert!(matches!(
            t.transliterate("  ★ ★  "),
            Err(TextProcessingError::TransliterationUnavailable(_))
        ));
    }
}
