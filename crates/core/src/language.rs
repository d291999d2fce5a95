//! Language and script definitions
//!
//! Covers the languages the bridge can translate to and from. Every Indic
//! entry maps onto one of the parallel Brahmic Unicode blocks, which is what
//! the romanizer relies on.

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Telugu,
    Hindi,
    Tamil,
    Kannada,
    Malayalam,
    Bengali,
    Marathi,
    Gujarati,
    Punjabi,
    Odia,
    Urdu,
}

impl Language {
    /// ISO 639-1 code, as expected by translation providers
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
            Self::Hindi => "hi",
            Self::Tamil => "ta",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Bengali => "bn",
            Self::Marathi => "mr",
            Self::Gujarati => "gu",
            Self::Punjabi => "pa",
            Self::Odia => "or",
            Self::Urdu => "ur",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Telugu => "Telugu",
            Self::Hindi => "Hindi",
            Self::Tamil => "Tamil",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Bengali => "Bengali",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Punjabi => "Punjabi",
            Self::Odia => "Odia",
            Self::Urdu => "Urdu",
        }
    }

    /// Script used by this language
    pub fn script(&self) -> Script {
        match self {
            Self::Hindi | Self::Marathi => Script::Devanagari,
            Self::Telugu => Script::Telugu,
            Self::Tamil => Script::Tamil,
            Self::Kannada => Script::Kannada,
            Self::Malayalam => Script::Malayalam,
            Self::Bengali => Script::Bengali,
            Self::Gujarati => Script::Gujarati,
            Self::Punjabi => Script::Gurmukhi,
            Self::Odia => Script::Odia,
            Self::Urdu => Script::Arabic,
            Self::English => Script::Latin,
        }
    }

    /// Parse from string (case-insensitive, code or name)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "te" | "tel" | "telugu" => Some(Self::Telugu),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            "ta" | "tam" | "tamil" => Some(Self::Tamil),
            "kn" | "kan" | "kannada" => Some(Self::Kannada),
            "ml" | "mal" | "malayalam" => Some(Self::Malayalam),
            "bn" | "ben" | "bengali" | "bangla" => Some(Self::Bengali),
            "mr" | "mar" | "marathi" => Some(Self::Marathi),
            "gu" | "guj" | "gujarati" => Some(Self::Gujarati),
            "pa" | "pan" | "punjabi" | "panjabi" => Some(Self::Punjabi),
            "or" | "ori" | "odia" | "oriya" => Some(Self::Odia),
            "ur" | "urd" | "urdu" => Some(Self::Urdu),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Writing systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Odia,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Arabic,
}

impl Script {
    /// Unicode block for this script
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0000, 0x007F),
            Self::Devanagari => (0x0900, 0x097F),
            Self::Bengali => (0x0980, 0x09FF),
            Self::Gurmukhi => (0x0A00, 0x0A7F),
            Self::Gujarati => (0x0A80, 0x0AFF),
            Self::Odia => (0x0B00, 0x0B7F),
            Self::Tamil => (0x0B80, 0x0BFF),
            Self::Telugu => (0x0C00, 0x0C7F),
            Self::Kannada => (0x0C80, 0x0CFF),
            Self::Malayalam => (0x0D00, 0x0D7F),
            Self::Arabic => (0x0600, 0x06FF),
        }
    }

    /// Check if a character belongs to this script
    pub fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }

    /// Whether the script is one of the parallel Brahmic blocks (U+0900..U+0D7F)
    pub fn is_brahmic(&self) -> bool {
        !matches!(self, Self::Latin | Self::Arabic)
    }

    /// Detect script from text (most frequent non-Latin script wins,
    /// Latin only if nothing else is present)
    pub fn detect(text: &str) -> Option<Self> {
        let mut counts = std::collections::HashMap::new();

        for c in text.chars() {
            if c.is_whitespace() || c.is_ascii_punctuation() {
                continue;
            }
            for script in &[
                Self::Devanagari,
                Self::Bengali,
                Self::Gurmukhi,
                Self::Gujarati,
                Self::Odia,
                Self::Tamil,
                Self::Telugu,
                Self::Kannada,
                Self::Malayalam,
                Self::Arabic,
                Self::Latin,
            ] {
                if script.contains_char(c) {
                    *counts.entry(*script).or_insert(0usize) += 1;
                    break;
                }
            }
        }

        let native = counts
            .iter()
            .filter(|(k, _)| **k != Self::Latin)
            .max_by_key(|(_, v)| **v)
            .map(|(k, _)| *k);
        native.or_else(|| counts.contains_key(&Self::Latin).then_some(Self::Latin))
    }
}

/// Romanization schemes a `Romanizer` can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RomanScheme {
    /// International Alphabet of Sanskrit Transliteration
    #[default]
    Iast,
}
