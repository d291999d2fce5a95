//! IAST diacritics to plain ASCII

/// One `(pattern, replacement)` substitution
pub type TransliterationRule = (&'static str, &'static str);

/// Ordered substitutions applied to romanized text before case folding.
///
/// Long vowels double, retroflex and palatal marks drop to the plain
/// letter, nasal marks become m/ng/ny.
pub const NORMALIZATION_TABLE: &[TransliterationRule] = &[
    // vowels
    ("ā", "aa"),
    ("ī", "ii"),
    ("ū", "uu"),
    ("ṝ", "ruu"),
    ("ṛ", "ru"),
    ("ḹ", "l"),
    ("ḷ", "l"),
    ("ē", "ee"),
    ("ō", "oo"),
    // retroflex and dravidian consonants
    ("ṭ", "t"),
    ("ḍ", "d"),
    ("ṇ", "n"),
    ("ḻ", "zh"),
    ("ṉ", "n"),
    ("ṟ", "r"),
    // sibilants
    ("ś", "sh"),
    ("ṣ", "sh"),
    // nasals and aspiration
    ("ṃ", "m"),
    ("ṁ", "m"),
    ("ḥ", "h"),
    ("ñ", "ny"),
    ("ṅ", "ng"),
    // capitals
    ("Ā", "aa"),
    ("Ī", "ii"),
    ("Ū", "uu"),
    ("Ṝ", "ruu"),
    ("Ṛ", "ru"),
    ("Ḷ", "l"),
    ("Ē", "ee"),
    ("Ō", "oo"),
    ("Ṭ", "t"),
    ("Ḍ", "d"),
    ("Ṇ", "n"),
    ("Ś", "sh"),
    ("Ṣ", "sh"),
    ("Ṃ", "m"),
    ("Ḥ", "h"),
    ("Ñ", "ny"),
    ("Ṅ", "ng"),
];

/// Substitute, fold case, drop anything non-ASCII, trim.
pub fn normalize_for_speech(romanized: &str) -> String {
    let mut text = romanized.to_string();
    for (pattern, replacement) in NORMALIZATION_TABLE {
        if text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }

    let folded = text.to_lowercase();
    let ascii: String = folded.chars().filter(char::is_ascii).collect();
    ascii.trim().to_string()
}
