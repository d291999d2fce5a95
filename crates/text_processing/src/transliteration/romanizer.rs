//! IAST romanizer for the Brahmic Unicode blocks
//!
//! Devanagari, Bengali, Gurmukhi, Gujarati, Odia, Tamil, Telugu, Kannada and
//! Malayalam share one layout: the same sound sits at the same offset inside
//! each 128-codepoint block. The walk below works on offsets, so one table
//! covers all nine scripts.

use chitti_core::{Error, Result, RomanScheme, Romanizer, Script};

const CANDRABINDU: u32 = 0x01;
const ANUSVARA: u32 = 0x02;
const VISARGA: u32 = 0x03;
const NUKTA: u32 = 0x3C;
const VIRAMA: u32 = 0x4D;
const DIGIT_ZERO: u32 = 0x66;
const DIGIT_NINE: u32 = 0x6F;
const GURMUKHI_TIPPI: u32 = 0x70;

/// Table-driven romanizer for Indic scripts
#[derive(Debug, Clone, Default)]
pub struct IndicRomanizer;

impl IndicRomanizer {
    pub fn new() -> Self {
        Self
    }

    fn romanize_block(&self, text: &str, script: Script) -> String {
        let (base, end) = script.unicode_range();
        let dravidian = matches!(
            script,
            Script::Tamil | Script::Telugu | Script::Kannada | Script::Malayalam
        );
        let offset_of = |c: char| {
            let code = c as u32;
            (base..=end).contains(&code).then(|| code - base)
        };

        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            let Some(off) = offset_of(c) else {
                match c {
                    // shared danda / double danda
                    '\u{0964}' | '\u{0965}' => out.push('.'),
                    // ZWJ / ZWNJ only steer glyph shaping
                    '\u{200C}' | '\u{200D}' => {}
                    _ => out.push(c),
                }
                i += 1;
                continue;
            };

            if let Some(cons) = consonant(off, script) {
                out.push_str(cons);
                let mut j = i + 1;

                // nukta alters the consonant; keep the base sound
                if chars.get(j).and_then(|&n| offset_of(n)) == Some(NUKTA) {
                    j += 1;
                }

                match chars.get(j).and_then(|&n| offset_of(n)) {
                    Some(VIRAMA) => j += 1,
                    Some(next) => match vowel_sign(next, dravidian) {
                        Some(sign) => {
                            out.push_str(sign);
                            j += 1;
                        }
                        None => out.push('a'),
                    },
                    None => out.push('a'),
                }

                i = j;
                continue;
            }

            if let Some(vowel) = independent_vowel(off, dravidian) {
                out.push_str(vowel);
                i += 1;
                continue;
            }

            match off {
                ANUSVARA | CANDRABINDU => out.push('ṃ'),
                GURMUKHI_TIPPI if script == Script::Gurmukhi => out.push('ṃ'),
                VISARGA => out.push('ḥ'),
                0x64 | 0x65 => out.push('.'),
                DIGIT_ZERO..=DIGIT_NINE => {
                    out.push(char::from(b'0' + (off - DIGIT_ZERO) as u8));
                }
                0x7A..=0x7F if script == Script::Malayalam => {
                    if let Some(chillu) = malayalam_chillu(off) {
                        out.push_str(chillu);
                    }
                }
                // stray nukta, avagraha, length marks
                _ => {}
            }
            i += 1;
        }

        out
    }
}

impl Romanizer for IndicRomanizer {
    fn romanize(&self, text: &str, from: Script, to: RomanScheme) -> Result<String> {
        if !self.supports_script(from) {
            return Err(Error::UnsupportedScript(format!("{:?}", from)));
        }

        match to {
            RomanScheme::Iast => Ok(self.romanize_block(text, from)),
        }
    }

    fn supports_script(&self, script: Script) -> bool {
        script.is_brahmic()
    }
}

fn consonant(off: u32, script: Script) -> Option<&'static str> {
    let base = match off {
        0x15 => "k",
        0x16 => "kh",
        0x17 => "g",
        0x18 => "gh",
        0x19 => "ṅ",
        0x1A => "c",
        0x1B => "ch",
        0x1C => "j",
        0x1D => "jh",
        0x1E => "ñ",
        0x1F => "ṭ",
        0x20 => "ṭh",
        0x21 => "ḍ",
        0x22 => "ḍh",
        0x23 => "ṇ",
        0x24 => "t",
        0x25 => "th",
        0x26 => "d",
        0x27 => "dh",
        0x28 => "n",
        0x29 => "ṉ",
        0x2A => "p",
        0x2B => "ph",
        0x2C => "b",
        0x2D => "bh",
        0x2E => "m",
        0x2F => "y",
        0x30 => "r",
        0x31 => "ṟ",
        0x32 => "l",
        0x33 => "ḷ",
        0x34 => "ḻ",
        0x35 => "v",
        0x36 => "ś",
        0x37 => "ṣ",
        0x38 => "s",
        0x39 => "h",
        _ => return extended_consonant(off, script),
    };
    Some(base)
}

/// Precomposed nukta forms and script-local additions in 0x58..0x5F
fn extended_consonant(off: u32, script: Script) -> Option<&'static str> {
    match (script, off) {
        (Script::Devanagari, 0x58) => Some("q"),
        (Script::Devanagari, 0x59) => Some("kh"),
        (Script::Devanagari, 0x5A) => Some("g"),
        (Script::Devanagari, 0x5B) => Some("z"),
        (Script::Devanagari, 0x5C) => Some("r"),
        (Script::Devanagari, 0x5D) => Some("rh"),
        (Script::Devanagari, 0x5E) => Some("f"),
        (Script::Devanagari, 0x5F) => Some("y"),
        (Script::Bengali, 0x5C) => Some("r"),
        (Script::Bengali, 0x5D) => Some("rh"),
        (Script::Bengali, 0x5F) => Some("y"),
        (Script::Gurmukhi, 0x59) => Some("kh"),
        (Script::Gurmukhi, 0x5A) => Some("g"),
        (Script::Gurmukhi, 0x5B) => Some("z"),
        (Script::Gurmukhi, 0x5C) => Some("r"),
        (Script::Gurmukhi, 0x5E) => Some("f"),
        (Script::Odia, 0x5F) => Some("y"),
        (Script::Telugu, 0x58) => Some("ts"),
        (Script::Telugu, 0x59) => Some("dz"),
        _ => None,
    }
}

/// Dravidian scripts distinguish short e/o from long ē/ō
fn independent_vowel(off: u32, dravidian: bool) -> Option<&'static str> {
    let v = match off {
        0x05 => "a",
        0x06 => "ā",
        0x07 => "i",
        0x08 => "ī",
        0x09 => "u",
        0x0A => "ū",
        0x0B => "ṛ",
        0x0C => "ḷ",
        0x0D | 0x0E => "e",
        0x0F if dravidian => "ē",
        0x0F => "e",
        0x10 => "ai",
        0x11 | 0x12 => "o",
        0x13 if dravidian => "ō",
        0x13 => "o",
        0x14 => "au",
        0x60 => "ṝ",
        0x61 => "ḹ",
        _ => return None,
    };
    Some(v)
}

fn vowel_sign(off: u32, dravidian: bool) -> Option<&'static str> {
    let v = match off {
        0x3E => "ā",
        0x3F => "i",
        0x40 => "ī",
        0x41 => "u",
        0x42 => "ū",
        0x43 => "ṛ",
        0x44 => "ṝ",
        0x45 | 0x46 => "e",
        0x47 if dravidian => "ē",
        0x47 => "e",
        0x48 => "ai",
        0x49 | 0x4A => "o",
        0x4B if dravidian => "ō",
        0x4B => "o",
        0x4C => "au",
        0x62 => "ḷ",
        0x63 => "ḹ",
        _ => return None,
    };
    Some(v)
}

fn malayalam_chillu(off: u32) -> Option<&'static str> {
    match off {
        0x7A => Some("ṇ"),
        0x7B => Some("n"),
        0x7C => Some("r"),
        0x7D => Some("l"),
        0x7E => Some("ḷ"),
        0x7F => Some("k"),
        _ => None,
    }
}
