//! Text processing for the Chitti voice bridge
//!
//! This crate provides:
//! - **Translation**: providers behind the core `Translator` trait
//! - **Transliteration**: native script to speakable ASCII, via an IAST
//!   romanizer and an ordered diacritic normalization table
//!
//! # Example
//!
//! ```ignore
//! use chitti_core::Script;
//! use chitti_text_processing::Transliterator;
//!
//! let transliterator = Transliterator::indic(Script::Telugu);
//! assert_eq!(transliterator.transliterate("నమస్కారం")?, "namaskaaram");
//! ```

pub mod translation;
pub mod transliteration;

mod error;

pub use error::{Result, TextProcessingError};
pub use translation::{create_translator, GoogleTranslator, NoopTranslator};
pub use transliteration::{
    normalize_for_speech, IndicRomanizer, Transliterator, NORMALIZATION_TABLE,
};
