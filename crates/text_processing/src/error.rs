//! Text processing errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    /// Romanization failed or produced nothing speakable
    #[error("Transliteration unavailable: {0}")]
    TransliterationUnavailable(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key for {0}")]
    MissingApiKey(String),
}

impl From<reqwest::Error> for TextProcessingError {
    fn from(err: reqwest::Error) -> Self {
        TextProcessingError::Http(err.to_string())
    }
}

impl From<TextProcessingError> for chitti_core::Error {
    fn from(err: TextProcessingError) -> Self {
        match err {
            TextProcessingError::TransliterationUnavailable(msg) => {
                chitti_core::Error::Romanization(msg)
            }
            other => chitti_core::Error::Translation(other.to_string()),
        }
    }
}
