//! Translation providers
//!
//! Both legs of a turn go through the same `Translator`: source to pivot
//! before the LLM call, pivot to source after it.

mod google;
mod noop;

pub use google::{GoogleTranslator, GoogleTranslatorConfig};
pub use noop::NoopTranslator;

use std::sync::Arc;

use chitti_config::{TranslationConfig, TranslationProvider};
use chitti_core::Translator;

use crate::Result;

/// Language codes the Google v2 API accepts that this bridge maps to
pub(crate) fn supported_pairs() -> &'static [(&'static str, &'static str)] {
    &[
        ("te", "en"),
        ("en", "te"),
        ("hi", "en"),
        ("en", "hi"),
        ("ta", "en"),
        ("en", "ta"),
        ("kn", "en"),
        ("en", "kn"),
        ("ml", "en"),
        ("en", "ml"),
        ("bn", "en"),
        ("en", "bn"),
        ("mr", "en"),
        ("en", "mr"),
        ("gu", "en"),
        ("en", "gu"),
        ("pa", "en"),
        ("en", "pa"),
        ("or", "en"),
        ("en", "or"),
        ("ur", "en"),
        ("en", "ur"),
    ]
}

/// Create translator based on config
pub fn create_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>> {
    match config.provider {
        TranslationProvider::Google => {
            let translator = GoogleTranslator::new(GoogleTranslatorConfig::from(config))?;
            tracing::info!(endpoint = %config.endpoint, "Using Google Cloud Translation v2");
            Ok(Arc::new(translator))
        }
        TranslationProvider::Disabled => {
            tracing::warn!("Translation disabled, text passes through untranslated");
            Ok(Arc::new(NoopTranslator::new()))
        }
    }
}
