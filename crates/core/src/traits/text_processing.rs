//! Text processing traits

use crate::{Language, Result, RomanScheme, Script};
use async_trait::async_trait;

/// Translation interface
///
/// Implementations:
/// - `GoogleTranslator` - Cloud Translation v2 REST API
///
/// Used in both directions of the translate-query-translate turn.
///
/// # Example
///
/// ```ignore
/// let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(config)?);
/// let english = translator
///     .translate("వాతావరణం ఎలా ఉంది", Language::Telugu, Language::English)
///     .await?;
/// ```
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text between languages
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `from` - Source language
    /// * `to` - Target language
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String>;

    /// Check if a language pair is supported
    fn supports_pair(&self, from: Language, to: Language) -> bool;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Script-to-Latin romanization
///
/// Pure and synchronous; no network access is expected.
pub trait Romanizer: Send + Sync + 'static {
    /// Romanize `text` written in `from` into the given scheme
    fn romanize(&self, text: &str, from: Script, to: RomanScheme) -> Result<String>;

    /// Whether the script can be romanized
    fn supports_script(&self, script: Script) -> bool;
}
