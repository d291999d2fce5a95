//! Pass-through translator

use async_trait::async_trait;
use chitti_core::{Language, Result, Translator};

/// Returns input unchanged; used when no provider is configured
#[derive(Debug, Clone, Default)]
pub struct NoopTranslator;

impl NoopTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
        Ok(text.to_string())
    }

    fn supports_pair(&self, _from: Language, _to: Language) -> bool {
        true
    }

    fn name(&self) -> &str {
        "noop"
    }
}
