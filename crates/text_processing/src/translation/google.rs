//! Google Cloud Translation v2 (REST, API key auth)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use chitti_config::TranslationConfig;
use chitti_core::{Language, Translator};

use super::supported_pairs;
use crate::{Result, TextProcessingError};

/// Configuration for the Google translator
#[derive(Debug, Clone)]
pub struct GoogleTranslatorConfig {
    /// `.../language/translate/v2`
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl From<&TranslationConfig> for GoogleTranslatorConfig {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

pub struct GoogleTranslator {
    config: GoogleTranslatorConfig,
    client: Client,
}

impl GoogleTranslator {
    pub fn new(config: GoogleTranslatorConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(TextProcessingError::MissingApiKey(
                "Google Cloud Translation".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    fn request_url(&self) -> String {
        self.config.endpoint.trim_end_matches('/').to_string()
    }

    async fn call(&self, text: &str, from: Language, to: Language) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: from.code(),
            target: to.code(),
            format: "text",
        };

        let response = self
            .client
            .post(self.request_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TextProcessingError::Translation(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TextProcessingError::InvalidResponse(e.to_string()))?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                TextProcessingError::InvalidResponse("No translations in response".to_string())
            })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> chitti_core::Result<String> {
        if from == to {
            return Ok(text.to_string());
        }

        if !self.supports_pair(from, to) {
            return Err(chitti_core::Error::UnsupportedPair {
                from: from.code().to_string(),
                to: to.code().to_string(),
            });
        }

        tracing::debug!(from = from.code(), to = to.code(), chars = text.chars().count(), "Translating");

        Ok(self.call(text, from, to).await?)
    }

    fn supports_pair(&self, from: Language, to: Language) -> bool {
        supported_pairs().contains(&(from.code(), to.code()))
    }

    fn name(&self) -> &str {
        "google-v2"
    }
}

// Google Translation v2 wire types

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(endpoint: String) -> GoogleTranslator {
        GoogleTranslator::new(GoogleTranslatorConfig {
            endpoint,
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[test]
    fn test_requires_api_key() {
        let result = GoogleTranslator::new(GoogleTranslatorConfig {
            endpoint: "https://example.invalid".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(TextProcessingError::MissingApiKey(_))));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"data":{"translations":[{"translatedText":"How is the weather?","detectedSourceLanguage":"te"}]}}"#;
        let parsed: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.translations[0].translated_text, "How is the weather?");
    }

    #[tokio::test]
    async fn test_translate_round_trip_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "q": "వాతావరణం ఎలా ఉంది",
                "source": "te",
                "target": "en",
                "format": "text"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "translations": [{ "translatedText": "How is the weather" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let t = translator(format!("{}/language/translate/v2", server.uri()));
        let out = t
            .translate("వాతావరణం ఎలా ఉంది", Language::Telugu, Language::English)
            .await
            .unwrap();
        assert_eq!(out, "How is the weather");
    }

    #[tokio::test]
    async fn test_http_error_is_translation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let t = translator(server.uri());
        let err = t
            .translate("hello", Language::English, Language::Telugu)
            .await
            .unwrap_err();
        assert!(matches!(err, chitti_core::Error::Translation(msg) if msg.contains("403")));
    }

    #[tokio::test]
    async fn test_empty_translations() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "data": { "translations": [] } })),
            )
            .mount(&server)
            .await;

        let t = translator(server.uri());
        assert!(t
            .translate("hello", Language::English, Language::Telugu)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_same_language_short_circuits() {
        let t = translator("http://127.0.0.1:9".to_string());
        let out = t
            .translate("hello", Language::English, Language::English)
            .await
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_unsupported_pair() {
        let t = translator("http://127.0.0.1:9".to_string());
        let err = t
            .translate("x", Language::Telugu, Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, chitti_core::Error::UnsupportedPair { .. }));
    }
}
