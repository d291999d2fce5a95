//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use chitti_agent::{PipelineSettings, TranslationPipeline};
use chitti_config::Settings;
use chitti_core::{Language, Translator};
use chitti_llm::{FinishReason, GenerationResult, LlmBackend, LlmError, Message};
use chitti_persistence::{InMemoryUsageStore, QuotaTracker};
use chitti_server::{create_router, AppState};
use chitti_text_processing::IndicRomanizer;

const ANSWER_EN: &str = "It is sunny today.";
const ANSWER_TE: &str = "ఈరోజు ఎండగా ఉంది.";

#[derive(Default)]
struct FixedTranslator {
    calls: AtomicUsize,
    delay: Duration,
}

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(
        &self,
        _text: &str,
        _from: Language,
        to: Language,
    ) -> chitti_core::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(if to == Language::English {
            "how is the weather".to_string()
        } else {
            ANSWER_TE.to_string()
        })
    }

    fn supports_pair(&self, from: Language, to: Language) -> bool {
        from != to
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct FixedLlm {
    panic: bool,
}

#[async_trait]
impl LlmBackend for FixedLlm {
    async fn generate(&self, _messages: &[Message]) -> Result<GenerationResult, LlmError> {
        if self.panic {
            panic!("backend blew up");
        }
        Ok(GenerationResult {
            text: ANSWER_EN.to_string(),
            tokens: 5,
            total_time_ms: 3,
            finish_reason: FinishReason::Stop,
        })
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

struct TestApp {
    router: Router,
    translator: Arc<FixedTranslator>,
    settings: Settings,
}

fn app_with(panic: bool) -> TestApp {
    build_app(Settings::default(), FixedTranslator::default(), panic)
}

fn build_app(settings: Settings, translator: FixedTranslator, panic: bool) -> TestApp {
    let translator = Arc::new(translator);
    let quota = Arc::new(QuotaTracker::new(
        Arc::new(InMemoryUsageStore::new()),
        settings.quota.character_limit,
    ));
    let pipeline = Arc::new(TranslationPipeline::new(
        PipelineSettings::from_settings(&settings),
        translator.clone(),
        Arc::new(FixedLlm { panic }),
        Arc::new(IndicRomanizer::new()),
        quota.clone(),
    ));

    let state = AppState::new(settings.clone(), pipeline, quota);
    TestApp {
        router: create_router(state),
        translator,
        settings,
    }
}

fn app() -> TestApp {
    app_with(false)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn post_skill(router: &Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/alexa")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn chat(question: Option<&str>) -> String {
    let slots = match question {
        Some(q) => json!({ "question": { "name": "question", "value": q } }),
        None => json!({}),
    };
    json!({
        "version": "1.0",
        "session": { "sessionId": "amzn1.echo-api.session.1", "new": false },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.1",
            "locale": "en-IN",
            "intent": { "name": "ChatIntent", "slots": slots }
        }
    })
    .to_string()
}

fn request_of(kind: &str, intent: Option<&str>) -> String {
    let mut request = json!({ "type": kind });
    if let Some(name) = intent {
        request["intent"] = json!({ "name": name });
    }
    json!({ "version": "1.0", "request": request }).to_string()
}

fn ssml(body: &Value) -> &str {
    body["response"]["outputSpeech"]["ssml"].as_str().unwrap()
}

#[tokio::test]
async fn test_root_liveness() {
    let app = app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("running"));
}

#[tokio::test]
async fn test_launch_speaks_welcome() {
    let app = app();
    let (status, body) = post_skill(&app.router, request_of("LaunchRequest", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.welcome.phonetic));
    assert_eq!(body["response"]["shouldEndSession"], false);
    assert!(body["response"]["reprompt"]["outputSpeech"]["ssml"].is_string());
}

#[tokio::test]
async fn test_chat_intent_answers() {
    let app = app();
    let (status, body) = post_skill(&app.router, chat(Some("వాతావరణం ఎలా ఉంది"))).await;

    assert_eq!(status, StatusCode::OK);
    let speech = ssml(&body);
    assert!(speech.starts_with("<speak><lang xml:lang=\"en-IN\">"));
    assert!(speech.is_ascii());
    assert_eq!(body["response"]["card"]["content"], ANSWER_TE);
    assert_eq!(body["response"]["card"]["title"], "Chitti");
    assert_eq!(app.translator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_chat_without_question_asks_to_repeat() {
    let app = app();
    let (status, body) = post_skill(&app.router, chat(None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.empty_input.phonetic));
    assert_eq!(app.translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stop_ends_session() {
    let app = app();
    for intent in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
        let (_, body) = post_skill(&app.router, request_of("IntentRequest", Some(intent))).await;
        assert!(ssml(&body).contains(&app.settings.pipeline.phrases.goodbye.phonetic));
        assert_eq!(body["response"]["shouldEndSession"], true);
    }
}

#[tokio::test]
async fn test_session_ended_is_empty() {
    let app = app();
    let (status, body) = post_skill(&app.router, request_of("SessionEndedRequest", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], json!({}));
}

#[tokio::test]
async fn test_unknown_intent_falls_back() {
    let app = app();
    let (_, body) = post_skill(
        &app.router,
        request_of("IntentRequest", Some("AMAZON.FallbackIntent")),
    )
    .await;

    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.empty_input.phonetic));
}

#[tokio::test]
async fn test_malformed_envelope_gets_apology() {
    let app = app();
    let (status, body) = post_skill(&app.router, "{\"not\": \"an envelope\"}".to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.unhandled.phonetic));
}

#[tokio::test]
async fn test_panicking_backend_gets_apology() {
    let app = app_with(true);
    let (status, body) = post_skill(&app.router, chat(Some("ప్రశ్న"))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.unhandled.phonetic));
}

#[tokio::test]
async fn test_slow_turn_gets_apology_not_timeout() {
    let mut settings = Settings::default();
    settings.server.timeout_seconds = 1;
    let translator = FixedTranslator {
        delay: Duration::from_millis(900),
        ..Default::default()
    };
    let app = build_app(settings, translator, false);

    let (status, body) = post_skill(&app.router, chat(Some("వాతావరణం ఎలా ఉంది"))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(ssml(&body).contains(&app.settings.pipeline.phrases.unhandled.phonetic));
}

#[tokio::test]
async fn test_usage_reports_windows() {
    let app = app();
    let (_, before) = get_json(&app.router, "/usage").await;
    assert_eq!(before["total_characters"], 0);
    assert_eq!(before["free_tier_limit"], 450_000);

    let question = "వాతావరణం ఎలా ఉంది";
    post_skill(&app.router, chat(Some(question))).await;

    let (status, after) = get_json(&app.router, "/usage").await;
    let expected = (question.chars().count() + ANSWER_EN.chars().count()) as u64;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["used_today"], expected);
    assert_eq!(after["used_last_7_days"], expected);
    assert_eq!(after["used_last_30_days"], expected);
    assert_eq!(after["used_last_365_days"], expected);
    assert_eq!(after["total_characters"], expected);
}

#[tokio::test]
async fn test_health_reports_ledger() {
    let app = app();
    let (status, body) = get_json(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ledger"], "memory");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = app();
    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
