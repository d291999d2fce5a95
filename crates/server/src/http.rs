//! HTTP Endpoints

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use chitti_agent::{PipelineError, Stage};

use crate::metrics::{metrics_handler, UNHANDLED_FAULTS_TOTAL};
use crate::skill::{self, RequestEnvelope, ResponseEnvelope};
use crate::state::AppState;
use crate::ServerError;

const FALLBACK_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    // the skill route bounds itself with the turn budget and must never answer 408
    Router::new()
        .route("/usage", get(usage))
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route_layer(TimeoutLayer::new(timeout))
        .route(&server.skill_path, post(skill_endpoint))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - disabled: permissive
/// - no valid origins: localhost only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to {}", FALLBACK_ORIGIN);
        return layer.allow_origin(HeaderValue::from_static(FALLBACK_ORIGIN));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

/// Voice-platform endpoint. Always answers 200 with a speakable envelope.
async fn skill_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Json<ResponseEnvelope> {
    let envelope = match payload {
        Ok(Json(envelope)) => envelope,
        Err(rejection) => {
            return Json(apology(&state, PipelineError::UnhandledFault(rejection.body_text())));
        }
    };

    // a panic inside the turn surfaces as a JoinError instead of a dropped connection
    let task_state = state.clone();
    let mut handle = tokio::spawn(async move { skill::dispatch(&task_state, envelope).await });
    let budget = state.config.server.turn_budget();

    match tokio::time::timeout(budget, &mut handle).await {
        Ok(Ok(response)) => Json(response),
        Ok(Err(e)) => Json(apology(&state, PipelineError::UnhandledFault(e.to_string()))),
        // the detached turn keeps running so usage it already incurred is recorded
        Err(_) => Json(apology(
            &state,
            PipelineError::UnhandledFault(format!(
                "turn exceeded {} ms budget",
                budget.as_millis()
            )),
        )),
    }
}

fn apology(state: &AppState, reason: PipelineError) -> ResponseEnvelope {
    ::metrics::counter!(UNHANDLED_FAULTS_TOTAL).increment(1);
    tracing::error!(stage = Stage::Dispatch.as_str(), error = %reason, "Skill request failed");

    let composed = state.composer.phrase(&state.pipeline.phrases().unhandled);
    ResponseEnvelope::from_composed(composed, None, false)
}

#[derive(Debug, Serialize)]
struct UsageResponse {
    used_today: u64,
    used_last_7_days: u64,
    used_last_30_days: u64,
    used_last_365_days: u64,
    total_characters: u64,
    free_tier_limit: u64,
}

/// `GET /usage`
async fn usage(State(state): State<AppState>) -> Result<Json<UsageResponse>, StatusCode> {
    let stats = state.quota.stats().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read usage ledger");
        StatusCode::from(ServerError::from(e))
    })?;

    Ok(Json(UsageResponse {
        used_today: stats.today,
        used_last_7_days: stats.week,
        used_last_30_days: stats.month,
        used_last_365_days: stats.year,
        total_characters: stats.total,
        free_tier_limit: stats.limit,
    }))
}

async fn root() -> &'static str {
    "Chitti voice bridge is running"
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "ledger": state.quota.backend_name(),
        "skill_path": state.config.server.skill_path,
    }))
}
