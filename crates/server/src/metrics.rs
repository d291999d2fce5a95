//! Prometheus recorder and metric names

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::{state::AppState, ServerError};

/// Skill requests (counter, labels: action)
pub const SKILL_REQUESTS_TOTAL: &str = "chitti_skill_requests_total";
/// Requests that escaped the pipeline and got the generic apology (counter)
pub const UNHANDLED_FAULTS_TOTAL: &str = "chitti_unhandled_faults_total";

/// Install the global recorder. Call once, before anything records.
pub fn install_recorder() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Startup(format!("metrics recorder: {e}")))?;
    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

/// `GET /metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled\n".to_string()),
    }
}
