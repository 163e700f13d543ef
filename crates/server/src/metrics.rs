//! Observability Metrics
//!
//! Prometheus metrics endpoint for monitoring.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use ::metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

use sentiment_chat_text_processing::DecisionStage;

use crate::state::AppState;
use crate::ServerError;

/// Global Prometheus handle
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const STAGES: [DecisionStage; 3] = [
    DecisionStage::Rule,
    DecisionStage::Scorer,
    DecisionStage::Fallback,
];

/// Install the Prometheus recorder
///
/// Must be called once at startup before recording any metrics.
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Internal(format!("Failed to install Prometheus recorder: {}", e)))?;

    register_default_metrics();

    METRICS_HANDLE.get_or_init(|| handle.clone());
    Ok(handle)
}

pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

fn register_default_metrics() {
    gauge!("sentiment_chat_sessions_active").set(0.0);
    counter!("sentiment_chat_sessions_created_total").absolute(0);
    counter!("sentiment_chat_sessions_expired_total").absolute(0);

    for stage in STAGES {
        counter!("sentiment_chat_classifications_total", "stage" => stage.as_str()).absolute(0);
    }
}

/// Record one classification and how long it took
pub fn record_classification(stage: DecisionStage, elapsed: Duration) {
    counter!("sentiment_chat_classifications_total", "stage" => stage.as_str()).increment(1);
    histogram!("sentiment_chat_classification_duration_seconds", "stage" => stage.as_str())
        .record(elapsed.as_secs_f64());
}

pub fn record_session_created() {
    counter!("sentiment_chat_sessions_created_total").increment(1);
}

pub fn record_sessions_expired(count: usize) {
    counter!("sentiment_chat_sessions_expired_total").increment(count as u64);
}

pub fn record_active_sessions(count: usize) {
    gauge!("sentiment_chat_sessions_active").set(count as f64);
}

/// Metrics endpoint handler
///
/// Returns Prometheus-formatted metrics.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    record_active_sessions(state.sessions.count());

    match get_metrics_handle() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "Metrics not initialized".to_string(),
        ),
    }
}
