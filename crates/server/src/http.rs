//! HTTP Endpoints
//!
//! REST API for stateless classification and chat sessions.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sentiment_chat_core::{round_score, SentimentLabel, SentimentRecord};
use sentiment_chat_text_processing::{Analysis, DecisionStage};

use crate::metrics::metrics_handler;
use crate::session::Session;
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Stateless classification
        .route("/api/sentiment", post(classify))
        // Session endpoints
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/messages", post(post_message))
        .route("/api/sessions/:id/summary", get(session_summary))
        .route("/api/sessions/:id/trend", get(session_trend))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check));

    if state.config.observability.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    let cors = cors_layer(&state.config.server.cors_origins);

    router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

fn find_session(state: &AppState, id: &str) -> Result<Arc<Session>, ServerError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ServerError::SessionNotFound(id.to_string()))
}

/// Classification as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct SentimentView {
    pub label: SentimentLabel,
    pub score: f64,
    pub stage: DecisionStage,
}

impl From<Analysis> for SentimentView {
    fn from(analysis: Analysis) -> Self {
        Self {
            label: analysis.result.label,
            score: round_score(analysis.result.score),
            stage: analysis.stage,
        }
    }
}

/// One classified user message
#[derive(Debug, Clone, Serialize)]
pub struct StatementView {
    pub text: String,
    pub label: SentimentLabel,
    pub score: f64,
}

impl From<SentimentRecord> for StatementView {
    fn from(record: SentimentRecord) -> Self {
        Self {
            text: record.text,
            label: record.result.label,
            score: round_score(record.result.score),
        }
    }
}

/// Classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Classify a single message without a session
async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<SentimentView> {
    Json(state.classify(&request.text).await.into())
}

/// Create session
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ServerError> {
    let session = state.sessions.create()?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "session_id": session.id,
            "created_at": session.created_at,
        })),
    ))
}

/// List sessions
async fn list_sessions(State(state): State<AppState>) -> Json<Value> {
    let sessions = state.sessions.list();
    Json(json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

/// Get session transcript and per-message sentiment
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let session = find_session(&state, &id)?;
    let statements: Vec<StatementView> = session
        .statements()
        .into_iter()
        .map(StatementView::from)
        .collect();

    Ok(Json(json!({
        "session_id": session.id,
        "created_at": session.created_at,
        "active": session.is_active(),
        "message_count": statements.len(),
        "transcript": session.transcript(),
        "statements": statements,
    })))
}

/// Delete session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

/// Message request
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub sentiment: SentimentView,
    pub reply: String,
}

/// Classify a user message, reply to it and append both to the session
async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let session = find_session(&state, &id)?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServerError::InvalidRequest("message must not be empty".into()));
    }

    session.touch();

    let analysis = state.classify(message).await;
    let reply = state.responder.reply(message).await;
    session.record_exchange(message, analysis.result, &reply);

    tracing::debug!(
        session_id = %session.id,
        label = %analysis.result.label,
        stage = %analysis.stage,
        "Message recorded"
    );

    Ok(Json(MessageResponse {
        sentiment: analysis.into(),
        reply,
    }))
}

/// Conversation-level sentiment
async fn session_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let session = find_session(&state, &id)?;

    let Some(overall) = session.overall() else {
        return Ok(Json(json!({ "status": "empty" })));
    };
    let overall = overall.rounded();

    Ok(Json(json!({
        "status": "ok",
        "message_count": session.message_count(),
        "average_score": overall.average_score,
        "label": overall.label,
        "description": overall.description(),
    })))
}

/// Start-versus-end mood shift
async fn session_trend(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let session = find_session(&state, &id)?;

    match session.mood_shift() {
        Ok(shift) => {
            let shift = shift.rounded();
            Ok(Json(json!({
                "status": "ok",
                "start_avg": shift.start_avg,
                "end_avg": shift.end_avg,
                "delta": shift.delta,
                "trend": shift.trend,
                "description": shift.trend.description(),
            })))
        }
        Err(insufficient) => Ok(Json(json!({
            "status": "insufficient_data",
            "count": insufficient.count,
            "message": insufficient.to_string(),
        }))),
    }
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ready",
        "sessions": state.sessions.count(),
        "fallback_enabled": state.analyzer.fallback_enabled(),
        "chat_enabled": state.responder.is_enabled(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sentiment_chat_config::Settings;
    use sentiment_chat_core::{GenerateRequest, GenerateResponse, LanguageModel, Result};
    use sentiment_chat_llm::{ChatPrompt, ChatResponder};
    use sentiment_chat_text_processing::SentimentAnalyzer;

    struct Echo;

    #[async_trait]
    impl LanguageModel for Echo {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(GenerateResponse {
                text: format!("You said: {}", last),
                model: "echo".into(),
            })
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            Settings::default(),
            SentimentAnalyzer::rule_based(),
            ChatResponder::new(Some(Arc::new(Echo)), ChatPrompt::default()),
        )
    }

    async fn new_session(state: &AppState) -> String {
        let (status, Json(body)) = create_session(State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn send(state: &AppState, id: &str, message: &str) -> MessageResponse {
        let Json(response) = post_message(
            State(state.clone()),
            Path(id.to_string()),
            Json(MessageRequest {
                message: message.to_string(),
            }),
        )
        .await
        .unwrap();
        response
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(test_state());
    }

    #[test]
    fn test_cors_with_origins() {
        let _ = cors_layer(&["http://localhost:3000".to_string()]);
    }

    #[tokio::test]
    async fn test_classify_endpoint() {
        let Json(view) = classify(
            State(test_state()),
            Json(ClassifyRequest {
                text: "I'm so excited".into(),
            }),
        )
        .await;

        assert_eq!(view.label, SentimentLabel::Positive);
        assert_eq!(view.score, 0.5);
        assert_eq!(view.stage, DecisionStage::Rule);
    }

    #[tokio::test]
    async fn test_message_flow() {
        let state = test_state();
        let id = new_session(&state).await;

        let response = send(&state, &id, "I'm upset about work").await;
        assert_eq!(response.sentiment.label, SentimentLabel::Negative);
        assert_eq!(response.reply, "You said: I'm upset about work");

        let Json(body) = get_session(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(body["message_count"], 1);
        assert_eq!(body["transcript"].as_array().unwrap().len(), 2);
        assert_eq!(body["transcript"][1]["role"], "bot");
        assert_eq!(body["statements"][0]["label"], "Negative");
        assert_eq!(body["statements"][0]["score"], -0.4);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let state = test_state();
        let id = new_session(&state).await;

        let result = post_message(
            State(state.clone()),
            Path(id.clone()),
            Json(MessageRequest {
                message: "   ".into(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ServerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_summary_and_trend() {
        let state = test_state();
        let id = new_session(&state).await;

        let Json(summary) = session_summary(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(summary["status"], "empty");

        send(&state, &id, "I feel hopeless").await;
        send(&state, &id, "still stressed").await;

        let Json(trend) = session_trend(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(trend["status"], "insufficient_data");
        assert_eq!(trend["count"], 2);

        send(&state, &id, "ok, I'm glad I talked to you").await;

        let Json(summary) = session_summary(State(state.clone()), Path(id.clone())).await.unwrap();
        // (-0.8 - 0.4 + 0.5) / 3
        assert_eq!(summary["average_score"], -0.233);
        assert_eq!(summary["label"], "Negative");
        assert_eq!(
            summary["description"],
            "Overall Negative: general dissatisfaction."
        );

        let Json(trend) = session_trend(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(trend["status"], "ok");
        assert_eq!(trend["delta"], 1.3);
        assert_eq!(trend["trend"], "Improving");
        assert_eq!(trend["description"], "Mood is improving");
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let state = test_state();
        let result = get_session(State(state.clone()), Path("missing".into())).await;
        assert!(matches!(result, Err(ServerError::SessionNotFound(_))));

        let status = delete_session(State(state), Path("missing".into())).await;
        assert!(matches!(status, Err(ServerError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let state = test_state();
        let id = new_session(&state).await;

        let status = delete_session(State(state.clone()), Path(id.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.sessions.count(), 0);
    }
}
