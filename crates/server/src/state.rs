//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sentiment_chat_config::Settings;
use sentiment_chat_llm::ChatResponder;
use sentiment_chat_text_processing::{Analysis, SentimentAnalyzer};

use crate::metrics::record_classification;
use crate::session::SessionManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub responder: Arc<ChatResponder>,
}

impl AppState {
    pub fn new(config: Settings, analyzer: SentimentAnalyzer, responder: ChatResponder) -> Self {
        let sessions = SessionManager::with_config(
            config.server.max_sessions,
            Duration::from_secs(config.server.session_timeout_secs),
            Duration::from_secs(config.server.cleanup_interval_secs),
        );

        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            analyzer: Arc::new(analyzer),
            responder: Arc::new(responder),
        }
    }

    /// Classify a message, recording stage and latency
    pub async fn classify(&self, text: &str) -> Analysis {
        let started = Instant::now();
        let analysis = self.analyzer.analyze_detailed(text).await;
        record_classification(analysis.stage, started.elapsed());
        analysis
    }
}
