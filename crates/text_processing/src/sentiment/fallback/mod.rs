//! Fallback classification for edge cases
//!
//! Escalates ambiguous scorer output to a language model, or passes the
//! scorer's answer through when no model is available.

mod llm_classifier;
mod noop;

pub use llm_classifier::{parse_classification, ClassificationParseError, LlmSentimentClassifier};
pub use noop::NoopFallback;

use std::sync::Arc;

use sentiment_chat_config::{FallbackProvider, SentimentSettings};
use sentiment_chat_core::{LanguageModel, SentimentFallback};

/// Create the fallback classifier based on config
pub fn create_fallback(
    settings: &SentimentSettings,
    llm: Option<Arc<dyn LanguageModel>>,
    temperature: f32,
) -> Arc<dyn SentimentFallback> {
    match settings.fallback {
        FallbackProvider::Llm => {
            if let Some(llm) = llm {
                Arc::new(LlmSentimentClassifier::new(llm, temperature))
            } else {
                tracing::warn!("LLM not available, edge cases will keep the scorer's label");
                Arc::new(NoopFallback)
            }
        }
        FallbackProvider::Disabled => Arc::new(NoopFallback),
    }
}
