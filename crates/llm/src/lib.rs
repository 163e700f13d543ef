//! Language model backends for the sentiment chat engine
//!
//! - **Gemini**: REST client used as the remote classification oracle and
//!   for conversational replies
//! - **Prompts**: chat persona and reply request building
//! - **Responder**: reply generation that never surfaces an error

pub mod gemini;
pub mod prompt;
pub mod responder;

pub use gemini::GeminiBackend;
pub use prompt::{ChatPrompt, CHAT_SYSTEM_PROMPT};
pub use responder::ChatResponder;

use std::sync::Arc;

use sentiment_chat_config::{LlmConfig, LlmProvider};
use sentiment_chat_core::{LanguageModel, Result};

/// Create a language model from config
///
/// Returns `Ok(None)` when the provider is disabled or no key is available;
/// callers degrade instead of failing.
pub fn create_language_model(config: &LlmConfig) -> Result<Option<Arc<dyn LanguageModel>>> {
    match config.provider {
        LlmProvider::Gemini => match config.resolved_api_key() {
            Some(_) => Ok(Some(Arc::new(GeminiBackend::from_config(config)?))),
            None => {
                tracing::warn!("Gemini API key not configured, running without a language model");
                Ok(None)
            }
        },
        LlmProvider::Disabled => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_model_without_key() {
        let config = LlmConfig::default();
        assert!(create_language_model(&config).unwrap().is_none());
    }

    #[test]
    fn test_no_model_when_disabled() {
        let config = LlmConfig {
            provider: LlmProvider::Disabled,
            api_key: Some("key".into()),
            ..Default::default()
        };
        assert!(create_language_model(&config).unwrap().is_none());
    }

    #[test]
    fn test_gemini_model_with_key() {
        let config = LlmConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        let model = create_language_model(&config).unwrap().unwrap();
        assert_eq!(model.model_name(), "gemini-2.5-flash-lite");
    }
}
