//! Conversational replies
//!
//! Reply generation never fails from the caller's point of view: provider
//! errors are turned into a user-facing notice.

use std::sync::Arc;

use sentiment_chat_core::{Error, LanguageModel};

use crate::prompt::ChatPrompt;

pub const QUOTA_NOTICE: &str =
    "It seems we have reached the API quota limit. Please try again later.";

pub const UNCONFIGURED_NOTICE: &str =
    "The assistant is not configured right now, but your message and its sentiment were recorded.";

/// Generates bot replies to user messages
#[derive(Clone)]
pub struct ChatResponder {
    llm: Option<Arc<dyn LanguageModel>>,
    prompt: ChatPrompt,
}

impl ChatResponder {
    pub fn new(llm: Option<Arc<dyn LanguageModel>>, prompt: ChatPrompt) -> Self {
        Self { llm, prompt }
    }

    /// Responder without a model; always answers with the unconfigured notice
    pub fn disabled() -> Self {
        Self::new(None, ChatPrompt::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Reply to a user message
    pub async fn reply(&self, message: &str) -> String {
        let Some(llm) = &self.llm else {
            return UNCONFIGURED_NOTICE.to_string();
        };

        match llm.generate(self.prompt.request(message)).await {
            Ok(response) => response.text.trim().to_string(),
            Err(e) => {
                tracing::warn!(model = llm.model_name(), error = %e, "Chat reply failed");
                error_notice(&e)
            }
        }
    }
}

fn error_notice(error: &Error) -> String {
    if error.is_quota() {
        QUOTA_NOTICE.to_string()
    } else {
        format!("An error occurred: {error}")
    }
}
