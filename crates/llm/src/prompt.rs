//! Chat prompt construction

use sentiment_chat_core::GenerateRequest;

/// System instruction for conversational replies
pub const CHAT_SYSTEM_PROMPT: &str = "You are a warm, supportive conversation partner. \
Reply briefly and kindly to the user's message. If the user sounds distressed, \
acknowledge their feelings and gently encourage them to reach out to someone they trust.";

/// Chat reply prompt builder
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    system: String,
    temperature: f32,
}

impl ChatPrompt {
    pub fn new(temperature: f32) -> Self {
        Self {
            system: CHAT_SYSTEM_PROMPT.to_string(),
            temperature,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    pub fn request(&self, user_message: &str) -> GenerateRequest {
        GenerateRequest::from_prompt(user_message)
            .with_system(self.system.clone())
            .with_temperature(self.temperature)
    }
}

impl Default for ChatPrompt {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_chat_core::Role;

    #[test]
    fn test_chat_request() {
        let request = ChatPrompt::new(0.5).request("hello there");
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].content, "hello there");
        assert_eq!(request.temperature, Some(0.5));
    }
}
