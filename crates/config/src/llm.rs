//! Language model backend configuration

use serde::{Deserialize, Serialize};

/// Language model providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini REST API
    #[default]
    Gemini,
    /// No remote model; fallback and chat replies degrade
    Disabled,
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// API key (falls back to GOOGLE_API_KEY when unset)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature for label/score classification prompts
    #[serde(default = "default_classification_temperature")]
    pub classification_temperature: f32,

    /// Temperature for conversational replies
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_classification_temperature() -> f32 {
    0.0
}
fn default_chat_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    512
}

impl LlmConfig {
    /// Key to use, if any. Blank keys count as missing.
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether a remote model can be constructed from this config
    pub fn is_usable(&self) -> bool {
        self.provider != LlmProvider::Disabled && self.resolved_api_key().is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            classification_temperature: default_classification_temperature(),
            chat_temperature: default_chat_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}
