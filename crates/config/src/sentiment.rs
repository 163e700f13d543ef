//! Sentiment engine configuration

use serde::{Deserialize, Serialize};

/// Escalation target for edge-case classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackProvider {
    /// Ask the configured language model
    #[default]
    Llm,
    /// Keep the polarity scorer's answer
    Disabled,
}

/// Sentiment engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentSettings {
    /// TOML lexicon overriding the built-in term lists
    #[serde(default)]
    pub lexicon_file: Option<String>,

    #[serde(default)]
    pub fallback: FallbackProvider,
}
