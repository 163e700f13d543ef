//! Configuration management for the sentiment chat engine
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (SENTIMENT_CHAT_ prefix, `__` separator)
//! - A `.env` file and `GOOGLE_API_KEY` for the language model key

pub mod llm;
pub mod sentiment;
pub mod settings;

pub use llm::{LlmConfig, LlmProvider};
pub use sentiment::{FallbackProvider, SentimentSettings};
pub use settings::{load_settings, ObservabilityConfig, ServerConfig, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
