//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LlmConfig, LlmProvider, SentimentSettings};

/// Environment variable consulted when `llm.api_key` is unset
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub sentiment: SentimentSettings,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("server.port", self.server.port == 0, "port must be non-zero"),
            (
                "server.max_sessions",
                self.server.max_sessions == 0,
                "at least one session must be allowed",
            ),
            (
                "server.session_timeout_secs",
                self.server.session_timeout_secs == 0,
                "session timeout must be non-zero",
            ),
            (
                "server.cleanup_interval_secs",
                self.server.cleanup_interval_secs == 0,
                "cleanup interval must be non-zero",
            ),
            (
                "llm.timeout_secs",
                self.llm.timeout_secs == 0,
                "request timeout must be non-zero",
            ),
        ];

        if let Some((field, _, message)) = checks.into_iter().find(|(_, failed, _)| *failed) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: message.to_string(),
            });
        }

        // A missing key is not an error: the engine degrades to the scorer.
        if self.llm.provider != LlmProvider::Disabled && self.llm.resolved_api_key().is_none() {
            tracing::warn!(
                "llm.provider is {:?} but no API key is configured; LLM fallback and chat replies are disabled",
                self.llm.provider
            );
        }

        Ok(())
    }

    /// Fill `llm.api_key` from `GOOGLE_API_KEY` when not set explicitly
    fn apply_api_key_env(&mut self) {
        if self.llm.resolved_api_key().is_none() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.llm.api_key = Some(key);
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum concurrent chat sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time after which a session is dropped
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,

    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,

    /// CORS allowed origins (empty allows any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_sessions() -> usize {
    100
}
fn default_session_timeout() -> u64 {
    3600
}
fn default_cleanup_interval() -> u64 {
    300
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
            session_timeout_secs: default_session_timeout(),
            cleanup_interval_secs: default_cleanup_interval(),
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (SENTIMENT_CHAT_ prefix)
/// 2. config/{env}.yaml|toml (if env specified)
/// 3. config/default.yaml|toml
///
/// `GOOGLE_API_KEY` fills the LLM key if none of the above set it.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SENTIMENT_CHAT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;
    settings.apply_api_key_env();

    settings.validate()?;

    Ok(settings)
}
