//! Error types for the sentiment chat engine

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // LLM errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised while talking to a remote language model
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Language model not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Quota limit reached: {0}")]
    QuotaExceeded(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Whether the provider rejected the call because of quota or rate limits
    pub fn is_quota(&self) -> bool {
        match self {
            LlmError::QuotaExceeded(_) => true,
            LlmError::Status { status, message } => {
                let message = message.to_lowercase();
                *status == 429 || message.contains("quota") || message.contains("limit")
            }
            _ => false,
        }
    }
}

impl Error {
    /// Create a generic error from a string
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error is a provider quota/limit rejection
    pub fn is_quota(&self) -> bool {
        matches!(self, Error::Llm(e) if e.is_quota())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
