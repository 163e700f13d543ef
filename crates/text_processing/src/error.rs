//! Error types for text processing

use thiserror::Error;

/// Text processing errors
#[derive(Debug, Error)]
pub enum TextProcessingError {
    /// Lexicon content is invalid
    #[error("Invalid lexicon: {0}")]
    LexiconError(String),

    /// Lexicon file could not be parsed
    #[error("Failed to parse lexicon file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Core error
    #[error("Core error: {0}")]
    CoreError(#[from] sentiment_chat_core::Error),
}

/// Result type for text processing
pub type Result<T> = std::result::Result<T, TextProcessingError>;
