//! Core traits and types for the sentiment chat engine
//!
//! This crate provides foundational types used across all other crates:
//! - Error types
//! - Sentiment labels, results and per-message records
//! - Conversation turn types
//! - Pluggable component traits (language model, polarity scorer, fallback)

pub mod conversation;
pub mod error;
pub mod llm_types;
pub mod sentiment;
pub mod traits;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, LlmError, Result};
pub use llm_types::{GenerateRequest, GenerateResponse, Message, Role};
pub use sentiment::{round_score, SentimentLabel, SentimentRecord, SentimentResult, UnknownLabel};
pub use traits::{LanguageModel, PolarityScorer, SentimentFallback};
