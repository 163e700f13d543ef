//! Core traits for the sentiment chat engine
//!
//! All pluggable components implement these traits to enable:
//! - Swapping backends without code changes
//! - Testing with deterministic stubs
//! - Runtime selection based on configuration
//!
//! ```text
//! Language Models:
//!   - LanguageModel: prompt in, text out (remote classification oracle, chat replies)
//!
//! Sentiment:
//!   - PolarityScorer: continuous polarity score for free text
//!   - SentimentFallback: escalation path for ambiguous classifications
//! ```

mod llm;
mod sentiment;

pub use llm::LanguageModel;
pub use sentiment::{PolarityScorer, SentimentFallback};
