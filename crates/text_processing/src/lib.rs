//! Text Processing for Sentiment Chat
//!
//! This crate provides the hybrid sentiment classification engine:
//! - **Lexicon**: categorized substring patterns (very negative, negative, positive, negation)
//! - **Rules**: early high-confidence labels from lexicon hits
//! - **Polarity**: continuous lexical polarity scoring with fixed label thresholds
//! - **Edge cases**: detection of scorer output that should not be trusted
//! - **Fallback**: LLM second opinion with silent degradation
//! - **Aggregation**: conversation average and mood-shift trend
//!
//! # Example
//!
//! ```ignore
//! use sentiment_chat_text_processing::SentimentAnalyzer;
//!
//! let analyzer = SentimentAnalyzer::rule_based();
//! let result = analyzer.analyze("I'm feeling happy today").await;
//! println!("{}", result);
//! ```

pub mod sentiment;

mod error;

pub use error::{Result, TextProcessingError};

pub use sentiment::{
    create_analyzer, create_fallback, default_lexicon, label_for_score, mood_shift,
    overall_sentiment, parse_classification, Analysis, ClassificationParseError,
    ConversationHistory, ConversationSentiment, DecisionStage, EdgeCaseDetector, EdgeCaseReason,
    InsufficientData, LexicalPolarityScorer, Lexicon, LexiconCategory, LexiconFile,
    LexiconSignals, LlmSentimentClassifier, MoodShift, MoodTrend, NoopFallback, OverallLabel,
    RuleClassifier, RuleKind, RuleMatch, SentimentAnalyzer,
};
