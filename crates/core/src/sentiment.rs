//! Sentiment labels and per-message results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Round a score to 3 decimal places for presentation
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

/// Discrete sentiment label attached to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[default]
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
    /// Both positive and negative signals present
    #[serde(rename = "Mixed Feelings")]
    MixedFeelings,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 6] = [
        SentimentLabel::VeryPositive,
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
        SentimentLabel::VeryNegative,
        SentimentLabel::MixedFeelings,
    ];

    /// Display name used in prompts and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
            SentimentLabel::MixedFeelings => "Mixed Feelings",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLabel::VeryPositive | SentimentLabel::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, SentimentLabel::VeryNegative | SentimentLabel::Negative)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label text that is not one of the known sentiment labels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment label: {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for SentimentLabel {
    type Err = UnknownLabel;

    /// Case-insensitive; runs of whitespace between words are collapsed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        SentimentLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Result of classifying a single message
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Polarity in [-1.0, 1.0]
    pub score: f64,
}

impl SentimentResult {
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self { label, score }
    }

    /// Same label with the score rounded to 3 decimals
    pub fn rounded(self) -> Self {
        Self {
            label: self.label,
            score: round_score(self.score),
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::new(SentimentLabel::Neutral, 0.0)
    }
}

impl fmt::Display for SentimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (score = {})", self.label, round_score(self.score))
    }
}

/// A classified message as kept in a conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub text: String,
    pub result: SentimentResult,
    pub recorded_at: DateTime<Utc>,
}

impl SentimentRecord {
    pub fn new(text: impl Into<String>, result: SentimentResult) -> Self {
        Self {
            text: text.into(),
            result,
            recorded_at: Utc::now(),
        }
    }
}
