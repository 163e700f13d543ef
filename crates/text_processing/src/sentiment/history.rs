//! Per-conversation sentiment history

use serde::{Deserialize, Serialize};

use sentiment_chat_core::{SentimentRecord, SentimentResult};

use super::aggregate::{mood_shift, overall_sentiment, ConversationSentiment, InsufficientData, MoodShift};

/// Append-only sequence of classified messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    records: Vec<SentimentRecord>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified message
    pub fn push(&mut self, text: impl Into<String>, result: SentimentResult) -> &SentimentRecord {
        self.records.push(SentimentRecord::new(text, result));
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[SentimentRecord] {
        &self.records
    }

    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.result.score).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn overall(&self) -> Option<ConversationSentiment> {
        overall_sentiment(&self.scores())
    }

    pub fn mood_shift(&self) -> Result<MoodShift, InsufficientData> {
        mood_shift(&self.scores())
    }
}
