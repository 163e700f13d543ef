//! Edge-case detection
//!
//! Flags scorer output that disagrees with the lexicon so it can be
//! escalated instead of returned as-is. Only consulted when no keyword rule
//! fired.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use sentiment_chat_core::SentimentLabel;

use super::lexicon::{Lexicon, LexiconCategory, LexiconSignals};

/// Negated "good" is a known weak spot of word-level scoring
const NEGATED_TERM: &str = "good";

/// Scorer output above this contradicts negative lexicon hits
const POSITIVE_SCORE_FLOOR: f64 = 0.1;

/// Why a classification was escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCaseReason {
    /// Scorer says neutral but the lexicon found polarity
    NeutralDespiteLexicon,
    /// Negative terms present but the score is positive
    NegativeTermsPositiveScore,
    /// Negation in the same message as "good"
    NegatedGood,
}

/// Decides whether scorer output should be escalated
#[derive(Debug, Clone)]
pub struct EdgeCaseDetector {
    lexicon: Arc<Lexicon>,
}

impl EdgeCaseDetector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// First matching escalation reason, if any
    pub fn detect(
        &self,
        text: &str,
        label: SentimentLabel,
        score: f64,
        signals: &LexiconSignals,
    ) -> Option<EdgeCaseReason> {
        if label == SentimentLabel::Neutral && (signals.has_positive || signals.has_negative) {
            return Some(EdgeCaseReason::NeutralDespiteLexicon);
        }

        let text_lower = text.to_lowercase();
        let has_negative_term = self.lexicon.contains(LexiconCategory::Negative, &text_lower)
            || self.lexicon.contains(LexiconCategory::VeryNegative, &text_lower);
        if has_negative_term && score > POSITIVE_SCORE_FLOOR {
            return Some(EdgeCaseReason::NegativeTermsPositiveScore);
        }

        if signals.has_negation && text_lower.contains(NEGATED_TERM) {
            return Some(EdgeCaseReason::NegatedGood);
        }

        None
    }

    /// Whether the scorer's label should be escalated
    pub fn is_edge_case(
        &self,
        text: &str,
        label: SentimentLabel,
        score: f64,
        has_positive: bool,
        has_negative: bool,
        has_negation: bool,
    ) -> bool {
        let signals = LexiconSignals {
            has_very_negative: false,
            has_negative,
            has_positive,
            has_negation,
        };
        self.detect(text, label, score, &signals).is_some()
    }
}
