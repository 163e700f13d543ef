//! Keyword rule classifier
//!
//! Rules fire in strict priority order; the first hit wins and is never
//! second-guessed by later stages.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use sentiment_chat_core::{SentimentLabel, SentimentResult};

use super::lexicon::{Lexicon, LexiconCategory};

pub const VERY_NEGATIVE_SCORE: f64 = -0.8;
pub const MIXED_SCORE: f64 = 0.0;
pub const NEGATIVE_SCORE: f64 = -0.4;
pub const POSITIVE_SCORE: f64 = 0.5;

/// Which rule produced a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Safety-critical terms; masks every other signal
    VeryNegativeTerm,
    MixedSignals,
    /// Negation plus a positive term, read as negative
    NegatedPositive,
    NegativeTerm,
    PositiveTerm,
}

impl RuleKind {
    pub fn result(&self) -> SentimentResult {
        match self {
            RuleKind::VeryNegativeTerm => {
                SentimentResult::new(SentimentLabel::VeryNegative, VERY_NEGATIVE_SCORE)
            }
            RuleKind::MixedSignals => SentimentResult::new(SentimentLabel::MixedFeelings, MIXED_SCORE),
            RuleKind::NegatedPositive | RuleKind::NegativeTerm => {
                SentimentResult::new(SentimentLabel::Negative, NEGATIVE_SCORE)
            }
            RuleKind::PositiveTerm => SentimentResult::new(SentimentLabel::Positive, POSITIVE_SCORE),
        }
    }
}

/// A rule hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch {
    pub rule: RuleKind,
    pub result: SentimentResult,
}

/// Lexicon-driven rule classifier
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    lexicon: Arc<Lexicon>,
}

impl RuleClassifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Classify by keyword rules; `None` defers to the polarity scorer
    pub fn classify(&self, text: &str) -> Option<RuleMatch> {
        let rule = self.match_rule(&text.to_lowercase())?;
        Some(RuleMatch {
            rule,
            result: rule.result(),
        })
    }

    fn match_rule(&self, text_lower: &str) -> Option<RuleKind> {
        let lexicon = &self.lexicon;

        if lexicon.contains(LexiconCategory::VeryNegative, text_lower) {
            return Some(RuleKind::VeryNegativeTerm);
        }

        let has_negative = lexicon.contains(LexiconCategory::Negative, text_lower);
        let has_positive = lexicon.contains(LexiconCategory::Positive, text_lower);
        if has_negative && has_positive {
            return Some(RuleKind::MixedSignals);
        }

        if has_positive && lexicon.contains(LexiconCategory::Negation, text_lower) {
            return Some(RuleKind::NegatedPositive);
        }

        if has_negative {
            return Some(RuleKind::NegativeTerm);
        }

        if has_positive {
            return Some(RuleKind::PositiveTerm);
        }

        None
    }
}
