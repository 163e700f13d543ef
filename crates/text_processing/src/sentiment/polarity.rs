//! Lexical polarity scoring
//!
//! Word-level valence averaging with intensifier scaling and negation
//! flipping. Any [`PolarityScorer`] can stand in for it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use sentiment_chat_core::{PolarityScorer, SentimentLabel};

/// Map a continuous score to a label
///
/// Boundaries: `> 0.5` very positive, `(0.1, 0.5]` positive,
/// `[-0.1, 0.1]` neutral, `(-0.5, -0.1)` negative, `<= -0.5` very negative.
pub fn label_for_score(score: f64) -> SentimentLabel {
    if score > 0.5 {
        SentimentLabel::VeryPositive
    } else if score > 0.1 {
        SentimentLabel::Positive
    } else if score >= -0.1 {
        SentimentLabel::Neutral
    } else if score > -0.5 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::VeryNegative
    }
}

/// Applied to a word's valence when a negation precedes it
const NEGATION_FACTOR: f64 = -0.5;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

static VALENCE: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // Positive
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("wonderful", 1.0),
        ("fantastic", 0.4),
        ("perfect", 1.0),
        ("best", 1.0),
        ("better", 0.5),
        ("nice", 0.6),
        ("fine", 0.4167),
        ("okay", 0.5),
        ("ok", 0.5),
        ("pleasant", 0.733),
        ("beautiful", 0.85),
        ("lovely", 0.5),
        ("happy", 0.8),
        ("glad", 0.5),
        ("cheerful", 0.8),
        ("fun", 0.3),
        ("funny", 0.25),
        ("interesting", 0.5),
        ("cool", 0.35),
        ("calm", 0.3),
        ("relaxed", 0.3),
        ("lucky", 0.333),
        ("grateful", 0.5),
        ("thankful", 0.5),
        ("proud", 0.8),
        ("enjoy", 0.4),
        ("enjoyed", 0.4),
        ("like", 0.2),
        ("liked", 0.2),
        ("love", 0.5),
        ("loved", 0.7),
        ("helpful", 0.5),
        ("satisfied", 0.5),
        ("positive", 0.227),
        ("well", 0.3),
        ("easy", 0.433),
        ("productive", 0.5),
        ("safe", 0.5),
        ("fresh", 0.3),
        ("smooth", 0.4),
        // Negative
        ("bad", -0.7),
        ("worse", -0.4),
        ("worst", -1.0),
        ("terrible", -1.0),
        ("horrible", -1.0),
        ("awful", -1.0),
        ("poor", -0.4),
        ("sad", -0.5),
        ("unhappy", -0.6),
        ("angry", -0.5),
        ("mad", -0.625),
        ("annoyed", -0.4),
        ("annoying", -0.8),
        ("boring", -1.0),
        ("bored", -0.5),
        ("dull", -0.3),
        ("tired", -0.4),
        ("exhausted", -0.4),
        ("lonely", -0.5),
        ("hate", -0.8),
        ("hated", -0.9),
        ("ugly", -0.7),
        ("stupid", -0.8),
        ("wrong", -0.5),
        ("difficult", -0.5),
        ("hard", -0.292),
        ("sick", -0.714),
        ("nasty", -1.0),
        ("disgusting", -1.0),
        ("pathetic", -1.0),
        ("frustrating", -0.4),
        ("frustrated", -0.7),
        ("confusing", -0.3),
        ("confused", -0.4),
        ("worried", -0.4),
        ("nervous", -0.3),
        ("lost", -0.3),
        ("broken", -0.4),
        ("useless", -0.5),
        ("slow", -0.3),
        ("crazy", -0.6),
        ("negative", -0.3),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 1.3),
        ("so", 1.3),
        ("extremely", 1.5),
        ("incredibly", 1.5),
        ("super", 1.4),
        ("truly", 1.2),
        ("quite", 1.1),
        ("pretty", 1.1),
        ("too", 1.2),
        ("slightly", 0.6),
        ("somewhat", 0.7),
    ]
    .into_iter()
    .collect()
});

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "never" | "no" | "nor" | "cannot") || token.ends_with("n't")
}

/// Word-valence polarity scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalPolarityScorer;

impl LexicalPolarityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Valence of each scoring word after modifiers are applied
    fn contributions(text: &str) -> Vec<f64> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = WORD_PATTERN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .collect();

        let mut values = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = VALENCE.get(token) else {
                continue;
            };

            let mut value = base;
            let mut lookback = i;

            if let Some(&factor) = i
                .checked_sub(1)
                .and_then(|prev| INTENSIFIERS.get(tokens[prev]))
            {
                value = (value * factor).clamp(-1.0, 1.0);
                lookback -= 1;
            }

            if lookback > 0 && is_negation(tokens[lookback - 1]) {
                value *= NEGATION_FACTOR;
            }

            values.push(value);
        }

        values
    }
}

impl PolarityScorer for LexicalPolarityScorer {
    fn score(&self, text: &str) -> f64 {
        let values = Self::contributions(text);
        if values.is_empty() {
            return 0.0;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        mean.clamp(-1.0, 1.0)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
