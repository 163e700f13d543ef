//! Hybrid sentiment classification
//!
//! A message passes through up to three stages:
//! 1. keyword rules over the lexicon (first hit wins)
//! 2. the polarity scorer, mapped to a label by fixed thresholds
//! 3. the fallback classifier, only when the scorer output looks unreliable
//!
//! Every path ends in a valid label/score pair; nothing here returns an error.

mod aggregate;
mod edge_case;
mod fallback;
mod history;
mod lexicon;
mod polarity;
mod rules;

pub use aggregate::{
    mood_shift, overall_sentiment, ConversationSentiment, InsufficientData, MoodShift, MoodTrend,
    OverallLabel,
};
pub use edge_case::{EdgeCaseDetector, EdgeCaseReason};
pub use fallback::{
    create_fallback, parse_classification, ClassificationParseError, LlmSentimentClassifier,
    NoopFallback,
};
pub use history::ConversationHistory;
pub use lexicon::{default_lexicon, Lexicon, LexiconCategory, LexiconFile, LexiconSignals};
pub use polarity::{label_for_score, LexicalPolarityScorer};
pub use rules::{RuleClassifier, RuleKind, RuleMatch};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use sentiment_chat_config::SentimentSettings;
use sentiment_chat_core::{LanguageModel, PolarityScorer, SentimentFallback, SentimentResult};

/// Stage that produced the final label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStage {
    Rule,
    Scorer,
    Fallback,
}

impl DecisionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStage::Rule => "rule",
            DecisionStage::Scorer => "scorer",
            DecisionStage::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DecisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification together with how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Final result, score rounded to 3 decimals
    pub result: SentimentResult,
    pub stage: DecisionStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_case: Option<EdgeCaseReason>,
    /// Raw scorer output, when the scorer ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<f64>,
}

/// The classification engine
///
/// Immutable after construction; share it behind an `Arc`.
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
    rules: RuleClassifier,
    scorer: Arc<dyn PolarityScorer>,
    edge_cases: EdgeCaseDetector,
    fallback: Arc<dyn SentimentFallback>,
}

impl SentimentAnalyzer {
    pub fn new(
        lexicon: Lexicon,
        scorer: Arc<dyn PolarityScorer>,
        fallback: Arc<dyn SentimentFallback>,
    ) -> Self {
        let lexicon = Arc::new(lexicon);
        Self {
            rules: RuleClassifier::new(lexicon.clone()),
            edge_cases: EdgeCaseDetector::new(lexicon.clone()),
            lexicon,
            scorer,
            fallback,
        }
    }

    /// Default lexicon and scorer, no fallback model
    pub fn rule_based() -> Self {
        Self::new(
            default_lexicon(),
            Arc::new(LexicalPolarityScorer::new()),
            Arc::new(NoopFallback),
        )
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback.is_enabled()
    }

    /// Classify a message
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        self.analyze_detailed(text).await.result
    }

    /// Classify a message and report the deciding stage
    pub async fn analyze_detailed(&self, text: &str) -> Analysis {
        if let Some(hit) = self.rules.classify(text) {
            tracing::debug!(rule = ?hit.rule, label = %hit.result.label, "Rule match");
            return Analysis {
                result: hit.result.rounded(),
                stage: DecisionStage::Rule,
                rule: Some(hit.rule),
                edge_case: None,
                polarity: None,
            };
        }

        let score = self.scorer.score(text);
        let label = label_for_score(score);
        let signals = self.lexicon.signals(text);

        let Some(reason) = self.edge_cases.detect(text, label, score, &signals) else {
            tracing::debug!(scorer = self.scorer.name(), score, label = %label, "Scorer label");
            return Analysis {
                result: SentimentResult::new(label, score).rounded(),
                stage: DecisionStage::Scorer,
                rule: None,
                edge_case: None,
                polarity: Some(score),
            };
        };

        tracing::debug!(
            ?reason,
            fallback = self.fallback.name(),
            score,
            "Escalating edge case"
        );
        let result = self.fallback.classify(text, label, score).await;

        Analysis {
            result: result.rounded(),
            stage: DecisionStage::Fallback,
            rule: None,
            edge_case: Some(reason),
            polarity: Some(score),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::rule_based()
    }
}

/// Create the analyzer based on config
///
/// A lexicon file that cannot be loaded is logged and replaced by the
/// built-in lexicon.
pub fn create_analyzer(
    settings: &SentimentSettings,
    llm: Option<Arc<dyn LanguageModel>>,
    temperature: f32,
) -> SentimentAnalyzer {
    let lexicon = match &settings.lexicon_file {
        Some(path) => match Lexicon::from_file(path) {
            Ok(lexicon) => {
                tracing::info!("Loaded sentiment lexicon from {}", path);
                lexicon
            }
            Err(e) => {
                tracing::warn!("Failed to load lexicon from {}: {}, using defaults", path, e);
                default_lexicon()
            }
        },
        None => default_lexicon(),
    };

    let fallback = create_fallback(settings, llm, temperature);
    tracing::info!(fallback = fallback.name(), "Sentiment analyzer ready");

    SentimentAnalyzer::new(lexicon, Arc::new(LexicalPolarityScorer::new()), fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_chat_core::SentimentLabel;

    #[tokio::test]
    async fn test_rule_stage() {
        let analyzer = SentimentAnalyzer::rule_based();
        let analysis = analyzer.analyze_detailed("I feel hopeless but happy").await;

        assert_eq!(analysis.stage, DecisionStage::Rule);
        assert_eq!(analysis.rule, Some(RuleKind::VeryNegativeTerm));
        assert_eq!(
            analysis.result,
            SentimentResult::new(SentimentLabel::VeryNegative, -0.8)
        );
        assert!(analysis.polarity.is_none());
    }

    #[tokio::test]
    async fn test_scorer_stage() {
        let analyzer = SentimentAnalyzer::rule_based();
        let analysis = analyzer.analyze_detailed("what a boring lecture").await;

        assert_eq!(analysis.stage, DecisionStage::Scorer);
        assert_eq!(
            analysis.result,
            SentimentResult::new(SentimentLabel::VeryNegative, -1.0)
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_neutral() {
        let analyzer = SentimentAnalyzer::rule_based();
        for text in ["", "   "] {
            let analysis = analyzer.analyze_detailed(text).await;
            assert_eq!(analysis.stage, DecisionStage::Scorer);
            assert_eq!(analysis.result, SentimentResult::default());
        }
    }

    #[tokio::test]
    async fn test_scores_are_rounded() {
        let analyzer = SentimentAnalyzer::rule_based();
        // (0.733 + 0.4167) / 2 = 0.57485
        let result = analyzer.analyze("pleasant and fine").await;
        assert_eq!(result.score, 0.575);
        assert_eq!(result.label, SentimentLabel::VeryPositive);
    }

    #[test]
    fn test_missing_lexicon_file_uses_defaults() {
        let settings = SentimentSettings {
            lexicon_file: Some("/nonexistent/lexicon.toml".into()),
            ..Default::default()
        };
        let analyzer = create_analyzer(&settings, None, 0.0);
        assert_eq!(analyzer.lexicon(), &default_lexicon());
        assert!(!analyzer.fallback_enabled());
    }

    #[test]
    fn test_stage_serialization() {
        assert_eq!(serde_json::to_string(&DecisionStage::Fallback).unwrap(), "\"fallback\"");
    }
}
