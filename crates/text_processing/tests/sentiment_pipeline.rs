//! Integration tests for the hybrid sentiment pipeline
//!
//! Rules -> scorer -> edge-case detection -> fallback, with stub language
//! models standing in for the remote classifier.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sentiment_chat_core::{
    GenerateRequest, GenerateResponse, LanguageModel, LlmError, PolarityScorer, Result,
    SentimentLabel, SentimentResult,
};
use sentiment_chat_text_processing::{
    default_lexicon, ConversationHistory, DecisionStage, EdgeCaseReason, LexicalPolarityScorer,
    Lexicon, LexiconCategory, LexiconFile, LlmSentimentClassifier, MoodTrend, NoopFallback,
    OverallLabel, RuleKind, SentimentAnalyzer,
};

/// Stub model with a canned answer
struct StubModel {
    answer: std::result::Result<&'static str, &'static str>,
    calls: AtomicUsize,
}

impl StubModel {
    fn answering(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(text),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(message),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Ok(text) => Ok(GenerateResponse {
                text: text.to_string(),
                model: "stub".into(),
            }),
            Err(message) => Err(LlmError::Request(message.to_string()).into()),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// Scorer that ignores its input
struct FixedScorer(f64);

impl PolarityScorer for FixedScorer {
    fn score(&self, _text: &str) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Lexicon with only negations, so "good" reaches the scorer
fn negation_only_lexicon() -> Lexicon {
    Lexicon::new(LexiconFile {
        negation: vec!["not".into(), "never".into()],
        ..Default::default()
    })
    .unwrap()
}

fn analyzer_with_model(model: Arc<StubModel>) -> SentimentAnalyzer {
    SentimentAnalyzer::new(
        negation_only_lexicon(),
        Arc::new(LexicalPolarityScorer::new()),
        Arc::new(LlmSentimentClassifier::new(model, 0.0)),
    )
}

#[tokio::test]
async fn test_very_negative_term_always_wins() {
    let analyzer = SentimentAnalyzer::rule_based();
    let lexicon = default_lexicon();

    for very_negative in lexicon.terms(LexiconCategory::VeryNegative) {
        for positive in lexicon.terms(LexiconCategory::Positive) {
            let text = format!("{} but {}", positive, very_negative);
            let analysis = analyzer.analyze_detailed(&text).await;
            assert_eq!(
                analysis.result,
                SentimentResult::new(SentimentLabel::VeryNegative, -0.8),
                "{}",
                text
            );
            assert_eq!(analysis.rule, Some(RuleKind::VeryNegativeTerm));
        }
    }
}

#[tokio::test]
async fn test_positive_and_negative_terms_are_mixed() {
    let analyzer = SentimentAnalyzer::rule_based();
    let lexicon = default_lexicon();

    for negative in lexicon.terms(LexiconCategory::Negative) {
        for positive in lexicon.terms(LexiconCategory::Positive) {
            let text = format!("{} and {}", negative, positive);
            let result = analyzer.analyze(&text).await;
            assert_eq!(
                result,
                SentimentResult::new(SentimentLabel::MixedFeelings, 0.0),
                "{}",
                text
            );
        }
    }
}

#[tokio::test]
async fn test_negated_good_escalates_to_model() {
    let model = StubModel::answering("Very Negative, -0.7");
    let analyzer = analyzer_with_model(model.clone());

    let analysis = analyzer.analyze_detailed("the food was not good").await;

    assert_eq!(analysis.stage, DecisionStage::Fallback);
    assert_eq!(analysis.edge_case, Some(EdgeCaseReason::NegatedGood));
    assert_eq!(
        analysis.result,
        SentimentResult::new(SentimentLabel::VeryNegative, -0.7)
    );
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_unreachable_model_keeps_scorer_output() {
    let model = StubModel::failing("connection refused");
    let analyzer = analyzer_with_model(model.clone());

    let analysis = analyzer.analyze_detailed("the food was not good").await;

    assert_eq!(analysis.stage, DecisionStage::Fallback);
    assert_eq!(
        analysis.result,
        SentimentResult::new(SentimentLabel::Negative, -0.35)
    );
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_malformed_answers_keep_scorer_output() {
    for answer in [
        "Negative",
        "Sad, -0.5",
        "Negative, very",
        "Negative, -3.0",
        "",
    ] {
        let analyzer = analyzer_with_model(StubModel::answering(answer));
        let result = analyzer.analyze("never good").await;
        assert_eq!(
            result,
            SentimentResult::new(SentimentLabel::Negative, -0.35),
            "answer {:?}",
            answer
        );
    }
}

#[tokio::test]
async fn test_no_model_keeps_scorer_output() {
    let analyzer = SentimentAnalyzer::new(
        negation_only_lexicon(),
        Arc::new(LexicalPolarityScorer::new()),
        Arc::new(NoopFallback),
    );

    let analysis = analyzer.analyze_detailed("not good at all").await;
    assert_eq!(analysis.stage, DecisionStage::Fallback);
    assert_eq!(
        analysis.result,
        SentimentResult::new(SentimentLabel::Negative, -0.35)
    );
    assert!(!analyzer.fallback_enabled());
}

#[tokio::test]
async fn test_model_is_not_consulted_for_clear_cases() {
    let model = StubModel::answering("Positive, 0.9");
    let analyzer = analyzer_with_model(model.clone());

    let analysis = analyzer.analyze_detailed("such a nice walk").await;
    assert_eq!(analysis.stage, DecisionStage::Scorer);
    assert_eq!(
        analysis.result,
        SentimentResult::new(SentimentLabel::VeryPositive, 0.6)
    );
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_pluggable_scorer_thresholds() {
    let cases = [
        (0.1, SentimentLabel::Neutral),
        (-0.1, SentimentLabel::Neutral),
        (0.2, SentimentLabel::Positive),
        (-0.5, SentimentLabel::VeryNegative),
        (0.7777, SentimentLabel::VeryPositive),
    ];

    for (score, label) in cases {
        let analyzer = SentimentAnalyzer::new(
            default_lexicon(),
            Arc::new(FixedScorer(score)),
            Arc::new(NoopFallback),
        );
        let analysis = analyzer.analyze_detailed("the meeting is at three").await;
        assert_eq!(analysis.stage, DecisionStage::Scorer);
        assert_eq!(analysis.result.label, label);
        assert_eq!(analysis.polarity, Some(score));
    }
}

#[tokio::test]
async fn test_conversation_summary() {
    let analyzer = SentimentAnalyzer::rule_based();
    let mut history = ConversationHistory::new();

    for message in [
        "I feel worthless",
        "I'm anxious about tomorrow",
        "the meeting is at three",
        "I'm glad we talked",
        "honestly feeling happy today",
    ] {
        let result = analyzer.analyze(message).await;
        history.push(message, result);
    }

    assert_eq!(history.scores(), vec![-0.8, -0.4, 0.0, 0.5, 0.5]);

    let overall = history.overall().unwrap();
    assert_eq!(overall.label, OverallLabel::Neutral);

    let shift = history.mood_shift().unwrap().rounded();
    assert_eq!(shift.start_avg, -0.8);
    assert_eq!(shift.end_avg, 0.5);
    assert_eq!(shift.delta, 1.3);
    assert_eq!(shift.trend, MoodTrend::Improving);
}

#[test]
fn test_shipped_lexicon_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/lexicon.toml");
    let lexicon = Lexicon::from_file(path).unwrap();
    assert_eq!(lexicon, default_lexicon());
}
