//! LLM-based sentiment classification for edge cases

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use sentiment_chat_core::{
    round_score, GenerateRequest, LanguageModel, SentimentFallback, SentimentLabel,
    SentimentResult,
};

/// Room for "Very Negative, -0.85" and nothing more
const MAX_RESPONSE_TOKENS: u32 = 32;

/// Why a model answer could not be used
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationParseError {
    #[error("response has no comma separating label and score")]
    MissingComma,

    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    #[error("score {0:?} is not a number")]
    InvalidScore(String),

    #[error("score {0} is outside [-1, 1]")]
    OutOfRange(f64),
}

/// Parse a `label, score` answer
///
/// Splits on the first comma and trims both halves. The label must be one
/// of the known labels (case-insensitive) and the score a finite number in
/// [-1, 1]. The returned score is rounded to 3 decimals.
pub fn parse_classification(response: &str) -> Result<SentimentResult, ClassificationParseError> {
    let (label_text, score_text) = response
        .split_once(',')
        .ok_or(ClassificationParseError::MissingComma)?;

    let label: SentimentLabel = label_text
        .trim()
        .parse()
        .map_err(|_| ClassificationParseError::UnknownLabel(label_text.trim().to_string()))?;

    let score_text = score_text.trim();
    let score: f64 = score_text
        .parse()
        .map_err(|_| ClassificationParseError::InvalidScore(score_text.to_string()))?;

    if !score.is_finite() {
        return Err(ClassificationParseError::InvalidScore(score_text.to_string()));
    }
    if !(-1.0..=1.0).contains(&score) {
        return Err(ClassificationParseError::OutOfRange(score));
    }

    Ok(SentimentResult::new(label, round_score(score)))
}

/// Sentiment classifier that asks a language model
pub struct LlmSentimentClassifier {
    llm: Arc<dyn LanguageModel>,
    temperature: f32,
}

impl LlmSentimentClassifier {
    pub fn new(llm: Arc<dyn LanguageModel>, temperature: f32) -> Self {
        Self { llm, temperature }
    }

    /// Build the classification prompt
    fn build_prompt(&self, text: &str) -> String {
        let labels = SentimentLabel::ALL
            .iter()
            .map(|label| label.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"You are a sentiment classifier for short chat messages.

Classify the emotional polarity of the MESSAGE below.

RULES:
1. Respond with exactly one line in the form: label, score
2. label must be one of: {labels}
3. score must be a decimal number between -1 and 1 (negative = unhappy, positive = happy)
4. Pay attention to negation ("not good" is negative)
5. Output nothing else: no explanation, no quotes, no punctuation after the score

MESSAGE: {text}
ANSWER:"#
        )
    }

    async fn ask(&self, text: &str) -> Result<SentimentResult, String> {
        let request = GenerateRequest::from_prompt(self.build_prompt(text))
            .with_max_tokens(MAX_RESPONSE_TOKENS)
            .with_temperature(self.temperature);

        let response = self.llm.generate(request).await.map_err(|e| e.to_string())?;
        parse_classification(response.text.trim())
            .map_err(|e| format!("unusable answer {:?}: {}", response.text, e))
    }
}

#[async_trait]
impl SentimentFallback for LlmSentimentClassifier {
    async fn classify(
        &self,
        text: &str,
        scorer_label: SentimentLabel,
        scorer_score: f64,
    ) -> SentimentResult {
        match self.ask(text).await {
            Ok(result) => {
                tracing::debug!(
                    model = self.llm.model_name(),
                    label = %result.label,
                    score = result.score,
                    "LLM fallback classification"
                );
                result
            }
            Err(reason) => {
                tracing::warn!(
                    model = self.llm.model_name(),
                    "LLM fallback failed ({}), keeping scorer label {}",
                    reason,
                    scorer_label
                );
                SentimentResult::new(scorer_label, scorer_score).rounded()
            }
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "llm"
    }
}
