//! Sentiment component interfaces

use async_trait::async_trait;

use crate::{SentimentLabel, SentimentResult};

/// Continuous-valued polarity scorer
pub trait PolarityScorer: Send + Sync {
    /// Polarity in [-1.0, 1.0]; 0.0 when the text carries no signal
    fn score(&self, text: &str) -> f64;

    fn name(&self) -> &str;
}

/// Second opinion for classifications the scorer cannot be trusted with
///
/// Infallible by contract: any internal failure must degrade to the
/// scorer's own label and score.
#[async_trait]
pub trait SentimentFallback: Send + Sync {
    async fn classify(
        &self,
        text: &str,
        scorer_label: SentimentLabel,
        scorer_score: f64,
    ) -> SentimentResult;

    /// Whether a remote oracle is actually consulted
    fn is_enabled(&self) -> bool;

    fn name(&self) -> &str;
}
