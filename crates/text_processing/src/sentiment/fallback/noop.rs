//! No-op fallback (pass-through)

use async_trait::async_trait;
use sentiment_chat_core::{SentimentFallback, SentimentLabel, SentimentResult};

/// Keeps the scorer's label and score
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFallback;

#[async_trait]
impl SentimentFallback for NoopFallback {
    async fn classify(
        &self,
        _text: &str,
        scorer_label: SentimentLabel,
        scorer_score: f64,
    ) -> SentimentResult {
        SentimentResult::new(scorer_label, scorer_score).rounded()
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_passthrough() {
        let result = NoopFallback
            .classify("not good", SentimentLabel::Negative, -0.35049)
            .await;

        assert_eq!(result, SentimentResult::new(SentimentLabel::Negative, -0.35));
        assert!(!NoopFallback.is_enabled());
    }
}
