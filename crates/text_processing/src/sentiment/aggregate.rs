//! Conversation-level aggregation
//!
//! Pure functions over an ordered score history.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use sentiment_chat_core::round_score;

/// Averages and deltas beyond this are directional
const NEUTRAL_BAND: f64 = 0.1;

/// Minimum history length for a mood shift
const MIN_TREND_MESSAGES: usize = 3;

/// Label for a conversation's average score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallLabel {
    Positive,
    Negative,
    Neutral,
}

impl OverallLabel {
    pub fn for_average(average: f64) -> Self {
        if average > NEUTRAL_BAND {
            OverallLabel::Positive
        } else if average < -NEUTRAL_BAND {
            OverallLabel::Negative
        } else {
            OverallLabel::Neutral
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OverallLabel::Positive => "Overall Positive: user is generally satisfied.",
            OverallLabel::Negative => "Overall Negative: general dissatisfaction.",
            OverallLabel::Neutral => "Overall Neutral: mixed or unclear emotion.",
        }
    }
}

impl fmt::Display for OverallLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Average sentiment of a whole conversation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversationSentiment {
    pub average_score: f64,
    pub label: OverallLabel,
}

impl ConversationSentiment {
    pub fn description(&self) -> &'static str {
        self.label.description()
    }

    /// Copy with the average rounded for presentation
    pub fn rounded(&self) -> Self {
        Self {
            average_score: round_score(self.average_score),
            label: self.label,
        }
    }
}

/// Direction of a mood shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl MoodTrend {
    pub fn for_delta(delta: f64) -> Self {
        if delta > NEUTRAL_BAND {
            MoodTrend::Improving
        } else if delta < -NEUTRAL_BAND {
            MoodTrend::Declining
        } else {
            MoodTrend::Stable
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "Mood is improving",
            MoodTrend::Declining => "Mood is declining",
            MoodTrend::Stable => "Mood is stable",
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Start-versus-end comparison of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodShift {
    pub start_avg: f64,
    pub end_avg: f64,
    pub delta: f64,
    pub trend: MoodTrend,
}

impl MoodShift {
    pub fn rounded(&self) -> Self {
        Self {
            start_avg: round_score(self.start_avg),
            end_avg: round_score(self.end_avg),
            delta: round_score(self.delta),
            trend: self.trend,
        }
    }
}

/// Too few messages for a mood shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Not enough data to compute mood shift.")]
pub struct InsufficientData {
    pub count: usize,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean score and its label; `None` for an empty history
pub fn overall_sentiment(scores: &[f64]) -> Option<ConversationSentiment> {
    if scores.is_empty() {
        return None;
    }

    let average_score = mean(scores);
    Some(ConversationSentiment {
        average_score,
        label: OverallLabel::for_average(average_score),
    })
}

/// Compare the first and last third of the history
///
/// Window size is `n / 3` (floor). For short histories the windows may
/// overlap the middle message or each other.
pub fn mood_shift(scores: &[f64]) -> Result<MoodShift, InsufficientData> {
    let n = scores.len();
    if n < MIN_TREND_MESSAGES {
        return Err(InsufficientData { count: n });
    }

    let k = n / 3;
    let start_avg = mean(&scores[..k]);
    let end_avg = mean(&scores[n - k..]);
    let delta = end_avg - start_avg;

    Ok(MoodShift {
        start_avg,
        end_avg,
        delta,
        trend: MoodTrend::for_delta(delta),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_overall_empty() {
        assert!(overall_sentiment(&[]).is_none());
    }

    #[test]
    fn test_overall_labels() {
        let positive = overall_sentiment(&[0.5, 0.3, -0.2]).unwrap();
        assert_eq!(positive.label, OverallLabel::Positive);
        assert!(positive.description().starts_with("Overall Positive"));

        let negative = overall_sentiment(&[-0.8, 0.0]).unwrap();
        assert_eq!(negative.label, OverallLabel::Negative);
        assert!(approx(negative.average_score, -0.4));
    }

    #[test]
    fn test_overall_boundaries_are_neutral() {
        assert_eq!(OverallLabel::for_average(0.1), OverallLabel::Neutral);
        assert_eq!(OverallLabel::for_average(-0.1), OverallLabel::Neutral);
        assert_eq!(overall_sentiment(&[0.1]).unwrap().label, OverallLabel::Neutral);
        assert_eq!(overall_sentiment(&[-0.1, -0.1]).unwrap().label, OverallLabel::Neutral);
        assert_eq!(
            overall_sentiment(&[0.0]).unwrap().description(),
            "Overall Neutral: mixed or unclear emotion."
        );
    }

    #[test]
    fn test_mood_shift_improving() {
        let shift = mood_shift(&[-0.8, -0.4, 0.0, 0.5, 0.8]).unwrap();
        assert!(approx(shift.start_avg, -0.8));
        assert!(approx(shift.end_avg, 0.8));
        assert!(approx(shift.delta, 1.6));
        assert_eq!(shift.trend, MoodTrend::Improving);
        assert_eq!(shift.trend.to_string(), "Mood is improving");
    }

    #[test]
    fn test_mood_shift_windows_use_floor_division() {
        // n = 6, k = 2
        let shift = mood_shift(&[0.5, 0.3, -0.9, -0.9, -0.2, -0.4]).unwrap();
        assert!(approx(shift.start_avg, 0.4));
        assert!(approx(shift.end_avg, -0.3));
        assert_eq!(shift.trend, MoodTrend::Declining);

        // n = 3, k = 1: the middle message is ignored
        let shift = mood_shift(&[0.2, -1.0, 0.25]).unwrap();
        assert!(approx(shift.delta, 0.05));
        assert_eq!(shift.trend, MoodTrend::Stable);
    }

    #[test]
    fn test_mood_shift_insufficient_data() {
        assert_eq!(mood_shift(&[]), Err(InsufficientData { count: 0 }));
        assert_eq!(mood_shift(&[0.5, -0.5]), Err(InsufficientData { count: 2 }));
        assert_eq!(
            InsufficientData { count: 1 }.to_string(),
            "Not enough data to compute mood shift."
        );
    }

    #[test]
    fn test_rounded_summaries() {
        let shift = mood_shift(&[0.12345, 0.0, 0.0, 0.0]).unwrap().rounded();
        assert_eq!(shift.start_avg, 0.123);
        assert_eq!(shift.delta, -0.123);

        let overall = overall_sentiment(&[0.33333, 0.0]).unwrap().rounded();
        assert_eq!(overall.average_score, 0.167);
    }
}
