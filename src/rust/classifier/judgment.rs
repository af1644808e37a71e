use std::fmt;

use serde::{Deserialize, Serialize};

use super::fallback::FALLBACK_REASONING;

/// Overall tone of a piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Maps free-form model phrasing onto a sentiment by substring.
    ///
    /// "somewhat positive" and "VeryPositive!" both land on `Positive`.
    /// Anything without a recognizable marker is `Neutral`.
    pub fn from_loose(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if lowered.contains("positive") {
            Self::Positive
        } else if lowered.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured result of classifying one feedback text.
///
/// Built fresh per classification and never mutated afterwards.
/// `urgency` is always in `1..=5` and `confidence` in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub sentiment: Sentiment,
    /// 1 = feature request, 5 = critical production issue
    pub urgency: u8,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Judgment {
    pub const MIN_URGENCY: u8 = 1;
    pub const MAX_URGENCY: u8 = 5;
    pub const DEFAULT_URGENCY: u8 = 3;

    /// Builds a judgment, clamping urgency and confidence into range.
    pub fn new(
        sentiment: Sentiment,
        urgency: i64,
        confidence: f32,
        reasoning: Option<String>,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            sentiment,
            urgency: clamp_urgency(urgency),
            confidence,
            reasoning,
        }
    }

    /// True when this judgment came from the keyword heuristic.
    pub fn is_fallback(&self) -> bool {
        self.reasoning.as_deref() == Some(FALLBACK_REASONING)
    }
}

pub(crate) fn clamp_urgency(value: i64) -> u8 {
    value.clamp(Judgment::MIN_URGENCY as i64, Judgment::MAX_URGENCY as i64) as u8
}
