use lazy_static::lazy_static;
use std::collections::BTreeSet;

use super::judgment::{Judgment, Sentiment};

/// Reasoning attached to every heuristic judgment.
pub const FALLBACK_REASONING: &str = "Fallback keyword analysis (model unavailable)";

/// Confidence reported by the heuristic path.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

lazy_static! {
    static ref POSITIVE_WORDS: BTreeSet<&'static str> = [
        "great", "love", "excellent", "amazing", "wonderful",
        "fantastic", "good", "helpful", "easy", "smooth",
    ].into_iter().collect();

    static ref NEGATIVE_WORDS: BTreeSet<&'static str> = [
        "bug", "broken", "crash", "error", "fail",
        "slow", "bad", "terrible", "worst", "issue",
    ].into_iter().collect();

    static ref URGENT_WORDS: BTreeSet<&'static str> = [
        "urgent", "critical", "production", "down", "blocker", "immediately",
    ].into_iter().collect();
}

/// Endings accepted after a lexicon entry.
const INFLECTIONS: &[&str] = &[
    "", "s", "es", "d", "ed", "ing", "y", "ly", "er", "ers", "est", "ure",
];

/// `word` is `entry` plus one of [`INFLECTIONS`], optionally with the last
/// letter of `entry` doubled ("bugged", "buggy").
fn is_inflection_of(word: &str, entry: &str) -> bool {
    let Some(rest) = word.strip_prefix(entry) else {
        return false;
    };
    if INFLECTIONS.contains(&rest) {
        return true;
    }
    match entry.chars().last().and_then(|last| rest.strip_prefix(last)) {
        Some(ending) => !ending.is_empty() && INFLECTIONS.contains(&ending),
        None => false,
    }
}

/// How many words of each lexicon appear in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub positive: usize,
    pub negative: usize,
    pub urgent: usize,
}

impl SignalCounts {
    /// Counts lexicon words appearing in `text`, case-insensitively.
    ///
    /// Matching is per word. A word matches a lexicon entry when it is the
    /// entry itself or an inflection of it, so "failed" counts "fail" and
    /// "buggy" counts "bug", but "download" does not count "down". Each
    /// lexicon entry counts at most once.
    pub fn scan(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        let hits = |lexicon: &BTreeSet<&'static str>| {
            lexicon
                .iter()
                .filter(|entry| words.iter().any(|word| is_inflection_of(word, entry)))
                .count()
        };
        Self {
            positive: hits(&*POSITIVE_WORDS),
            negative: hits(&*NEGATIVE_WORDS),
            urgent: hits(&*URGENT_WORDS),
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else if self.negative > self.positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Rules apply in order; the first match wins.
    pub fn urgency(&self) -> u8 {
        if self.urgent > 0 {
            5
        } else if self.negative > 2 {
            4
        } else if self.negative > 0 {
            3
        } else if self.positive > 0 {
            1
        } else {
            Judgment::DEFAULT_URGENCY
        }
    }
}

/// Classifies `text` from keyword counts alone. Never fails.
pub fn keyword_judgment(text: &str) -> Judgment {
    let counts = SignalCounts::scan(text);
    Judgment {
        sentiment: counts.sentiment(),
        urgency: counts.urgency(),
        confidence: FALLBACK_CONFIDENCE,
        reasoning: Some(FALLBACK_REASONING.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_and_urgent() {
        let judgment = keyword_judgment("This is broken and needs urgent attention!");
        assert_eq!(judgment.sentiment, Sentiment::Negative);
        assert_eq!(judgment.urgency, 5);
        assert_eq!(judgment.confidence, 0.5);
        assert!(judgment.is_fallback());
    }

    #[test]
    fn test_no_signal_words() {
        let judgment = keyword_judgment("The weather today.");
        assert_eq!(judgment.sentiment, Sentiment::Neutral);
        assert_eq!(judgment.urgency, 3);
        assert_eq!(judgment.confidence, 0.5);
    }

    #[test]
    fn test_positive_only_is_low_urgency() {
        let judgment = keyword_judgment("Love the new dashboard, really smooth");
        assert_eq!(judgment.sentiment, Sentiment::Positive);
        assert_eq!(judgment.urgency, 1);
    }

    #[test]
    fn test_many_negative_words_raise_urgency() {
        let counts = SignalCounts::scan("Slow, buggy, and the export throws an error then crashes");
        assert_eq!(counts.negative, 4);
        assert_eq!(counts.urgency(), 4);
        assert_eq!(counts.sentiment(), Sentiment::Negative);
    }

    #[test]
    fn test_tie_is_neutral() {
        let counts = SignalCounts::scan("Good idea but there is a bug");
        assert_eq!(counts.positive, 1);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.sentiment(), Sentiment::Neutral);
        assert_eq!(counts.urgency(), 3);
    }

    #[test]
    fn test_urgent_word_beats_everything() {
        let counts = SignalCounts::scan("Great product. CRITICAL: checkout page is unreachable");
        assert_eq!(counts.urgency(), 5);
        assert_eq!(counts.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_lexicon_words_match_whole_words_only() {
        let judgment = keyword_judgment("I feel uneasy about this update");
        assert_eq!(judgment.sentiment, Sentiment::Neutral);
        assert_eq!(judgment.urgency, 3);

        let judgment = keyword_judgment("Please add a download button");
        assert_eq!(judgment.urgency, 3);

        let counts = SignalCounts::scan("Export failed again, errors everywhere, it crashed");
        assert_eq!(counts.negative, 3);
        assert_eq!(counts.urgency(), 4);

        let counts = SignalCounts::scan("Checkout went DOWN during the sale");
        assert_eq!(counts.urgent, 1);
    }

    #[test]
    fn test_inflections() {
        assert!(is_inflection_of("bug", "bug"));
        assert!(is_inflection_of("buggy", "bug"));
        assert!(is_inflection_of("issues", "issue"));
        assert!(is_inflection_of("failure", "fail"));
        assert!(is_inflection_of("loved", "love"));
        assert!(!is_inflection_of("download", "down"));
        assert!(!is_inflection_of("badge", "bad"));
        assert!(!is_inflection_of("bugle", "bug"));
    }

    #[test]
    fn test_empty_text() {
        let judgment = keyword_judgment("   ");
        assert_eq!(judgment.sentiment, Sentiment::Neutral);
        assert_eq!(judgment.urgency, 3);
    }
}
