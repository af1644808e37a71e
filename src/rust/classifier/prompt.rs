/// Builds the instruction prompt for one piece of feedback.
pub fn build_prompt(feedback: &str) -> String {
    format!(
        r#"Analyze the following user feedback and classify it.

Feedback: "{feedback}"

Respond with ONLY a JSON object with exactly these fields:
- "sentiment": one of "positive", "negative", "neutral"
- "urgency": an integer from 1 to 5, where
  1 = feature request or nice-to-have
  2 = minor issue
  3 = moderate issue
  4 = important bug or blocker
  5 = critical or production issue
- "confidence": a number from 0.0 to 1.0
- "reasoning": one short sentence explaining the classification

Do not include any other text, explanation or markdown formatting."#
    )
}
