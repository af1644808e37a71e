//! Turning raw model output into a [`Judgment`].
//!
//! Model text is untrusted: it may be wrapped in a markdown fence, padded with
//! prose, or carry fields of the wrong type. Parsing is two-phase. First the
//! text is reduced to a generic JSON object; a failure there is a
//! [`AnalysisError::ParseFailure`]. Then each field is read through its own
//! defaulting accessor, so one bad field never discards the others.

use serde_json::{Map, Value};

use super::error::AnalysisError;
use super::judgment::{clamp_urgency, Judgment, Sentiment};
use super::utils::{leading_float, leading_integer};

/// Confidence assumed when the model omits it or sends something non-numeric.
pub const DEFAULT_MODEL_CONFIDENCE: f32 = 0.7;

/// Removes a surrounding ```` ``` ```` or ```` ```json ```` fence, if any.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Returns the text from the first `{` onward, if there is one.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.find('{').map(|start| &text[start..])
}

/// Reduces raw model output to a JSON object.
///
/// Only the first complete value after the first `{` is read; prose or further
/// objects after it are ignored.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, AnalysisError> {
    let body = strip_code_fence(raw);
    let candidate = extract_json_object(body).ok_or_else(|| {
        AnalysisError::ParseFailure("No JSON object found in model response".into())
    })?;

    let mut values = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
    match values.next() {
        Some(Ok(Value::Object(map))) => Ok(map),
        Some(Ok(_)) => Err(AnalysisError::ParseFailure("Expected a JSON object".into())),
        Some(Err(err)) => Err(err.into()),
        None => Err(AnalysisError::ParseFailure("Empty JSON candidate".into())),
    }
}

/// Parses raw model output into a normalized judgment.
pub fn parse_judgment(raw: &str) -> Result<Judgment, AnalysisError> {
    let fields = parse_object(raw)?;
    Ok(normalize_fields(&fields))
}

/// Reads the four judgment fields, defaulting and clamping each one independently.
pub fn normalize_fields(fields: &Map<String, Value>) -> Judgment {
    Judgment {
        sentiment: read_sentiment(fields.get("sentiment")),
        urgency: read_urgency(fields.get("urgency")),
        confidence: read_confidence(fields.get("confidence")),
        reasoning: read_reasoning(fields.get("reasoning")),
    }
}

fn read_sentiment(value: Option<&Value>) -> Sentiment {
    match value {
        Some(Value::String(s)) => Sentiment::from_loose(s),
        _ => Sentiment::Neutral,
    }
}

fn read_urgency(value: Option<&Value>) -> u8 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };
    clamp_urgency(parsed.unwrap_or(Judgment::DEFAULT_URGENCY as i64))
}

fn read_confidence(value: Option<&Value>) -> f32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_float(s),
        _ => None,
    };
    match parsed.filter(|f| f.is_finite()) {
        Some(f) => (f as f32).clamp(0.0, 1.0),
        None => DEFAULT_MODEL_CONFIDENCE,
    }
}

fn read_reasoning(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_response() {
        let raw = "```json\n{\"sentiment\":\"positive\",\"urgency\":1,\"confidence\":0.9}\n```";
        let judgment = parse_judgment(raw).unwrap();
        assert_eq!(judgment.sentiment, Sentiment::Positive);
        assert_eq!(judgment.urgency, 1);
        assert_eq!(judgment.confidence, 0.9);
        assert_eq!(judgment.reasoning, None);
    }

    #[test]
    fn test_untagged_fence_and_prose() {
        let raw = "Here you go:\n```\n{\"sentiment\": \"negative\", \"urgency\": 4, \
                   \"confidence\": 0.8, \"reasoning\": \"Login fails\"}\n```\nHope that helps.";
        let judgment = parse_judgment(raw).unwrap();
        assert_eq!(judgment.sentiment, Sentiment::Negative);
        assert_eq!(judgment.urgency, 4);
        assert_eq!(judgment.reasoning.as_deref(), Some("Login fails"));
    }

    #[test]
    fn test_malformed_fields_are_repaired() {
        let raw = r#"{"sentiment":"VeryPositive!","urgency":99,"confidence":"n/a"}"#;
        let judgment = parse_judgment(raw).unwrap();
        assert_eq!(judgment.sentiment, Sentiment::Positive);
        assert_eq!(judgment.urgency, 5);
        assert_eq!(judgment.confidence, DEFAULT_MODEL_CONFIDENCE);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let judgment = parse_judgment("{}").unwrap();
        assert_eq!(judgment.sentiment, Sentiment::Neutral);
        assert_eq!(judgment.urgency, 3);
        assert_eq!(judgment.confidence, DEFAULT_MODEL_CONFIDENCE);
        assert_eq!(judgment.reasoning, None);
    }

    #[test]
    fn test_string_and_float_numbers() {
        let raw =
            r#"{"sentiment":"neutral","urgency":"2 (minor)","confidence":"0.65","reasoning":42}"#;
        let judgment = parse_judgment(raw).unwrap();
        assert_eq!(judgment.urgency, 2);
        assert_eq!(judgment.confidence, 0.65);
        assert_eq!(judgment.reasoning, None);

        let judgment = parse_judgment(r#"{"urgency":4.9,"confidence":3}"#).unwrap();
        assert_eq!(judgment.urgency, 4);
        assert_eq!(judgment.confidence, 1.0);

        let judgment = parse_judgment(r#"{"urgency":-3,"sentiment":null}"#).unwrap();
        assert_eq!(judgment.urgency, 1);
        assert_eq!(judgment.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_parse_failures() {
        for raw in ["no json here", "} backwards {", "{sentiment: positive}", "", "{\"a\": 1"] {
            assert!(
                matches!(parse_judgment(raw), Err(AnalysisError::ParseFailure(_))),
                "{:?} should not parse",
                raw
            );
        }
    }

    #[test]
    fn test_braces_after_the_object_are_ignored() {
        let raw = "{\"sentiment\":\"negative\",\"urgency\":4,\"confidence\":0.8} \
                   Note: I ignored the {placeholder} text.";
        let judgment = parse_judgment(raw).unwrap();
        assert_eq!(judgment.sentiment, Sentiment::Negative);
        assert_eq!(judgment.urgency, 4);
        assert_eq!(judgment.confidence, 0.8);

        let fields = parse_object(r#"{"a":1}, {"b":2}"#).unwrap();
        assert!(fields.contains_key("a"));
        assert!(!fields.contains_key("b"));
    }

    #[test]
    fn test_strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
    }
}
