//! JSON Extraction
//!
//! Pulls a JSON value out of free-form model output. Two tiers only:
//!
//! 1. Parse the whole text.
//! 2. Parse the greedy span from the first `{` to the last `}`.
//!
//! The greedy span means two separate objects in one reply produce an
//! unparsable span; that case is reported as a failure.

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{IntelError, Result};

/// Extract and parse JSON from an LLM response
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    extract_json_with_repair_status(content).map(|(value, _)| value)
}

/// Extract and parse JSON, also reporting whether the brace span was needed
pub fn extract_json_with_repair_status(content: &str) -> Result<(Value, bool)> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Ok((value, false));
    }

    debug!("Direct JSON parse failed, trying brace span");

    let Some(span) = brace_span(content) else {
        return Err(IntelError::ResponseParse(format!(
            "no JSON object found in response: {}",
            preview(content)
        )));
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) => {
            warn!("JSON extracted from mixed content");
            Ok((value, true))
        }
        Err(e) => Err(IntelError::ResponseParse(format!(
            "extracted text looked like JSON but failed to parse ({}): {}",
            e,
            preview(span)
        ))),
    }
}

/// Greedy span from the first `{` to the last `}`, inclusive
pub fn brace_span(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

fn preview(content: &str) -> String {
    content.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_json() {
        let (value, extracted) = extract_json_with_repair_status(r#"{"strengths": ["x"]}"#).unwrap();
        assert_eq!(value, json!({"strengths": ["x"]}));
        assert!(!extracted);
    }

    #[test]
    fn test_json_with_surrounding_prose() {
        let raw = "Here is the analysis:\n{\"strengths\": [\"x\"], \"nested\": {\"a\": 1}}\nHope this helps!";
        let (value, extracted) = extract_json_with_repair_status(raw).unwrap();
        assert_eq!(value["strengths"], json!(["x"]));
        assert_eq!(value["nested"]["a"], 1);
        assert!(extracted);
    }

    #[test]
    fn test_code_fenced_json() {
        let raw = "```json\n{\"weaknesses\": [\"slow\"]}\n```";
        let value = extract_json_from_response(raw).unwrap();
        assert_eq!(value["weaknesses"], json!(["slow"]));
    }

    #[test]
    fn test_no_braces() {
        let err = extract_json_from_response("I cannot help with that.").unwrap_err();
        assert!(matches!(err, IntelError::ResponseParse(_)));
    }

    #[test]
    fn test_broken_span() {
        let err = extract_json_from_response("prefix {\"strengths\": [\"x\"} suffix").unwrap_err();
        assert!(matches!(err, IntelError::ResponseParse(_)));
    }

    #[test]
    fn test_two_objects_span_fails() {
        // Greedy span covers both objects and the text between them
        let raw = r#"{"strengths": ["a"]} and also {"weaknesses": ["b"]}"#;
        assert!(extract_json_from_response(raw).is_err());
    }

    #[test]
    fn test_brace_span() {
        assert_eq!(brace_span("a {b} c {d} e"), Some("{b} c {d}"));
        assert_eq!(brace_span("} before {"), None);
        assert_eq!(brace_span("none"), None);
    }

    #[test]
    fn test_non_object_json_parses() {
        // Shape checks happen in the analysis client, not here
        assert_eq!(extract_json_from_response("[1, 2]").unwrap(), json!([1, 2]));
    }
}
