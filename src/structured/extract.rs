//! JSON extraction from raw model output.
//!
//! Even in JSON mode some models wrap their answer in markdown code fences;
//! strip them before parsing.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(?:json)?\s*(.*?)\s*```$").expect("fence regex is valid")
});

/// Parse the JSON payload out of raw model output.
pub fn extract_json(raw: &str) -> Result<serde_json::Value> {
    let trimmed = raw.trim();
    let candidate = FENCE_RE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);

    serde_json::from_str(candidate)
        .map_err(|e| Error::Validation(format!("model output is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = extract_json(r#"{"city": "London"}"#).unwrap();
        assert_eq!(value, json!({"city": "London"}));
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```json\n{\"city\": \"London\"}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"city": "London"}));
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let raw = "```\n{\"ok\": true}\n```";
        assert_eq!(extract_json(raw).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_surrounding_whitespace() {
        let raw = "  \n{\"n\": 1}\n  ";
        assert_eq!(extract_json(raw).unwrap(), json!({"n": 1}));
    }

    #[test]
    fn test_not_json_is_error() {
        let err = extract_json("Sure! Here is the answer: London").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_truncated_json_is_error() {
        assert!(extract_json(r#"{"pets": [{"na"#).is_err());
    }
}
