//! Best-effort JSON extraction from LLM replies
//!
//! Models frequently wrap the requested JSON in prose or code fences. This
//! module tries a strict parse first and then falls back to the span between
//! the first `{` and the last `}`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Known limitation
//! The fallback span is greedy, not brace-balanced. Text containing two
//! separate objects (`{..} and {..}`) yields an invalid span and therefore the
//! fallback value.

use serde::de::DeserializeOwned;

/// Parse `text` as `T`, returning `fallback` when no JSON can be recovered.
///
/// Never fails and never panics.
pub fn parse_lenient<T: DeserializeOwned>(text: &str, fallback: T) -> T {
    if let Ok(value) = serde_json::from_str(text) {
        return value;
    }

    match extract_brace_block(text) {
        Some(block) => serde_json::from_str(block).unwrap_or(fallback),
        None => fallback,
    }
}

/// Span from the first `{` to the last `}` inclusive, if the last `}` follows
/// the first `{`.
pub fn extract_brace_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_valid_input_parses_as_is() {
        let original = json!({"reminders": ["a", {"message": "b", "time": null}], "n": 3});
        let parsed: Value = parse_lenient(&original.to_string(), Value::Null);
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_valid_non_object_input() {
        let parsed: Value = parse_lenient("[1, 2, 3]", Value::Null);
        assert_eq!(parsed, json!([1, 2, 3]));
    }

    #[test]
    fn test_garbage_returns_fallback() {
        let fallback = json!({"reminders": []});
        let parsed: Value = parse_lenient("not json at all", fallback.clone());
        assert_eq!(parsed, fallback);
    }

    #[test]
    fn test_extracts_object_from_prose() {
        let parsed: Value = parse_lenient(r#"prefix text {"reminders":["a"]} suffix"#, json!({}));
        assert_eq!(parsed, json!({"reminders": ["a"]}));
    }

    #[test]
    fn test_extracts_object_from_code_fence() {
        let reply = "Sure! Here you go:\n```json\n{\n  \"tips\": [\"Start small\"]\n}\n```";
        let parsed: Value = parse_lenient(reply, Value::Null);
        assert_eq!(parsed, json!({"tips": ["Start small"]}));
    }

    #[test]
    fn test_nested_braces_span_whole_object() {
        let parsed: Value = parse_lenient(r#"x {"a": {"b": 1}} y"#, Value::Null);
        assert_eq!(parsed, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_two_objects_fall_back() {
        // Greedy span covers both objects and the prose between them
        let parsed: Value = parse_lenient(r#"{"a":1} and {"b":2}"#, json!("fallback"));
        assert_eq!(parsed, json!("fallback"));
    }

    #[test]
    fn test_unbalanced_braces_fall_back() {
        let parsed: Value = parse_lenient("oops } then {", json!(0));
        assert_eq!(parsed, json!(0));
        assert_eq!(extract_brace_block("oops } then {"), None);
    }

    #[test]
    fn test_typed_target_falls_back_on_shape_mismatch() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Tips {
            tips: Vec<String>,
        }

        let parsed = parse_lenient(r#"{"tips": "not a list"}"#, Tips { tips: vec![] });
        assert_eq!(parsed, Tips { tips: vec![] });

        let parsed = parse_lenient(r#"ok: {"tips": ["one"]}"#, Tips { tips: vec![] });
        assert_eq!(parsed.tips, vec!["one".to_string()]);
    }
}
