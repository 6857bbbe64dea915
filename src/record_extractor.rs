use serde_json::Value;
use thiserror::Error;

/// The generated text carried no parseable structured payload. Always
/// recoverable: the orchestrator treats it as "zero candidates".
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("generated text is not parseable as structured data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("structured payload is neither a record list nor a record")]
    UnsupportedShape,
}

/// Locate the most plausible structured payload in free-form generated text
/// and parse it into candidate records.
///
/// The payload is the substring from the first `[` to the last `]` when both
/// exist in order, else from the first `{` to the last `}`, else the text
/// itself. A top-level object wrapping a list (e.g. `{"recipes": [...]}`) is
/// unwrapped; a bare object is treated as a one-record list.
pub fn extract_candidates(raw: &str) -> Result<Vec<Value>, ExtractionFailure> {
    let text = strip_markdown_fences(raw);
    let payload = select_payload(text);
    let value: Value = serde_json::from_str(payload)?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("recipes") {
                return Ok(items.clone());
            }
            if let Some(items) = map.values().find_map(Value::as_array) {
                return Ok(items.clone());
            }
            Ok(vec![Value::Object(map)])
        }
        _ => Err(ExtractionFailure::UnsupportedShape),
    }
}

fn select_payload(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if end > start {
            return &text[start..=end];
        }
    }
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return &text[start..=end];
        }
    }
    text
}

fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with("```json") && trimmed.ends_with("```") {
        trimmed
            .trim_start_matches("```json")
            .trim_end_matches("```")
            .trim()
    } else if trimmed.starts_with("```") && trimmed.ends_with("```") {
        trimmed
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_array_embedded_in_prose() {
        let text = "Here are recipes: [{\"name\":\"A\"}] enjoy";
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates, vec![json!({"name": "A"})]);
    }

    #[test]
    fn test_unwraps_recipes_key() {
        let text = r#"{"recipes": [{"name": "A"}, {"name": "B"}]}"#;
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], json!({"name": "A"}));
    }

    #[test]
    fn test_unwraps_any_list_valued_key() {
        let text = r#"{"results": [{"name": "A"}]}"#;
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates, vec![json!({"name": "A"})]);
    }

    #[test]
    fn test_bare_object_becomes_single_record() {
        let text = r#"Sure! {"name": "A", "difficulty": "Easy"}"#;
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0]["name"], "A");
    }

    #[test]
    fn test_markdown_fences_are_stripped() {
        let text = "```json\n[{\"name\": \"A\"}]\n```";
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_prose_without_payload_fails() {
        assert!(extract_candidates("I cannot help with that.").is_err());
        assert!(extract_candidates("").is_err());
    }

    #[test]
    fn test_scalar_payload_is_unsupported() {
        let result = extract_candidates("42");
        assert!(matches!(result, Err(ExtractionFailure::UnsupportedShape)));
    }

    #[test]
    fn test_unclosed_bracket_falls_back_to_object_scan() {
        // "[" without "]" must not mask a parseable object later in the text.
        let text = "list[ of things {\"name\": \"A\"}";
        let candidates = extract_candidates(text).unwrap();
        assert_eq!(candidates[0]["name"], "A");
    }

    #[test]
    fn test_malformed_json_inside_brackets_fails() {
        let result = extract_candidates("[{\"name\": }]");
        assert!(matches!(result, Err(ExtractionFailure::Parse(_))));
    }
}
