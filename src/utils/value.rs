use serde_json::Value;

/// Longest rendering of a config value written to the logs.
const MAX_RENDERED_LEN: usize = 200;

/// Render a JSON value as a single log-safe line: strings unquoted, control
/// characters stripped, long values cut short.
pub fn value_to_string(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut rendered: String = raw.chars().filter(|c| !c.is_control()).collect();
    let cut = rendered.char_indices().nth(MAX_RENDERED_LEN).map(|(i, _)| i);
    if let Some(cut) = cut {
        rendered.truncate(cut);
        rendered.push_str("...");
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_and_structures() {
        assert_eq!(value_to_string(&json!("http://api/v1")), "http://api/v1");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "null");
        assert_eq!(value_to_string(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_control_characters_stripped() {
        assert_eq!(value_to_string(&json!("line\nbreak\u{7}")), "linebreak");
    }

    #[test]
    fn test_long_values_truncated() {
        let long = "x".repeat(500);
        let rendered = value_to_string(&json!(long));
        assert_eq!(rendered.len(), MAX_RENDERED_LEN + 3);
        assert!(rendered.ends_with("..."));
    }
}
