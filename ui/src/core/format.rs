//! Formatting helpers for presenting the analysis payloads.

use serde_json::{Map, Value};

/// `key: value` lines for the structured summary. Strings are shown raw,
/// everything else as compact JSON.
pub fn structured_lines(summary: &Map<String, Value>) -> Vec<(String, String)> {
    summary
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), shown)
        })
        .collect()
}

pub fn planning_text(planning: &Value) -> String {
    serde_json::to_string_pretty(planning).unwrap_or_else(|_| planning.to_string())
}

/// Split a document summary into paragraphs. The service sometimes sends
/// escaped `\n` sequences instead of real line breaks.
pub fn doc_paragraphs(summary: &str) -> Vec<String> {
    summary
        .replace("\\n", "\n")
        .split("\n\n")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_values_keep_strings_raw() {
        let summary = json!({ "genre": "뮤지컬", "capacity": 1200, "tags": ["a"] });
        let lines = structured_lines(summary.as_object().unwrap());
        assert!(lines.contains(&("genre".into(), "뮤지컬".into())));
        assert!(lines.contains(&("capacity".into(), "1200".into())));
        assert!(lines.contains(&("tags".into(), "[\"a\"]".into())));
    }

    #[test]
    fn escaped_newlines_split_paragraphs() {
        let paragraphs = doc_paragraphs("first\\nline\\n\\nsecond");
        assert_eq!(paragraphs, vec!["first\nline", "second"]);
    }

    #[test]
    fn planning_is_pretty_printed() {
        let text = planning_text(&json!({ "a": 1 }));
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }
}
