//! JSON repair for providers whose JSON mode is unreliable
//!
//! Models wrap JSON in prose or markdown fences, leave comments and
//! trailing commas, format numbers with thousands separators and forget to
//! quote keys. [`extract_json`] and [`sanitize_json`] undo those habits
//! before the text reaches serde_json.

use regex::Regex;
use std::sync::LazyLock;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```(?:json)?\s*\n?").expect("valid regex"));
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\n?```\s*$").expect("valid regex"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)//.*$").expect("valid regex"));
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0b\x0c\x0e-\x1f]").expect("valid regex"));
// The terminator is captured and re-emitted (no lookahead in `regex`)
static GROUPED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(:\s*)(\d{1,3}(?:,\d{3})+)([,\s}\]])").expect("valid regex")
});
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));
static BARE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,]\s*)(\w+)(\s*:)").expect("valid regex"));

/// Slice from the first `{` to the last `}` inclusive
///
/// Returns the input unchanged when there is no such pair.
pub fn extract_json(content: &str) -> &str {
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end > start => &content[start..=end],
        _ => content,
    }
}

/// Apply every repair step in order
pub fn sanitize_json(content: &str) -> String {
    let text = OPENING_FENCE.replace_all(content, "");
    let text = CLOSING_FENCE.replace_all(&text, "");

    let text = LINE_COMMENT.replace_all(&text, "");
    let text = BLOCK_COMMENT.replace_all(&text, "");

    let text = CONTROL_CHARS.replace_all(&text, "");

    let text = GROUPED_NUMBER.replace_all(&text, |caps: &regex::Captures| {
        format!("{}{}{}", &caps[1], caps[2].replace(',', ""), &caps[3])
    });

    let text = TRAILING_COMMA.replace_all(&text, "$1");

    BARE_KEY.replace_all(&text, "$1\"$2\"$3").into_owned()
}

/// `extract_json` followed by `sanitize_json`
pub fn repair_json(content: &str) -> String {
    sanitize_json(extract_json(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_extract_json_strips_prose() {
        assert_eq!(
            extract_json("Here you go: {\"a\": {\"b\": 1}} hope it helps"),
            "{\"a\": {\"b\": 1}}"
        );
        assert_eq!(extract_json("no json here"), "no json here");
        assert_eq!(extract_json("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_markdown_fence_removed() {
        let sanitized = sanitize_json("```json\n{\"a\": 1}\n```");
        assert_eq!(serde_json::from_str::<Value>(&sanitized).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_comments_removed() {
        let sanitized = sanitize_json("{\n\"a\": 1, // count\n/* note */ \"b\": 2\n}");
        assert_eq!(
            serde_json::from_str::<Value>(&sanitized).unwrap(),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn test_thousands_separators_removed() {
        let sanitized = sanitize_json("{\"population\": 3,796,742, \"area\": 1,234}");
        assert_eq!(
            serde_json::from_str::<Value>(&sanitized).unwrap(),
            json!({"population": 3796742, "area": 1234})
        );
    }

    #[test]
    fn test_string_commas_untouched() {
        let sanitized = sanitize_json("{\"name\": \"Congo, Republic of\"}");
        assert_eq!(sanitized, "{\"name\": \"Congo, Republic of\"}");
    }

    #[test]
    fn test_trailing_commas_and_bare_keys() {
        let sanitized = sanitize_json("{population: 10, tags: [1, 2,],}");
        assert_eq!(
            serde_json::from_str::<Value>(&sanitized).unwrap(),
            json!({"population": 10, "tags": [1, 2]})
        );
    }

    #[test]
    fn test_control_characters_removed() {
        let sanitized = sanitize_json("{\"a\":\u{0001} 1}");
        assert_eq!(sanitized, "{\"a\": 1}");
    }

    #[test]
    fn test_repair_json() {
        let raw = "Sure!\n```json\n{\n  gdp: 1,000,000,\n}\n```\nAnything else?";
        assert_eq!(
            serde_json::from_str::<Value>(&repair_json(raw)).unwrap(),
            json!({"gdp": 1000000})
        );
    }
}
