//! Pull a JSON object out of noisy model output.
//!
//! Models wrap JSON in code fences and prose. [`extract_first_json`] finds the
//! first balanced `{...}` region with a string-aware brace scan;
//! [`safe_json_parse`] parses it and returns `None` on any failure.

use serde::de::DeserializeOwned;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Trim, then drop a leading ```` ```json ```` (any case) or ```` ``` ````
/// marker and a trailing ```` ``` ````.
#[must_use]
pub fn strip_fences(text: &str) -> &str {
    let mut s = text.trim();
    if s
        .get(..JSON_FENCE.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(JSON_FENCE))
    {
        s = s[JSON_FENCE.len()..].trim_start();
    }
    if let Some(rest) = s.strip_prefix(FENCE) {
        s = rest.trim_start();
    }
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest.trim_end();
    }
    s
}

/// The first balanced `{...}` region of the fence-stripped text.
///
/// Braces inside string literals are ignored. A backslash skips exactly the
/// next character. Returns `None` when there is no `{` or the region never
/// closes.
#[must_use]
pub fn extract_first_json(text: &str) -> Option<&str> {
    let cleaned = strip_fences(text);
    let start = cleaned.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in cleaned[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&cleaned[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the first JSON object in `text`, or `None`.
#[must_use]
pub fn safe_json_parse(text: &str) -> Option<serde_json::Value> {
    let candidate = extract_first_json(text)?;
    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "extracted region is not valid JSON");
            None
        }
    }
}

/// [`safe_json_parse`] followed by deserialization into `T`.
#[must_use]
pub fn parse_json_as<T: DeserializeOwned>(text: &str) -> Option<T> {
    safe_json_parse(text).and_then(|v| serde_json::from_value(v).ok())
}
