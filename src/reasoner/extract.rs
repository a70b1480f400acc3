//! Tolerant extraction of structured data from noisy model output.
//!
//! Completions routinely wrap their JSON in prose or code fences. These
//! helpers locate the first well-formed JSON value of the expected shape and
//! ignore everything around it.

use serde_json::Value;

/// First well-formed JSON object embedded in `raw`, if any.
pub fn extract_object(raw: &str) -> Option<Value> {
    extract_value(raw, '{', '}')
}

/// First well-formed JSON array embedded in `raw`, if any.
pub fn extract_array(raw: &str) -> Option<Value> {
    extract_value(raw, '[', ']')
}

fn extract_value(raw: &str, open: char, close: char) -> Option<Value> {
    let unfenced = strip_code_fences(raw);
    for (start, ch) in unfenced.char_indices() {
        if ch != open {
            continue;
        }
        if let Some(len) = balanced_len(&unfenced[start..], open, close) {
            let candidate = &unfenced[start..start + len];
            if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                return Some(value);
            }
        }
    }
    None
}

/// Byte length of the balanced span starting at the opening delimiter,
/// skipping delimiters inside JSON string literals.
fn balanced_len(slice: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, ch) in slice.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(idx + ch.len_utf8());
            }
        }
    }
    None
}

fn strip_code_fences(raw: &str) -> &str {
    if let Some((_, rest)) = raw.split_once("```json") {
        return rest.split("```").next().unwrap_or(rest);
    }
    if let Some((_, rest)) = raw.split_once("```") {
        return rest.split("```").next().unwrap_or(rest);
    }
    raw
}
