//! Model JSON Extraction
//!
//! Models wrap JSON in code fences, surround it with prose, or leave it
//! unterminated when they hit the token limit. `parse_model_json` tries the
//! cheapest interpretation first and escalates:
//!
//! 1. the fence-stripped text as-is
//! 2. the first balanced `{...}`/`[...]` block inside surrounding prose
//! 3. the text with trailing commas removed and open strings/brackets closed

use serde_json::Value;
use tracing::debug;

use crate::types::{BrandError, ErrorCategory, LlmError, Result};

/// Parse the JSON payload of a model response
pub fn parse_model_json(raw: &str) -> Result<Value> {
    parse_with_repair_status(raw).map(|(value, _)| value)
}

/// Parse the JSON payload, reporting whether any repair was needed
pub fn parse_with_repair_status(raw: &str) -> Result<(Value, bool)> {
    let cleaned = strip_code_fences(raw.trim().trim_start_matches('\u{feff}'));

    if let Ok(value) = serde_json::from_str::<Value>(&cleaned) {
        return Ok((value, false));
    }

    if let Some(block) = balanced_block(&cleaned)
        && let Ok(value) = serde_json::from_str::<Value>(block)
    {
        debug!("JSON extracted from surrounding text");
        return Ok((value, true));
    }

    let start = cleaned.find(['{', '[']).unwrap_or(0);
    let repaired = close_open_structures(&remove_trailing_commas(&cleaned[start..]));
    if let Ok(value) = serde_json::from_str::<Value>(&repaired) {
        debug!("JSON repaired (trailing commas / unclosed structures)");
        return Ok((value, true));
    }

    Err(BrandError::Llm(LlmError::new(
        ErrorCategory::ParseError,
        format!(
            "Response is not valid JSON: {}...",
            cleaned.chars().take(120).collect::<String>()
        ),
    )))
}

/// Remove a leading ```lang line and a trailing ``` fence
pub fn strip_code_fences(s: &str) -> String {
    let mut body = s.trim();

    if body.starts_with("```") {
        body = match body.find('\n') {
            Some(newline) => &body[newline + 1..],
            None => body.trim_start_matches('`'),
        };
    }
    if let Some(stripped) = body.trim_end().strip_suffix("```") {
        body = stripped;
    }

    body.trim().to_string()
}

/// First complete top-level object or array, ignoring brackets in strings
fn balanced_block(s: &str) -> Option<&str> {
    let start = s.find(['{', '['])?;
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (offset, ch) in s[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' | '[' if !in_string => depth += 1,
            '}' | ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

fn remove_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape = false;

    for (i, &ch) in chars.iter().enumerate() {
        if escape {
            escape = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            ',' if !in_string => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some(']') | Some('}')) {
                    continue;
                }
            }
            _ => {}
        }
        out.push(ch);
    }

    out
}

/// Close an unterminated string, then every bracket still open, innermost
/// first
fn close_open_structures(s: &str) -> String {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for ch in s.chars() {
        if escape {
            escape = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => stack.push('}'),
            '[' if !in_string => stack.push(']'),
            '}' | ']' if !in_string => {
                stack.pop();
            }
            _ => {}
        }
    }

    let mut out = s.trim_end().trim_end_matches(',').to_string();
    if in_string {
        out.push('"');
    }
    while let Some(closer) = stack.pop() {
        out.push(closer);
    }
    out
}
