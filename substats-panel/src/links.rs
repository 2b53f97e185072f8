//! Links payload decoding.
//!
//! The `/links` endpoint answers either with a JSON array of config URIs or
//! with a plain-text body. Text bodies are usually the base64 subscription
//! blob (a newline-delimited URI list), but some deployments serve the list
//! as bare text. Decoding is tolerant: an unrecognized payload yields an
//! empty list rather than an error.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use serde_json::Value;

/// Decode a `/links` response body into individual config URIs.
///
/// JSON bodies must be an array; string entries are kept as-is and other
/// entries are skipped. Text bodies are base64-decoded when possible, then
/// split on newlines with blank lines dropped.
#[must_use]
pub fn parse_links(body: &str, is_json: bool) -> Vec<String> {
    if is_json
        && let Ok(value) = serde_json::from_str::<Value>(body)
        && let Value::Array(entries) = value
    {
        return entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect();
    }

    split_lines(&decode_text_payload(body))
}

/// 文本载荷：优先尝试 base64（标准字母表，带/不带 padding）
fn decode_text_payload(body: &str) -> String {
    let trimmed = body.trim();
    let decoded = STANDARD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match decoded {
        // 解码产物必须像链接列表，否则按原始文本处理
        Some(text) if text.contains("://") => text,
        _ => body.to_string(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
