//! Config-link display names.
//!
//! A config URI carries its label in the fragment, or for `vmess://` inside a
//! base64-encoded JSON payload. Extraction degrades to marker strings
//! (`Unnamed Config` / `Invalid Config` / `Unknown`) and never fails.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

/// Extracts a human-readable name from a config URI.
///
/// The first `#` fragment (up to any second `#`) wins, percent-decoded with a
/// fallback to the raw fragment text when decoding does not produce valid
/// UTF-8. Fragment-less `vmess://` URIs fall back to the `ps` field of their
/// embedded JSON payload.
#[must_use]
pub fn extract_config_name(uri: &str) -> String {
    if let Some(pos) = uri.find('#') {
        let fragment = uri[pos + 1..].split('#').next().unwrap_or_default();
        return match urlencoding::decode(fragment) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => fragment.to_string(),
        };
    }

    if let Some(payload) = uri.strip_prefix("vmess://") {
        return vmess_name(payload);
    }

    "Unknown".to_string()
}

/// vmess 载荷：base64(JSON) 的 `ps` 字段
fn vmess_name(payload: &str) -> String {
    let trimmed = payload.trim();
    let decoded = STANDARD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed));
    let bytes = match decoded {
        Ok(bytes) => bytes,
        Err(_) => return "Invalid Config".to_string(),
    };
    let value = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) => value,
        Err(_) => return "Invalid Config".to_string(),
    };
    value
        .get("ps")
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| "Unnamed Config".to_string(), ToString::to_string)
}
