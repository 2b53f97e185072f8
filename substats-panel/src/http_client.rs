//! Generic HTTP client tools
//!
//! Provide reusable HTTP request processing logic shared by the panel
//! implementations. Each panel constructs its own `RequestBuilder` and keeps
//! full control over paths and query parameters.
//!
//! # design principles
//! - **Unified and universal HTTP processing flow** - sending requests, logging, and reading responses
//! - **Content negotiation preserved** - the `Content-Type` of the response is captured so
//!   callers can distinguish JSON payloads from plain-text ones
//! - **Flexible response parsing** - Provides tool functions but does not limit parsing methods

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::PanelError;

/// Maximum number of characters to include in truncated log output.
///
/// Subscription URLs and link payloads embed access tokens, so response
/// bodies are never logged in full.
const TRUNCATE_LIMIT: usize = 256;

/// A raw HTTP response: status, negotiated content type, and body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Whether the response declared `Content-Type: application/json`.
    pub is_json: bool,
    /// Response body as text.
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the raw response
    ///
    /// Unified processing: sending requests, logging, error handling
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, etc.)
    /// * `panel_name` - panel name (for logging)
    /// * `method_name` - request method name (such as "GET", used for logs)
    /// * `url_or_action` - URL or action name (for logging)
    ///
    /// # Returns
    /// * `Ok(RawResponse)` - status code, content type flag and body text
    /// * `Err(PanelError::Timeout)` - request exceeded its time limit
    /// * `Err(PanelError::NetworkError)` - transport failure, or HTTP 502-504
    /// * `Err(PanelError::RateLimited)` - HTTP 429
    pub async fn execute_request(
        request_builder: RequestBuilder,
        panel_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<RawResponse, PanelError> {
        log::debug!("[{panel_name}] {method_name} {url_or_action}");

        // Send request
        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PanelError::Timeout {
                    panel: panel_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                PanelError::NetworkError {
                    panel: panel_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{panel_name}] Response Status: {status}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        // Returns RateLimited error for HTTP 429
        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{panel_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(PanelError::RateLimited {
                panel: panel_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        // Return NetworkError for 502/503/504 (can be retried)
        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{panel_name}] Server error (HTTP {status})");
            return Err(PanelError::NetworkError {
                panel: panel_name.to_string(),
                detail: format!("HTTP {status}: {body}"),
            });
        }

        // Read response body
        let body = response.text().await.map_err(|e| PanelError::NetworkError {
            panel: panel_name.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!("[{panel_name}] Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse {
            status,
            is_json,
            body,
        })
    }

    /// Parse JSON response
    ///
    /// # Arguments
    /// * `response_text` - JSON text
    /// * `panel_name` - panel name (used for error messages)
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(PanelError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, panel_name: &str) -> Result<T, PanelError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{panel_name}] JSON parse failed: {e}");
            log::error!(
                "[{panel_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            PanelError::ParseError {
                panel: panel_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request and returns the raw response (with retries)
    ///
    /// Automatically retry transient errors, using an exponential backoff strategy.
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor
    /// * `panel_name` - panel name
    /// * `method_name` - request method name
    /// * `url_or_action` - URL or action name
    /// * `max_retries` - Maximum number of retries (0 means no retries)
    ///
    /// # Retry strategy
    /// - Only retry transient errors (`NetworkError`, `Timeout`, `RateLimited`)
    /// - Exponential backoff: 100ms, 200ms, 400ms, 800ms, ... (maximum 10 seconds)
    /// - `RateLimited` honors the server's `Retry-After` (capped at 30 seconds)
    /// - Business errors (revoked subscription, parse failures, etc.) will not be retried
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        panel_name: &str,
        method_name: &str,
        url_or_action: &str,
        max_retries: u32,
    ) -> Result<RawResponse, PanelError> {
        if max_retries == 0 {
            // Do not retry, execute directly
            return Self::execute_request(request_builder, panel_name, method_name, url_or_action)
                .await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // Clone the request (RequestBuilder can only be used once)
            let Some(req) = request_builder.try_clone() else {
                // Unable to clone (usually caused by body stream), fallback to not retrying
                log::warn!("[{panel_name}] Cannot clone request, disabling retry");
                return Self::execute_request(
                    request_builder,
                    panel_name,
                    method_name,
                    url_or_action,
                )
                .await;
            };

            match Self::execute_request(req, panel_name, method_name, url_or_action).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        panel_name,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| PanelError::NetworkError {
            panel: panel_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Determine whether the error can be retried
///
/// Network errors, timeouts, and rate limiting are suitable for retrying, but business
/// errors (such as a revoked subscription token) should not be retried.
fn is_retryable(error: &PanelError) -> bool {
    matches!(
        error,
        PanelError::NetworkError { .. } | PanelError::Timeout { .. } | PanelError::RateLimited { .. }
    )
}

/// Calculate retry delay
///
/// Use this value (capped at 30s) when the error is `RateLimited` and contains `retry_after`.
/// Otherwise exponential backoff is used.
fn retry_delay(error: &PanelError, attempt: u32) -> Duration {
    if let PanelError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Calculate exponential backoff delay
///
/// Backoff strategy: 100ms, 200ms, 400ms, 800ms, 1.6s, ...
/// Maximum delay limit is 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000); // Maximum 10 seconds
    Duration::from_millis(delay_ms)
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` characters with a suffix indicating the total length.
pub(crate) fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}
