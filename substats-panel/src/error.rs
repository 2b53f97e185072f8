use serde::{Deserialize, Serialize};

/// Unified error type for all panel operations.
///
/// Each variant includes a `panel` field identifying which panel backend produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum PanelError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Panel that produced the error.
        panel: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Panel that produced the error.
        panel: String,
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    ///
    /// This is a transient error. The request should succeed after waiting.
    RateLimited {
        /// Panel that produced the error.
        panel: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the panel API, if available.
        raw_message: Option<String>,
    },

    /// The backend answered with a non-success HTTP status (other than 429/502-504).
    ///
    /// A 404 here usually means the subscription token was revoked or never existed.
    HttpStatus {
        /// Panel that produced the error.
        panel: String,
        /// HTTP status code.
        status: u16,
        /// Backend `detail` message extracted from the body, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the panel's API response.
    ParseError {
        /// Panel that produced the error.
        panel: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// An expected field or payload was absent from the response.
    MissingData {
        /// Panel that produced the error.
        panel: String,
        /// Which field/payload was missing.
        detail: String,
    },

    /// The client configuration is unusable (malformed subscription URL,
    /// panel support not compiled in, etc.). Produced locally, never by the
    /// backend.
    ConfigError {
        /// Panel (or `factory`) that rejected the configuration.
        panel: String,
        /// What is wrong with the configuration.
        detail: String,
    },
}

impl PanelError {
    /// 是否为预期行为（订阅被回收、字段缺失等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::MissingData { .. })
    }
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { panel, detail } => {
                write!(f, "[{panel}] Network error: {detail}")
            }
            Self::Timeout { panel, detail } => {
                write!(f, "[{panel}] Request timeout: {detail}")
            }
            Self::RateLimited {
                panel, retry_after, ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{panel}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{panel}] Rate limited")
                }
            }
            Self::HttpStatus {
                panel,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{panel}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{panel}] HTTP {status}")
                }
            }
            Self::ParseError { panel, detail } => {
                write!(f, "[{panel}] Parse error: {detail}")
            }
            Self::MissingData { panel, detail } => {
                write!(f, "[{panel}] Missing data: {detail}")
            }
            Self::ConfigError { panel, detail } => {
                write!(f, "[{panel}] Configuration error: {detail}")
            }
        }
    }
}

impl std::error::Error for PanelError {}

/// Convenience type alias for `Result<T, PanelError>`.
pub type Result<T> = std::result::Result<T, PanelError>;
