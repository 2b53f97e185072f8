use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Panel Types ============

/// Identifies which panel backend dialect a subscription URL belongs to.
///
/// Detected once from the URL path shape (see [`detect_kind`](crate::detect_kind))
/// and fixed for the lifetime of the panel instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Marzban subscription API. Requires feature `marzban`.
    Marzban,
    /// Marzneshin subscription API. Requires feature `marzneshin`.
    Marzneshin,
}

impl PanelKind {
    /// Stable lowercase identifier, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marzban => "marzban",
            Self::Marzneshin => "marzneshin",
        }
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============ Fetch Policy ============

/// Retry and deduplication policy applied to every request a panel issues.
///
/// # Default
///
/// 3 retries, 2 second dedupe window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchPolicy {
    /// Maximum number of automatic retries for transient errors (0 disables retrying).
    pub max_retries: u32,
    /// Identical GETs within this window reuse the previous response (0 disables).
    pub dedupe_window_ms: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            dedupe_window_ms: 2_000,
        }
    }
}

impl FetchPolicy {
    /// The dedupe window as a [`Duration`].
    #[must_use]
    pub fn dedupe_window(&self) -> Duration {
        Duration::from_millis(self.dedupe_window_ms)
    }
}

/// Configuration for constructing a panel client.
///
/// The only required value is the subscription URL. The dialect is normally
/// detected from the URL path; set [`kind`](Self::kind) to override detection.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Base subscription URL, e.g. `https://host/sub/<token>`.
    pub subscription_url: String,
    /// Explicit dialect override. `None` means detect from the URL path.
    pub kind: Option<PanelKind>,
    /// Retry/dedupe policy.
    pub policy: FetchPolicy,
}

impl PanelConfig {
    /// Creates a config with dialect detection and the default policy.
    pub fn new(subscription_url: impl Into<String>) -> Self {
        Self {
            subscription_url: subscription_url.into(),
            kind: None,
            policy: FetchPolicy::default(),
        }
    }

    /// Force a specific dialect instead of detecting it from the URL path.
    #[must_use]
    pub fn kind(mut self, kind: PanelKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the retry/dedupe policy.
    #[must_use]
    pub fn policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

// ============ Account Types ============

/// How the backend starts the expiry clock for an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpireStrategy {
    /// No special strategy, or the backend does not report one.
    #[default]
    Unspecified,
    /// Expiry starts counting only after the account's first connection.
    StartOnFirstUse,
}

/// Canonical account state, normalized from either panel dialect.
///
/// Marzban supplies `expire` (epoch seconds, 0 = never) and a verbatim `status`
/// string; Marzneshin supplies `expire_date` (ISO-8601, null = never) plus the
/// `enabled`/`data_limit_reached`/`expired`/`expire_strategy` flags. Fields one
/// dialect lacks take their neutral defaults here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    /// Account username.
    pub username: String,
    /// Bytes consumed so far.
    pub used_traffic: u64,
    /// Traffic allowance in bytes. `0` means unlimited.
    pub data_limit: u64,
    /// When the account expires. `None` means it never expires.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the account is enabled (Marzneshin; Marzban defaults to `true`).
    pub enabled: bool,
    /// Whether the traffic allowance has been exhausted (Marzneshin only).
    pub data_limit_reached: bool,
    /// Whether the backend already considers the account expired (Marzneshin only).
    pub expired: bool,
    /// Expiry-clock strategy (Marzneshin only).
    pub expire_strategy: ExpireStrategy,
    /// Last time the account was seen online, if known.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_at: Option<DateTime<Utc>>,
    /// The subscription URL this snapshot was fetched from.
    pub subscription_url: String,
    /// Verbatim backend status string (Marzban only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_status: Option<String>,
    /// Which dialect produced this snapshot.
    pub panel: PanelKind,
}

// ============ Usage Types ============

/// One point of a usage series: epoch seconds paired with bytes consumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageSample {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    /// Bytes consumed in this bucket.
    pub bytes: u64,
}

/// A normalized usage series for one query window.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsageSeries {
    /// Samples in the order the backend delivered them.
    pub samples: Vec<UsageSample>,
    /// Window total reported by the backend, when the payload carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl UsageSeries {
    /// Total bytes for the window: the backend-reported total when present,
    /// otherwise the sum of the samples.
    #[must_use]
    pub fn window_total(&self) -> u64 {
        self.total
            .unwrap_or_else(|| self.samples.iter().map(|s| s.bytes).sum())
    }
}

// ============ Chart Query Types ============

/// Bucket size for usage queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Hourly buckets.
    Hour,
    /// Daily buckets.
    Day,
    /// Monthly buckets.
    Month,
}

impl Granularity {
    /// The `period` query-parameter value for this granularity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
        }
    }
}

/// A concrete usage query window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Bucket size.
    pub granularity: Granularity,
}

/// User-facing chart presets, each mapping to a relative query window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartRange {
    /// Last 24 hours, hourly buckets.
    #[default]
    Daily,
    /// Last 7 days, daily buckets.
    Weekly,
    /// Last 30 days, daily buckets.
    Monthly,
    /// Last 180 days, monthly buckets.
    SixMonth,
    /// Last 365 days, monthly buckets.
    Yearly,
}

impl ChartRange {
    /// Resolve this preset into a concrete window ending at `now`.
    #[must_use]
    pub fn query_at(self, now: DateTime<Utc>) -> ChartQuery {
        let (days, granularity) = match self {
            Self::Daily => (1, Granularity::Hour),
            Self::Weekly => (7, Granularity::Day),
            Self::Monthly => (30, Granularity::Day),
            Self::SixMonth => (180, Granularity::Month),
            Self::Yearly => (365, Granularity::Month),
        };
        ChartQuery {
            start: now - chrono::Duration::days(days),
            end: now,
            granularity,
        }
    }
}
