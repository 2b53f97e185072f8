//! Marzban SubscriptionPanel trait 实现

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::links::parse_links;
use crate::panels::common::parse_optional_datetime;
use crate::traits::{PanelErrorMapper, SubscriptionPanel};
use crate::types::{AccountSnapshot, ChartQuery, ExpireStrategy, PanelKind, UsageSeries};
use crate::usage::normalize_usage;
use crate::utils::datetime;

use super::{MarzbanPanel, MarzbanUser, usage_path};

impl PanelErrorMapper for MarzbanPanel {
    fn panel_name(&self) -> &'static str {
        "marzban"
    }
}

impl MarzbanPanel {
    /// 将 `/info` 原始响应转换为规范快照
    pub(crate) fn to_snapshot(&self, raw: MarzbanUser) -> AccountSnapshot {
        AccountSnapshot {
            username: raw.username,
            used_traffic: raw.used_traffic,
            // null 与 0 都按不限流量处理
            data_limit: raw.data_limit.unwrap_or(0),
            expires_at: raw
                .expire
                .filter(|&e| e != 0)
                .and_then(datetime::parse_epoch_timestamp),
            // Marzban 订阅端点不返回独立标志位，状态由 status 字符串透传
            enabled: true,
            data_limit_reached: false,
            expired: false,
            expire_strategy: ExpireStrategy::Unspecified,
            online_at: parse_optional_datetime(raw.online_at.as_deref()),
            subscription_url: raw
                .subscription_url
                .unwrap_or_else(|| self.base_url.clone()),
            reported_status: raw.status,
            panel: PanelKind::Marzban,
        }
    }
}

#[async_trait]
impl SubscriptionPanel for MarzbanPanel {
    fn id(&self) -> &'static str {
        "marzban"
    }

    fn kind(&self) -> PanelKind {
        PanelKind::Marzban
    }

    async fn fetch_info(&self) -> Result<AccountSnapshot> {
        let raw: MarzbanUser = self.get_json("/info").await?;
        Ok(self.to_snapshot(raw))
    }

    async fn fetch_links(&self) -> Result<Vec<String>> {
        let response = self.get("/links").await?;
        Ok(parse_links(&response.body, response.is_json))
    }

    async fn fetch_usage(&self, query: &ChartQuery) -> Result<UsageSeries> {
        let payload: Value = self.get_json(&usage_path(query)).await?;
        Ok(normalize_usage(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PanelConfig;

    fn panel() -> MarzbanPanel {
        MarzbanPanel::new(PanelConfig::new("https://panel.example.com/sub/token"))
    }

    fn raw_user() -> MarzbanUser {
        serde_json::from_str(r#"{"username":"alice"}"#).unwrap()
    }

    #[test]
    fn snapshot_expire_zero_means_never() {
        let mut raw = raw_user();
        raw.expire = Some(0);
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(snapshot.expires_at, None);
    }

    #[test]
    fn snapshot_expire_epoch_parsed() {
        let mut raw = raw_user();
        raw.expire = Some(1_714_521_600);
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(
            snapshot.expires_at.map(|dt| dt.timestamp()),
            Some(1_714_521_600)
        );
    }

    #[test]
    fn snapshot_null_data_limit_is_unlimited() {
        let raw = raw_user();
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(snapshot.data_limit, 0);
    }

    #[test]
    fn snapshot_status_passed_through() {
        let mut raw = raw_user();
        raw.status = Some("limited".to_string());
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(snapshot.reported_status.as_deref(), Some("limited"));
        assert_eq!(snapshot.panel, PanelKind::Marzban);
    }

    #[test]
    fn snapshot_online_at_naive_string() {
        let mut raw = raw_user();
        raw.online_at = Some("2023-11-26T15:43:12.123456".to_string());
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(
            snapshot.online_at.map(|dt| dt.timestamp()),
            Some(1_701_013_392)
        );
    }

    #[test]
    fn snapshot_subscription_url_falls_back_to_base() {
        let raw = raw_user();
        let snapshot = panel().to_snapshot(raw);
        assert_eq!(snapshot.subscription_url, "https://panel.example.com/sub/token");
    }

    #[test]
    fn snapshot_flags_are_neutral() {
        let snapshot = panel().to_snapshot(raw_user());
        assert!(snapshot.enabled);
        assert!(!snapshot.data_limit_reached);
        assert!(!snapshot.expired);
        assert_eq!(snapshot.expire_strategy, ExpireStrategy::Unspecified);
    }
}
