//! Marzneshin SubscriptionPanel trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::links::parse_links;
use crate::panels::common::parse_optional_datetime;
use crate::traits::{PanelErrorMapper, SubscriptionPanel};
use crate::types::{AccountSnapshot, ChartQuery, ExpireStrategy, PanelKind, UsageSeries};
use crate::usage::normalize_usage;

use super::{MarzneshinPanel, MarzneshinUser, UsageEnvelope, usage_path};

impl PanelErrorMapper for MarzneshinPanel {
    fn panel_name(&self) -> &'static str {
        "marzneshin"
    }
}

impl MarzneshinPanel {
    /// 将 `/info` 原始响应转换为规范快照
    pub(crate) fn to_snapshot(&self, raw: MarzneshinUser) -> AccountSnapshot {
        AccountSnapshot {
            username: raw.username,
            used_traffic: raw.used_traffic,
            // null 与 0 都按不限流量处理
            data_limit: raw.data_limit.unwrap_or(0),
            expires_at: parse_optional_datetime(raw.expire_date.as_deref()),
            enabled: raw.enabled,
            data_limit_reached: raw.data_limit_reached,
            expired: raw.expired,
            expire_strategy: match raw.expire_strategy.as_deref() {
                Some("start_on_first_use") => ExpireStrategy::StartOnFirstUse,
                _ => ExpireStrategy::Unspecified,
            },
            online_at: parse_optional_datetime(raw.online_at.as_deref()),
            subscription_url: raw
                .subscription_url
                .unwrap_or_else(|| self.base_url.clone()),
            // Marzneshin 不自报状态字符串，标签由标志位推导
            reported_status: None,
            panel: PanelKind::Marzneshin,
        }
    }

    /// 解开 `/usage` 信封，信封携带的预聚合 total 优先于归一化计算值
    pub(crate) fn unwrap_usage(envelope: UsageEnvelope) -> UsageSeries {
        let mut series = normalize_usage(&envelope.usages);
        if let Some(total) = envelope.total.filter(|t| t.is_finite() && *t >= 0.0) {
            series.total = Some(total as u64);
        }
        series
    }
}

#[async_trait]
impl SubscriptionPanel for MarzneshinPanel {
    fn id(&self) -> &'static str {
        "marzneshin"
    }

    fn kind(&self) -> PanelKind {
        PanelKind::Marzneshin
    }

    async fn fetch_info(&self) -> Result<AccountSnapshot> {
        let raw: MarzneshinUser = self.get_json("/info").await?;
        Ok(self.to_snapshot(raw))
    }

    async fn fetch_links(&self) -> Result<Vec<String>> {
        let response = self.get("/links").await?;
        Ok(parse_links(&response.body, response.is_json))
    }

    async fn fetch_usage(&self, query: &ChartQuery) -> Result<UsageSeries> {
        let envelope: UsageEnvelope = self.get_json(&usage_path(query)).await?;
        Ok(Self::unwrap_usage(envelope))
    }
}
