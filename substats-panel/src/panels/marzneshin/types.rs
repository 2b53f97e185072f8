//! Marzneshin API 类型定义

use serde::Deserialize;
use serde_json::Value;

use crate::types::ChartQuery;
use crate::utils::datetime;

/// `/info` 响应（字段按订阅端点实际返回裁剪）
///
/// 所有字段都按可缺省处理。缺失的 `enabled` 视为 false，与面板前端
/// 对未启用账户的判定一致。
#[derive(Debug, Deserialize)]
pub struct MarzneshinUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub used_traffic: u64,
    /// null 表示不限流量
    #[serde(default)]
    pub data_limit: Option<u64>,
    /// ISO 字符串，null 表示永不过期
    #[serde(default)]
    pub expire_date: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub data_limit_reached: bool,
    #[serde(default)]
    pub expired: bool,
    /// never / `start_on_first_use` / `fixed_date`
    #[serde(default)]
    pub expire_strategy: Option<String>,
    #[serde(default)]
    pub online_at: Option<String>,
    #[serde(default)]
    pub subscription_url: Option<String>,
}

/// `/usage` 响应信封
///
/// `usages` 的形状不做假设，交由归一化层处理。
#[derive(Debug, Deserialize)]
pub struct UsageEnvelope {
    #[serde(default)]
    pub usages: Value,
    #[serde(default)]
    pub total: Option<f64>,
}

/// 构造 `/usage` 的路径与查询串
///
/// Marzneshin 不接受 `period` 参数，聚合粒度由服务端决定。
pub(crate) fn usage_path(query: &ChartQuery) -> String {
    format!(
        "/usage?start={}&end={}",
        datetime::to_iso_millis(query.start),
        datetime::to_iso_millis(query.end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::types::Granularity;

    #[test]
    fn usage_path_has_no_period() {
        let query = ChartQuery {
            start: Utc
                .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            end: Utc
                .with_ymd_and_hms(2024, 5, 2, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            granularity: Granularity::Hour,
        };

        assert_eq!(
            usage_path(&query),
            "/usage?start=2024-05-01T00:00:00.000Z&end=2024-05-02T00:00:00.000Z"
        );
    }

    #[test]
    fn user_missing_enabled_defaults_to_false() {
        let raw = r#"{"username":"alice"}"#;
        let user: MarzneshinUser = serde_json::from_str(raw).unwrap();
        assert!(!user.enabled);
        assert!(!user.data_limit_reached);
        assert!(!user.expired);
    }

    #[test]
    fn user_full_payload() {
        let raw = r#"{
            "username": "bob",
            "used_traffic": 1024,
            "data_limit": 10240,
            "expire_date": "2025-01-01T00:00:00+00:00",
            "enabled": true,
            "data_limit_reached": false,
            "expired": false,
            "expire_strategy": "start_on_first_use",
            "online_at": null,
            "subscription_url": "https://panel.example.com/sub/bob/key"
        }"#;
        let user: MarzneshinUser = serde_json::from_str(raw).unwrap();
        assert!(user.enabled);
        assert_eq!(user.expire_strategy.as_deref(), Some("start_on_first_use"));
        assert_eq!(user.online_at, None);
    }

    #[test]
    fn envelope_carries_total_and_raw_usages() {
        let raw = r#"{"usages":[["1714521600",100]],"total":100}"#;
        let envelope: UsageEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.total, Some(100.0));
        assert!(envelope.usages.is_array());
    }

    #[test]
    fn envelope_missing_fields() {
        let envelope: UsageEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.total, None);
        assert!(envelope.usages.is_null());
    }
}
