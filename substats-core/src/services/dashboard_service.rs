//! 仪表盘服务
//!
//! 将面板抓取结果装配为可直接渲染的 [`DashboardView`]。
//! `info` 失败时整体失败；`links` 与 `usage` 失败时降级为空数据并记录日志。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use substats_panel::{
    AccountSnapshot, ChartRange, PanelError, PanelFetch, SubscriptionPanel, UsageSeries,
};

use crate::error::CoreResult;
use crate::types::{ConfigLink, DashboardView, RemainingTime, RemainingTraffic};
use crate::utils::links::extract_config_name;
use crate::utils::{format, status};

/// 仪表盘服务
pub struct DashboardService {
    panel: Arc<dyn SubscriptionPanel>,
}

impl DashboardService {
    /// 创建服务实例
    #[must_use]
    pub fn new(panel: Arc<dyn SubscriptionPanel>) -> Self {
        Self { panel }
    }

    /// 抓取三个端点并装配视图
    ///
    /// # Errors
    ///
    /// 仅当 `info` 端点失败时返回错误，其余端点降级。
    pub async fn load(&self, range: ChartRange) -> CoreResult<DashboardView> {
        let now = Utc::now();
        let query = range.query_at(now);
        let PanelFetch { info, links, usage } = self.panel.fetch_all(&query).await;

        let snapshot = info?;
        let links = links.unwrap_or_else(|e| {
            log_degraded("links", &e);
            Vec::new()
        });
        let usage = usage.unwrap_or_else(|e| {
            log_degraded("usage", &e);
            UsageSeries::default()
        });

        Ok(Self::assemble(&snapshot, &links, &usage, now))
    }

    /// 将快照、链接与用量序列装配为渲染视图
    fn assemble(
        snapshot: &AccountSnapshot,
        raw_links: &[String],
        usage: &UsageSeries,
        now: DateTime<Utc>,
    ) -> DashboardView {
        let config_links = raw_links
            .iter()
            .map(|uri| {
                let name = extract_config_name(uri);
                ConfigLink {
                    uri: uri.clone(),
                    // 空名称兜底为 Unknown
                    display_name: if name.is_empty() {
                        "Unknown".to_string()
                    } else {
                        name
                    },
                }
            })
            .collect();

        let data_limit = if snapshot.data_limit == 0 {
            "infinity".to_string()
        } else {
            format::format_traffic(snapshot.data_limit)
        };

        DashboardView {
            username: snapshot.username.clone(),
            status_label: status::derive_status(snapshot, now).to_string(),
            remaining_traffic: RemainingTraffic::from_usage(snapshot.used_traffic, snapshot.data_limit)
                .to_string(),
            remaining_time: RemainingTime::from_expiry(snapshot.expires_at, now).to_string(),
            usage_percent: status::usage_percent(snapshot.used_traffic, snapshot.data_limit),
            total_usage: usage.window_total(),
            usage_samples: usage.samples.clone(),
            config_links,
            online_at: format::format_online_at(snapshot.online_at, now),
            data_limit,
            subscription_url: snapshot.subscription_url.clone(),
        }
    }
}

/// 降级日志：预期内的失败记 warn，其余记 error
fn log_degraded(endpoint: &str, err: &PanelError) {
    if err.is_expected() {
        log::warn!("Fetch {endpoint} degraded: {err}");
    } else {
        log::error!("Fetch {endpoint} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use substats_panel::{PanelKind, UsageSample};

    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{create_test_dashboard_service, test_snapshot};

    #[tokio::test]
    async fn load_assembles_full_view() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzneshin);

        let mut snapshot = test_snapshot(PanelKind::Marzneshin);
        snapshot.used_traffic = 512;
        snapshot.data_limit = 1024;
        snapshot.expires_at = Some(Utc::now() + Duration::seconds(90_000));
        panel.set_info(Ok(snapshot)).await;
        panel
            .set_links(Ok(vec![
                "vless://abc@host:443?type=ws#My%20Server".to_string(),
                // base64({"ps":"Test"})
                "vmess://eyJwcyI6IlRlc3QifQ==".to_string(),
            ]))
            .await;
        panel
            .set_usage(Ok(UsageSeries {
                samples: vec![
                    UsageSample {
                        timestamp: 1_700_000_000,
                        bytes: 100,
                    },
                    UsageSample {
                        timestamp: 1_700_003_600,
                        bytes: 200,
                    },
                ],
                total: None,
            }))
            .await;

        let view = service.load(ChartRange::Weekly).await.unwrap();

        assert_eq!(view.username, "alice");
        assert_eq!(view.status_label, "active");
        assert_eq!(view.remaining_traffic, "512 B");
        assert_eq!(view.remaining_time, "1 day");
        assert!((view.usage_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(view.total_usage, 300);
        assert_eq!(view.usage_samples.len(), 2);
        assert_eq!(view.config_links.len(), 2);
        assert_eq!(view.config_links[0].display_name, "My Server");
        assert_eq!(view.config_links[1].display_name, "Test");
        assert_eq!(view.online_at, "∞");
        assert_eq!(view.data_limit, "1.00 KB");
        assert_eq!(view.subscription_url, "https://host/sub/alice/w7kDXu3DkQ");
    }

    #[tokio::test]
    async fn load_fails_when_info_fails() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzban);
        panel
            .set_info(Err(PanelError::NetworkError {
                panel: "mock".to_string(),
                detail: "connection refused".to_string(),
            }))
            .await;

        let result = service.load(ChartRange::Daily).await;

        assert!(matches!(
            result,
            Err(CoreError::Panel(PanelError::NetworkError { .. }))
        ));
    }

    #[tokio::test]
    async fn load_degrades_when_links_fail() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzban);
        panel
            .set_links(Err(PanelError::HttpStatus {
                panel: "mock".to_string(),
                status: 404,
                raw_message: Some("Not Found".to_string()),
            }))
            .await;

        let view = service.load(ChartRange::Monthly).await.unwrap();

        assert_eq!(view.username, "alice");
        assert!(view.config_links.is_empty());
    }

    #[tokio::test]
    async fn load_degrades_when_usage_fails() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzneshin);
        panel
            .set_usage(Err(PanelError::Timeout {
                panel: "mock".to_string(),
                detail: "deadline exceeded".to_string(),
            }))
            .await;

        let view = service.load(ChartRange::Yearly).await.unwrap();

        assert!(view.usage_samples.is_empty());
        assert_eq!(view.total_usage, 0);
    }

    #[tokio::test]
    async fn load_prefers_backend_usage_total() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzneshin);
        panel
            .set_usage(Ok(UsageSeries {
                samples: vec![UsageSample {
                    timestamp: 1_700_000_000,
                    bytes: 100,
                }],
                total: Some(9_000),
            }))
            .await;

        let view = service.load(ChartRange::SixMonth).await.unwrap();

        assert_eq!(view.total_usage, 9_000);
    }

    #[tokio::test]
    async fn blank_link_names_fall_back_to_unknown() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzban);
        panel
            .set_links(Ok(vec!["vless://abc@host:443#".to_string()]))
            .await;

        let view = service.load(ChartRange::Weekly).await.unwrap();

        assert_eq!(view.config_links[0].display_name, "Unknown");
    }

    #[tokio::test]
    async fn disabled_snapshot_renders_disabled_label() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzneshin);

        let mut snapshot = test_snapshot(PanelKind::Marzneshin);
        snapshot.enabled = false;
        panel.set_info(Ok(snapshot)).await;

        let view = service.load(ChartRange::Weekly).await.unwrap();

        assert_eq!(view.status_label, "disabled");
    }

    #[tokio::test]
    async fn unlimited_snapshot_renders_infinity_markers() {
        let (service, panel) = create_test_dashboard_service(PanelKind::Marzban);

        let mut snapshot = test_snapshot(PanelKind::Marzban);
        snapshot.used_traffic = 4_096;
        snapshot.data_limit = 0;
        snapshot.expires_at = None;
        panel.set_info(Ok(snapshot)).await;

        let view = service.load(ChartRange::Daily).await.unwrap();

        assert_eq!(view.remaining_traffic, "infinity");
        assert_eq!(view.remaining_time, "infinity");
        assert_eq!(view.data_limit, "infinity");
        assert!(view.usage_percent.abs() < f64::EPSILON);
    }
}
