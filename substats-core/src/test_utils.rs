//! 测试辅助模块
//!
//! 提供可注入错误的 Mock 面板与快照工厂，供服务层测试使用。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use substats_panel::{
    AccountSnapshot, ChartQuery, ExpireStrategy, PanelKind, Result as PanelResult,
    SubscriptionPanel, UsageSeries,
};

use crate::services::DashboardService;

/// Mock 面板：每个端点的返回值可独立设置为成功或失败
pub struct MockPanel {
    kind: PanelKind,
    info: RwLock<PanelResult<AccountSnapshot>>,
    links: RwLock<PanelResult<Vec<String>>>,
    usage: RwLock<PanelResult<UsageSeries>>,
}

impl MockPanel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            info: RwLock::new(Ok(test_snapshot(kind))),
            links: RwLock::new(Ok(Vec::new())),
            usage: RwLock::new(Ok(UsageSeries::default())),
        }
    }

    pub async fn set_info(&self, result: PanelResult<AccountSnapshot>) {
        *self.info.write().await = result;
    }

    pub async fn set_links(&self, result: PanelResult<Vec<String>>) {
        *self.links.write().await = result;
    }

    pub async fn set_usage(&self, result: PanelResult<UsageSeries>) {
        *self.usage.write().await = result;
    }
}

#[async_trait]
impl SubscriptionPanel for MockPanel {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn kind(&self) -> PanelKind {
        self.kind
    }

    async fn fetch_info(&self) -> PanelResult<AccountSnapshot> {
        self.info.read().await.clone()
    }

    async fn fetch_links(&self) -> PanelResult<Vec<String>> {
        self.links.read().await.clone()
    }

    async fn fetch_usage(&self, _query: &ChartQuery) -> PanelResult<UsageSeries> {
        self.usage.read().await.clone()
    }
}

/// 创建中性的测试快照（未禁用、无限流量、永不过期）
pub fn test_snapshot(kind: PanelKind) -> AccountSnapshot {
    AccountSnapshot {
        username: "alice".to_string(),
        used_traffic: 0,
        data_limit: 0,
        expires_at: None,
        enabled: true,
        data_limit_reached: false,
        expired: false,
        expire_strategy: ExpireStrategy::Unspecified,
        online_at: None,
        subscription_url: "https://host/sub/alice/w7kDXu3DkQ".to_string(),
        reported_status: (kind == PanelKind::Marzban).then(|| "active".to_string()),
        panel: kind,
    }
}

/// 创建服务实例与其 Mock 面板
pub fn create_test_dashboard_service(kind: PanelKind) -> (DashboardService, Arc<MockPanel>) {
    let panel = Arc::new(MockPanel::new(kind));
    let service = DashboardService::new(panel.clone());
    (service, panel)
}
