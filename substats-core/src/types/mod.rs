//! 类型定义模块

mod metrics;
mod view;

pub use metrics::{RemainingTime, RemainingTraffic, StatusLabel};
pub use view::{ConfigLink, DashboardView};

// Re-export panel 库的公共类型
pub use substats_panel::{
    AccountSnapshot, ChartQuery, ChartRange, ExpireStrategy, Granularity, PanelKind, UsageSample,
    UsageSeries,
};
