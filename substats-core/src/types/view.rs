//! 仪表盘视图模型
//!
//! 呈现层按渲染周期消费一份 [`DashboardView`]，不再做任何派生。

use serde::{Deserialize, Serialize};

use substats_panel::UsageSample;

use crate::error::{CoreError, CoreResult};

/// 一条配置链接及其展示名称
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLink {
    /// 原始配置 URI
    pub uri: String,
    /// 从 URI 中提取的展示名称
    pub display_name: String,
}

/// 显示就绪的仪表盘状态
///
/// 所有字符串字段都是稳定的标记词汇或已格式化的展示值，
/// 数值字段保留原始精度供图表使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// 账户名
    pub username: String,
    /// 状态标签（`active` / `disabled` / `on_hold` / `near_to_expire` 或后端自报值）
    pub status_label: String,
    /// 剩余流量（`infinity` / `limited` 或格式化字节数）
    pub remaining_traffic: String,
    /// 剩余有效期（`infinity` / `expired` 或最大非零单位）
    pub remaining_time: String,
    /// 用量百分比，限制在 [0, 100]
    pub usage_percent: f64,
    /// 查询窗口内的总用量（字节）
    pub total_usage: u64,
    /// 用量序列，按后端交付顺序
    pub usage_samples: Vec<UsageSample>,
    /// 配置链接列表
    pub config_links: Vec<ConfigLink>,
    /// 最近在线时间的展示值（`∞` 表示未知）
    pub online_at: String,
    /// 流量配额的展示值（`infinity` 表示不限）
    pub data_limit: String,
    /// 订阅地址
    pub subscription_url: String,
}

impl DashboardView {
    /// 序列化为 JSON，供嵌入方（WebView、FFI 等）直接消费
    ///
    /// # Errors
    ///
    /// 序列化失败时返回 [`CoreError::SerializationError`]。
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::SerializationError(e.to_string()))
    }
}
