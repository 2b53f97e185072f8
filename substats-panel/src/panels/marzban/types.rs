//! Marzban API 类型定义

use serde::Deserialize;

use crate::types::ChartQuery;
use crate::utils::datetime;

/// `/info` 响应（字段按订阅端点实际返回裁剪）
///
/// 所有字段都按可缺省处理，后端版本差异不会导致整体解析失败。
#[derive(Debug, Deserialize)]
pub struct MarzbanUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub used_traffic: u64,
    /// null 表示不限流量
    #[serde(default)]
    pub data_limit: Option<u64>,
    /// Unix 秒，null 或 0 表示永不过期
    #[serde(default)]
    pub expire: Option<i64>,
    /// 后端自报状态（active / disabled / limited / expired / `on_hold`）
    #[serde(default)]
    pub status: Option<String>,
    /// naive UTC 字符串，如 "2023-11-26T15:43:12.123456"
    #[serde(default)]
    pub online_at: Option<String>,
    #[serde(default)]
    pub subscription_url: Option<String>,
}

/// 构造 `/usage` 的路径与查询串
///
/// Marzban 接受 `period` 参数控制聚合粒度。ISO 时间戳中的 `:` 与 `.`
/// 在 query 中是合法字符，与面板前端一致不做转义。
pub(crate) fn usage_path(query: &ChartQuery) -> String {
    format!(
        "/usage?start={}&end={}&period={}",
        datetime::to_iso_millis(query.start),
        datetime::to_iso_millis(query.end),
        query.granularity.as_str()
    )
}
