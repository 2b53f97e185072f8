//! Panel 公共工具函数

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::utils::datetime;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

// ============ 时间字段解析 ============

/// 解析后端返回的可选时间字符串（RFC3339 或 naive UTC）
///
/// 无法解析的值按缺失处理，不报错。
pub(crate) fn parse_optional_datetime(value: Option<&str>) -> Option<DateTime<Utc>> {
    value.and_then(datetime::parse_flexible)
}

/// 订阅 URL 规范化：去掉末尾斜杠，便于拼接 endpoint 路径
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
