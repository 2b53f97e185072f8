use async_trait::async_trait;

use crate::error::{PanelError, Result};
use crate::types::{AccountSnapshot, ChartQuery, PanelKind, UsageSeries};

/// Panel 错误映射 Trait（内部使用）
/// 各 Panel 实现此 trait 以将后端 HTTP 错误统一映射
pub(crate) trait PanelErrorMapper {
    /// 返回 Panel 标识符
    fn panel_name(&self) -> &'static str;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> PanelError {
        PanelError::ParseError {
            panel: self.panel_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：字段/载荷缺失
    fn missing_data(&self, detail: impl ToString) -> PanelError {
        PanelError::MissingData {
            panel: self.panel_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 将非 2xx 状态映射为 `HttpStatus`，尝试从 FastAPI 风格的
    /// `{"detail": "..."}` 错误体中提取说明文字
    fn status_error(&self, status: u16, body: &str) -> PanelError {
        let raw_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("detail")
                    .and_then(|d| d.as_str())
                    .map(ToString::to_string)
            })
            .or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            });
        PanelError::HttpStatus {
            panel: self.panel_name().to_string(),
            status,
            raw_message,
        }
    }
}

/// Results of fetching all three subscription endpoints concurrently.
///
/// The endpoints fail independently: a revoked `links` payload does not
/// prevent `info` from being used, and vice versa.
#[derive(Debug)]
pub struct PanelFetch {
    /// Result of `GET {base}/info`.
    pub info: Result<AccountSnapshot>,
    /// Result of `GET {base}/links`.
    pub links: Result<Vec<String>>,
    /// Result of `GET {base}/usage`.
    pub usage: Result<UsageSeries>,
}

/// 订阅面板 Trait
#[async_trait]
pub trait SubscriptionPanel: Send + Sync {
    /// 面板标识符
    fn id(&self) -> &'static str;

    /// 面板方言
    fn kind(&self) -> PanelKind;

    /// 获取账户信息快照
    async fn fetch_info(&self) -> Result<AccountSnapshot>;

    /// 获取配置链接列表（原始 URI，未解析名称）
    async fn fetch_links(&self) -> Result<Vec<String>>;

    /// 获取指定窗口的用量序列
    async fn fetch_usage(&self, query: &ChartQuery) -> Result<UsageSeries>;

    /// 并发抓取 info/links/usage 三个端点
    ///
    /// 默认实现并发调用三个 fetch 方法，互不阻塞，各自的失败互不影响。
    async fn fetch_all(&self, query: &ChartQuery) -> PanelFetch {
        let (info, links, usage) = futures::join!(
            self.fetch_info(),
            self.fetch_links(),
            self.fetch_usage(query)
        );
        PanelFetch { info, links, usage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyMapper;

    impl PanelErrorMapper for DummyMapper {
        fn panel_name(&self) -> &'static str {
            "dummy"
        }
    }

    #[test]
    fn status_error_extracts_fastapi_detail() {
        let err = DummyMapper.status_error(404, r#"{"detail": "User not found"}"#);
        assert!(matches!(
            err,
            PanelError::HttpStatus { status: 404, raw_message: Some(msg), .. }
                if msg == "User not found"
        ));
    }

    #[test]
    fn status_error_falls_back_to_raw_body() {
        let err = DummyMapper.status_error(500, "Internal Server Error");
        assert!(matches!(
            err,
            PanelError::HttpStatus { status: 500, raw_message: Some(msg), .. }
                if msg == "Internal Server Error"
        ));
    }

    #[test]
    fn status_error_empty_body_has_no_message() {
        let err = DummyMapper.status_error(500, "  ");
        assert!(matches!(
            err,
            PanelError::HttpStatus {
                status: 500,
                raw_message: None,
                ..
            }
        ));
    }

    #[test]
    fn parse_error_carries_panel_name() {
        let err = DummyMapper.parse_error("bad json");
        assert_eq!(err.to_string(), "[dummy] Parse error: bad json");
    }
}
