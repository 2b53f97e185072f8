//! Marzban HTTP 请求方法

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, RawResponse};
use crate::traits::PanelErrorMapper;

use super::MarzbanPanel;

impl MarzbanPanel {
    /// 执行订阅端点 GET 请求（带短窗口缓存与重试）
    ///
    /// 日志只记录 endpoint 路径，完整 URL 含订阅 token 不落日志。
    pub(crate) async fn get(&self, path_and_query: &str) -> Result<RawResponse> {
        let url = format!("{}{path_and_query}", self.base_url);

        if let Some(cached) = self.cache.get(&url).await {
            return Ok(cached);
        }

        let request = self.client.get(&url);
        let response = HttpUtils::execute_request_with_retry(
            request,
            self.panel_name(),
            "GET",
            path_and_query,
            self.max_retries,
        )
        .await?;

        if response.status >= 400 {
            return Err(self.status_error(response.status, &response.body));
        }

        self.cache.put(&url, response.clone()).await;
        Ok(response)
    }

    /// GET 并按 JSON 解析为目标类型
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let response = self.get(path_and_query).await?;
        HttpUtils::parse_json(&response.body, self.panel_name())
    }
}
