//! Short-window response reuse.
//!
//! Dashboards tend to fire the same request several times in quick
//! succession (multiple widgets sharing one endpoint). Responses are kept
//! for a small dedupe window so those bursts hit the network once.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::http_client::RawResponse;

/// In-memory response cache keyed by request URL.
pub(crate) struct ResponseCache {
    window: Duration,
    entries: RwLock<HashMap<String, (Instant, RawResponse)>>,
}

impl ResponseCache {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached response for `url` if it is still inside the window.
    pub(crate) async fn get(&self, url: &str) -> Option<RawResponse> {
        if self.window.is_zero() {
            return None;
        }

        let entries = self.entries.read().await;
        let (stored_at, response) = entries.get(url)?;
        if stored_at.elapsed() < self.window {
            // URL 含订阅 token，不放入日志
            log::debug!("Reusing response cached {:?} ago", stored_at.elapsed());
            Some(response.clone())
        } else {
            None
        }
    }

    /// Store a response, evicting entries that have aged out.
    pub(crate) async fn put(&self, url: &str, response: RawResponse) {
        if self.window.is_zero() {
            return;
        }

        let mut entries = self.entries.write().await;
        // 顺手清理过期条目，避免 map 无限增长
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.window);
        entries.insert(url.to_string(), (Instant::now(), response));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            is_json: true,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn fresh_entry_is_reused() {
        let cache = ResponseCache::new(Duration::from_secs(2));
        cache.put("https://host/info", response("{}")).await;

        let hit = cache.get("https://host/info").await;
        assert!(hit.is_some());
    }

    #[tokio::test]
    async fn stale_entry_is_ignored() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.put("https://host/info", response("{}")).await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(cache.get("https://host/info").await.is_none());
    }

    #[tokio::test]
    async fn zero_window_disables_caching() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put("https://host/info", response("{}")).await;

        assert!(cache.get("https://host/info").await.is_none());
    }

    #[tokio::test]
    async fn urls_are_cached_independently() {
        let cache = ResponseCache::new(Duration::from_secs(2));
        cache.put("https://host/info", response("a")).await;
        cache.put("https://host/links", response("b")).await;

        let info = cache.get("https://host/info").await;
        let links = cache.get("https://host/links").await;
        assert_eq!(info.map(|r| r.body), Some("a".to_string()));
        assert_eq!(links.map(|r| r.body), Some("b".to_string()));
    }

    #[tokio::test]
    async fn stale_entries_are_evicted_on_put() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.put("https://host/info", response("old")).await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.put("https://host/links", response("new")).await;

        let entries = cache.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("https://host/links"));
    }
}
