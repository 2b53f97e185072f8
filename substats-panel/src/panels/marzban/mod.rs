//! Marzban 订阅面板

mod http;
mod panel;
mod types;

use reqwest::Client;

use crate::cache::ResponseCache;
use crate::panels::common::{create_http_client, normalize_base_url};
use crate::types::PanelConfig;

pub(crate) use types::{MarzbanUser, usage_path};

/// Marzban subscription panel client.
///
/// Talks to the token-scoped subscription endpoints of a Marzban
/// deployment: `{subscription_url}/info`, `/links` and `/usage`.
///
/// # Construction
///
/// ```rust,no_run
/// use substats_panel::{MarzbanPanel, PanelConfig};
///
/// let panel = MarzbanPanel::new(PanelConfig::new(
///     "https://panel.example.com/sub/w7kDXu3DkQ",
/// ));
/// ```
pub struct MarzbanPanel {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) cache: ResponseCache,
}

impl MarzbanPanel {
    /// Creates a new Marzban panel client for one subscription.
    pub fn new(config: PanelConfig) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(&config.subscription_url),
            max_retries: config.policy.max_retries,
            cache: ResponseCache::new(config.policy.dedupe_window()),
        }
    }
}
