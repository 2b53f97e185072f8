//! Marzneshin 订阅面板

mod http;
mod panel;
mod types;

use reqwest::Client;

use crate::cache::ResponseCache;
use crate::panels::common::{create_http_client, normalize_base_url};
use crate::types::PanelConfig;

pub(crate) use types::{MarzneshinUser, UsageEnvelope, usage_path};

/// Marzneshin subscription panel client.
///
/// Talks to the user-scoped subscription endpoints of a Marzneshin
/// deployment: `{subscription_url}/info`, `/links` and `/usage`. Unlike
/// Marzban, the usage endpoint wraps its payload in an envelope carrying a
/// pre-aggregated total.
///
/// # Construction
///
/// ```rust,no_run
/// use substats_panel::{MarzneshinPanel, PanelConfig};
///
/// let panel = MarzneshinPanel::new(PanelConfig::new(
///     "https://panel.example.com/sub/alice/w7kDXu3DkQ",
/// ));
/// ```
pub struct MarzneshinPanel {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) cache: ResponseCache,
}

impl MarzneshinPanel {
    /// Creates a new Marzneshin panel client for one subscription.
    pub fn new(config: PanelConfig) -> Self {
        Self {
            client: create_http_client(),
            base_url: normalize_base_url(&config.subscription_url),
            max_retries: config.policy.max_retries,
            cache: ResponseCache::new(config.policy.dedupe_window()),
        }
    }
}
