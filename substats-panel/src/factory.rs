//! Panel factory functions and dialect detection.

use std::sync::Arc;

use url::Url;

use crate::error::{PanelError, Result};
use crate::traits::SubscriptionPanel;
use crate::types::{PanelConfig, PanelKind};

#[cfg(feature = "marzban")]
use crate::panels::MarzbanPanel;
#[cfg(feature = "marzneshin")]
use crate::panels::MarzneshinPanel;

/// Detects which panel backend serves the given subscription URL.
///
/// Marzban exposes subscriptions as `/sub/{token}` (two path segments),
/// Marzneshin as `/sub/{username}/{key}` (three). Exactly three non-empty
/// segments therefore selects Marzneshin; anything else is treated as
/// Marzban. The result is decided once per subscription and does not change
/// between requests.
///
/// # Errors
///
/// Returns [`PanelError::ConfigError`] when the URL cannot be parsed.
pub fn detect_kind(subscription_url: &str) -> Result<PanelKind> {
    let parsed = Url::parse(subscription_url).map_err(|e| PanelError::ConfigError {
        panel: "factory".to_string(),
        detail: format!("invalid subscription URL: {e}"),
    })?;

    let segments = parsed
        .path_segments()
        .map_or(0, |s| s.filter(|seg| !seg.is_empty()).count());

    if segments == 3 {
        Ok(PanelKind::Marzneshin)
    } else {
        Ok(PanelKind::Marzban)
    }
}

/// Creates a [`SubscriptionPanel`] instance from the given config.
///
/// When `config.kind` is unset the backend is detected from the URL path
/// shape via [`detect_kind`]. The returned panel is wrapped in
/// `Arc<dyn SubscriptionPanel>` for easy sharing across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use substats_panel::{create_panel, PanelConfig};
///
/// let panel = create_panel(PanelConfig::new(
///     "https://panel.example.com/sub/w7kDXu3DkQ",
/// )).unwrap();
/// assert_eq!(panel.id(), "marzban");
/// ```
///
/// # Errors
///
/// Returns [`PanelError::ConfigError`] when the URL cannot be parsed or the
/// detected panel kind was not compiled in.
pub fn create_panel(config: PanelConfig) -> Result<Arc<dyn SubscriptionPanel>> {
    let kind = match config.kind {
        Some(kind) => kind,
        None => detect_kind(&config.subscription_url)?,
    };

    match kind {
        #[cfg(feature = "marzban")]
        PanelKind::Marzban => Ok(Arc::new(MarzbanPanel::new(config))),
        #[cfg(feature = "marzneshin")]
        PanelKind::Marzneshin => Ok(Arc::new(MarzneshinPanel::new(config))),
        #[allow(unreachable_patterns)]
        other => Err(PanelError::ConfigError {
            panel: other.as_str().to_string(),
            detail: "panel support not compiled in (check crate features)".to_string(),
        }),
    }
}
