//! Account status derivation.
//!
//! Marzneshin reports individual flags (`enabled`, `expired`,
//! `data_limit_reached`) and the label is derived from them; Marzban reports a
//! status string which passes through verbatim unless the account is close to
//! its limits.

use chrono::{DateTime, Duration, Utc};

use substats_panel::{AccountSnapshot, ExpireStrategy, PanelKind};

use crate::types::StatusLabel;

/// Fraction of the allowance consumed: `used / limit`, or 0 when unlimited.
///
/// May exceed 1.0 on overage; callers clamp for display.
#[must_use]
pub fn usage_ratio(used_traffic: u64, data_limit: u64) -> f64 {
    if data_limit == 0 {
        return 0.0;
    }
    used_traffic as f64 / data_limit as f64
}

/// Usage as a percentage clamped to `[0, 100]` for progress display.
#[must_use]
pub fn usage_percent(used_traffic: u64, data_limit: u64) -> f64 {
    (usage_ratio(used_traffic, data_limit) * 100.0).clamp(0.0, 100.0)
}

/// Whether the account is close to exhausting its allowance or its expiry.
///
/// Fires when more than 90% of a finite allowance is consumed, or when the
/// expiry timestamp has fallen behind a cutoff of `now` minus three days.
/// The cutoff sits behind `now`, not ahead of it: the date arm stays quiet
/// until the account has already been expired for three days.
#[must_use]
pub fn near_expiry(
    used_traffic: u64,
    data_limit: u64,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    let ratio_high =
        used_traffic > 0 && data_limit > 0 && usage_ratio(used_traffic, data_limit) > 0.9;
    let cutoff = now - Duration::days(3);
    ratio_high || expires_at.is_some_and(|expiry| expiry < cutoff)
}

/// Derives the display status label for a snapshot.
#[must_use]
pub fn derive_status(snapshot: &AccountSnapshot, now: DateTime<Utc>) -> StatusLabel {
    let flagged = near_expiry(
        snapshot.used_traffic,
        snapshot.data_limit,
        snapshot.expires_at,
        now,
    );

    match snapshot.panel {
        PanelKind::Marzneshin => {
            // 禁用优先于其余一切标签
            if snapshot.data_limit_reached || snapshot.expired || !snapshot.enabled {
                return StatusLabel::Disabled;
            }
            if snapshot.expire_strategy == ExpireStrategy::StartOnFirstUse
                && snapshot.online_at.is_none()
            {
                return StatusLabel::OnHold;
            }
            if flagged {
                StatusLabel::NearExpiry
            } else {
                StatusLabel::Active
            }
        }
        PanelKind::Marzban => {
            if flagged {
                return StatusLabel::NearExpiry;
            }
            match &snapshot.reported_status {
                Some(status) => StatusLabel::Reported(status.clone()),
                None => StatusLabel::Active,
            }
        }
    }
}
