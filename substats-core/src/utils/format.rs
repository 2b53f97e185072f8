//! Display formatting helpers.
//!
//! Byte counts scale through base-1024 units; timestamps render relative to
//! the caller-supplied `now` so the output is deterministic and testable.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count through base-1024 units up to TB.
///
/// The byte-level unit renders with no decimals, every larger unit with two:
/// `0` -> `"0 B"`, `1536` -> `"1.50 KB"`.
#[must_use]
pub fn format_traffic(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Formats a last-seen timestamp relative to `now`, in UTC.
///
/// Same calendar day -> `"HH:mm"`; same calendar week (weeks start Sunday) ->
/// `"Weekday HH:mm"`; anything older -> `"MM dd HH:mm"`. Absent input renders
/// the unbounded marker `∞`.
#[must_use]
pub fn format_online_at(online_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = online_at else {
        return "∞".to_string();
    };
    if ts.date_naive() == now.date_naive() {
        return ts.format("%H:%M").to_string();
    }
    if week_start(ts.date_naive()) == week_start(now.date_naive()) {
        return ts.format("%A %H:%M").to_string();
    }
    ts.format("%m %d %H:%M").to_string()
}

/// 所在周的周日日期（一周从周日开始）
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date - chrono::Duration::days(i64::from(offset))
}
