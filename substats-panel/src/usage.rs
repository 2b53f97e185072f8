//! Usage payload normalization.
//!
//! Backends deliver usage statistics in two incompatible shapes:
//!
//! - an ordered sequence of `[timestamp, bytes]` pairs, timestamps as
//!   strings or numbers of Unix seconds. Marzban serves this shape bare;
//!   Marzneshin wraps it in an envelope with a pre-aggregated total.
//! - a nested `{"stats": {"<key>": [{"total_traffic": n, "period_start":
//!   "<ISO>"}, ...]}}` object served by some deployments.
//!
//! [`normalize_usage`] folds both into [`UsageSeries`]. Malformed input never
//! produces an error: unrecognized payloads normalize to an empty series and
//! individual records with unusable timestamps are dropped.

use serde_json::Value;

use crate::types::{UsageSample, UsageSeries};
use crate::utils::datetime;

/// Normalize a usage payload of either dialect into a [`UsageSeries`].
///
/// A sequence payload keeps its order and carries no backend total (the
/// caller aggregates the window). A `stats` object payload maps the records
/// of its first key and totals `total_traffic` across them, `Some(0)` when
/// there are no usable records.
#[must_use]
pub fn normalize_usage(payload: &Value) -> UsageSeries {
    match payload {
        Value::Array(pairs) => UsageSeries {
            samples: pairs.iter().filter_map(pair_to_sample).collect(),
            total: None,
        },
        Value::Object(_) => normalize_stats(payload),
        _ => UsageSeries::default(),
    }
}

/// `stats` 形状：取第一个 key 的记录列表
fn normalize_stats(payload: &Value) -> UsageSeries {
    let records = payload
        .get("stats")
        .and_then(Value::as_object)
        .and_then(|stats| stats.values().next())
        .and_then(Value::as_array);

    let Some(records) = records else {
        return UsageSeries {
            samples: Vec::new(),
            total: Some(0),
        };
    };

    let mut samples = Vec::with_capacity(records.len());
    let mut total: u64 = 0;
    for record in records {
        let bytes = record.get("total_traffic").map_or(0, value_as_bytes);
        // 总量按所有记录累计，period_start 不可解析的记录只从采样中剔除
        total = total.saturating_add(bytes);
        if let Some(timestamp) = record.get("period_start").and_then(parse_period_start) {
            samples.push(UsageSample { timestamp, bytes });
        }
    }

    UsageSeries {
        samples,
        total: Some(total),
    }
}

/// 一个 `[timestamp, bytes]` 对 -> 采样点；时间戳不可解析时丢弃
fn pair_to_sample(pair: &Value) -> Option<UsageSample> {
    let items = pair.as_array()?;
    let timestamp = parse_timestamp_value(items.first()?)?;
    let bytes = items.get(1).map_or(0, value_as_bytes);
    Some(UsageSample { timestamp, bytes })
}

/// 时间戳既可能是数字也可能是数字字符串
fn parse_timestamp_value(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => {
            let parsed: f64 = s.trim().parse().ok()?;
            if parsed.is_nan() {
                None
            } else {
                Some(parsed as i64)
            }
        }
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// `period_start` -> Unix 秒；支持 ISO 字符串或数字时间戳
fn parse_period_start(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => datetime::parse_flexible(s).map(|dt| dt.timestamp()),
        Value::Number(n) => n
            .as_i64()
            .and_then(datetime::parse_epoch_timestamp)
            .map(|dt| dt.timestamp()),
        _ => None,
    }
}

/// 字节数值容错转换：负数/非数值归零
fn value_as_bytes(value: &Value) -> u64 {
    if let Some(u) = value.as_u64() {
        u
    } else if let Some(f) = value.as_f64() {
        if f.is_finite() && f > 0.0 {
            f as u64
        } else {
            0
        }
    } else {
        0
    }
}
