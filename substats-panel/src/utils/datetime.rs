//! 日期时间解析/序列化工具
//!
//! 提供自定义 Serde 序列化/反序列化支持：
//! - 序列化: `DateTime`<Utc> -> RFC3339 字符串
//! - 反序列化: RFC3339 字符串 / 无时区 ISO 字符串（按 UTC 处理）/ Unix 时间戳
//!
//! 面板后端返回的时间格式不统一：Marzneshin 返回无时区的 ISO 字符串，
//! Marzban 的 `expire` 为 Unix 秒。这里统一归一化为 `DateTime`<Utc>。

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化：支持 RFC3339 / 无时区 ISO 字符串或 Unix 时间戳（秒/毫秒自动识别）
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
        U64(u64),
    }

    match Option::<OptionalTimestamp>::deserialize(deserializer)? {
        Some(OptionalTimestamp::String(s)) => parse_flexible(&s)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("Invalid datetime string: {s}"))),
        Some(OptionalTimestamp::I64(ts)) => parse_epoch_timestamp(ts)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        Some(OptionalTimestamp::U64(ts)) => {
            let ts = i64::try_from(ts).map_err(|_| Error::custom("Invalid Unix timestamp"))?;
            parse_epoch_timestamp(ts)
                .map(Some)
                .ok_or_else(|| Error::custom("Invalid Unix timestamp"))
        }
        None => Ok(None),
    }
}

/// 解析日期字符串：RFC3339 优先，其次无时区 ISO（按 UTC 处理）
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // 后端常返回 "2024-05-01T12:00:00.123456" 这类裸时间，按 UTC 处理
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// 解析 Unix 时间戳（自动判断秒/毫秒）
pub fn parse_epoch_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // 如果时间戳 > 10^11，认为是毫秒
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        // 否则认为是秒
        DateTime::from_timestamp(ts, 0)
    }
}

/// 格式化为带毫秒的 RFC3339 字符串（`2024-05-15T12:00:00.000Z`），用于 usage 查询参数
#[must_use]
pub fn to_iso_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
