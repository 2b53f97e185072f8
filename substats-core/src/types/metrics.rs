//! 派生指标类型
//!
//! 所有枚举的 `Display` 输出是稳定的标记词汇（marker），
//! 翻译与呈现由上层负责。

use chrono::{DateTime, Utc};

use crate::utils::format;

/// 剩余流量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingTraffic {
    /// 不限流量（`data_limit == 0`）
    Unlimited,
    /// 已超额（用量超过配额）
    Exhausted,
    /// 剩余字节数
    Bytes(u64),
}

impl RemainingTraffic {
    /// 由用量与配额派生剩余流量
    ///
    /// `data_limit == 0` 一律视为不限流量，与用量无关。
    #[must_use]
    pub fn from_usage(used_traffic: u64, data_limit: u64) -> Self {
        if data_limit == 0 {
            return Self::Unlimited;
        }
        if used_traffic > data_limit {
            return Self::Exhausted;
        }
        Self::Bytes(data_limit - used_traffic)
    }
}

impl std::fmt::Display for RemainingTraffic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlimited => write!(f, "infinity"),
            Self::Exhausted => write!(f, "limited"),
            Self::Bytes(n) => write!(f, "{}", format::format_traffic(*n)),
        }
    }
}

/// 剩余有效期
///
/// 只渲染最大的非零单位，不组合多个单位，也不精确到秒。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingTime {
    /// 永不过期
    Never,
    /// 已过期
    Expired,
    /// 剩余天数
    Days(i64),
    /// 剩余小时数（不足一天）
    Hours(i64),
    /// 剩余分钟数（不足一小时）
    Minutes(i64),
}

impl RemainingTime {
    /// 由过期时间与当前时间派生剩余有效期
    #[must_use]
    pub fn from_expiry(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(expiry) = expires_at else {
            return Self::Never;
        };
        let remaining = expiry.timestamp() - now.timestamp();
        if remaining <= 0 {
            return Self::Expired;
        }
        let days = remaining / 86_400;
        if days > 0 {
            return Self::Days(days);
        }
        let hours = remaining / 3_600;
        if hours > 0 {
            return Self::Hours(hours);
        }
        Self::Minutes(remaining / 60)
    }
}

impl std::fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "infinity"),
            Self::Expired => write!(f, "expired"),
            Self::Days(n) => write!(f, "{n} day"),
            Self::Hours(n) => write!(f, "{n} hour"),
            Self::Minutes(n) => write!(f, "{n} minute"),
        }
    }
}

/// 账户状态标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLabel {
    /// 正常
    Active,
    /// 已停用（超量、过期或被禁用）
    Disabled,
    /// 等待首次连接后开始计时
    OnHold,
    /// 即将到期或用量超过九成
    NearExpiry,
    /// 后端自报的状态字符串，原样透传
    Reported(String),
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Disabled => write!(f, "disabled"),
            Self::OnHold => write!(f, "on_hold"),
            Self::NearExpiry => write!(f, "near_to_expire"),
            Self::Reported(s) => write!(f, "{s}"),
        }
    }
}
