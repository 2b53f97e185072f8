//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use chrono::Utc;
use substats_panel::{
    ChartQuery, ChartRange, PanelConfig, PanelKind, SubscriptionPanel, create_panel,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_subscription {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 最近 24 小时的用量查询窗口
pub fn daily_query() -> ChartQuery {
    ChartRange::Daily.query_at(Utc::now())
}

/// 测试上下文 - 封装 Panel 客户端
pub struct TestContext {
    pub panel: Arc<dyn SubscriptionPanel>,
}

impl TestContext {
    /// 创建 Marzban 测试上下文
    pub fn marzban() -> Option<Self> {
        let url = env::var("MARZBAN_SUB_URL").ok()?;
        let panel = create_panel(PanelConfig::new(url).kind(PanelKind::Marzban)).ok()?;
        Some(Self { panel })
    }

    /// 创建 Marzneshin 测试上下文
    pub fn marzneshin() -> Option<Self> {
        let url = env::var("MARZNESHIN_SUB_URL").ok()?;
        let panel = create_panel(PanelConfig::new(url).kind(PanelKind::Marzneshin)).ok()?;
        Some(Self { panel })
    }
}
