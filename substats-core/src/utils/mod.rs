//! 工具函数模块

pub mod format;
pub mod links;
pub mod status;
