//! 业务逻辑服务层

mod dashboard_service;

pub use dashboard_service::DashboardService;
