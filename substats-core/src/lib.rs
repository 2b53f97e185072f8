//! Subscription Status Core Library
//!
//! Provides core derivation logic for subscription dashboards, including:
//! - Status label derivation (Status rules)
//! - Remaining traffic / remaining time metrics
//! - Display formatting (traffic sizes, online-at timestamps, config names)
//! - Dashboard assembly (Dashboard Service)
//!
//! This library is designed to be platform-independent: it consumes the panel
//! abstraction from `substats-panel` and produces plain serializable views,
//! leaving rendering and localization to the embedding application.

pub mod error;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::DashboardService;
pub use types::{ConfigLink, DashboardView, RemainingTime, RemainingTraffic, StatusLabel};
