//! Subscription panel implementations

/// Shared utilities used by panel implementations.
pub mod common;

#[cfg(feature = "marzban")]
mod marzban;
#[cfg(feature = "marzneshin")]
mod marzneshin;

#[cfg(feature = "marzban")]
pub use marzban::MarzbanPanel;
#[cfg(feature = "marzneshin")]
pub use marzneshin::MarzneshinPanel;
