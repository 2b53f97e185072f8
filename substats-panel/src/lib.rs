//! # substats-panel
//!
//! A unified subscription-panel abstraction library for reading account
//! status, config links, and usage statistics from proxy panel backends.
//!
//! ## Supported Panels
//!
//! | Panel | Feature Flag | Subscription Path |
//! |-------|-------------|-------------------|
//! | [Marzban](https://github.com/Gozargah/Marzban) | `marzban` | `/sub/{token}` |
//! | [Marzneshin](https://github.com/marzneshin/marzneshin) | `marzneshin` | `/sub/{username}/{key}` |
//!
//! The two backends expose the same three endpoints (`/info`, `/links`,
//! `/usage`) but disagree on field names, timestamp encodings, and usage
//! payload shapes. This crate fetches from either and returns one canonical
//! model ([`AccountSnapshot`], [`UsageSeries`]) regardless of backend.
//!
//! ## Feature Flags
//!
//! ### Panel Selection
//!
//! - **`all-panels`** *(default)* — Enable both panels listed above.
//! - **`marzban`** — Enable only the Marzban panel.
//! - **`marzneshin`** — Enable only the Marzneshin panel.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! substats-panel = { version = "0.1", features = ["all-panels"] }
//! ```
//!
//! Or enable only the panel you need:
//!
//! ```toml
//! [dependencies]
//! substats-panel = { version = "0.1", default-features = false, features = ["marzban", "rustls"] }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use substats_panel::{create_panel, ChartRange, PanelConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a panel client from the subscription URL.
//!     //    The backend kind is auto-detected from the URL path shape.
//!     let panel = create_panel(PanelConfig::new(
//!         "https://panel.example.com/sub/w7kDXu3DkQ",
//!     ))?;
//!
//!     // 2. Fetch the account snapshot
//!     let info = panel.fetch_info().await?;
//!     println!("{}: {} of {} bytes used", info.username, info.used_traffic, info.data_limit);
//!
//!     // 3. Fetch snapshot, links and usage concurrently
//!     let query = ChartRange::Weekly.query_at(chrono::Utc::now());
//!     let fetch = panel.fetch_all(&query).await;
//!     if let Ok(series) = fetch.usage {
//!         println!("used this week: {} bytes", series.window_total());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All panel operations return [`Result<T, PanelError>`](PanelError).
//! The error enum provides structured variants for common failure modes:
//!
//! - [`PanelError::HttpStatus`] — non-success status; 404 usually means the
//!   subscription token was revoked
//! - [`PanelError::RateLimited`] — API rate limit exceeded (retryable)
//! - [`PanelError::NetworkError`] — network connectivity issue (retryable)
//! - [`PanelError::ParseError`] — malformed backend response
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`PanelError`] for the full list.

mod cache;
mod error;
mod factory;
mod http_client;
mod links;
mod panels;
mod traits;
mod types;
mod usage;
mod utils;

// Re-export error types
pub use error::{PanelError, Result};

// Re-export factory functions
pub use factory::{create_panel, detect_kind};

// Re-export core trait and its batch-fetch result (internal traits are not exported)
pub use traits::{PanelFetch, SubscriptionPanel};

// Re-export types
pub use types::{
    AccountSnapshot, ChartQuery, ChartRange, ExpireStrategy, FetchPolicy, Granularity,
    PanelConfig, PanelKind, UsageSample, UsageSeries,
};

// Re-export payload decoders for callers that bring their own transport
pub use links::parse_links;
pub use usage::normalize_usage;

// Re-export utils module
pub use utils::datetime;

// Re-export concrete panels (behind feature flags)
#[cfg(feature = "marzban")]
pub use panels::MarzbanPanel;

#[cfg(feature = "marzneshin")]
pub use panels::MarzneshinPanel;
