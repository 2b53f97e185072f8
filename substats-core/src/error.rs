//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use substats_panel::PanelError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Panel error (converting from library)
    #[error("{0}")]
    Panel(#[from] PanelError),
}

impl CoreError {
    /// Whether it is expected behavior (revoked subscription, absent payload, etc.),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Panel(e) => e.is_expected(),
            Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
