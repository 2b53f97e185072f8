//! Utility modules.

/// Date/time parsing and serialization helpers shared by panels.
pub mod datetime;
