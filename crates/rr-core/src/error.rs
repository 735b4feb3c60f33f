//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where it
//! crosses their boundary.

use thiserror::Error;

/// Errors produced by `rr-core` helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

/// Shorthand result type for `rr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
