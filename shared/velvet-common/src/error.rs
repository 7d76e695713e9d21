//! Common Error Types

use thiserror::Error;

/// Errors raised while constructing shared types from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Privacy level outside the 1..=5 scale.
    #[error("Privacy level must be between 1 and 5, got {0}")]
    InvalidPrivacyLevel(i64),

    /// Unrecognised access level name.
    #[error("Unknown access level: {0}")]
    UnknownAccessLevel(String),
}

/// Result alias for common operations.
pub type Result<T> = std::result::Result<T, Error>;
