//! Error types for the posts core.
//!
//! # Design
//! Every fetch failure is the same kind of event for the view ("fetch
//! failed"), but the reason is kept so callers and logs can tell a bad status
//! from a malformed body or a transport problem. Navigation misuse is a
//! separate type because it is a caller error, not a fetch outcome.

use thiserror::Error;

/// Why a collection or detail fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors returned by `ViewCoordinator::back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("back navigation is disabled")]
    BackNavigationDisabled,

    #[error("already showing the list")]
    AlreadyAtList,
}
