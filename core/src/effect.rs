//! Instructions the coordinator hands to its host.
//!
//! The host executes `Effect::Fetch` however it likes (blocking, async, on a
//! platform networking stack) and reports back with the same `RequestToken`.
//! `Effect::Cancel` tells the host the result is no longer wanted. The
//! coordinator discards a late result whether or not the host acts on it.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::http::HttpRequest;

/// Identifies one dispatched fetch. Tokens only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared cancellation flag for one fetch target.
///
/// Cloned into the `Effect::Fetch` so a host thread can check it before or
/// after the round-trip. Once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    /// Execute `request` and report the outcome with `token`.
    Fetch {
        token: RequestToken,
        request: HttpRequest,
        cancel: CancelHandle,
    },
    /// Abandon the fetch dispatched with `token`.
    Cancel { token: RequestToken },
}

impl Effect {
    pub fn token(&self) -> RequestToken {
        match self {
            Effect::Fetch { token, .. } | Effect::Cancel { token } => *token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_through_clones() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn tokens_order_by_value() {
        assert!(RequestToken::new(1) < RequestToken::new(2));
        assert_eq!(RequestToken::new(7).to_string(), "#7");
    }
}
