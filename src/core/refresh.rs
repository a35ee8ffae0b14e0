//! Generation tokens for discarding superseded refreshes.
//!
//! Overlapping report requests are never cancelled; instead each request
//! takes a token when it starts and may only commit its result while that
//! token is still the newest one. A slow early request that finishes after
//! a later one finds its token stale and drops its result.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

#[derive(Debug, Default)]
pub struct RefreshTracker {
    current: AtomicU64,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new refresh generation, superseding all earlier tokens.
    pub fn begin(&self) -> RefreshToken {
        RefreshToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RefreshToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
