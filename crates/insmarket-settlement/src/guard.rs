//! Re-entrancy guard for the settlement surface.
//!
//! One in-flight call per market instance, across every state-mutating
//! entry point — not per order. The acquisition is scoped: dropping the
//! scope releases the guard on every exit path, error paths included.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use insmarket_types::{MarketError, Result};

/// Mutual-exclusion flag guarding the whole settlement surface.
///
/// Atomic so a market can move across threads; acquisition still fails
/// fast rather than blocking.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: Arc<AtomicBool>,
}

impl ReentrancyGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard for the duration of the returned scope.
    ///
    /// # Errors
    /// [`MarketError::ReentrantCall`] if a scope is already live.
    pub fn enter(&self) -> Result<GuardScope> {
        if self.entered.swap(true, Ordering::Acquire) {
            return Err(MarketError::ReentrantCall);
        }
        Ok(GuardScope {
            entered: Arc::clone(&self.entered),
        })
    }

    /// Whether a settlement call is currently in flight.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered.load(Ordering::Acquire)
    }
}

/// RAII scope; releases the guard on drop.
#[derive(Debug)]
pub struct GuardScope {
    entered: Arc<AtomicBool>,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.entered.store(false, Ordering::Release);
    }
}
