//! Order status ledger — per-hash replay protection.
//!
//! Rows are created lazily on first reference and never deleted; a hash
//! that was filled or cancelled stays terminal for the life of the market.
//! The ledger enforces the status checks; the amount pre-check against the
//! offer's total is the engine's job.

use insmarket_types::{FillPolicy, MarketError, OrderHash, OrderState, Result, U256};
use std::collections::HashMap;

/// Injected key→status storage, get/set by order hash.
///
/// `get` on an unknown hash yields the zero-valued state, matching the
/// lazy-creation semantics of chain storage.
pub trait StatusStore {
    fn get(&self, hash: OrderHash) -> OrderState;
    fn set(&mut self, hash: OrderHash, state: OrderState);
}

/// HashMap-backed store for embedders and tests.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    rows: HashMap<OrderHash, OrderState>,
}

impl MemoryStatusStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hashes ever referenced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl StatusStore for MemoryStatusStore {
    fn get(&self, hash: OrderHash) -> OrderState {
        self.rows.get(&hash).copied().unwrap_or_default()
    }

    fn set(&mut self, hash: OrderHash, state: OrderState) {
        self.rows.insert(hash, state);
    }
}

/// Policy-aware view over a [`StatusStore`].
pub struct StatusLedger<S: StatusStore> {
    store: S,
    policy: FillPolicy,
}

impl<S: StatusStore> StatusLedger<S> {
    pub fn new(store: S, policy: FillPolicy) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> FillPolicy {
        self.policy
    }

    /// Cumulative filled amount for a hash (partial policy bookkeeping).
    #[must_use]
    pub fn filled_of(&self, hash: OrderHash) -> U256 {
        self.store.get(hash).filled
    }

    /// Reject if the order can no longer absorb `requested` of `total`.
    ///
    /// # Errors
    /// - [`MarketError::Cancelled`] if the hash was cancelled (binary)
    /// - [`MarketError::AlreadyFilled`] if terminal (binary) or if
    ///   `filled + requested > total` (partial)
    pub fn check_fulfillable(
        &self,
        hash: OrderHash,
        requested: U256,
        total: U256,
    ) -> Result<()> {
        let state = self.store.get(hash);
        match self.policy {
            FillPolicy::Binary => {
                if state.cancelled {
                    Err(MarketError::Cancelled(hash))
                } else if state.validated {
                    Err(MarketError::AlreadyFilled(hash))
                } else {
                    Ok(())
                }
            }
            FillPolicy::Partial => {
                if state.filled >= total || state.remaining(total) < requested {
                    Err(MarketError::AlreadyFilled(hash))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Record a fulfillment of `amount`.
    pub fn record_fill(&mut self, hash: OrderHash, amount: U256) {
        let mut state = self.store.get(hash);
        match self.policy {
            FillPolicy::Binary => state.validated = true,
            FillPolicy::Partial => state.filled += amount,
        }
        self.store.set(hash, state);
    }

    /// Mark the hash permanently unfulfillable.
    ///
    /// The partial policy consumes the fill counter instead of carrying a
    /// dedicated flag: `filled` jumps to `total`.
    pub fn record_cancel(&mut self, hash: OrderHash, total: U256) {
        let mut state = self.store.get(hash);
        match self.policy {
            FillPolicy::Binary => state.cancelled = true,
            FillPolicy::Partial => state.filled = total,
        }
        self.store.set(hash, state);
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
