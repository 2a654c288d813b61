//! Per-offerer replay counters.
//!
//! The counter is folded into every order hash. Bumping it makes every
//! previously signed, unconsumed order from that offerer unmatchable in
//! one operation, because no future hash derivation will reproduce the
//! hash those signatures commit to.

use std::collections::HashMap;

use insmarket_types::Address;
use tracing::info;

/// Injected key→counter storage. Unknown accounts start at 0.
pub trait CounterStore {
    fn get(&self, account: Address) -> u64;
    fn set(&mut self, account: Address, value: u64);
}

/// HashMap-backed counter store.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: HashMap<Address, u64>,
}

impl MemoryCounterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryCounterStore {
    fn get(&self, account: Address) -> u64 {
        self.counters.get(&account).copied().unwrap_or(0)
    }

    fn set(&mut self, account: Address, value: u64) {
        self.counters.insert(account, value);
    }
}

/// Owns the counter mapping and the strictly-increasing bump rule.
pub struct CounterManager<C: CounterStore> {
    store: C,
}

impl<C: CounterStore> CounterManager<C> {
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// The counter generation current orders must be hashed against.
    #[must_use]
    pub fn current(&self, account: Address) -> u64 {
        self.store.get(account)
    }

    /// Advance the account's counter, invalidating all prior unconsumed
    /// signatures. Returns the new value.
    pub fn increment(&mut self, account: Address) -> u64 {
        let next = self.store.get(account) + 1;
        self.store.set(account, next);
        info!(account = ?account, counter = next, "replay counter incremented");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    #[test]
    fn counters_start_at_zero() {
        let mgr = CounterManager::new(MemoryCounterStore::new());
        assert_eq!(mgr.current(account(1)), 0);
    }

    #[test]
    fn increment_is_monotonic() {
        let mut mgr = CounterManager::new(MemoryCounterStore::new());
        assert_eq!(mgr.increment(account(1)), 1);
        assert_eq!(mgr.increment(account(1)), 2);
        assert_eq!(mgr.current(account(1)), 2);
    }

    #[test]
    fn accounts_are_independent() {
        let mut mgr = CounterManager::new(MemoryCounterStore::new());
        mgr.increment(account(1));
        assert_eq!(mgr.current(account(2)), 0);
    }
}
