//! Per-order ledger state and the two fill policies.
//!
//! One [`OrderState`] row backs both policy variants: the binary policy
//! reads `validated`/`cancelled`, the partial policy reads `filled`.
//! Rows are created lazily (zero-valued) on first reference and are never
//! deleted — they are permanent replay-protection state.

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// How the ledger tracks consumption of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillPolicy {
    /// One-shot: an order is fulfillable exactly once; fulfillment or
    /// cancellation is permanently terminal.
    Binary,
    /// Counter-based: fulfillable incrementally up to the offer's total
    /// amount; cancellation sets `filled = total`.
    Partial,
}

impl std::fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "BINARY"),
            Self::Partial => write!(f, "PARTIAL"),
        }
    }
}

/// Ledger row keyed by order hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    /// Binary policy: the order has been fulfilled.
    pub validated: bool,
    /// Binary policy: the order has been cancelled.
    pub cancelled: bool,
    /// Partial policy: cumulative filled amount, monotonically
    /// non-decreasing, never exceeding the offer's total.
    pub filled: U256,
}

impl OrderState {
    /// Fresh zero-valued row (the implicit state of any unreferenced hash).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the row is terminal under the binary policy.
    #[must_use]
    pub fn is_terminal_binary(&self) -> bool {
        self.validated || self.cancelled
    }

    /// Remaining fillable amount under the partial policy.
    #[must_use]
    pub fn remaining(&self, total: U256) -> U256 {
        total.saturating_sub(self.filled)
    }
}
