//! Observable settlement records.
//!
//! The chain variant of this system emits logs; here the engine appends
//! records to an in-process event sink drained by the embedder.

use chrono::{DateTime, Utc};
use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::OrderHash;

/// A record emitted by a state-mutating market operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// An order (or part of one) settled.
    Sold {
        order_hash: OrderHash,
        timestamp: DateTime<Utc>,
        /// The party surrendering the inscription leg.
        from: Address,
        /// The party receiving the inscription leg.
        to: Address,
        /// Monetary amount settled, before the fee split.
        price: U256,
    },
    /// An order was cancelled by its offerer.
    OrderCancelled {
        canceller: Address,
        order_hash: OrderHash,
    },
    /// The fee configuration changed.
    FeesChanged { receiver: Address, rate_bps: u16 },
    /// An offerer's replay counter advanced, invalidating all prior
    /// unconsumed signatures.
    CounterIncremented { account: Address, new_counter: u64 },
}

impl MarketEvent {
    /// Short tag for log lines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sold { .. } => "SOLD",
            Self::OrderCancelled { .. } => "ORDER_CANCELLED",
            Self::FeesChanged { .. } => "FEES_CHANGED",
            Self::CounterIncremented { .. } => "COUNTER_INCREMENTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags() {
        let ev = MarketEvent::FeesChanged {
            receiver: Address::from_low_u64_be(1),
            rate_bps: 250,
        };
        assert_eq!(ev.kind(), "FEES_CHANGED");
    }

    #[test]
    fn serde_roundtrip() {
        let ev = MarketEvent::CounterIncremented {
            account: Address::from_low_u64_be(2),
            new_counter: 3,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
