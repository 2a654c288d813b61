//! The signed order: an off-chain intent to exchange one asset for another.
//!
//! Orders carry no ledger state. The offerer's replay counter is folded
//! into the order hash at derivation time, not stored on the struct.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Item, ItemKind};

/// A signed exchange intent.
///
/// `offer` is what the offerer gives up; `consideration` is what they
/// demand, delivered to `recipient` (usually the offerer, but any address
/// may be designated). The validity window `[start_time, end_time]` is
/// inclusive on both ends and compared against the settlement clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Account that created and signed the order.
    pub offerer: Address,
    /// The leg given up by the offerer.
    pub offer: Item,
    /// The leg demanded in return.
    pub consideration: Item,
    /// Where the consideration is delivered.
    pub recipient: Address,
    /// First second (UNIX) at which the order is fulfillable, inclusive.
    pub start_time: u64,
    /// Last second (UNIX) at which the order is fulfillable, inclusive.
    pub end_time: u64,
    /// Caller-chosen nonce distinguishing otherwise-identical orders.
    pub salt: U256,
    /// Signature over the typed-data digest of the order hash.
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl Order {
    /// Whether `now` falls inside the inclusive validity window.
    #[must_use]
    pub fn is_live_at(&self, now: u64) -> bool {
        now >= self.start_time && now <= self.end_time
    }

    /// Whether this order is a bulk fungible offer accepted per
    /// inscription via `take_offer` (wildcard fraction consideration).
    #[must_use]
    pub fn is_bulk_offer(&self) -> bool {
        self.offer.kind == ItemKind::Fungible && self.consideration.is_wildcard()
    }
}

/// Hex-string serde for signature bytes, so orders travel as JSON with
/// `"0x..."` signatures rather than byte arrays.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Unsigned order with an open-ended window, for hashing/ledger tests.
    pub fn dummy(offerer: Address, offer: Item, consideration: Item) -> Self {
        Self {
            offerer,
            offer,
            consideration,
            recipient: offerer,
            start_time: 0,
            end_time: u64::MAX,
            salt: U256::from(1u64),
            signature: Vec::new(),
        }
    }
}
