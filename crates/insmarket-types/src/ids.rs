//! Identifiers used throughout InsMarket.
//!
//! Orders are identified by the keccak256 struct hash of their economic
//! terms plus the offerer's replay counter; accounts are plain Ethereum
//! addresses re-exported from `ethers-core`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use ethers_core::types::{Address, H256, U256};

/// Canonical 32-byte order identifier.
///
/// Derived by the hasher in `insmarket-crypto`; used as the ledger key for
/// replay protection. Two orders differing only in `salt` or `counter`
/// produce different hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderHash(pub [u8; 32]);

impl OrderHash {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Abbreviated hex form for logs.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<H256> for OrderHash {
    fn from(h: H256) -> Self {
        Self(h.0)
    }
}

impl From<OrderHash> for H256 {
    fn from(h: OrderHash) -> Self {
        H256(h.0)
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let h = OrderHash([0xab; 32]);
        let s = format!("{h}");
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + 64);
    }

    #[test]
    fn short_is_four_bytes() {
        let h = OrderHash([0xcd; 32]);
        assert_eq!(h.short(), "cdcdcdcd");
    }

    #[test]
    fn h256_roundtrip() {
        let h = OrderHash([7u8; 32]);
        let as_h256: H256 = h.into();
        assert_eq!(OrderHash::from(as_h256), h);
    }

    #[test]
    fn serde_roundtrip() {
        let h = OrderHash([9u8; 32]);
        let json = serde_json::to_string(&h).unwrap();
        let back: OrderHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
