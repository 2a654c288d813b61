//! Order legs: the asset classes an order can give up or demand.

use ethers_core::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::constants::WILDCARD_ID;

/// Discriminant of the asset class an [`Item`] refers to.
///
/// Discriminant values are stable and part of the order hash encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum ItemKind {
    /// Native chain currency. `token` must be the zero address.
    Native = 0,
    /// Fungible inscription balance, denominated in `amount`.
    Fungible = 1,
    /// A whole non-fungible inscription position, identified by `id`.
    Inscription = 2,
    /// An inscription carrying a fungible sub-balance: `id` + `amount`.
    /// With [`WILDCARD_ID`] this matches any id of the token, priced
    /// per unit of sub-balance.
    InscriptionFraction = 3,
}

impl ItemKind {
    #[must_use]
    pub fn discriminant(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "NATIVE"),
            Self::Fungible => write!(f, "FUNGIBLE"),
            Self::Inscription => write!(f, "INSCRIPTION"),
            Self::InscriptionFraction => write!(f, "INSCRIPTION_FRACTION"),
        }
    }
}

/// One leg of an order: a tagged asset reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Token contract; zero address for [`ItemKind::Native`].
    pub token: Address,
    /// Inscription id; zero for native/fungible legs.
    pub id: U256,
    /// Amount for native/fungible legs; sub-balance rate for wildcard
    /// fraction legs; unused (zero) for whole-inscription legs.
    pub amount: U256,
}

impl Item {
    #[must_use]
    pub fn native(amount: U256) -> Self {
        Self {
            kind: ItemKind::Native,
            token: Address::zero(),
            id: U256::zero(),
            amount,
        }
    }

    #[must_use]
    pub fn fungible(token: Address, amount: U256) -> Self {
        Self {
            kind: ItemKind::Fungible,
            token,
            id: U256::zero(),
            amount,
        }
    }

    #[must_use]
    pub fn inscription(token: Address, id: U256) -> Self {
        Self {
            kind: ItemKind::Inscription,
            token,
            id,
            amount: U256::zero(),
        }
    }

    /// Wildcard fraction leg: any inscription of `token`, priced at `rate`
    /// per unit of its fungible sub-balance.
    #[must_use]
    pub fn any_fraction(token: Address, rate: U256) -> Self {
        Self {
            kind: ItemKind::InscriptionFraction,
            token,
            id: WILDCARD_ID,
            amount: rate,
        }
    }

    /// Whether this leg matches any inscription id of its token.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.kind == ItemKind::InscriptionFraction && self.id == WILDCARD_ID
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({:#x}, id={}, amount={})",
            self.kind, self.token, self.id, self.amount
        )
    }
}
