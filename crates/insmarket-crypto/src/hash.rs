//! Canonical order-hash derivation.
//!
//! The hash is a pure function of the order's economic fields plus the
//! offerer's replay counter. Orders differing only in `salt` or `counter`
//! hash differently, which is what makes salts and counter bumps effective
//! replay protection.

use std::sync::LazyLock;

use ethers_core::abi::{Token, encode};
use ethers_core::types::H256;
use ethers_core::utils::keccak256;
use insmarket_types::{Item, Order, OrderHash, U256};

/// Canonical type string for one order leg.
pub const ITEM_TYPE: &str = "Item(uint8 kind,address token,uint256 id,uint256 amount)";

/// Canonical type string for the order struct. Per EIP-712, referenced
/// struct types are appended alphabetically.
pub const ORDER_TYPE: &str = "InscriptionOrder(address offerer,Item offer,Item consideration,\
     address recipient,uint256 startTime,uint256 endTime,uint256 salt,uint256 counter)\
     Item(uint8 kind,address token,uint256 id,uint256 amount)";

static ITEM_TYPEHASH: LazyLock<[u8; 32]> = LazyLock::new(|| keccak256(ITEM_TYPE.as_bytes()));
static ORDER_TYPEHASH: LazyLock<[u8; 32]> = LazyLock::new(|| keccak256(ORDER_TYPE.as_bytes()));

/// Struct hash of a single order leg.
#[must_use]
pub fn item_hash(item: &Item) -> H256 {
    let encoded = encode(&[
        Token::FixedBytes(ITEM_TYPEHASH.to_vec()),
        Token::Uint(U256::from(item.kind.discriminant())),
        Token::Address(item.token),
        Token::Uint(item.id),
        Token::Uint(item.amount),
    ]);
    H256(keccak256(encoded))
}

/// Canonical order hash at a given counter generation.
///
/// This is the ledger key and the value bound into the signing digest by
/// [`crate::Eip712Domain::digest`]. The signature bytes on the order are
/// deliberately not part of the hash.
#[must_use]
pub fn order_hash(order: &Order, counter: u64) -> OrderHash {
    let encoded = encode(&[
        Token::FixedBytes(ORDER_TYPEHASH.to_vec()),
        Token::Address(order.offerer),
        Token::FixedBytes(item_hash(&order.offer).0.to_vec()),
        Token::FixedBytes(item_hash(&order.consideration).0.to_vec()),
        Token::Address(order.recipient),
        Token::Uint(U256::from(order.start_time)),
        Token::Uint(U256::from(order.end_time)),
        Token::Uint(order.salt),
        Token::Uint(U256::from(counter)),
    ]);
    OrderHash(keccak256(encoded))
}
