//! # insmarket-crypto
//!
//! Order-hash derivation, the EIP-712 typed-data domain, and two-tier
//! signature verification for InsMarket.
//!
//! ## Canonical hashing
//!
//! Exactly one order encoding exists: the single-item struct hash in
//! [`hash`]. Every signer and every verifier path uses it, so a signature
//! produced off-chain always matches the hash the settlement engine
//! derives.
//!
//! ## Verification tiers
//!
//! 1. secp256k1 recovery over 65-byte r‖s‖v or 64-byte EIP-2098 compact
//!    signatures;
//! 2. contract-signer fallback: the claimed signer is invoked through a
//!    registered [`ContractSigner`] and must return the ERC-1271 magic
//!    acceptance value.

pub mod domain;
pub mod hash;
pub mod verify;

pub use domain::Eip712Domain;
pub use hash::{item_hash, order_hash};
pub use verify::{ContractSigner, SignerRegistry, recover_signer, verify_signature};
