//! Protocol-wide constants.

use ethers_core::types::U256;

/// Basis-points denominator for fee math: a `rate_bps` of 250 is 2.5%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// ERC-1271 magic acceptance value, `bytes4(keccak256("isValidSignature(bytes32,bytes)"))`.
pub const CONTRACT_SIGNATURE_MAGIC: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];

/// Length of a pre-normalized r‖s‖v signature.
pub const SIGNATURE_LEN_RSV: usize = 65;

/// Length of an EIP-2098 compact r‖vs signature.
pub const SIGNATURE_LEN_COMPACT: usize = 64;

/// Wildcard inscription id used by bulk fungible offers: the consideration
/// matches any id of the named token, priced per unit of sub-balance.
pub const WILDCARD_ID: U256 = U256::MAX;

/// EIP-191 typed-data prefix bytes (`\x19\x01`).
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];
