//! Two-tier signature verification.
//!
//! Tier 1 parses the signature as secp256k1 (65-byte r‖s‖v or 64-byte
//! EIP-2098 compact) and recovers the signer via elliptic-curve recovery.
//! If that does not resolve to the claimed signer, and the claimed signer
//! is a registered [`ContractSigner`], tier 2 asks the signer itself
//! whether the signature is valid, ERC-1271 style.
//!
//! Every failure mode maps to a distinct [`MarketError`] variant so
//! off-chain tooling can react specifically.

use std::collections::HashMap;

use ethers_core::types::{Address, H256, Signature};
use insmarket_types::{
    MarketError, Result, U256,
    constants::{CONTRACT_SIGNATURE_MAGIC, SIGNATURE_LEN_COMPACT, SIGNATURE_LEN_RSV},
};
use tracing::debug;

/// A programmable account that validates signatures on its own behalf.
///
/// Mirrors the `isValidSignature(bytes32,bytes)` callback: returns a 4-byte
/// value that must equal the magic acceptance constant, or an error string
/// if the call itself reverts.
///
/// `Send + Sync` so a market holding registered signers can move across
/// threads.
pub trait ContractSigner: Send + Sync {
    fn is_valid_signature(
        &self,
        digest: H256,
        signature: &[u8],
    ) -> std::result::Result<[u8; 4], String>;
}

/// Registry of accounts with executable code.
///
/// An address absent from the registry has no code and cannot be a
/// contract signer.
#[derive(Default)]
pub struct SignerRegistry {
    signers: HashMap<Address, Box<dyn ContractSigner>>,
}

impl SignerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, address: Address, signer: Box<dyn ContractSigner>) {
        self.signers.insert(address, signer);
    }

    /// Whether `address` has executable code.
    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.signers.contains_key(&address)
    }

    fn get(&self, address: Address) -> Option<&dyn ContractSigner> {
        self.signers.get(&address).map(AsRef::as_ref)
    }
}

/// Recover the signer of `digest` from a 65- or 64-byte signature.
///
/// # Errors
/// - [`MarketError::MalformedSignature`] for any other length
/// - [`MarketError::BadSignatureParity`] for a parity byte outside
///   `{0, 1, 27, 28}`
/// - [`MarketError::SignerMismatch`] (with a zero recovered address) when
///   the curve math rejects the signature outright
pub fn recover_signer(digest: H256, signature: &[u8]) -> Result<Address> {
    let parsed = parse_signature(signature)?;
    parsed
        .recover(digest)
        .map_err(|_| MarketError::SignerMismatch {
            claimed: Address::zero(),
            recovered: Address::zero(),
        })
}

/// Verify that `claimed` authorized `digest`.
///
/// Tier 1 (recovery) succeeds when the recovered address is non-zero and
/// equals `claimed`. On any tier-1 failure the claimed signer's contract
/// implementation is consulted; for a plain key account (no code) the
/// tier-1 error is returned unchanged.
pub fn verify_signature(
    claimed: Address,
    digest: H256,
    signature: &[u8],
    registry: &SignerRegistry,
) -> Result<()> {
    let tier1_err = match recover_signer(digest, signature) {
        Ok(recovered) if recovered == claimed && recovered != Address::zero() => return Ok(()),
        Ok(recovered) => MarketError::SignerMismatch { claimed, recovered },
        Err(MarketError::SignerMismatch { recovered, .. }) => {
            MarketError::SignerMismatch { claimed, recovered }
        }
        Err(err) => err,
    };

    if !registry.has_code(claimed) {
        return Err(tier1_err);
    }
    debug!(signer = ?claimed, "ecdsa recovery failed, trying contract signer");
    verify_contract_signature(claimed, digest, signature, registry)
}

/// Tier 2 only: delegated validation by the claimed signer's code.
///
/// # Errors
/// - [`MarketError::SignerNotContract`] if `claimed` has no code
/// - [`MarketError::ContractSignerCallFailed`] if the callback reverts
/// - [`MarketError::BadMagicValue`] if it returns anything but the magic
///   acceptance value
pub fn verify_contract_signature(
    claimed: Address,
    digest: H256,
    signature: &[u8],
    registry: &SignerRegistry,
) -> Result<()> {
    let signer = registry
        .get(claimed)
        .ok_or(MarketError::SignerNotContract(claimed))?;
    let magic = signer
        .is_valid_signature(digest, signature)
        .map_err(|reason| MarketError::ContractSignerCallFailed { reason })?;
    if magic == CONTRACT_SIGNATURE_MAGIC {
        Ok(())
    } else {
        Err(MarketError::BadMagicValue)
    }
}

/// Parse r‖s‖v (65 bytes) or EIP-2098 r‖vs (64 bytes) into a signature.
fn parse_signature(signature: &[u8]) -> Result<Signature> {
    match signature.len() {
        SIGNATURE_LEN_RSV => {
            let v = signature[64];
            if !matches!(v, 0 | 1 | 27 | 28) {
                return Err(MarketError::BadSignatureParity { v });
            }
            Ok(Signature {
                r: U256::from_big_endian(&signature[0..32]),
                s: U256::from_big_endian(&signature[32..64]),
                v: u64::from(v),
            })
        }
        SIGNATURE_LEN_COMPACT => {
            // EIP-2098: the parity bit rides the top bit of s.
            let mut vs = [0u8; 32];
            vs.copy_from_slice(&signature[32..64]);
            let parity = vs[0] >> 7;
            vs[0] &= 0x7f;
            Ok(Signature {
                r: U256::from_big_endian(&signature[0..32]),
                s: U256::from_big_endian(&vs),
                v: u64::from(27 + parity),
            })
        }
        len => Err(MarketError::MalformedSignature { len }),
    }
}
