//! EIP-712 typed-data domain.
//!
//! Binds every order hash to this deployment's identity so signatures
//! cannot be replayed across chains, contract instances, or protocol
//! versions.

use std::sync::LazyLock;

use ethers_core::abi::{Token, encode};
use ethers_core::types::{Address, H256};
use ethers_core::utils::keccak256;
use insmarket_types::{OrderHash, U256, constants::TYPED_DATA_PREFIX};

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

static DOMAIN_TYPEHASH: LazyLock<[u8; 32]> = LazyLock::new(|| keccak256(DOMAIN_TYPE.as_bytes()));

/// The signing domain for a market deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Domain with the protocol's canonical name and version.
    #[must_use]
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: "InsMarket".to_string(),
            version: "1.0".to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// `keccak256(typeHash ‖ keccak(name) ‖ keccak(version) ‖ chainId ‖ contract)`.
    #[must_use]
    pub fn separator(&self) -> H256 {
        let encoded = encode(&[
            Token::FixedBytes(DOMAIN_TYPEHASH.to_vec()),
            Token::FixedBytes(keccak256(self.name.as_bytes()).to_vec()),
            Token::FixedBytes(keccak256(self.version.as_bytes()).to_vec()),
            Token::Uint(U256::from(self.chain_id)),
            Token::Address(self.verifying_contract),
        ]);
        H256(keccak256(encoded))
    }

    /// Signing digest: `keccak256(0x1901 ‖ separator ‖ orderHash)`.
    ///
    /// This is the message the offerer actually signs.
    #[must_use]
    pub fn digest(&self, order_hash: OrderHash) -> H256 {
        let mut data = Vec::with_capacity(66);
        data.extend_from_slice(&TYPED_DATA_PREFIX);
        data.extend_from_slice(self.separator().as_bytes());
        data.extend_from_slice(order_hash.as_bytes());
        H256(keccak256(data))
    }
}
