//! Error types for the InsMarket settlement engine.
//!
//! All errors use the `IM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Time window / parameter errors
//! - 2xx: Order status errors
//! - 3xx: Signature errors
//! - 4xx: Order-type pairing errors
//! - 5xx: Payment / asset errors
//! - 6xx: Administration errors
//! - 9xx: General / internal errors

use ethers_core::types::{Address, U256};
use thiserror::Error;

use crate::{ItemKind, OrderHash};

/// Central error enum for all InsMarket operations.
///
/// Every error aborts the whole call with no partial effect; none are
/// retried internally.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Time window / parameter errors (1xx)
    // =================================================================
    /// The settlement clock is before the order's start time.
    #[error("IM_ERR_100: Order not yet started: now {now}, starts {start}")]
    NotYetStarted { now: u64, start: u64 },

    /// The settlement clock is past the order's end time.
    #[error("IM_ERR_101: Order expired: now {now}, ended {end}")]
    Expired { now: u64, end: u64 },

    /// Auxiliary call parameters are inconsistent with the order.
    #[error("IM_ERR_102: Inconsistent parameters: {reason}")]
    ParamsError { reason: String },

    // =================================================================
    // Order status errors (2xx)
    // =================================================================
    /// The order has already been fulfilled (or fully filled).
    #[error("IM_ERR_200: Order already filled: {0}")]
    AlreadyFilled(OrderHash),

    /// The order has been cancelled.
    #[error("IM_ERR_201: Order cancelled: {0}")]
    Cancelled(OrderHash),

    // =================================================================
    // Signature errors (3xx)
    // =================================================================
    /// The signature is neither 65-byte r‖s‖v nor 64-byte compact.
    #[error("IM_ERR_300: Malformed signature: {len} bytes")]
    MalformedSignature { len: usize },

    /// The recovery parity byte is not one of 0, 1, 27, 28.
    #[error("IM_ERR_301: Bad signature parity value: {v}")]
    BadSignatureParity { v: u8 },

    /// ECDSA recovery produced a different (or null) signer.
    #[error("IM_ERR_302: Recovered signer {recovered:#x} does not match claimed {claimed:#x}")]
    SignerMismatch { claimed: Address, recovered: Address },

    /// The claimed signer has no contract-signer implementation registered.
    #[error("IM_ERR_303: Signer {0:#x} is not a contract signer")]
    SignerNotContract(Address),

    /// The contract-signer callback itself failed.
    #[error("IM_ERR_304: Contract signer call failed: {reason}")]
    ContractSignerCallFailed { reason: String },

    /// The contract-signer callback returned the wrong magic value.
    #[error("IM_ERR_305: Contract signer returned wrong magic value")]
    BadMagicValue,

    // =================================================================
    // Order-type pairing errors (4xx)
    // =================================================================
    /// The offer/consideration kind pairing is not supported.
    #[error("IM_ERR_400: Unsupported order type pairing: offer {offer}, consideration {consideration}")]
    OrderTypeError {
        offer: ItemKind,
        consideration: ItemKind,
    },

    /// Only the offerer may cancel their own orders.
    #[error("IM_ERR_401: Invalid canceller {caller:#x}: order belongs to {offerer:#x}")]
    InvalidCanceller { caller: Address, offerer: Address },

    // =================================================================
    // Payment / asset errors (5xx)
    // =================================================================
    /// The supplied payment is below what the order requires.
    #[error("IM_ERR_500: Insufficient value: need {needed}, supplied {supplied}")]
    InsufficientValue { needed: U256, supplied: U256 },

    /// The caller does not own the inscription being surrendered.
    #[error("IM_ERR_501: Inscription {id} not owned by {caller:#x}")]
    NotInscriptionOwner { caller: Address, id: U256 },

    /// A token balance is below the amount being transferred.
    #[error("IM_ERR_502: Insufficient token balance: need {needed}, have {available}")]
    InsufficientBalance { needed: U256, available: U256 },

    /// An asset backend transfer failed after validation.
    #[error("IM_ERR_503: Asset transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // Administration errors (6xx)
    // =================================================================
    /// Fee rate at/above 100% or null receiver.
    #[error("IM_ERR_600: Invalid fee configuration: {reason}")]
    FeeConfigError { reason: String },

    // =================================================================
    // General / internal (9xx)
    // =================================================================
    /// A state-mutating entry point was re-entered during its own call.
    #[error("IM_ERR_900: Re-entrant call rejected")]
    ReentrantCall,

    /// Unrecoverable internal error.
    #[error("IM_ERR_901: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;
