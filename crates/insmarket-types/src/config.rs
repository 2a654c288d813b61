//! Fee configuration for the market.

use ethers_core::types::{Address, U256, U512};
use serde::{Deserialize, Serialize};

use crate::{constants::BPS_DENOMINATOR, MarketError, Result};

/// Protocol fee configuration, owner-mutated.
///
/// `rate_bps` is a basis-points cut (out of 10 000, strictly below) of the
/// monetary leg of every trade, routed to `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub receiver: Address,
    pub rate_bps: u16,
}

impl FeeConfig {
    /// Validated constructor.
    ///
    /// # Errors
    /// [`MarketError::FeeConfigError`] if `rate_bps >= 10_000` or the
    /// receiver is the zero address.
    pub fn new(receiver: Address, rate_bps: u16) -> Result<Self> {
        if u64::from(rate_bps) >= BPS_DENOMINATOR {
            return Err(MarketError::FeeConfigError {
                reason: format!("rate {rate_bps} bps is at or above 100%"),
            });
        }
        if receiver == Address::zero() {
            return Err(MarketError::FeeConfigError {
                reason: "fee receiver is the zero address".into(),
            });
        }
        Ok(Self { receiver, rate_bps })
    }

    /// Split a monetary amount into `(fee, remainder)`.
    ///
    /// `fee = amount * rate / 10_000`, integer division truncating toward
    /// zero; `fee + remainder == amount` always holds. The multiply is
    /// widened to 512 bits so amounts near `U256::MAX` cannot overflow.
    #[must_use]
    pub fn split(&self, amount: U256) -> (U256, U256) {
        let wide = amount.full_mul(U256::from(self.rate_bps)) / U512::from(BPS_DENOMINATOR);
        // rate < 10_000 keeps the quotient at or below `amount`; the cap
        // covers rows built without the validated constructor.
        let fee = U256::try_from(wide).unwrap_or(amount).min(amount);
        (fee, amount - fee)
    }
}
