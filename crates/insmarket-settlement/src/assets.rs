//! Asset capability traits and the in-memory vault.
//!
//! The settlement engine never talks to token contracts directly; it is
//! polymorphic over these capabilities. Real deployments adapt their token
//! backends; tests and embedders use [`MemoryVault`].
//!
//! Transfers are direct ownership moves — there is no pre-escrow. The
//! engine validates owners and balances before the first mutating call, so
//! a conforming backend cannot fail mid-settlement.

use std::collections::HashMap;

use insmarket_types::{Address, MarketError, Result, U256};

/// Fungible inscription balance bookkeeping (`transferFrom` semantics).
pub trait FungibleToken {
    fn balance_of(&self, token: Address, account: Address) -> U256;

    /// Move `amount` of `token` from `from` to `to`.
    ///
    /// # Errors
    /// [`MarketError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn transfer_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()>;
}

/// Non-fungible inscription positions, each optionally carrying a fungible
/// sub-balance.
pub trait InscriptionToken {
    /// Current owner of `id`, or `None` if the id does not exist.
    fn owner_of(&self, token: Address, id: U256) -> Option<Address>;

    /// Fungible sub-balance carried by the inscription.
    fn balance_of_ins(&self, token: Address, id: U256) -> U256;

    /// Transfer ownership of `id` from `from` to `to`.
    ///
    /// # Errors
    /// [`MarketError::NotInscriptionOwner`] if `from` does not own `id`.
    fn transfer_ins_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        id: U256,
    ) -> Result<()>;
}

/// Native-currency crediting. Debiting is implicit: the caller's payment
/// arrives as `CallContext::value`, already detached from their balance by
/// the hosting environment.
pub trait NativeLedger {
    fn native_balance(&self, account: Address) -> U256;
    fn credit(&mut self, to: Address, amount: U256);
}

/// The full capability set the engine is generic over.
pub trait AssetVault: FungibleToken + InscriptionToken + NativeLedger {}
impl<T: FungibleToken + InscriptionToken + NativeLedger> AssetVault for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InscriptionRow {
    owner: Address,
    sub_balance: U256,
}

/// HashMap-backed asset universe for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryVault {
    fungible: HashMap<(Address, Address), U256>,
    inscriptions: HashMap<(Address, U256), InscriptionRow>,
    native: HashMap<Address, U256>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fungible balance.
    pub fn mint_fungible(&mut self, token: Address, account: Address, amount: U256) {
        *self.fungible.entry((token, account)).or_default() += amount;
    }

    /// Seed an inscription with owner and fungible sub-balance.
    pub fn mint_inscription(
        &mut self,
        token: Address,
        id: U256,
        owner: Address,
        sub_balance: U256,
    ) {
        self.inscriptions
            .insert((token, id), InscriptionRow { owner, sub_balance });
    }
}

impl FungibleToken for MemoryVault {
    fn balance_of(&self, token: Address, account: Address) -> U256 {
        self.fungible
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let available = self.balance_of(token, from);
        if available < amount {
            return Err(MarketError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        *self.fungible.entry((token, from)).or_default() -= amount;
        *self.fungible.entry((token, to)).or_default() += amount;
        Ok(())
    }
}

impl InscriptionToken for MemoryVault {
    fn owner_of(&self, token: Address, id: U256) -> Option<Address> {
        self.inscriptions.get(&(token, id)).map(|row| row.owner)
    }

    fn balance_of_ins(&self, token: Address, id: U256) -> U256 {
        self.inscriptions
            .get(&(token, id))
            .map(|row| row.sub_balance)
            .unwrap_or_default()
    }

    fn transfer_ins_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        id: U256,
    ) -> Result<()> {
        let row = self
            .inscriptions
            .get_mut(&(token, id))
            .filter(|row| row.owner == from)
            .ok_or(MarketError::NotInscriptionOwner { caller: from, id })?;
        row.owner = to;
        Ok(())
    }
}

impl NativeLedger for MemoryVault {
    fn native_balance(&self, account: Address) -> U256 {
        self.native.get(&account).copied().unwrap_or_default()
    }

    fn credit(&mut self, to: Address, amount: U256) {
        *self.native.entry(to).or_default() += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    #[test]
    fn fungible_transfer() {
        let mut vault = MemoryVault::new();
        let token = addr(1);
        vault.mint_fungible(token, addr(2), U256::from(100u64));
        vault
            .transfer_from(token, addr(2), addr(3), U256::from(40u64))
            .unwrap();
        assert_eq!(vault.balance_of(token, addr(2)), U256::from(60u64));
        assert_eq!(vault.balance_of(token, addr(3)), U256::from(40u64));
    }

    #[test]
    fn fungible_transfer_insufficient() {
        let mut vault = MemoryVault::new();
        let token = addr(1);
        vault.mint_fungible(token, addr(2), U256::from(10u64));
        let err = vault
            .transfer_from(token, addr(2), addr(3), U256::from(40u64))
            .unwrap_err();
        assert!(matches!(err, MarketError::InsufficientBalance { .. }));
        assert_eq!(vault.balance_of(token, addr(2)), U256::from(10u64));
    }

    #[test]
    fn inscription_ownership_transfer() {
        let mut vault = MemoryVault::new();
        let token = addr(1);
        let id = U256::from(5u64);
        vault.mint_inscription(token, id, addr(2), U256::from(1000u64));
        assert_eq!(vault.owner_of(token, id), Some(addr(2)));
        assert_eq!(vault.balance_of_ins(token, id), U256::from(1000u64));

        vault.transfer_ins_from(token, addr(2), addr(3), id).unwrap();
        assert_eq!(vault.owner_of(token, id), Some(addr(3)));
        // Sub-balance travels with the inscription.
        assert_eq!(vault.balance_of_ins(token, id), U256::from(1000u64));
    }

    #[test]
    fn inscription_transfer_by_non_owner() {
        let mut vault = MemoryVault::new();
        let token = addr(1);
        let id = U256::from(5u64);
        vault.mint_inscription(token, id, addr(2), U256::zero());
        let err = vault
            .transfer_ins_from(token, addr(9), addr(3), id)
            .unwrap_err();
        assert!(matches!(err, MarketError::NotInscriptionOwner { .. }));
        assert_eq!(vault.owner_of(token, id), Some(addr(2)));
    }

    #[test]
    fn unknown_inscription_has_no_owner() {
        let vault = MemoryVault::new();
        assert_eq!(vault.owner_of(addr(1), U256::one()), None);
        assert_eq!(vault.balance_of_ins(addr(1), U256::one()), U256::zero());
    }

    #[test]
    fn native_credit_accumulates() {
        let mut vault = MemoryVault::new();
        vault.credit(addr(2), U256::from(50u64));
        vault.credit(addr(2), U256::from(25u64));
        assert_eq!(vault.native_balance(addr(2)), U256::from(75u64));
    }
}
