//! The settlement engine.
//!
//! One `Market` instance corresponds to one deployment of the on-chain
//! variant: a signing domain, a fee configuration, a status ledger, a
//! counter mapping, and a re-entrancy guard over the whole mutating
//! surface. Every operation runs as one logical transaction: all
//! preconditions are validated against the vault before the first
//! mutating call, so no partial, irreversible side effect can precede a
//! failing step.

use chrono::{DateTime, Utc};
use insmarket_types::{
    Address, FeeConfig, FillPolicy, Item, ItemKind, MarketError, MarketEvent, Order, OrderHash,
    Result, U256,
};
use insmarket_crypto::{Eip712Domain, SignerRegistry, order_hash, verify_signature};
use tracing::{debug, info};

use crate::assets::AssetVault;
use crate::counters::{CounterManager, CounterStore, MemoryCounterStore};
use crate::guard::ReentrancyGuard;
use crate::ledger::{MemoryStatusStore, StatusLedger, StatusStore};

/// Per-call transaction environment: who calls, how much native currency
/// rides along, and the settlement clock (UNIX seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: U256,
    pub now: u64,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: Address, now: u64) -> Self {
        Self {
            caller,
            value: U256::zero(),
            now,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

/// Outcome of a successful settlement call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub order_hash: OrderHash,
    pub timestamp: DateTime<Utc>,
    /// The party surrendering the inscription leg.
    pub from: Address,
    /// The party receiving the inscription leg.
    pub to: Address,
    /// Monetary amount settled, before the fee split.
    pub price: U256,
    /// Portion of `price` routed to the fee receiver.
    pub fee: U256,
}

/// Supported offer/consideration pairings. Anything else is an
/// [`MarketError::OrderTypeError`]; offering native currency is always
/// rejected because it cannot be escrowed or approved ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pairing {
    /// Offerer sells an inscription for native currency.
    InscriptionForNative,
    /// Offerer sells an inscription for fungible tokens.
    InscriptionForFungible,
    /// Offerer buys an inscription with fungible tokens.
    FungibleForInscription,
}

fn classify(offer: &Item, consideration: &Item) -> Result<Pairing> {
    match (offer.kind, consideration.kind) {
        (ItemKind::Inscription, ItemKind::Native) => Ok(Pairing::InscriptionForNative),
        (ItemKind::Inscription, ItemKind::Fungible) => Ok(Pairing::InscriptionForFungible),
        (ItemKind::Fungible, ItemKind::Inscription) => Ok(Pairing::FungibleForInscription),
        (offer, consideration) => Err(MarketError::OrderTypeError {
            offer,
            consideration,
        }),
    }
}

/// The monetary leg's declared amount. For supported pairings the money is
/// on whichever side is fungible; for unsupported pairings the value is
/// never used because classification rejects the order before transfers.
fn monetary_total(order: &Order) -> U256 {
    if order.offer.kind == ItemKind::Fungible {
        order.offer.amount
    } else {
        order.consideration.amount
    }
}

fn timestamp_of(now: u64) -> DateTime<Utc> {
    i64::try_from(now)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// The order-matching market: settlement, cancellation, counters, fees.
pub struct Market<V, S = MemoryStatusStore, C = MemoryCounterStore>
where
    V: AssetVault,
    S: StatusStore,
    C: CounterStore,
{
    domain: Eip712Domain,
    fees: FeeConfig,
    ledger: StatusLedger<S>,
    counters: CounterManager<C>,
    guard: ReentrancyGuard,
    registry: SignerRegistry,
    vault: V,
    events: Vec<MarketEvent>,
}

impl<V: AssetVault> Market<V> {
    /// Market with in-memory status and counter stores.
    pub fn new(domain: Eip712Domain, fees: FeeConfig, policy: FillPolicy, vault: V) -> Self {
        Self::with_stores(
            domain,
            fees,
            StatusLedger::new(MemoryStatusStore::new(), policy),
            CounterManager::new(MemoryCounterStore::new()),
            vault,
        )
    }
}

impl<V: AssetVault, S: StatusStore, C: CounterStore> Market<V, S, C> {
    /// Market over injected stores.
    pub fn with_stores(
        domain: Eip712Domain,
        fees: FeeConfig,
        ledger: StatusLedger<S>,
        counters: CounterManager<C>,
        vault: V,
    ) -> Self {
        Self {
            domain,
            fees,
            ledger,
            counters,
            guard: ReentrancyGuard::new(),
            registry: SignerRegistry::new(),
            vault,
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[must_use]
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    #[must_use]
    pub fn fees(&self) -> FeeConfig {
        self.fees
    }

    #[must_use]
    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Current replay counter for an offerer.
    #[must_use]
    pub fn counter_of(&self, account: Address) -> u64 {
        self.counters.current(account)
    }

    /// Hash an order at the offerer's current counter generation.
    #[must_use]
    pub fn hash_order(&self, order: &Order) -> OrderHash {
        order_hash(order, self.counters.current(order.offerer))
    }

    /// Cumulative filled amount of an order hash.
    #[must_use]
    pub fn filled_of(&self, hash: OrderHash) -> U256 {
        self.ledger.filled_of(hash)
    }

    /// Register a programmable account for contract-signature validation.
    pub fn register_contract_signer(
        &mut self,
        address: Address,
        signer: Box<dyn insmarket_crypto::ContractSigner>,
    ) {
        self.registry.register(address, signer);
    }

    /// Drain the accumulated event records.
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------

    /// Fulfill a signed order in full.
    ///
    /// Validation order: validity window, ledger status, signature, item
    /// pairing, asset preconditions — only then do assets move, the
    /// consideration leg strictly before the offer leg. Native
    /// overpayment (`ctx.value` above the required amount) is not
    /// refunded; this mirrors the legacy deployment.
    pub fn fulfill_order(&mut self, order: &Order, ctx: &CallContext) -> Result<SettlementReceipt> {
        let _scope = self.guard.enter()?;

        let hash = self.hash_order(order);
        self.check_window(order, ctx.now)?;
        let total = monetary_total(order);
        self.ledger.check_fulfillable(hash, total, total)?;
        let digest = self.domain.digest(hash);
        verify_signature(order.offerer, digest, &order.signature, &self.registry)?;
        let pairing = classify(&order.offer, &order.consideration)?;
        debug!(order = %hash.short(), ?pairing, "order validated");

        let (fee, remainder) = self.fees.split(total);
        let fee_receiver = self.fees.receiver;

        let (from, to) = match pairing {
            Pairing::InscriptionForNative => {
                if ctx.value < total {
                    return Err(MarketError::InsufficientValue {
                        needed: total,
                        supplied: ctx.value,
                    });
                }
                self.require_inscription_owner(&order.offer, order.offerer)?;

                // Consideration leg: route payment before the offer moves.
                self.vault.credit(fee_receiver, fee);
                self.vault.credit(order.recipient, remainder);
                self.vault.transfer_ins_from(
                    order.offer.token,
                    order.offerer,
                    ctx.caller,
                    order.offer.id,
                )?;
                (order.offerer, ctx.caller)
            }
            Pairing::InscriptionForFungible => {
                let token = order.consideration.token;
                let available = self.vault.balance_of(token, ctx.caller);
                if available < total {
                    return Err(MarketError::InsufficientBalance {
                        needed: total,
                        available,
                    });
                }
                self.require_inscription_owner(&order.offer, order.offerer)?;

                self.vault.transfer_from(token, ctx.caller, fee_receiver, fee)?;
                self.vault
                    .transfer_from(token, ctx.caller, order.recipient, remainder)?;
                self.vault.transfer_ins_from(
                    order.offer.token,
                    order.offerer,
                    ctx.caller,
                    order.offer.id,
                )?;
                (order.offerer, ctx.caller)
            }
            Pairing::FungibleForInscription => {
                let token = order.offer.token;
                self.require_inscription_owner(&order.consideration, ctx.caller)?;
                let available = self.vault.balance_of(token, order.offerer);
                if available < total {
                    return Err(MarketError::InsufficientBalance {
                        needed: total,
                        available,
                    });
                }

                // Consideration leg: the inscription reaches the
                // offerer's designated recipient first.
                self.vault.transfer_ins_from(
                    order.consideration.token,
                    ctx.caller,
                    order.recipient,
                    order.consideration.id,
                )?;
                self.vault
                    .transfer_from(token, order.offerer, fee_receiver, fee)?;
                self.vault
                    .transfer_from(token, order.offerer, ctx.caller, remainder)?;
                (ctx.caller, order.recipient)
            }
        };

        self.ledger.record_fill(hash, total);
        let timestamp = timestamp_of(ctx.now);
        self.events.push(MarketEvent::Sold {
            order_hash: hash,
            timestamp,
            from,
            to,
            price: total,
        });
        info!(order = %hash.short(), price = %total, fee = %fee, "order fulfilled");

        Ok(SettlementReceipt {
            order_hash: hash,
            timestamp,
            from,
            to,
            price: total,
            fee,
        })
    }

    /// Accept a bulk fungible offer against individually-owned
    /// inscriptions.
    ///
    /// Each id contributes `sub_balance(id) * rate` to the price and moves
    /// to the offer's designated recipient; the offerer's fungible budget
    /// pays `price - fee` to the caller. All ids settle in one call or
    /// none do.
    pub fn take_offer(
        &mut self,
        order: &Order,
        consideration_token: Address,
        ids: &[U256],
        ctx: &CallContext,
    ) -> Result<SettlementReceipt> {
        let _scope = self.guard.enter()?;

        if !order.is_bulk_offer() {
            return Err(MarketError::OrderTypeError {
                offer: order.offer.kind,
                consideration: order.consideration.kind,
            });
        }
        if consideration_token != order.consideration.token {
            return Err(MarketError::ParamsError {
                reason: format!(
                    "consideration token {consideration_token:#x} does not match order's {:#x}",
                    order.consideration.token
                ),
            });
        }
        if ids.is_empty() {
            return Err(MarketError::ParamsError {
                reason: "no inscription ids supplied".into(),
            });
        }

        let hash = self.hash_order(order);
        self.check_window(order, ctx.now)?;
        let total_budget = order.offer.amount;
        let filled = self.ledger.filled_of(hash);
        self.ledger
            .check_fulfillable(hash, U256::zero(), total_budget)?;
        let digest = self.domain.digest(hash);
        verify_signature(order.offerer, digest, &order.signature, &self.registry)?;

        // Price every id and verify the caller owns each one, before
        // anything moves. A repeated id would pass ownership validation
        // twice and then fail mid-transfer, so duplicates are rejected
        // here.
        let rate = order.consideration.amount;
        let mut price = U256::zero();
        for (idx, &id) in ids.iter().enumerate() {
            if ids[..idx].contains(&id) {
                return Err(MarketError::ParamsError {
                    reason: format!("duplicate inscription id {id}"),
                });
            }
            let owned = self
                .vault
                .owner_of(consideration_token, id)
                .is_some_and(|owner| owner == ctx.caller);
            if !owned {
                return Err(MarketError::NotInscriptionOwner {
                    caller: ctx.caller,
                    id,
                });
            }
            price = self
                .vault
                .balance_of_ins(consideration_token, id)
                .checked_mul(rate)
                .and_then(|value| price.checked_add(value))
                .ok_or_else(|| MarketError::ParamsError {
                    reason: format!("price overflow at inscription id {id}"),
                })?;
        }

        let remaining = total_budget - filled;
        if price > remaining {
            return Err(MarketError::InsufficientValue {
                needed: price,
                supplied: remaining,
            });
        }
        let available = self.vault.balance_of(order.offer.token, order.offerer);
        if available < price {
            return Err(MarketError::InsufficientBalance {
                needed: price,
                available,
            });
        }

        // Consideration leg: all inscriptions reach the recipient first.
        for &id in ids {
            self.vault
                .transfer_ins_from(consideration_token, ctx.caller, order.recipient, id)?;
        }
        let (fee, remainder) = self.fees.split(price);
        self.vault
            .transfer_from(order.offer.token, order.offerer, self.fees.receiver, fee)?;
        self.vault
            .transfer_from(order.offer.token, order.offerer, ctx.caller, remainder)?;

        self.ledger.record_fill(hash, price);
        let timestamp = timestamp_of(ctx.now);
        self.events.push(MarketEvent::Sold {
            order_hash: hash,
            timestamp,
            from: ctx.caller,
            to: order.recipient,
            price,
        });
        info!(
            order = %hash.short(),
            ids = ids.len(),
            price = %price,
            fee = %fee,
            "bulk offer taken"
        );

        Ok(SettlementReceipt {
            order_hash: hash,
            timestamp,
            from: ctx.caller,
            to: order.recipient,
            price,
            fee,
        })
    }

    // -----------------------------------------------------------------
    // Cancellation and invalidation
    // -----------------------------------------------------------------

    /// Cancel a batch of orders. The caller must be the offerer of every
    /// order in the batch; otherwise the whole call aborts untouched.
    pub fn cancel(&mut self, orders: &[Order], ctx: &CallContext) -> Result<Vec<OrderHash>> {
        let _scope = self.guard.enter()?;

        for order in orders {
            if ctx.caller != order.offerer {
                return Err(MarketError::InvalidCanceller {
                    caller: ctx.caller,
                    offerer: order.offerer,
                });
            }
        }

        let mut hashes = Vec::with_capacity(orders.len());
        for order in orders {
            let hash = self.hash_order(order);
            self.ledger.record_cancel(hash, monetary_total(order));
            self.events.push(MarketEvent::OrderCancelled {
                canceller: ctx.caller,
                order_hash: hash,
            });
            info!(order = %hash.short(), "order cancelled");
            hashes.push(hash);
        }
        Ok(hashes)
    }

    /// Advance the caller's replay counter, invalidating every order they
    /// signed against the previous generation. Returns the new counter.
    pub fn increment_counter(&mut self, ctx: &CallContext) -> Result<u64> {
        let _scope = self.guard.enter()?;
        let new_counter = self.counters.increment(ctx.caller);
        self.events.push(MarketEvent::CounterIncremented {
            account: ctx.caller,
            new_counter,
        });
        Ok(new_counter)
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    /// Replace the fee configuration. Owner gating is the embedder's
    /// responsibility; this validates rate and receiver.
    pub fn set_fees(&mut self, receiver: Address, rate_bps: u16) -> Result<()> {
        self.fees = FeeConfig::new(receiver, rate_bps)?;
        self.events.push(MarketEvent::FeesChanged { receiver, rate_bps });
        info!(receiver = ?receiver, rate_bps, "fee configuration changed");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn check_window(&self, order: &Order, now: u64) -> Result<()> {
        if now < order.start_time {
            return Err(MarketError::NotYetStarted {
                now,
                start: order.start_time,
            });
        }
        if now > order.end_time {
            return Err(MarketError::Expired {
                now,
                end: order.end_time,
            });
        }
        Ok(())
    }

    fn require_inscription_owner(&self, item: &Item, expected: Address) -> Result<()> {
        let owned = self
            .vault
            .owner_of(item.token, item.id)
            .is_some_and(|owner| owner == expected);
        if owned {
            Ok(())
        } else {
            Err(MarketError::NotInscriptionOwner {
                caller: expected,
                id: item.id,
            })
        }
    }
}
