//! # insmarket-settlement
//!
//! The settlement surface of InsMarket: given a verified, unexpired,
//! unfilled signed order, execute the bilateral asset swap, extract the
//! protocol fee, and update the replay-protection ledger — all within one
//! logical transaction.
//!
//! ## Pieces
//!
//! - [`StatusLedger`]: per-order-hash fill/cancel tracking over an
//!   injected [`StatusStore`], with binary and partial-fill policies
//! - [`CounterManager`]: per-offerer replay counters for bulk
//!   invalidation
//! - [`ReentrancyGuard`]: scoped mutual exclusion across the whole
//!   settlement surface
//! - [`assets`]: capability traits for the external token contracts plus
//!   the in-memory [`MemoryVault`] backend
//! - [`Market`]: the engine tying it together

pub mod assets;
pub mod counters;
pub mod engine;
pub mod guard;
pub mod ledger;

pub use assets::{AssetVault, FungibleToken, InscriptionToken, MemoryVault, NativeLedger};
pub use counters::{CounterManager, CounterStore, MemoryCounterStore};
pub use engine::{CallContext, Market, SettlementReceipt};
pub use guard::ReentrancyGuard;
pub use ledger::{MemoryStatusStore, StatusLedger, StatusStore};
