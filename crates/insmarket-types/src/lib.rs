//! # insmarket-types
//!
//! Shared types, errors, and configuration for the **InsMarket** settlement
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`OrderHash`]
//! - **Order model**: [`Order`], [`Item`], [`ItemKind`]
//! - **Status model**: [`OrderState`], [`FillPolicy`]
//! - **Fee model**: [`FeeConfig`]
//! - **Event records**: [`MarketEvent`]
//! - **Errors**: [`MarketError`] with `IM_ERR_` prefix codes
//! - **Constants**: protocol-wide magic values and limits

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod ids;
pub mod item;
pub mod order;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use insmarket_types::{Order, Item, ItemKind, MarketError, ...};

pub use config::*;
pub use error::*;
pub use events::*;
pub use ids::*;
pub use item::*;
pub use order::*;
pub use status::*;

// Constants are accessed via `insmarket_types::constants::FOO`
// (not re-exported to avoid name collisions).
