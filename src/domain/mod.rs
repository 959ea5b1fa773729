//! Domain layer: identifiers, amounts, canonical pairs, pools, and the
//! pool registry.
//!
//! Everything here is deliberately ledger-agnostic: a [`Pool`] knows its
//! token pair, its ledger account, and its share ledger, but reserve
//! balances are always read live from the [`crate::ledger::TokenLedger`]
//! by the service layer, never cached on the pool.

pub mod account;
pub mod amount;
pub mod pair;
pub mod pool;
pub mod registry;
pub mod token;

pub use account::AccountId;
pub use amount::Amount;
pub use pair::TokenPair;
pub use pool::{Pool, PoolSummary};
pub use registry::PoolRegistry;
pub use token::TokenId;
