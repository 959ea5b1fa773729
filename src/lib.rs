//! # amm-router
//!
//! Admin-curated constant-product AMM: a registry of token-pair liquidity
//! pools with deposit, withdraw, and swap entry points, layered over an
//! external fungible-token ledger.
//!
//! The crate does not implement a token system. Token balances, transfers,
//! and allowances live behind the [`ledger::TokenLedger`] trait; pools hold
//! their reserves at their own ledger account and the router moves tokens
//! exclusively through ledger allowances. An [`ledger::InMemoryLedger`] is
//! included for tests and embedding.
//!
//! ## Architecture
//!
//! ```text
//! Caller (explicit AccountId)
//!     │
//!     ├── Router (service/)          entry points + call guard
//!     │
//!     ├── PoolRegistry (domain/)     canonical pair → Pool
//!     ├── Pool (domain/)             share ledger + approve-spend
//!     ├── swap / share math (math)   U256 intermediates
//!     │
//!     └── TokenLedger (ledger/)      balances, allowances, transfers
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use amm_router::domain::{AccountId, Amount, TokenId};
//! use amm_router::ledger::{InMemoryLedger, TokenLedger};
//! use amm_router::service::Router;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), amm_router::error::RouterError> {
//! let ledger = Arc::new(InMemoryLedger::new());
//! let admin = AccountId::new();
//! let router = Router::new(Arc::clone(&ledger), admin);
//!
//! let (gold, silver) = (TokenId::new(), TokenId::new());
//! let trader = AccountId::new();
//! ledger.mint(gold, trader, Amount::new(1_000))?;
//! ledger.mint(silver, trader, Amount::new(1_000))?;
//!
//! router.create_pool(admin, gold, silver).await?;
//!
//! // The router moves caller funds through ledger allowances.
//! ledger.approve(gold, trader, router.account(), Amount::new(1_000))?;
//! ledger.approve(silver, trader, router.account(), Amount::new(1_000))?;
//!
//! let shares = router
//!     .add_liquidity(trader, gold, silver, Amount::new(100), Amount::new(400))
//!     .await?;
//! assert_eq!(shares, Amount::new(40_000));
//!
//! let out = router.swap(trader, gold, Amount::new(100), silver).await?;
//! assert_eq!(out, Amount::new(200)); // 400 - (100 * 400) / (100 + 100)
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Identifiers, [`Amount`](domain::Amount), canonical [`TokenPair`](domain::TokenPair), [`Pool`](domain::Pool), [`PoolRegistry`](domain::PoolRegistry) |
//! | [`ledger`] | [`TokenLedger`](ledger::TokenLedger) collaborator contract and the in-memory implementation |
//! | [`math`]  | Constant-product swap quote and share mint/payout formulas |
//! | [`service`] | [`Router`](service::Router) entry points |
//! | [`config`] | [`RouterConfig`](config::RouterConfig) loaded from the environment |
//! | [`error`] | [`RouterError`](error::RouterError) unified error enum |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod service;
