//! Concurrent pool storage keyed by canonical token pair.
//!
//! [`PoolRegistry`] stores all registered pools in a `HashMap` where each
//! entry is individually protected by a [`tokio::sync::RwLock`]. The map
//! key is the canonical [`TokenPair`], so `(X, Y)` and `(Y, X)` resolve
//! to the same entry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::pool::{Pool, PoolSummary};
use super::{AccountId, TokenPair};
use crate::error::RouterError;

/// Central store for all registered pools.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<Pool>>` for fine-grained per-pool locking. A pair maps to
/// a pool only after explicit creation, and creation is exactly-once:
/// a second insert for the same canonical pair fails.
#[derive(Debug)]
pub struct PoolRegistry {
    pools: RwLock<HashMap<TokenPair, Arc<RwLock<Pool>>>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a new pool for its pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolExists`] if a pool is already
    /// registered for the pool's canonical pair.
    pub async fn insert(&self, pool: Pool) -> Result<AccountId, RouterError> {
        let pair = pool.pair();
        let address = pool.address();
        let mut map = self.pools.write().await;
        if map.contains_key(&pair) {
            return Err(RouterError::PoolExists(pair));
        }
        map.insert(pair, Arc::new(RwLock::new(pool)));
        Ok(address)
    }

    /// Returns a shared reference to the pool behind its per-pool lock.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::PoolNotFound`] if no pool is registered for
    /// the pair.
    pub async fn get(&self, pair: TokenPair) -> Result<Arc<RwLock<Pool>>, RouterError> {
        let map = self.pools.read().await;
        map.get(&pair)
            .cloned()
            .ok_or(RouterError::PoolNotFound(pair))
    }

    /// Returns the ledger address of the pair's pool, if one is
    /// registered.
    pub async fn address_of(&self, pair: TokenPair) -> Option<AccountId> {
        let map = self.pools.read().await;
        match map.get(&pair) {
            Some(entry) => Some(entry.read().await.address()),
            None => None,
        }
    }

    /// Returns summaries of all registered pools.
    pub async fn list(&self) -> Vec<PoolSummary> {
        let map = self.pools.read().await;
        let mut summaries = Vec::with_capacity(map.len());
        for entry_lock in map.values() {
            let pool = entry_lock.read().await;
            summaries.push(PoolSummary::from(&*pool));
        }
        summaries
    }

    /// Returns the number of registered pools.
    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    /// Returns `true` if the registry contains no pools.
    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
