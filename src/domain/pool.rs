//! Pool: a token pair, its ledger account, and its share-token ledger.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountId, Amount, TokenId, TokenPair};
use crate::error::RouterError;
use crate::ledger::TokenLedger;

/// A liquidity pool for one canonical token pair.
///
/// The pool's two token identifiers are immutable after creation. Reserve
/// balances are **not** stored here: they live on the ledger at the
/// pool's [`AccountId`] and are read live by the service layer. What the
/// pool does own is the share-token ledger (per-account share balances
/// plus the total share supply) and the authority to approve ledger
/// spends of its own reserves.
///
/// Share supply only changes through [`mint`](Pool::mint) and
/// [`burn`](Pool::burn), which are crate-internal: only the controlling
/// router may call them.
#[derive(Debug)]
pub struct Pool {
    address: AccountId,
    pair: TokenPair,
    shares: HashMap<AccountId, Amount>,
    total_shares: Amount,

    /// Creation timestamp (immutable after creation).
    created_at: DateTime<Utc>,
    /// Timestamp of the last state mutation.
    last_modified_at: DateTime<Utc>,
    /// Number of swaps executed on this pool.
    swap_count: u64,
}

impl Pool {
    /// Creates an empty pool for the given pair with a fresh ledger
    /// account.
    #[must_use]
    pub fn new(pair: TokenPair) -> Self {
        let now = Utc::now();
        Self {
            address: AccountId::new(),
            pair,
            shares: HashMap::new(),
            total_shares: Amount::ZERO,
            created_at: now,
            last_modified_at: now,
            swap_count: 0,
        }
    }

    /// Returns the pool's ledger account address.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.address
    }

    /// Returns the pool's canonical token pair.
    #[must_use]
    pub const fn pair(&self) -> TokenPair {
        self.pair
    }

    /// Returns the share balance of the given account.
    #[must_use]
    pub fn share_balance(&self, account: AccountId) -> Amount {
        self.shares.get(&account).copied().unwrap_or(Amount::ZERO)
    }

    /// Returns the total outstanding share supply.
    #[must_use]
    pub const fn total_shares(&self) -> Amount {
        self.total_shares
    }

    /// Returns the number of swaps executed on this pool.
    #[must_use]
    pub const fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Mints `amount` share tokens to `account`.
    ///
    /// Restricted to the controlling router.
    pub(crate) fn mint(&mut self, account: AccountId, amount: Amount) -> Result<(), RouterError> {
        let balance = self.share_balance(account);
        let new_balance = balance
            .checked_add(&amount)
            .ok_or(RouterError::Overflow("share balance overflow"))?;
        let new_total = self
            .total_shares
            .checked_add(&amount)
            .ok_or(RouterError::Overflow("share supply overflow"))?;

        self.shares.insert(account, new_balance);
        self.total_shares = new_total;
        self.touch();
        Ok(())
    }

    /// Burns `amount` share tokens from `account`.
    ///
    /// Restricted to the controlling router. Fails with
    /// [`RouterError::InsufficientShareBalance`] if the account holds
    /// fewer shares than requested.
    pub(crate) fn burn(&mut self, account: AccountId, amount: Amount) -> Result<(), RouterError> {
        let balance = self.share_balance(account);
        let new_balance = balance
            .checked_sub(&amount)
            .ok_or(RouterError::InsufficientShareBalance(self.address))?;
        let new_total = self
            .total_shares
            .checked_sub(&amount)
            .ok_or(RouterError::Overflow("share supply underflow"))?;

        if new_balance.is_zero() {
            self.shares.remove(&account);
        } else {
            self.shares.insert(account, new_balance);
        }
        self.total_shares = new_total;
        self.touch();
        Ok(())
    }

    /// Authorizes `spender` to move up to `amount` of `token` out of the
    /// pool's ledger account.
    ///
    /// Restricted to the controlling router. The ledger's transfer
    /// primitive requires prior authorization from the current holder, so
    /// every pool-to-caller payout is preceded by this call.
    pub(crate) fn approve_spend<L>(
        &self,
        ledger: &L,
        token: TokenId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), RouterError>
    where
        L: TokenLedger + ?Sized,
    {
        if !self.pair.contains(token) {
            return Err(RouterError::NotPoolToken(token));
        }
        ledger.approve(token, self.address, spender, amount)?;
        Ok(())
    }

    /// Records a completed swap in the pool metadata.
    pub(crate) fn note_swap(&mut self) {
        self.swap_count = self.swap_count.saturating_add(1);
        self.touch();
    }

    fn touch(&mut self) {
        self.last_modified_at = Utc::now();
    }
}

/// Lightweight serializable summary of a pool.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
    /// Pool ledger account address.
    pub address: AccountId,
    /// First token of the canonical pair.
    pub token_a: TokenId,
    /// Second token of the canonical pair.
    pub token_b: TokenId,
    /// Total outstanding share supply.
    pub total_shares: Amount,
    /// Number of swaps executed.
    pub swap_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Pool> for PoolSummary {
    fn from(pool: &Pool) -> Self {
        Self {
            address: pool.address,
            token_a: pool.pair.first(),
            token_b: pool.pair.second(),
            total_shares: pool.total_shares,
            swap_count: pool.swap_count,
            created_at: pool.created_at,
        }
    }
}
