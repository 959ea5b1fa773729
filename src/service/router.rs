//! Router: registry-backed entry points for pool creation, liquidity,
//! and swaps.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::RouterConfig;
use crate::domain::{AccountId, Amount, Pool, PoolRegistry, PoolSummary, TokenId, TokenPair};
use crate::error::RouterError;
use crate::ledger::{LedgerError, TokenLedger};
use crate::math;

/// Entry points over an admin-curated registry of constant-product pools.
///
/// The router owns the [`PoolRegistry`], a reference to the external
/// [`TokenLedger`], the admin identity, and its own ledger account: the
/// spender identity through which all token movement flows. Callers
/// grant the router an allowance for deposits; pools grant it one for
/// payouts.
///
/// # Atomicity
///
/// Every mutating entry point serializes behind a call guard and
/// validates all of its preconditions (existence, balances, allowances,
/// share balances, arithmetic) before the first state change, so a call
/// either fully commits or returns an error having changed nothing.
pub struct Router<L> {
    ledger: Arc<L>,
    registry: Arc<PoolRegistry>,
    admin: AccountId,
    account: AccountId,
    call_guard: Mutex<()>,
}

impl<L> Router<L>
where
    L: TokenLedger,
{
    /// Creates a router over the given ledger with the given admin.
    ///
    /// The router's own ledger account is generated here and never
    /// changes.
    #[must_use]
    pub fn new(ledger: Arc<L>, admin: AccountId) -> Self {
        Self {
            ledger,
            registry: Arc::new(PoolRegistry::new()),
            admin,
            account: AccountId::new(),
            call_guard: Mutex::new(()),
        }
    }

    /// Creates a router from a resolved [`RouterConfig`].
    #[must_use]
    pub fn from_config(ledger: Arc<L>, config: &RouterConfig) -> Self {
        Self::new(ledger, config.admin)
    }

    /// Returns the admin account.
    #[must_use]
    pub const fn admin(&self) -> AccountId {
        self.admin
    }

    /// Returns the router's own ledger account, the spender that
    /// callers and pools grant allowances to.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns a reference to the inner [`PoolRegistry`].
    #[must_use]
    pub const fn registry(&self) -> &Arc<PoolRegistry> {
        &self.registry
    }

    /// Creates a new pool for the unordered pair `(token_x, token_y)`
    /// and returns its ledger address.
    ///
    /// # Errors
    ///
    /// - [`RouterError::Unauthorized`] if `caller` is not the admin.
    /// - [`RouterError::InvalidPair`] if the two token ids are identical.
    /// - [`RouterError::PoolExists`] if the canonical pair is already
    ///   registered (in either order).
    pub async fn create_pool(
        &self,
        caller: AccountId,
        token_x: TokenId,
        token_y: TokenId,
    ) -> Result<AccountId, RouterError> {
        if caller != self.admin {
            return Err(RouterError::Unauthorized(caller));
        }
        let pair = TokenPair::new(token_x, token_y)?;

        let _guard = self.call_guard.lock().await;
        let address = self.registry.insert(Pool::new(pair)).await?;

        tracing::info!(%address, %pair, "pool created");
        Ok(address)
    }

    /// Returns the ledger address of the pair's pool, or `None` if no
    /// pool is registered. Order-independent; identical ids resolve to
    /// `None`.
    pub async fn pool_address(&self, token_x: TokenId, token_y: TokenId) -> Option<AccountId> {
        let Ok(pair) = TokenPair::new(token_x, token_y) else {
            return None;
        };
        self.registry.address_of(pair).await
    }

    /// Deposits `amount_x` of `token_x` and `amount_y` of `token_y` into
    /// the pair's pool and mints `amount_x * amount_y` share tokens to
    /// the caller. Returns the minted share amount.
    ///
    /// The caller must hold both amounts and have approved the router
    /// (see [`Router::account`]) for at least both amounts.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPair`] if the two token ids are identical.
    /// - [`RouterError::PoolNotFound`] if the pair is unregistered.
    /// - [`RouterError::InsufficientBalance`] if the caller's balance of
    ///   either token is below the requested amount.
    /// - [`RouterError::Ledger`] if the router's allowance is too small.
    /// - [`RouterError::Overflow`] if the share product exceeds `u128`.
    pub async fn add_liquidity(
        &self,
        caller: AccountId,
        token_x: TokenId,
        token_y: TokenId,
        amount_x: Amount,
        amount_y: Amount,
    ) -> Result<Amount, RouterError> {
        let pair = TokenPair::new(token_x, token_y)?;

        let _guard = self.call_guard.lock().await;
        let pool_lock = self.registry.get(pair).await?;
        let mut pool = pool_lock.write().await;
        let pool_address = pool.address();

        self.ensure_deposit(caller, token_x, amount_x, pool_address)?;
        self.ensure_deposit(caller, token_y, amount_y, pool_address)?;
        let shares = math::deposit_shares(amount_x, amount_y)?;

        // First mutation; fails atomically if the share supply would
        // overflow.
        pool.mint(caller, shares)?;
        self.ledger
            .transfer_from(token_x, self.account, caller, pool_address, amount_x)?;
        self.ledger
            .transfer_from(token_y, self.account, caller, pool_address, amount_y)?;

        tracing::debug!(pool = %pool_address, %caller, %shares, "liquidity added");
        Ok(shares)
    }

    /// Burns `share_amount` of the caller's pool shares and pays out
    /// both tokens proportionally:
    /// `share_amount * reserve(token) / (reserve_x * reserve_y)` each,
    /// truncating. Returns the `(token_x, token_y)` payouts.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPair`] if the two token ids are identical.
    /// - [`RouterError::PoolNotFound`] if the pair is unregistered.
    /// - [`RouterError::InsufficientShareBalance`] if the caller holds
    ///   fewer shares than requested.
    /// - [`RouterError::ZeroReserve`] if the reserve product is zero.
    /// - [`RouterError::Ledger`] if a payout exceeds the pool's reserve.
    pub async fn remove_liquidity(
        &self,
        caller: AccountId,
        token_x: TokenId,
        token_y: TokenId,
        share_amount: Amount,
    ) -> Result<(Amount, Amount), RouterError> {
        let pair = TokenPair::new(token_x, token_y)?;

        let _guard = self.call_guard.lock().await;
        let pool_lock = self.registry.get(pair).await?;
        let mut pool = pool_lock.write().await;
        let pool_address = pool.address();

        if pool.share_balance(caller) < share_amount {
            return Err(RouterError::InsufficientShareBalance(pool_address));
        }

        // Live reserves; never cached on the pool.
        let reserve_x = self.ledger.balance_of(token_x, pool_address);
        let reserve_y = self.ledger.balance_of(token_y, pool_address);

        let payout_x = math::withdrawal_payout(share_amount, reserve_x, reserve_x, reserve_y)?;
        let payout_y = math::withdrawal_payout(share_amount, reserve_y, reserve_x, reserve_y)?;

        self.ensure_payout(pool_address, token_x, payout_x, caller)?;
        self.ensure_payout(pool_address, token_y, payout_y, caller)?;

        pool.burn(caller, share_amount)?;
        pool.approve_spend(self.ledger.as_ref(), token_x, self.account, payout_x)?;
        self.ledger
            .transfer_from(token_x, self.account, pool_address, caller, payout_x)?;
        pool.approve_spend(self.ledger.as_ref(), token_y, self.account, payout_y)?;
        self.ledger
            .transfer_from(token_y, self.account, pool_address, caller, payout_y)?;

        tracing::debug!(
            pool = %pool_address,
            %caller,
            %share_amount,
            %payout_x,
            %payout_y,
            "liquidity removed"
        );
        Ok((payout_x, payout_y))
    }

    /// Sells `amount_in` of `token_in` for `token_out` against the
    /// pair's pool and returns the output amount.
    ///
    /// The quote is the constant-product rule over the pool's two live
    /// reserves: `k = reserve_in * reserve_out` stays fixed, the output
    /// reserve is re-derived by truncating division, and an output that
    /// would fully drain the reserve is decremented by one. No fee is
    /// charged and no minimum-output bound is enforced; the caller bears
    /// the full price impact.
    ///
    /// # Errors
    ///
    /// - [`RouterError::InvalidPair`] if the two token ids are identical.
    /// - [`RouterError::PoolNotFound`] if the pair is unregistered.
    /// - [`RouterError::InsufficientBalance`] if the caller's balance of
    ///   `token_in` is below `amount_in`.
    /// - [`RouterError::ZeroReserve`] if either reserve is zero.
    /// - [`RouterError::Ledger`] if the router's allowance is too small.
    pub async fn swap(
        &self,
        caller: AccountId,
        token_in: TokenId,
        amount_in: Amount,
        token_out: TokenId,
    ) -> Result<Amount, RouterError> {
        let pair = TokenPair::new(token_in, token_out)?;

        let _guard = self.call_guard.lock().await;
        let pool_lock = self.registry.get(pair).await?;
        let mut pool = pool_lock.write().await;
        let pool_address = pool.address();

        self.ensure_deposit(caller, token_in, amount_in, pool_address)?;

        // Live reserves of the pool's fixed token pair, oriented by the
        // caller's input token.
        let reserve_in = self.ledger.balance_of(token_in, pool_address);
        let reserve_out = self.ledger.balance_of(token_out, pool_address);
        let amount_out = math::swap_output(reserve_in, reserve_out, amount_in)?;

        self.ensure_payout(pool_address, token_out, amount_out, caller)?;

        self.ledger
            .transfer_from(token_in, self.account, caller, pool_address, amount_in)?;
        pool.approve_spend(self.ledger.as_ref(), token_out, self.account, amount_out)?;
        self.ledger
            .transfer_from(token_out, self.account, pool_address, caller, amount_out)?;
        pool.note_swap();

        tracing::debug!(
            pool = %pool_address,
            %caller,
            %amount_in,
            %amount_out,
            "swap executed"
        );
        Ok(amount_out)
    }

    /// Returns summaries of all registered pools.
    pub async fn list_pools(&self) -> Vec<PoolSummary> {
        self.registry.list().await
    }

    /// Checks that `caller` can fund a transfer of `amount` of `token`
    /// into the pool: balance, router allowance, and recipient headroom.
    fn ensure_deposit(
        &self,
        caller: AccountId,
        token: TokenId,
        amount: Amount,
        pool_address: AccountId,
    ) -> Result<(), RouterError> {
        if self.ledger.balance_of(token, caller) < amount {
            return Err(RouterError::InsufficientBalance(token));
        }
        if self.ledger.allowance(token, caller, self.account) < amount {
            return Err(LedgerError::InsufficientAllowance.into());
        }
        let pool_balance = self.ledger.balance_of(token, pool_address);
        if pool_balance.checked_add(&amount).is_none() {
            return Err(LedgerError::BalanceOverflow.into());
        }
        Ok(())
    }

    /// Checks that the pool can pay out `amount` of `token` to `caller`:
    /// reserve coverage and recipient headroom.
    fn ensure_payout(
        &self,
        pool_address: AccountId,
        token: TokenId,
        amount: Amount,
        caller: AccountId,
    ) -> Result<(), RouterError> {
        if self.ledger.balance_of(token, pool_address) < amount {
            return Err(LedgerError::InsufficientBalance.into());
        }
        let caller_balance = self.ledger.balance_of(token, caller);
        if caller_balance.checked_add(&amount).is_none() {
            return Err(LedgerError::BalanceOverflow.into());
        }
        Ok(())
    }
}

impl<L> fmt::Debug for Router<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("admin", &self.admin)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
