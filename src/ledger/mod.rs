//! External fungible-token ledger contract.
//!
//! The router does not implement a token system. Balances, allowances,
//! and transfers belong to an external collaborator described by the
//! [`TokenLedger`] trait; [`InMemoryLedger`] is the reference
//! implementation used by the test suite and by embedders that need a
//! self-contained ledger.

pub mod memory;

pub use memory::InMemoryLedger;

use crate::domain::{AccountId, Amount, TokenId};

/// Errors surfaced by a [`TokenLedger`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The source account holds less than the transfer amount.
    #[error("insufficient token balance")]
    InsufficientBalance,

    /// The spender's allowance is below the transfer amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A balance would exceed the representable range.
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Per-token balance, allowance, and transfer operations.
///
/// Transfers are pull-based: a spender may move tokens out of an account
/// only up to the allowance that account previously granted via
/// [`approve`](TokenLedger::approve). This mirrors how the router
/// operates: callers approve the router for their deposits, pools
/// approve the router for payouts.
///
/// Implementations must be safe to share across tasks (`Send + Sync`);
/// all methods take `&self` and use interior mutability.
pub trait TokenLedger: Send + Sync {
    /// Returns the balance of `account` for `token`.
    fn balance_of(&self, token: TokenId, account: AccountId) -> Amount;

    /// Returns the remaining amount of `token` that `spender` may move
    /// out of `owner`'s account.
    fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount;

    /// Sets (replaces) the allowance granted by `owner` to `spender`.
    ///
    /// # Errors
    ///
    /// Implementations may fail for implementation-specific reasons; the
    /// in-memory ledger never does.
    fn approve(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `token` from `from` to `to` on behalf of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if `spender`'s allowance
    ///   from `from` is below `amount`.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`LedgerError::BalanceOverflow`] if `to`'s balance would
    ///   overflow.
    fn transfer_from(
        &self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Creates `amount` of `token` in `account`.
    ///
    /// Test/demo-only supply creation; a production ledger would gate
    /// this behind its own issuance rules.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::BalanceOverflow`] if the balance would
    /// overflow.
    fn mint(&self, token: TokenId, account: AccountId, amount: Amount) -> Result<(), LedgerError>;
}
