//! In-memory token ledger.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{LedgerError, TokenLedger};
use crate::domain::{AccountId, Amount, TokenId};

/// A self-contained [`TokenLedger`] backed by in-memory maps.
///
/// Balances are keyed by `(token, account)` and allowances by
/// `(token, owner, spender)`. Both maps sit behind `std::sync::RwLock`s;
/// a poisoned lock is recovered rather than propagated, since every
/// mutation here is a single insert that cannot leave the map in a
/// half-written state.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<(TokenId, AccountId), Amount>>,
    allowances: RwLock<HashMap<(TokenId, AccountId, AccountId), Amount>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, token: TokenId, account: AccountId) -> Amount {
        let balances = self
            .balances
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        balances
            .get(&(token, account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> Amount {
        let allowances = self
            .allowances
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn approve(
        &self,
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut allowances = self
            .allowances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if amount.is_zero() {
            allowances.remove(&(token, owner, spender));
        } else {
            allowances.insert((token, owner, spender), amount);
        }
        Ok(())
    }

    fn transfer_from(
        &self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        // Take both locks for the whole transfer so allowance and balance
        // move together or not at all.
        let mut allowances = self
            .allowances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut balances = self
            .balances
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let granted = allowances
            .get(&(token, from, spender))
            .copied()
            .unwrap_or(Amount::ZERO);
        let remaining = granted
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientAllowance)?;

        let from_balance = balances
            .get(&(token, from))
            .copied()
            .unwrap_or(Amount::ZERO);
        let new_from = from_balance
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance)?;

        let to_balance = balances.get(&(token, to)).copied().unwrap_or(Amount::ZERO);
        let new_to = to_balance
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        if remaining.is_zero() {
            allowances.remove(&(token, from, spender));
        } else {
            allowances.insert((token, from, spender), remaining);
        }
        balances.insert((token, from), new_from);
        balances.insert((token, to), new_to);
        Ok(())
    }

    fn mint(&self, token: TokenId, account: AccountId, amount: Amount) -> Result<(), LedgerError> {
        let mut balances = self
            .balances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let balance = balances
            .get(&(token, account))
            .copied()
            .unwrap_or(Amount::ZERO);
        let new_balance = balance
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        balances.insert((token, account), new_balance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InMemoryLedger, TokenId, AccountId, AccountId, AccountId) {
        (
            InMemoryLedger::new(),
            TokenId::new(),
            AccountId::new(),
            AccountId::new(),
            AccountId::new(),
        )
    }

    #[test]
    fn fresh_ledger_has_zero_balances() {
        let (ledger, token, alice, bob, _) = setup();
        assert_eq!(ledger.balance_of(token, alice), Amount::ZERO);
        assert_eq!(ledger.allowance(token, alice, bob), Amount::ZERO);
    }

    #[test]
    fn mint_credits_account() {
        let (ledger, token, alice, _, _) = setup();
        assert_eq!(ledger.mint(token, alice, Amount::new(100)), Ok(()));
        assert_eq!(ledger.balance_of(token, alice), Amount::new(100));
    }

    #[test]
    fn mint_overflow_rejected() {
        let (ledger, token, alice, _, _) = setup();
        assert_eq!(ledger.mint(token, alice, Amount::MAX), Ok(()));
        assert_eq!(
            ledger.mint(token, alice, Amount::new(1)),
            Err(LedgerError::BalanceOverflow)
        );
    }

    #[test]
    fn transfer_requires_allowance() {
        let (ledger, token, alice, bob, spender) = setup();
        assert_eq!(ledger.mint(token, alice, Amount::new(100)), Ok(()));

        let result = ledger.transfer_from(token, spender, alice, bob, Amount::new(50));
        assert_eq!(result, Err(LedgerError::InsufficientAllowance));
        // Nothing moved.
        assert_eq!(ledger.balance_of(token, alice), Amount::new(100));
        assert_eq!(ledger.balance_of(token, bob), Amount::ZERO);
    }

    #[test]
    fn transfer_requires_balance() {
        let (ledger, token, alice, bob, spender) = setup();
        assert_eq!(
            ledger.approve(token, alice, spender, Amount::new(50)),
            Ok(())
        );

        let result = ledger.transfer_from(token, spender, alice, bob, Amount::new(50));
        assert_eq!(result, Err(LedgerError::InsufficientBalance));
        // Allowance untouched by the failed transfer.
        assert_eq!(ledger.allowance(token, alice, spender), Amount::new(50));
    }

    #[test]
    fn transfer_moves_balance_and_consumes_allowance() {
        let (ledger, token, alice, bob, spender) = setup();
        assert_eq!(ledger.mint(token, alice, Amount::new(100)), Ok(()));
        assert_eq!(
            ledger.approve(token, alice, spender, Amount::new(80)),
            Ok(())
        );

        assert_eq!(
            ledger.transfer_from(token, spender, alice, bob, Amount::new(30)),
            Ok(())
        );
        assert_eq!(ledger.balance_of(token, alice), Amount::new(70));
        assert_eq!(ledger.balance_of(token, bob), Amount::new(30));
        assert_eq!(ledger.allowance(token, alice, spender), Amount::new(50));
    }

    #[test]
    fn approve_replaces_previous_allowance() {
        let (ledger, token, alice, _, spender) = setup();
        assert_eq!(
            ledger.approve(token, alice, spender, Amount::new(80)),
            Ok(())
        );
        assert_eq!(
            ledger.approve(token, alice, spender, Amount::new(10)),
            Ok(())
        );
        assert_eq!(ledger.allowance(token, alice, spender), Amount::new(10));
    }

    #[test]
    fn balances_are_per_token() {
        let (ledger, token, alice, _, _) = setup();
        let other = TokenId::new();
        assert_eq!(ledger.mint(token, alice, Amount::new(5)), Ok(()));
        assert_eq!(ledger.balance_of(other, alice), Amount::ZERO);
    }

    #[test]
    fn zero_transfer_is_a_no_op() {
        let (ledger, token, alice, bob, spender) = setup();
        assert_eq!(
            ledger.transfer_from(token, spender, alice, bob, Amount::ZERO),
            Ok(())
        );
        assert_eq!(ledger.balance_of(token, bob), Amount::ZERO);
    }
}
