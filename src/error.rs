//! Router error types with numeric reason codes.
//!
//! [`RouterError`] is the central error type for the crate. Every failed
//! precondition surfaces as a specific variant; nothing is silently
//! swallowed. Each variant maps to a stable numeric reason code.

use crate::domain::{AccountId, TokenId, TokenPair};
use crate::ledger::LedgerError;

/// Unified error enum for all router operations.
///
/// # Reason Code Ranges
///
/// | Range     | Category            |
/// |-----------|---------------------|
/// | 1000–1999 | Validation          |
/// | 2000–2999 | State / Not Found   |
/// | 3000–3999 | Arithmetic / Ledger |
/// | 4000–4999 | Pool-Specific       |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// The two token identifiers cannot form a pair.
    #[error("invalid pair: {0}")]
    InvalidPair(&'static str),

    /// No pool is registered for the canonical pair.
    #[error("no pool registered for pair {0}")]
    PoolNotFound(TokenPair),

    /// A pool is already registered for the canonical pair.
    #[error("pool already registered for pair {0}")]
    PoolExists(TokenPair),

    /// A non-admin account called an admin-restricted entry point.
    #[error("account {0} is not authorized to create pools")]
    Unauthorized(AccountId),

    /// The caller's ledger balance of the given token is below the
    /// requested amount.
    #[error("insufficient balance of token {0}")]
    InsufficientBalance(TokenId),

    /// The caller's share balance in the pool is below the requested
    /// withdrawal amount.
    #[error("insufficient share balance in pool {0}")]
    InsufficientShareBalance(AccountId),

    /// The token is not one of the pool's two registered tokens.
    #[error("token {0} is not part of the pool's pair")]
    NotPoolToken(TokenId),

    /// A swap or withdrawal was attempted against empty reserves.
    #[error("operation requires non-zero reserves")]
    ZeroReserve,

    /// Checked arithmetic exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Error propagated from the token ledger.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl RouterError {
    /// Returns the stable numeric reason code for this variant.
    #[must_use]
    pub const fn reason_code(&self) -> u32 {
        match self {
            Self::InvalidPair(_) => 1001,
            Self::PoolNotFound(_) => 2001,
            Self::PoolExists(_) => 2002,
            Self::Unauthorized(_) => 2003,
            Self::Overflow(_) => 3001,
            Self::Ledger(_) => 3002,
            Self::InsufficientBalance(_) => 4001,
            Self::InsufficientShareBalance(_) => 4002,
            Self::NotPoolToken(_) => 4003,
            Self::ZeroReserve => 4004,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn sample_pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(TokenId::new(), TokenId::new()) else {
            panic!("distinct fresh ids form a valid pair");
        };
        pair
    }

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(RouterError::InvalidPair("x").reason_code(), 1001);
        assert_eq!(RouterError::PoolNotFound(sample_pair()).reason_code(), 2001);
        assert_eq!(RouterError::PoolExists(sample_pair()).reason_code(), 2002);
        assert_eq!(
            RouterError::Unauthorized(AccountId::new()).reason_code(),
            2003
        );
        assert_eq!(RouterError::Overflow("x").reason_code(), 3001);
        assert_eq!(
            RouterError::InsufficientBalance(TokenId::new()).reason_code(),
            4001
        );
        assert_eq!(
            RouterError::InsufficientShareBalance(AccountId::new()).reason_code(),
            4002
        );
        assert_eq!(
            RouterError::NotPoolToken(TokenId::new()).reason_code(),
            4003
        );
        assert_eq!(RouterError::ZeroReserve.reason_code(), 4004);
    }

    #[test]
    fn ledger_error_converts() {
        let err: RouterError = LedgerError::InsufficientBalance.into();
        assert_eq!(err.reason_code(), 3002);
        assert!(matches!(err, RouterError::Ledger(_)));
    }

    #[test]
    fn display_names_the_pair() {
        let pair = sample_pair();
        let msg = RouterError::PoolNotFound(pair).to_string();
        assert!(msg.contains("no pool registered"));
    }
}
