//! Canonically ordered pair of distinct tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TokenId;
use crate::error::RouterError;

/// An unordered pair of distinct tokens, canonically sorted by id.
///
/// The canonical ordering guarantees `token_a < token_b`, so `(X, Y)` and
/// `(Y, X)` construct equal pairs and deduplicate to one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token_a: TokenId,
    token_b: TokenId,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPair`] if both ids are identical.
    pub fn new(token1: TokenId, token2: TokenId) -> Result<Self, RouterError> {
        if token1 == token2 {
            return Err(RouterError::InvalidPair(
                "a pair requires two distinct token ids",
            ));
        }

        let (token_a, token_b) = if token1 < token2 {
            (token1, token2)
        } else {
            (token2, token1)
        };

        Ok(Self { token_a, token_b })
    }

    /// Returns the first token (lower id).
    #[must_use]
    pub const fn first(&self) -> TokenId {
        self.token_a
    }

    /// Returns the second token (higher id).
    #[must_use]
    pub const fn second(&self) -> TokenId {
        self.token_b
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: TokenId) -> bool {
        self.token_a == token || self.token_b == token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotPoolToken`] if `token` is not in the pair.
    pub fn other(&self, token: TokenId) -> Result<TokenId, RouterError> {
        if token == self.token_a {
            Ok(self.token_b)
        } else if token == self.token_b {
            Ok(self.token_a)
        } else {
            Err(RouterError::NotPoolToken(token))
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_uuid(uuid::Uuid::from_bytes([byte; 16]))
    }

    #[test]
    fn valid_pair_preserves_order() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(1));
        assert_eq!(pair.second(), tok(2));
    }

    #[test]
    fn auto_sorts_reversed_input() {
        let Ok(pair) = TokenPair::new(tok(2), tok(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(1));
        assert_eq!(pair.second(), tok(2));
    }

    #[test]
    fn equality_of_both_orders() {
        let (Ok(p1), Ok(p2)) = (TokenPair::new(tok(1), tok(2)), TokenPair::new(tok(2), tok(1)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn rejects_identical_ids() {
        let result = TokenPair::new(tok(1), tok(1));
        assert!(matches!(result, Err(RouterError::InvalidPair(_))));
    }

    #[test]
    fn contains_both_members_only() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(tok(1)));
        assert!(pair.contains(tok(2)));
        assert!(!pair.contains(tok(3)));
    }

    #[test]
    fn other_returns_counterpart() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.other(tok(1)), Ok(tok(2)));
        assert_eq!(pair.other(tok(2)), Ok(tok(1)));
    }

    #[test]
    fn other_rejects_foreign_token() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            pair.other(tok(3)),
            Err(RouterError::NotPoolToken(_))
        ));
    }

    #[test]
    fn display_joins_ids() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        let s = format!("{pair}");
        assert!(s.contains('/'));
    }

    #[test]
    fn hash_equal_for_both_orders() {
        use std::collections::HashMap;
        let (Ok(p1), Ok(p2)) = (TokenPair::new(tok(1), tok(2)), TokenPair::new(tok(2), tok(1)))
        else {
            panic!("expected Ok");
        };
        let mut map = HashMap::new();
        map.insert(p1, "pool");
        assert_eq!(map.get(&p2), Some(&"pool"));
    }
}
