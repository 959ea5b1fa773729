//! Type-safe token identifier.
//!
//! [`TokenId`] wraps a [`uuid::Uuid`] (v4) and carries a total order. The
//! order has no semantic meaning beyond deduplication: it is what lets
//! `(X, Y)` and `(Y, X)` canonicalize to the same
//! [`TokenPair`](super::TokenPair).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a fungible token on the ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TokenId(uuid::Uuid);

impl TokenId {
    /// Creates a new random `TokenId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `TokenId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for TokenId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}
