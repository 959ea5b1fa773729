//! Router configuration loaded from environment variables.
//!
//! Follows 12-factor style: settings come from environment variables (or
//! a `.env` file via `dotenvy`). Programmatic construction is equally
//! supported; the service layer only ever sees the resolved values.

use crate::domain::AccountId;

/// Top-level router configuration.
///
/// Loaded once at startup via [`RouterConfig::from_env`], or built
/// directly when embedding.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// The single account authorized to create pools.
    pub admin: AccountId,
}

impl RouterConfig {
    /// Creates a configuration with the given admin account.
    #[must_use]
    pub const fn new(admin: AccountId) -> Self {
        Self { admin }
    }

    /// Loads configuration from environment variables.
    ///
    /// Reads `ROUTER_ADMIN` as a UUID. When the variable is not set, a
    /// fresh admin identity is generated; embedders that need a stable
    /// admin should set the variable or construct the config directly.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROUTER_ADMIN` is set but cannot be parsed as
    /// a UUID.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let admin = match std::env::var("ROUTER_ADMIN") {
            Ok(raw) => AccountId::from_uuid(raw.parse()?),
            Err(_) => AccountId::new(),
        };

        Ok(Self { admin })
    }
}
