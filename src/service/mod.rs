//! Service layer: the router's public call surface.
//!
//! [`Router`] validates every precondition of an entry point before
//! touching any state, then delegates to the pool and the ledger.

pub mod router;

pub use router::Router;
