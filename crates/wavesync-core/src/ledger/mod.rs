//! Ledger collaborator module.
//!
//! The ledger is an opaque append-only service. This module only describes the
//! boundary the core consumes; concrete clients live in the infrastructure crate.
//!
//! # Module Structure
//!
//! - `model`: Boundary value types (`AppendOptions`, `Receipt`, `SubscriptionHandle`, `LedgerError`)
//! - `client`: The `LedgerClient` and `PendingWrite` traits

mod client;
mod model;

// Re-export public API
pub use client::{LedgerClient, LiveHandler, PendingWrite};
pub use model::{AppendOptions, LedgerError, Receipt, SubscriptionHandle};
