//! Value types exchanged with the ledger.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by a ledger client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The signing agent refused to sign the request.
    #[error("request rejected by signing agent: {0}")]
    Rejected(String),

    /// The account cannot pay for the write.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Transport failure or unreachable node.
    #[error("network error: {0}")]
    Network(String),

    /// The write was mined but did not take effect.
    #[error("transaction reverted: {0}")]
    Reverted(String),
}

/// Optional hints forwarded with an append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOptions {
    /// Upper bound on gas the write may consume.
    pub gas_limit: Option<u64>,
}

impl AppendOptions {
    pub fn with_gas_limit(gas_limit: u64) -> Self {
        Self {
            gas_limit: Some(gas_limit),
        }
    }
}

/// Proof that a write was finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction hash assigned when the write was accepted.
    pub hash: String,
}

/// Token for an open live subscription.
///
/// Not `Clone`; `unsubscribe` consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: Uuid,
}

impl SubscriptionHandle {
    /// Creates a handle with a fresh id. Intended for ledger client implementations.
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for SubscriptionHandle {
    fn default() -> Self {
        Self::new()
    }
}
