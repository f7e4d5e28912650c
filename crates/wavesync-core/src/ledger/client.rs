//! Ledger client traits.

use async_trait::async_trait;
use std::sync::Arc;

use super::model::{AppendOptions, LedgerError, Receipt, SubscriptionHandle};
use crate::entry::RawEntry;

/// Callback invoked once per wave appended to the ledger.
///
/// May be called from any task, in any interleaving with other ledger calls.
pub type LiveHandler = Arc<dyn Fn(RawEntry) + Send + Sync>;

/// A write that was accepted and is waiting to be mined.
#[async_trait]
pub trait PendingWrite: Send {
    /// Transaction hash, known as soon as the write is accepted.
    fn hash(&self) -> &str;

    /// Waits for finalization.
    ///
    /// # Errors
    ///
    /// Returns the ledger's reason when the write failed to finalize.
    async fn wait(self: Box<Self>) -> Result<Receipt, LedgerError>;
}

/// The append-only wave ledger as seen by the core.
///
/// Implementations decide transport and signing; the core only relies on the
/// contract described by each method.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Returns every wave recorded so far, in ledger order.
    async fn read_all(&self) -> Result<Vec<RawEntry>, LedgerError>;

    /// Submits a new wave. Returns once the write is accepted, before it is mined.
    async fn append(
        &self,
        text: &str,
        options: &AppendOptions,
    ) -> Result<Box<dyn PendingWrite>, LedgerError>;

    /// Registers `handler` for every wave appended from now on.
    async fn subscribe(&self, handler: LiveHandler) -> Result<SubscriptionHandle, LedgerError>;

    /// Removes a subscription. Unknown handles are ignored.
    async fn unsubscribe(&self, handle: SubscriptionHandle);

    /// Returns the number of waves recorded so far.
    async fn total_count(&self) -> Result<u64, LedgerError>;
}
