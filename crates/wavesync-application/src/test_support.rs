//! Mock collaborators shared by the unit tests of this crate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;
use uuid::Uuid;

use wavesync_core::entry::{Address, RawEntry};
use wavesync_core::ledger::{
    AppendOptions, LedgerClient, LedgerError, LiveHandler, PendingWrite, Receipt,
    SubscriptionHandle,
};
use wavesync_core::session::{AgentError, SigningAgent};

use crate::session_manager::ConnectionObserver;

pub const ACCOUNT: &str = "0x00000000000000000000000000000000000a11ce";

static NEXT_HASH: AtomicUsize = AtomicUsize::new(1);

fn next_hash() -> String {
    format!("0x{:064x}", NEXT_HASH.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Signing agent
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentBehavior {
    Approve,
    Reject,
    Unavailable,
}

pub struct MockAgent {
    behavior: AgentBehavior,
    authorized: Mutex<bool>,
    prompts: AtomicUsize,
}

impl MockAgent {
    pub fn new(behavior: AgentBehavior) -> Self {
        Self {
            behavior,
            authorized: Mutex::new(false),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn pre_authorized(self) -> Self {
        *self.authorized.lock().unwrap() = true;
        self
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SigningAgent for MockAgent {
    async fn authorized_identity(&self) -> Result<Option<Address>, AgentError> {
        if self.behavior == AgentBehavior::Unavailable {
            return Err(AgentError::Unavailable("no agent".into()));
        }
        let authorized = *self.authorized.lock().unwrap();
        Ok(authorized.then(|| Address::from(ACCOUNT)))
    }

    async fn request_authorization(&self) -> Result<Address, AgentError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            AgentBehavior::Approve => {
                *self.authorized.lock().unwrap() = true;
                Ok(Address::from(ACCOUNT))
            }
            AgentBehavior::Reject => Err(AgentError::Rejected("user rejected".into())),
            AgentBehavior::Unavailable => Err(AgentError::Unavailable("no agent".into())),
        }
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    connected: Mutex<Vec<Address>>,
}

impl RecordingObserver {
    pub fn connected(&self) -> Vec<Address> {
        self.connected.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectionObserver for RecordingObserver {
    async fn on_session_connected(&self, address: &Address) {
        self.connected.lock().unwrap().push(address.clone());
    }
}

// ============================================================================
// Ledger
// ============================================================================

/// How the next accepted write finalizes.
pub enum WriteOutcome {
    Confirm,
    Fail(LedgerError),
    /// Finalizes with whatever is sent on the channel.
    Gated(oneshot::Receiver<Result<(), LedgerError>>),
    /// Never finalizes.
    Stall,
}

struct MockWrite {
    hash: String,
    outcome: WriteOutcome,
}

#[async_trait]
impl PendingWrite for MockWrite {
    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self: Box<Self>) -> Result<Receipt, LedgerError> {
        let receipt = Receipt {
            hash: self.hash.clone(),
        };
        match self.outcome {
            WriteOutcome::Confirm => Ok(receipt),
            WriteOutcome::Fail(err) => Err(err),
            WriteOutcome::Gated(rx) => match rx.await {
                Ok(result) => result.map(|_| receipt),
                Err(_) => Err(LedgerError::Network("gate dropped".into())),
            },
            WriteOutcome::Stall => std::future::pending().await,
        }
    }
}

#[derive(Default)]
pub struct MockLedger {
    waves: Mutex<Vec<RawEntry>>,
    read_error: Mutex<Option<LedgerError>>,
    subscribe_error: Mutex<Option<LedgerError>>,
    append_error: Mutex<Option<LedgerError>>,
    outcomes: Mutex<Vec<WriteOutcome>>,
    handlers: Mutex<HashMap<Uuid, LiveHandler>>,
    appended: Mutex<Vec<(String, AppendOptions)>>,
    reads: AtomicUsize,
    unsubscribes: AtomicUsize,
}

impl MockLedger {
    pub fn with_waves(waves: Vec<RawEntry>) -> Self {
        let ledger = Self::default();
        *ledger.waves.lock().unwrap() = waves;
        ledger
    }

    pub fn fail_reads(&self, err: LedgerError) {
        *self.read_error.lock().unwrap() = Some(err);
    }

    pub fn fail_subscribe(&self, err: LedgerError) {
        *self.subscribe_error.lock().unwrap() = Some(err);
    }

    pub fn fail_append(&self, err: LedgerError) {
        *self.append_error.lock().unwrap() = Some(err);
    }

    /// Queues how the next accepted write finalizes. Defaults to `Confirm`.
    pub fn next_outcome(&self, outcome: WriteOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }

    /// Pushes a live event to every open subscription.
    pub fn emit(&self, raw: RawEntry) {
        let handlers: Vec<LiveHandler> = self.handlers.lock().unwrap().values().cloned().collect();
        for handler in handlers {
            handler(raw.clone());
        }
    }

    pub fn appended(&self) -> Vec<(String, AppendOptions)> {
        self.appended.lock().unwrap().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn read_all(&self) -> Result<Vec<RawEntry>, LedgerError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.waves.lock().unwrap().clone())
    }

    async fn append(
        &self,
        text: &str,
        options: &AppendOptions,
    ) -> Result<Box<dyn PendingWrite>, LedgerError> {
        self.appended
            .lock()
            .unwrap()
            .push((text.to_string(), options.clone()));
        if let Some(err) = self.append_error.lock().unwrap().take() {
            return Err(err);
        }
        let mut outcomes = self.outcomes.lock().unwrap();
        let outcome = if outcomes.is_empty() {
            WriteOutcome::Confirm
        } else {
            outcomes.remove(0)
        };
        Ok(Box::new(MockWrite {
            hash: next_hash(),
            outcome,
        }))
    }

    async fn subscribe(&self, handler: LiveHandler) -> Result<SubscriptionHandle, LedgerError> {
        if let Some(err) = self.subscribe_error.lock().unwrap().clone() {
            return Err(err);
        }
        let handle = SubscriptionHandle::new();
        self.handlers.lock().unwrap().insert(handle.id(), handler);
        Ok(handle)
    }

    async fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        self.handlers.lock().unwrap().remove(&handle.id());
    }

    async fn total_count(&self) -> Result<u64, LedgerError> {
        Ok(self.waves.lock().unwrap().len() as u64)
    }
}
