//! In-process wave ledger.
//!
//! Used by the CLI demo and by integration tests. Writes are mined after an
//! optional delay and then pushed to every live subscriber, the same way a
//! contract event would be.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use wavesync_core::entry::{Address, RawEntry};
use wavesync_core::ledger::{
    AppendOptions, LedgerClient, LedgerError, LiveHandler, PendingWrite, Receipt,
    SubscriptionHandle,
};

#[derive(Default)]
struct LedgerState {
    waves: Vec<RawEntry>,
    subscribers: HashMap<Uuid, LiveHandler>,
    read_error: Option<LedgerError>,
    subscribe_error: Option<LedgerError>,
    append_error: Option<LedgerError>,
    revert_reason: Option<String>,
}

/// Wave ledger held in memory.
///
/// Every append is signed by a single configured account.
#[derive(Clone)]
pub struct InMemoryLedger {
    signer: Address,
    mining_delay: Duration,
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            mining_delay: Duration::ZERO,
            state: Arc::new(Mutex::new(LedgerState::default())),
        }
    }

    /// Seeds the history returned by `read_all`.
    pub fn with_waves(self, waves: Vec<RawEntry>) -> Self {
        self.lock().waves = waves;
        self
    }

    /// Delays every confirmation by `delay`.
    pub fn with_mining_delay(mut self, delay: Duration) -> Self {
        self.mining_delay = delay;
        self
    }

    /// Makes every `read_all` fail until cleared.
    pub fn fail_reads(&self, err: Option<LedgerError>) {
        self.lock().read_error = err;
    }

    /// Makes every `subscribe` fail until cleared.
    pub fn fail_subscriptions(&self, err: Option<LedgerError>) {
        self.lock().subscribe_error = err;
    }

    /// Refuses the next append.
    pub fn reject_next_append(&self, err: LedgerError) {
        self.lock().append_error = Some(err);
    }

    /// Reverts the next write that gets mined.
    pub fn revert_next_write(&self, reason: impl Into<String>) {
        self.lock().revert_reason = Some(reason.into());
    }

    /// Pushes `raw` to every subscriber without recording it.
    ///
    /// Simulates a node redelivering an event already seen.
    pub fn redeliver(&self, raw: RawEntry) {
        let handlers = self.handlers();
        for handler in handlers {
            handler(raw.clone());
        }
    }

    pub fn waves(&self) -> Vec<RawEntry> {
        self.lock().waves.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn mine(&self, text: &str) -> Result<RawEntry, LedgerError> {
        let raw = {
            let mut state = self.lock();
            if let Some(reason) = state.revert_reason.take() {
                return Err(LedgerError::Reverted(reason));
            }
            let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
            // Each write lands in its own block.
            let timestamp = state
                .waves
                .iter()
                .map(|w| w.timestamp.saturating_add(1))
                .max()
                .map_or(now, |next| next.max(now));
            let raw = RawEntry::new(self.signer.as_str(), timestamp, text);
            state.waves.push(raw.clone());
            raw
        };

        for handler in self.handlers() {
            handler(raw.clone());
        }
        Ok(raw)
    }

    fn handlers(&self) -> Vec<LiveHandler> {
        self.lock().subscribers.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

struct MemoryWrite {
    ledger: InMemoryLedger,
    hash: String,
    text: String,
}

#[async_trait]
impl PendingWrite for MemoryWrite {
    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self: Box<Self>) -> Result<Receipt, LedgerError> {
        if !self.ledger.mining_delay.is_zero() {
            tokio::time::sleep(self.ledger.mining_delay).await;
        }
        self.ledger.mine(&self.text)?;
        tracing::debug!("[InMemoryLedger] Mined {}", self.hash);
        Ok(Receipt { hash: self.hash })
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn read_all(&self) -> Result<Vec<RawEntry>, LedgerError> {
        let state = self.lock();
        match &state.read_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.waves.clone()),
        }
    }

    async fn append(
        &self,
        text: &str,
        options: &AppendOptions,
    ) -> Result<Box<dyn PendingWrite>, LedgerError> {
        if let Some(err) = self.lock().append_error.take() {
            return Err(err);
        }

        let hash = format!("0x{}", Uuid::new_v4().simple());
        tracing::debug!(
            "[InMemoryLedger] Accepted {} (gas limit: {:?})",
            hash,
            options.gas_limit
        );
        Ok(Box::new(MemoryWrite {
            ledger: self.clone(),
            hash,
            text: text.to_string(),
        }))
    }

    async fn subscribe(&self, handler: LiveHandler) -> Result<SubscriptionHandle, LedgerError> {
        let mut state = self.lock();
        if let Some(err) = &state.subscribe_error {
            return Err(err.clone());
        }
        let handle = SubscriptionHandle::new();
        state.subscribers.insert(handle.id(), handler);
        Ok(handle)
    }

    async fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.lock().subscribers.remove(&handle.id());
    }

    async fn total_count(&self) -> Result<u64, LedgerError> {
        Ok(self.lock().waves.len() as u64)
    }
}
