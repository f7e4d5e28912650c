//! Keeps the wave log in step with the ledger and routes the user's writes.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;

use wavesync_core::config::PortalConfig;
use wavesync_core::entry::{Address, Entry, EntryLog, RawEntry};
use wavesync_core::error::{Result, WaveError};
use wavesync_core::ledger::{LedgerClient, LiveHandler, Receipt, SubscriptionHandle};
use wavesync_core::session::Session;
use wavesync_core::transaction::{PendingTransaction, TxPhase};

use crate::session_manager::ConnectionObserver;
use crate::status::StatusBoard;
use crate::transaction_tracker::TransactionTracker;

/// Outcome of syncing after the session became connected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries kept from the bulk read, if it succeeded.
    pub loaded: Option<usize>,
    /// Whether the live feed is open.
    pub subscribed: bool,
    /// Failures encountered along the way, in order.
    pub errors: Vec<WaveError>,
}

/// Orchestrates the bulk read, the live feed and the transaction tracker.
///
/// The log only ever receives entries that came from the ledger: the user's
/// own wave shows up once the live feed delivers it, never as a local echo.
pub struct SyncController {
    ledger: Arc<dyn LedgerClient>,
    log: Arc<Mutex<EntryLog>>,
    tracker: TransactionTracker,
    subscription: AsyncMutex<Option<SubscriptionHandle>>,
    total_waves: Mutex<Option<u64>>,
    status: StatusBoard,
}

impl SyncController {
    pub fn new(ledger: Arc<dyn LedgerClient>, config: &PortalConfig, status: StatusBoard) -> Self {
        let tracker = TransactionTracker::new(
            config.append_options(),
            config.confirmation_timeout(),
            status.clone(),
        );
        Self {
            ledger,
            log: Arc::new(Mutex::new(EntryLog::new())),
            tracker,
            subscription: AsyncMutex::new(None),
            total_waves: Mutex::new(None),
            status,
        }
    }

    /// Loads the full history, then opens the live feed.
    ///
    /// A failed read is reported and the subscription is still attempted. A
    /// subscription left over from an earlier connection is closed first.
    pub async fn on_session_connected(&self, address: &Address) -> SyncReport {
        let mut subscription = self.subscription.lock().await;
        let mut report = SyncReport::default();

        if let Some(stale) = subscription.take() {
            tracing::debug!("[SyncController] Closing previous subscription before resync");
            self.ledger.unsubscribe(stale).await;
        }

        tracing::info!("[SyncController] Syncing waves for {}", address);

        match self.ledger.read_all().await {
            Ok(raw) => {
                let entries = convert_all(raw);
                let kept = lock(&self.log).load_initial(entries);
                tracing::info!("[SyncController] Loaded {} waves", kept);
                report.loaded = Some(kept);
                self.status.notify();
            }
            Err(err) => {
                let err = WaveError::read_failed(err);
                tracing::warn!("[SyncController] {}", err);
                self.status.report(&err);
                report.errors.push(err);
            }
        }

        match self.ledger.subscribe(self.live_handler()).await {
            Ok(handle) => {
                tracing::debug!("[SyncController] Subscribed to new waves ({})", handle.id());
                *subscription = Some(handle);
                report.subscribed = true;
            }
            Err(err) => {
                let err = WaveError::subscribe_failed(err);
                tracing::warn!("[SyncController] {}", err);
                self.status.report(&err);
                report.errors.push(err);
            }
        }
        drop(subscription);

        self.refresh_total().await;
        report
    }

    /// Closes the live feed if it is open. Safe to call repeatedly.
    pub async fn on_teardown(&self) {
        let handle = self.subscription.lock().await.take();
        if let Some(handle) = handle {
            tracing::info!("[SyncController] Unsubscribing from new waves");
            self.ledger.unsubscribe(handle).await;
        }
    }

    /// Sends the user's wave through the transaction tracker.
    ///
    /// The wave is not added to the log here; it arrives through the live feed.
    pub async fn on_user_submit(&self, session: &Session, message: &str) -> Result<Receipt> {
        match self
            .tracker
            .submit(session, self.ledger.as_ref(), message)
            .await
        {
            Ok(receipt) => {
                self.status.clear_notice();
                self.refresh_total().await;
                Ok(receipt)
            }
            Err(err) => {
                self.status.report(&err);
                Err(err)
            }
        }
    }

    /// Merges one raw live event into the log.
    ///
    /// # Returns
    ///
    /// `true` if the entry was new.
    pub fn observe_live(&self, raw: RawEntry) -> bool {
        merge_live(&self.log, &self.status, raw)
    }

    pub fn entries(&self) -> Vec<Entry> {
        lock(&self.log).snapshot()
    }

    pub fn entry_count(&self) -> usize {
        lock(&self.log).len()
    }

    pub fn transaction(&self) -> Option<PendingTransaction> {
        self.tracker.current()
    }

    pub fn phase(&self) -> TxPhase {
        self.tracker.phase()
    }

    /// Last wave count read from the ledger.
    pub fn total_waves(&self) -> Option<u64> {
        *lock(&self.total_waves)
    }

    pub async fn is_subscribed(&self) -> bool {
        self.subscription.lock().await.is_some()
    }

    fn live_handler(&self) -> LiveHandler {
        let log = Arc::clone(&self.log);
        let status = self.status.clone();
        Arc::new(move |raw| {
            merge_live(&log, &status, raw);
        })
    }

    async fn refresh_total(&self) {
        match self.ledger.total_count().await {
            Ok(count) => {
                tracing::info!("[SyncController] Retrieved total wave count... {}", count);
                *lock(&self.total_waves) = Some(count);
                self.status.notify();
            }
            Err(err) => {
                tracing::warn!("[SyncController] Failed to read total wave count: {}", err);
            }
        }
    }
}

#[async_trait]
impl ConnectionObserver for SyncController {
    async fn on_session_connected(&self, address: &Address) {
        let report = SyncController::on_session_connected(self, address).await;
        if !report.errors.is_empty() {
            tracing::warn!(
                "[SyncController] Sync finished with {} error(s)",
                report.errors.len()
            );
        }
    }
}

fn merge_live(log: &Mutex<EntryLog>, status: &StatusBoard, raw: RawEntry) -> bool {
    let entry = match Entry::from_raw(raw) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!("[SyncController] Dropping live event: {}", err);
            return false;
        }
    };

    let appended = lock(log).observe_live(entry);
    if appended {
        tracing::debug!("[SyncController] New wave received");
        status.notify();
    } else {
        tracing::debug!("[SyncController] Ignoring redelivered wave");
    }
    appended
}

fn convert_all(raw: Vec<RawEntry>) -> Vec<Entry> {
    raw.into_iter()
        .filter_map(|raw| match Entry::from_raw(raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("[SyncController] Skipping wave: {}", err);
                None
            }
        })
        .collect()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|p| p.into_inner())
}
